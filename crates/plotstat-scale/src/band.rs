//! Band scales for categorical axes
//!
//! Divides a pixel range into equal slots, one per category, with optional
//! padding between bands (inner) and at the ends (outer). Bands are centred
//! in the range when padding leaves slack.

use crate::error::{ScaleError, ScaleResult};
use serde::{Deserialize, Serialize};

/// Categorical band layout
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    /// Number of categories
    count: usize,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    /// Create a band scale over `count` categories
    pub fn new(count: usize, range: (f64, f64)) -> ScaleResult<Self> {
        if count == 0 {
            return Err(ScaleError::invalid("band", "no categories"));
        }
        if !(range.0.is_finite() && range.1.is_finite()) {
            return Err(ScaleError::invalid(
                "band",
                format!("range [{}, {}] is not finite", range.0, range.1),
            ));
        }
        Ok(Self {
            count,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
        })
    }

    /// Set inner and outer padding to the same fraction of a step
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_padding_inner(padding).with_padding_outer(padding)
    }

    /// Gap between bands, as a fraction of a step in `[0, 1]`
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Gap before the first and after the last band, in steps
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    fn bounds(&self) -> (f64, f64, bool) {
        let (r0, r1) = self.range;
        if r1 < r0 {
            (r1, r0, true)
        } else {
            (r0, r1, false)
        }
    }

    /// Distance between the starts of adjacent bands
    pub fn step(&self) -> f64 {
        let (start, stop, _) = self.bounds();
        let slots = self.count as f64 - self.padding_inner + 2.0 * self.padding_outer;
        (stop - start) / slots.max(1.0)
    }

    /// Width of each band
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    fn first_offset(&self) -> f64 {
        let (start, stop, _) = self.bounds();
        let used = self.step() * (self.count as f64 - self.padding_inner);
        start + (stop - start - used) / 2.0
    }

    /// Start pixel of band `index`
    pub fn position(&self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        let (_, _, reversed) = self.bounds();
        let slot = if reversed {
            self.count - 1 - index
        } else {
            index
        };
        Some(self.first_offset() + self.step() * slot as f64)
    }

    /// Centre pixel of band `index`
    pub fn center(&self, index: usize) -> Option<f64> {
        Some(self.position(index)? + self.bandwidth() / 2.0)
    }

    /// Which band covers a pixel
    ///
    /// Pixels in the padding between or around bands map to `None`.
    pub fn index_at(&self, pixel: f64) -> Option<usize> {
        let step = self.step();
        if !pixel.is_finite() || step <= 0.0 {
            return None;
        }
        let offset = pixel - self.first_offset();
        if offset < 0.0 {
            return None;
        }
        let slot = (offset / step).floor() as usize;
        if slot >= self.count || offset - slot as f64 * step > self.bandwidth() {
            return None;
        }
        let (_, _, reversed) = self.bounds();
        Some(if reversed {
            self.count - 1 - slot
        } else {
            slot
        })
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false; construction rejects empty domains
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
