//! Hover lookups
//!
//! Pure functions answering "what is under this pixel". No event handling.

use crate::layout::Rect;

/// Index of the point closest to `(x, y)` within `radius`
///
/// Distance must be strictly less than `radius`. Ties keep the earlier point.
pub fn nearest_point(points: &[(f64, f64)], x: f64, y: f64, radius: f64) -> Option<usize> {
    let limit = radius * radius;
    points
        .iter()
        .enumerate()
        .filter_map(|(i, &(px, py))| {
            let d2 = (px - x).powi(2) + (py - y).powi(2);
            (d2 < limit).then_some((i, d2))
        })
        .fold(None, |best: Option<(usize, f64)>, (i, d2)| match best {
            Some((_, best_d2)) if best_d2 <= d2 => best,
            _ => Some((i, d2)),
        })
        .map(|(i, _)| i)
}

/// Index of the first rectangle containing `(x, y)`
pub fn hit_rect(rects: &[Rect], x: f64, y: f64) -> Option<usize> {
    rects.iter().position(|r| r.contains(x, y))
}
