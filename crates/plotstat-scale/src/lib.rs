//! plotstat-scale - Mapping data values to pixels
//!
//! - **Continuous**: linear and log10 scales with inversion and ticks
//! - **Band**: categorical slots with inner and outer padding
//! - **Ticks**: nice round tick values
//! - **Layout**: canvas size and margins to plot area
//! - **Hit**: pure hover lookups over drawn marks
//!
//! Nothing here holds mutable state; every type is `Send + Sync`.

pub mod band;
pub mod continuous;
pub mod error;
pub mod hit;
pub mod layout;
pub mod ticks;

pub use band::*;
pub use continuous::*;
pub use error::*;
pub use hit::*;
pub use layout::*;
pub use ticks::*;
