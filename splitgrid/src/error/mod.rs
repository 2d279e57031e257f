//! Error types
//!
//! None of these escape the [`crate::Grid`] boundary: the grid logs them and
//! degrades to an empty or partial rendering.

mod options;
mod source;

pub use options::*;
pub use source::*;
