mod color;
mod enums;
mod style;

pub use color::{Color, ColorError, Rgb};
pub use enums::Direction;
pub use style::{Declaration, InlineStyle, StyleRule, StyleSheet};
pub(crate) use style::parse_px;
