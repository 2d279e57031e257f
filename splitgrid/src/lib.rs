//! Grid layout, sort and selection engine.
//!
//! A [`Grid`] takes tabular source data and an [`Options`] record, renders
//! head/body/foot sections into fixed and scrollable panes on a
//! [`splitdom::Surface`], keeps column widths in sync across panes, and drives
//! sorting, row selection and pointer resizing from host input events.

pub mod capabilities;
pub mod classes;
pub mod error;
pub mod grid;
pub mod highlight;
pub mod hit;
pub mod layout;
pub mod model;
pub mod options;
pub mod render;
pub mod resize;
pub mod scroll;
pub mod selection;
pub mod skeleton;
pub mod sort;
pub mod source;
pub mod styles;

pub use capabilities::{PlatformCapabilities, PointerModel};
pub use grid::{ContainerRef, EventResult, Grid, GridId};
pub use options::{Alignment, Callbacks, OptionOverrides, Options, SortCleaner};
pub use sort::{SortType, SortValue};
pub use source::{SourceData, SourceInput, SourceType};

pub mod prelude {
    pub use crate::capabilities::{PlatformCapabilities, PointerModel};
    pub use crate::grid::{ContainerRef, EventResult, Grid, GridId};
    pub use crate::options::{Alignment, OptionOverrides, Options, SortCleaner};
    pub use crate::sort::{SortState, SortType, SortValue};
    pub use crate::source::{SourceData, SourceInput, SourceType};
    pub use splitdom::{Event, MemorySurface, Modifiers, PointerButton, Surface};
}
