//! Class names and data attributes placed on rendered nodes.

pub const BASE: &str = "sg-base";

pub const HEAD: &str = "sg-head";
pub const HEAD_FIXED: &str = "sg-head-fixed";
pub const HEAD_STATIC: &str = "sg-head-static";

pub const BODY: &str = "sg-body";
pub const BODY_FIXED: &str = "sg-body-fixed";
pub const BODY_STATIC: &str = "sg-body-static";

pub const FOOT: &str = "sg-foot";
pub const FOOT_FIXED: &str = "sg-foot-fixed";
pub const FOOT_STATIC: &str = "sg-foot-static";

/// Root of a rendered section fragment (fixed or full).
pub const FRAGMENT: &str = "sg-fragment";
pub const COLUMN: &str = "sg-col";
pub const CELL: &str = "sg-cell";
pub const SELECT_CONTROL: &str = "sg-select";
pub const RESIZE_HANDLE: &str = "sg-resize";
pub const RESIZE_INDICATOR: &str = "sg-resize-indicator";
pub const GRID_RESIZE: &str = "sg-grid-resize";
pub const NO_RESULTS: &str = "sg-no-results";

pub const DATA_COLUMN: &str = "data-col";
pub const DATA_ROW: &str = "data-row";

pub fn column(index: usize) -> String {
    format!("{COLUMN}-{index}")
}

pub fn row(index: usize) -> String {
    format!("sg-row-{index}")
}

pub fn resize_handle(index: usize) -> String {
    format!("{RESIZE_HANDLE}-{index}")
}
