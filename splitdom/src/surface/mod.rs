//! The host rendering surface.

mod memory;

pub use memory::{MemorySurface, TextMetrics};

use crate::document::{Document, NodeId};
use crate::types::StyleSheet;

/// Scroll offset of a scrollable node, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Everything the grid needs from the host it renders into.
///
/// The surface owns the node arena. Style sheets are always installed whole:
/// there is no partial merge, so writers keep the full sheet and re-install it.
pub trait Surface {
    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    /// Rendered width of a node in pixels.
    fn measure_width(&self, node: NodeId) -> u32;

    /// Rendered `(width, height)` of a node.
    fn size(&self, node: NodeId) -> (u32, u32);

    /// Force a node's dimensions.
    fn set_size(&mut self, node: NodeId, width: u32, height: u32);

    fn scroll_offset(&self, node: NodeId) -> ScrollOffset;

    fn set_scroll_offset(&mut self, node: NodeId, offset: ScrollOffset);

    /// Install (or replace) the style sheet registered under `key`.
    fn install_styles(&mut self, key: &str, sheet: &StyleSheet);

    /// Remove the style sheet registered under `key`. Returns false if absent.
    fn remove_styles(&mut self, key: &str) -> bool;

    /// Drop any active text selection on the surface.
    fn clear_text_selection(&mut self);
}
