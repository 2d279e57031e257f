//! Keeps the head, foot and fixed body fragments aligned with the body pane.

use splitdom::{NodeId, ScrollOffset, Surface};

/// Body scroll distance of one wheel notch over the fixed pane.
pub const WHEEL_NOTCH_PX: i32 = 33;

/// Nodes moved when the body pane scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTargets {
    /// The scrolling body pane.
    pub scroller: NodeId,
    /// Full head fragment, shifted horizontally.
    pub head: Option<NodeId>,
    /// Full foot fragment, shifted horizontally.
    pub foot: Option<NodeId>,
    /// Fixed body fragment, shifted vertically.
    pub fixed_body: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    last_x: Option<i32>,
    last_y: Option<i32>,
    writes: usize,
}

impl ScrollSync {
    /// Fragments start unshifted, so the first observed offset is `(0, 0)`.
    pub fn new() -> Self {
        Self {
            last_x: Some(0),
            last_y: Some(0),
            writes: 0,
        }
    }

    /// Forget the last offsets, e.g. after fragments were re-rendered.
    pub fn invalidate(&mut self) {
        self.last_x = None;
        self.last_y = None;
    }

    /// Number of margin writes performed so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Apply the body pane's offset to the other fragments.
    ///
    /// Returns true when anything was written.
    pub fn sync(&mut self, surface: &mut impl Surface, targets: &ScrollTargets) -> bool {
        let ScrollOffset { x, y } = surface.scroll_offset(targets.scroller);
        let mut wrote = false;

        if self.last_x != Some(x) {
            self.last_x = Some(x);
            for node in [targets.head, targets.foot].into_iter().flatten() {
                if let Some(style) = surface.document_mut().style_mut(node) {
                    style.margin_left = -x;
                    self.writes += 1;
                    wrote = true;
                }
            }
        }

        if self.last_y != Some(y) {
            self.last_y = Some(y);
            if let Some(node) = targets.fixed_body
                && let Some(style) = surface.document_mut().style_mut(node)
            {
                style.margin_top = -y;
                self.writes += 1;
                wrote = true;
            }
        }

        if wrote {
            log::trace!("[scroll] synced to ({x}, {y})");
        }
        wrote
    }

    /// Scroll the body pane by `notches` wheel notches and sync.
    pub fn wheel(&mut self, surface: &mut impl Surface, targets: &ScrollTargets, notches: i32) -> bool {
        let current = surface.scroll_offset(targets.scroller);
        let y = current.y.saturating_add(notches.saturating_mul(WHEEL_NOTCH_PX));
        surface.set_scroll_offset(targets.scroller, ScrollOffset::new(current.x, y));
        self.sync(surface, targets)
    }
}
