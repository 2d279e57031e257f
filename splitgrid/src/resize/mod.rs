//! Pointer-drag resizing of the whole grid and of single columns.
//!
//! Each controller is a small state machine: `start` on a primary-button
//! press over its handle, `on_move` while the document-wide listeners are
//! held, and `end` on release. Listener registrations live inside the drag
//! state, so ending, cancelling or dropping a drag releases them.

mod column;
mod grid;

pub use column::{ColumnCommit, ColumnMove, ColumnResizeController};
pub use grid::GridResizeController;

use splitdom::{ListenerGuard, ListenerKind, Listeners};

pub const MIN_GRID_WIDTH: u32 = 60;
pub const MIN_GRID_HEIGHT: u32 = 30;
pub const MIN_COLUMN_WIDTH: u32 = 15;

/// Lets every other move event through.
#[derive(Debug, Clone, Default)]
pub struct MoveThrottle {
    seen: u64,
}

impl MoveThrottle {
    /// True when this move should be handled.
    pub fn accept(&mut self) -> bool {
        self.seen += 1;
        self.seen % 2 == 1
    }
}

/// Pointer travel from `from` to `to`, widened so extreme coordinates
/// cannot overflow.
pub fn pointer_delta(from: i32, to: i32) -> i64 {
    i64::from(to) - i64::from(from)
}

/// `origin + delta`, never below `min`.
pub fn clamp_dimension(origin: u32, delta: i64, min: u32) -> u32 {
    let value = i64::from(origin).saturating_add(delta);
    value.clamp(i64::from(min), i64::from(u32::MAX)) as u32
}

/// Move and up listeners held for the duration of one drag.
#[derive(Debug)]
pub(crate) struct DragListeners {
    _move: ListenerGuard,
    _up: ListenerGuard,
}

impl DragListeners {
    pub(crate) fn acquire(listeners: &Listeners) -> Self {
        Self {
            _move: listeners.acquire(ListenerKind::PointerMove),
            _up: listeners.acquire(ListenerKind::PointerUp),
        }
    }
}
