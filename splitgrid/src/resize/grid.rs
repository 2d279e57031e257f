use splitdom::{Listeners, NodeId, PointerButton, Surface};

use super::{
    DragListeners, MIN_GRID_HEIGHT, MIN_GRID_WIDTH, MoveThrottle, clamp_dimension, pointer_delta,
};

#[derive(Debug)]
struct GridDrag {
    target: NodeId,
    origin: (i32, i32),
    origin_size: (u32, u32),
    size: (u32, u32),
    throttle: MoveThrottle,
    _listeners: DragListeners,
}

impl GridDrag {
    fn size_at(&self, x: i32, y: i32) -> (u32, u32) {
        (
            clamp_dimension(self.origin_size.0, pointer_delta(self.origin.0, x), MIN_GRID_WIDTH),
            clamp_dimension(self.origin_size.1, pointer_delta(self.origin.1, y), MIN_GRID_HEIGHT),
        )
    }
}

/// Drag state for resizing the grid container.
#[derive(Debug, Default)]
pub struct GridResizeController {
    drag: Option<GridDrag>,
}

impl GridResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin resizing `target` from pointer `(x, y)`.
    ///
    /// Returns false for non-primary buttons or when a drag is already active.
    pub fn start(
        &mut self,
        surface: &impl Surface,
        listeners: &Listeners,
        target: NodeId,
        x: i32,
        y: i32,
        button: PointerButton,
    ) -> bool {
        if button != PointerButton::Primary || self.drag.is_some() {
            return false;
        }
        let origin_size = surface.size(target);
        self.drag = Some(GridDrag {
            target,
            origin: (x, y),
            origin_size,
            size: origin_size,
            throttle: MoveThrottle::default(),
            _listeners: DragListeners::acquire(listeners),
        });
        log::debug!("[resize] grid drag from {origin_size:?}");
        true
    }

    /// Resize to the pointer position. `None` when idle or throttled.
    pub fn on_move(&mut self, surface: &mut impl Surface, x: i32, y: i32) -> Option<(u32, u32)> {
        let drag = self.drag.as_mut()?;
        if !drag.throttle.accept() {
            return None;
        }
        let size = drag.size_at(x, y);
        drag.size = size;
        surface.set_size(drag.target, size.0, size.1);
        surface.clear_text_selection();
        log::trace!("[resize] grid {size:?}");
        Some(size)
    }

    /// Finish at the release point and return the final size.
    pub fn end(&mut self, surface: &mut impl Surface, x: i32, y: i32) -> Option<(u32, u32)> {
        let drag = self.drag.take()?;
        let size = drag.size_at(x, y);
        surface.set_size(drag.target, size.0, size.1);
        log::debug!("[resize] grid drag ended at {size:?}");
        Some(size)
    }

    /// Abandon the drag, keeping the last applied size.
    pub fn cancel(&mut self) -> Option<(u32, u32)> {
        self.drag.take().map(|drag| drag.size)
    }
}
