use splitdom::{Document, Element, InlineStyle, Listeners, NodeId, PointerButton, Surface};

use super::{DragListeners, MIN_COLUMN_WIDTH, clamp_dimension, pointer_delta};
use crate::classes;

/// Progress of a column drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMove {
    pub column: usize,
    pub width: u32,
}

/// Final width of a column drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCommit {
    pub column: usize,
    pub width: u32,
}

#[derive(Debug)]
struct ColumnDrag {
    column: usize,
    origin_x: i32,
    origin_width: u32,
    origin_left: i32,
    width: u32,
    indicator: Option<NodeId>,
    indicator_left: i32,
    _listeners: DragListeners,
}

/// Drag state for resizing one column.
#[derive(Debug, Default)]
pub struct ColumnResizeController {
    drag: Option<ColumnDrag>,
}

impl ColumnResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    pub fn column(&self) -> Option<usize> {
        self.drag.as_ref().map(|d| d.column)
    }

    /// Begin resizing `column` from pointer `x`.
    ///
    /// `origin_left` is the handle's offset inside `overlay_parent`, where the
    /// drag indicator is mounted. Returns false for non-primary buttons or
    /// when a drag is already active.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        &mut self,
        doc: &mut Document,
        listeners: &Listeners,
        overlay_parent: NodeId,
        column: usize,
        x: i32,
        origin_width: u32,
        origin_left: i32,
        button: PointerButton,
    ) -> bool {
        if button != PointerButton::Primary || self.drag.is_some() {
            return false;
        }
        let indicator = doc.mount(
            overlay_parent,
            &Element::div()
                .class(classes::RESIZE_INDICATOR)
                .style(InlineStyle::new().left(origin_left)),
        );
        self.drag = Some(ColumnDrag {
            column,
            origin_x: x,
            origin_width,
            origin_left,
            width: origin_width,
            indicator,
            indicator_left: origin_left,
            _listeners: DragListeners::acquire(listeners),
        });
        log::debug!("[resize] column {column} drag from {origin_width}px");
        true
    }

    /// Track the pointer. `None` when idle.
    pub fn on_move(&mut self, surface: &mut impl Surface, x: i32) -> Option<ColumnMove> {
        let drag = self.drag.as_mut()?;
        let width = clamp_dimension(drag.origin_width, pointer_delta(drag.origin_x, x), MIN_COLUMN_WIDTH);
        drag.width = width;

        let grown = i64::from(width) - i64::from(drag.origin_width);
        let left = (i64::from(drag.origin_left) + grown)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        if left != drag.indicator_left {
            drag.indicator_left = left;
            if let Some(indicator) = drag.indicator
                && let Some(style) = surface.document_mut().style_mut(indicator)
            {
                style.left = Some(left);
            }
        }
        surface.clear_text_selection();
        log::trace!("[resize] column {} at {width}px", drag.column);
        Some(ColumnMove {
            column: drag.column,
            width,
        })
    }

    /// Finish the drag, removing the indicator.
    ///
    /// The committed width is the last moved width, or the origin width when
    /// the pointer never moved.
    pub fn end(&mut self, doc: &mut Document) -> Option<ColumnCommit> {
        let drag = self.drag.take()?;
        if let Some(indicator) = drag.indicator {
            doc.remove(indicator);
        }
        log::debug!("[resize] column {} committed at {}px", drag.column, drag.width);
        Some(ColumnCommit {
            column: drag.column,
            width: drag.width,
        })
    }
}
