use crate::document::NodeId;

/// Host input events, already targeted at a mounted node where that applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer button pressed over `target`.
    PointerDown {
        target: Option<NodeId>,
        x: i32,
        y: i32,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Pointer moved (document-wide).
    PointerMove { x: i32, y: i32 },
    /// Pointer button released (document-wide).
    PointerUp { x: i32, y: i32, button: PointerButton },
    /// Press and release completed over `target`.
    Click {
        target: Option<NodeId>,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// A scrollable node changed its scroll offset.
    Scroll { target: NodeId },
    /// Wheel input over `target`, in notches. Positive values scroll down.
    Wheel { target: Option<NodeId>, delta_y: i32 },
}

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Key modifiers held during a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn toggle_held(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn range_held(&self) -> bool {
        self.shift
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}
