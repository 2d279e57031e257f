//! Platform capabilities, decided once by the host at startup.

/// The kind of pointer the host platform provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerModel {
    /// Mouse or trackpad: persistent hover.
    #[default]
    Mouse,
    /// Touch only: no hover.
    Touch,
    /// Both touch and a hover-capable pointer.
    Hybrid,
}

/// Capabilities passed to every grid at construction.
///
/// Compute this once per application and reuse it; grids never inspect the
/// platform themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformCapabilities {
    pub pointer: PointerModel,
}

impl PlatformCapabilities {
    pub const fn new(pointer: PointerModel) -> Self {
        Self { pointer }
    }

    pub const fn mouse() -> Self {
        Self::new(PointerModel::Mouse)
    }

    pub const fn touch() -> Self {
        Self::new(PointerModel::Touch)
    }

    /// True when the pointer can hover without pressing.
    pub fn has_hover(&self) -> bool {
        !matches!(self.pointer, PointerModel::Touch)
    }

    /// Fixed panes rely on independent scrolling which touch-only hosts lack.
    pub fn supports_fixed_columns(&self) -> bool {
        self.has_hover()
    }

    /// Touch-only hosts have no modifier keys, so every tap toggles its row.
    pub fn taps_toggle(&self) -> bool {
        !self.has_hover()
    }

    /// Column handles need hover to be discoverable.
    pub fn supports_column_resize(&self) -> bool {
        self.has_hover()
    }
}
