//! The grid's single style sheet.
//!
//! Layout, column resize commits and selection highlighting all write into
//! one [`StyleSheet`]. The surface has no partial merge, so every writer
//! edits the full sheet here and then calls [`StyleRegistry::flush`].

use splitdom::{StyleSheet, Surface};

#[derive(Debug, Clone)]
pub struct StyleRegistry {
    key: String,
    sheet: StyleSheet,
    attached: bool,
}

impl StyleRegistry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sheet: StyleSheet::new(),
            attached: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut StyleSheet {
        &mut self.sheet
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Install the whole sheet on the surface.
    pub fn flush(&mut self, surface: &mut impl Surface) {
        surface.install_styles(&self.key, &self.sheet);
        self.attached = true;
    }

    /// Remove the sheet from the surface. Safe to call repeatedly.
    pub fn detach(&mut self, surface: &mut impl Surface) {
        if self.attached {
            surface.remove_styles(&self.key);
            self.attached = false;
            log::debug!("[styles] detached {}", self.key);
        }
        self.sheet.clear();
    }
}

#[cfg(test)]
mod tests {
    use splitdom::{MemorySurface, StyleRule};

    use super::*;

    #[test]
    fn test_flush_installs_full_sheet() {
        let mut surface = MemorySurface::new();
        let mut registry = StyleRegistry::new("grid-1");
        registry.sheet_mut().upsert(StyleRule::new(".a").declare("width", "10px"));
        registry.flush(&mut surface);
        registry.sheet_mut().upsert(StyleRule::new(".b").declare("width", "20px"));
        registry.flush(&mut surface);
        assert_eq!(surface.sheet("grid-1").map(StyleSheet::len), Some(2));
        assert_eq!(surface.sheet_count(), 1);
    }

    #[test]
    fn test_detach_twice() {
        let mut surface = MemorySurface::new();
        let mut registry = StyleRegistry::new("grid-1");
        registry.flush(&mut surface);
        registry.detach(&mut surface);
        registry.detach(&mut surface);
        assert_eq!(surface.sheet_count(), 0);
        assert!(!registry.is_attached());
    }
}
