//! Column widths, alignment and background.
//!
//! The engine owns one width per rendered column and writes one rule per
//! column (plus one per resize handle) into the grid's style sheet. A column
//! rendered in several panes and sections gets the widest measured
//! occurrence so every copy lines up.

use splitdom::Surface;

use crate::classes;
use crate::options::ColumnSettings;
use crate::render::MountedSection;
use crate::styles::StyleRegistry;

/// Handles sit this far inside the right edge of their column.
const HANDLE_INSET: i64 = 2;

#[derive(Debug, Clone)]
pub struct ColumnLayoutEngine {
    scope: String,
    settings: Vec<ColumnSettings>,
    widths: Vec<u32>,
    resize_handles: bool,
}

impl ColumnLayoutEngine {
    /// `scope` is the selector prefix of the grid, e.g. `#splitgrid-1`.
    pub fn new(scope: impl Into<String>, settings: Vec<ColumnSettings>, resize_handles: bool) -> Self {
        Self {
            scope: scope.into(),
            settings,
            widths: Vec::new(),
            resize_handles,
        }
    }

    pub fn columns(&self) -> usize {
        self.settings.len()
    }

    /// Current widths; empty until the first layout.
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    pub fn width(&self, column: usize) -> Option<u32> {
        self.widths.get(column).copied()
    }

    pub fn settings(&self, column: usize) -> Option<&ColumnSettings> {
        self.settings.get(column)
    }

    /// Offset of the left edge of `column` from the left edge of column 0.
    pub fn column_left(&self, column: usize) -> u32 {
        self.widths.iter().take(column).sum()
    }

    pub fn column_selector(&self, column: usize) -> String {
        format!("{} .{}", self.scope, classes::column(column))
    }

    pub fn handle_selector(&self, column: usize) -> String {
        format!("{} .{}", self.scope, classes::resize_handle(column))
    }

    /// Measure every column and rewrite all column rules.
    ///
    /// With `force` (or before the first layout) existing width declarations
    /// are removed first so the surface reports natural widths. Otherwise the
    /// current rules stay in place, so repeated calls produce the same sheet.
    pub fn recompute_widths(
        &mut self,
        surface: &mut impl Surface,
        styles: &mut StyleRegistry,
        sections: &[&MountedSection],
        force: bool,
    ) {
        if force || self.widths.is_empty() {
            for column in 0..self.columns() {
                let selector = self.column_selector(column);
                if styles.sheet().rule(&selector).is_some() {
                    styles.sheet_mut().rule_mut(&selector).remove("width");
                }
            }
            styles.flush(surface);
        }

        let widths: Vec<u32> = (0..self.columns())
            .map(|column| {
                sections
                    .iter()
                    .flat_map(|section| section.column_nodes(column))
                    .map(|node| surface.measure_width(node))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        log::debug!("[layout] widths {widths:?} (force: {force})");

        self.widths = widths;
        for column in 0..self.columns() {
            self.write_column(styles, column);
        }
        styles.flush(surface);
    }

    /// Overwrite one column's width without touching the others.
    pub fn set_column_width(
        &mut self,
        surface: &mut impl Surface,
        styles: &mut StyleRegistry,
        column: usize,
        width: u32,
    ) {
        let Some(slot) = self.widths.get_mut(column) else {
            log::warn!("[layout] no width for column {column}");
            return;
        };
        *slot = width;
        self.write_column(styles, column);
        styles.flush(surface);
        log::debug!("[layout] column {column} set to {width}px");
    }

    fn write_column(&self, styles: &mut StyleRegistry, column: usize) {
        let (Some(width), Some(settings)) = (self.width(column), self.settings(column)) else {
            return;
        };

        let rule = styles.sheet_mut().rule_mut(&self.column_selector(column));
        rule.set("width", format!("{width}px"));
        rule.set("text-align", settings.align.as_css());
        match &settings.background {
            Some(color) => rule.set("background-color", color.to_css()),
            None => {
                rule.remove("background-color");
            }
        }

        if self.resize_handles {
            let offset = i64::from(width) - HANDLE_INSET;
            styles
                .sheet_mut()
                .rule_mut(&self.handle_selector(column))
                .set("margin-left", format!("{offset}px"));
        }
    }
}

#[cfg(test)]
mod tests {
    use splitdom::{Color, Document, Element, MemorySurface};

    use super::*;
    use crate::model::CellMatrix;
    use crate::options::Alignment;
    use crate::render::{RenderOptions, mount_section, render_section};
    use crate::sort::SortType;

    fn settings(columns: usize) -> Vec<ColumnSettings> {
        (0..columns)
            .map(|_| ColumnSettings {
                align: Alignment::Left,
                background: None,
                sort_type: SortType::String,
            })
            .collect()
    }

    fn mounted(surface: &mut MemorySurface, rows: &[&[&str]]) -> MountedSection {
        let doc: &mut Document = surface.document_mut();
        let root = doc.root();
        let scope = doc.mount(root, &Element::div().id("g")).unwrap();
        let pane = doc.mount(scope, &Element::div()).unwrap();
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        let matrix = CellMatrix::from_rows(&rows, rows[0].len(), None);
        mount_section(doc, None, pane, &render_section(&matrix, &RenderOptions::default()))
    }

    #[test]
    fn test_width_is_widest_cell() {
        let mut surface = MemorySurface::new();
        let section = mounted(&mut surface, &[&["a", "bb"], &["ccc", "d"]]);
        let mut styles = StyleRegistry::new("g");
        let mut engine = ColumnLayoutEngine::new("#g", settings(2), false);
        engine.recompute_widths(&mut surface, &mut styles, &[&section], false);
        // 3 * 7 + 8 and 2 * 7 + 8
        assert_eq!(engine.widths(), &[29, 22]);
        assert_eq!(styles.sheet().rule("#g .sg-col-0").unwrap().get("width"), Some("29px"));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut surface = MemorySurface::new();
        let section = mounted(&mut surface, &[&["a", "bb"]]);
        let mut styles = StyleRegistry::new("g");
        let mut engine = ColumnLayoutEngine::new("#g", settings(2), true);
        engine.recompute_widths(&mut surface, &mut styles, &[&section], false);
        let first = styles.sheet().to_css();
        engine.recompute_widths(&mut surface, &mut styles, &[&section], false);
        assert_eq!(styles.sheet().to_css(), first);
    }

    #[test]
    fn test_set_column_width_patches_one_column() {
        let mut surface = MemorySurface::new();
        let section = mounted(&mut surface, &[&["a", "bb"]]);
        let mut styles = StyleRegistry::new("g");
        let mut engine = ColumnLayoutEngine::new("#g", settings(2), true);
        engine.recompute_widths(&mut surface, &mut styles, &[&section], false);
        engine.set_column_width(&mut surface, &mut styles, 1, 100);
        assert_eq!(engine.widths(), &[15, 100]);
        assert_eq!(
            styles.sheet().rule("#g .sg-resize-1").unwrap().get("margin-left"),
            Some("98px")
        );
        assert_eq!(styles.sheet().rule("#g .sg-col-0").unwrap().get("width"), Some("15px"));
    }

    #[test]
    fn test_force_remeasures_natural_width() {
        let mut surface = MemorySurface::new();
        let section = mounted(&mut surface, &[&["abc"]]);
        let mut styles = StyleRegistry::new("g");
        let mut engine = ColumnLayoutEngine::new("#g", settings(1), false);
        engine.recompute_widths(&mut surface, &mut styles, &[&section], false);
        engine.set_column_width(&mut surface, &mut styles, 0, 200);
        engine.recompute_widths(&mut surface, &mut styles, &[&section], false);
        assert_eq!(engine.widths(), &[200]);
        engine.recompute_widths(&mut surface, &mut styles, &[&section], true);
        assert_eq!(engine.widths(), &[29]);
    }

    #[test]
    fn test_background_written_when_set() {
        let mut surface = MemorySurface::new();
        let section = mounted(&mut surface, &[&["a"]]);
        let mut styles = StyleRegistry::new("g");
        let mut cols = settings(1);
        cols[0].background = Some(Color::hex(0xFF0000));
        cols[0].align = Alignment::Right;
        let mut engine = ColumnLayoutEngine::new("#g", cols, false);
        engine.recompute_widths(&mut surface, &mut styles, &[&section], false);
        let rule = styles.sheet().rule("#g .sg-col-0").unwrap();
        assert_eq!(rule.get("background-color"), Some("#ff0000"));
        assert_eq!(rule.get("text-align"), Some("right"));
    }
}
