use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

use super::{ScrollOffset, Surface};
use crate::document::{Document, NodeContent, NodeId};
use crate::selector::Selector;
use crate::types::{Direction, StyleSheet, parse_px};

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Fixed text metrics used by [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    /// Width of one display column of text.
    pub char_width: u32,
    /// Horizontal padding added around any node with leaf content.
    pub cell_padding: u32,
    /// Width of a form control such as a checkbox.
    pub control_width: u32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7,
            cell_padding: 8,
            control_width: 13,
        }
    }
}

/// A deterministic, in-memory surface.
///
/// Width of a node is, in order of precedence: its inline width, the last
/// matching `width` declaration across installed sheets, or its natural width
/// (leaf text measured with `unicode-width`, children summed for row nodes and
/// maxed for column nodes).
#[derive(Debug, Clone)]
pub struct MemorySurface {
    document: Document,
    metrics: TextMetrics,
    viewport: (u32, u32),
    sheets: Vec<(String, StyleSheet)>,
    compiled: Vec<(Selector, u32)>,
    scroll: HashMap<NodeId, ScrollOffset>,
    selection_clears: usize,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            metrics: TextMetrics::default(),
            viewport: (800, 600),
            sheets: Vec::new(),
            compiled: Vec::new(),
            scroll: HashMap::new(),
            selection_clears: 0,
        }
    }

    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Size reported for nodes without an inline size.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }

    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    pub fn sheet(&self, key: &str) -> Option<&StyleSheet> {
        self.sheets.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// How many times the text selection has been cleared.
    pub fn selection_clears(&self) -> usize {
        self.selection_clears
    }

    fn recompile(&mut self) {
        self.compiled = self
            .sheets
            .iter()
            .flat_map(|(_, sheet)| sheet.rules())
            .filter_map(|rule| {
                let width = rule.get("width").and_then(parse_px)?;
                let selector = Selector::parse(&rule.selector)?;
                Some((selector, width))
            })
            .collect();
    }

    fn styled_width(&self, node: NodeId) -> Option<u32> {
        self.compiled
            .iter()
            .rev()
            .find(|(selector, _)| selector.matches(&self.document, node))
            .map(|(_, width)| *width)
    }

    fn natural_width(&self, node: NodeId) -> u32 {
        let Some(n) = self.document.get(node) else {
            return 0;
        };

        let own = if n.tag.eq_ignore_ascii_case("input") {
            self.metrics.control_width + self.metrics.cell_padding
        } else {
            match &n.content {
                NodeContent::Empty => 0,
                NodeContent::Text(text) => self.text_width(text),
                NodeContent::Markup(markup) => self.text_width(&visible_text(markup)),
            }
        };

        let children = n.children().iter().map(|c| self.measure_width(*c));
        let nested = match n.style.direction {
            Direction::Row => children.sum(),
            Direction::Column => children.max().unwrap_or(0),
        };
        own.max(nested)
    }

    fn text_width(&self, text: &str) -> u32 {
        let columns = text.width() as u32;
        if columns == 0 {
            0
        } else {
            columns * self.metrics.char_width + self.metrics.cell_padding
        }
    }
}

/// Strip tags and decode the handful of entities cell markup commonly uses.
fn visible_text(markup: &str) -> String {
    TAG_PATTERN
        .replace_all(markup, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

impl Surface for MemorySurface {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn measure_width(&self, node: NodeId) -> u32 {
        if let Some(width) = self.document.get(node).and_then(|n| n.style.width) {
            return width;
        }
        self.styled_width(node)
            .unwrap_or_else(|| self.natural_width(node))
    }

    fn size(&self, node: NodeId) -> (u32, u32) {
        let style = self.document.get(node).map(|n| n.style).unwrap_or_default();
        (
            style.width.unwrap_or(self.viewport.0),
            style.height.unwrap_or(self.viewport.1),
        )
    }

    fn set_size(&mut self, node: NodeId, width: u32, height: u32) {
        if let Some(style) = self.document.style_mut(node) {
            style.width = Some(width);
            style.height = Some(height);
        }
    }

    fn scroll_offset(&self, node: NodeId) -> ScrollOffset {
        self.scroll.get(&node).copied().unwrap_or_default()
    }

    fn set_scroll_offset(&mut self, node: NodeId, offset: ScrollOffset) {
        let clamped = ScrollOffset::new(offset.x.max(0), offset.y.max(0));
        self.scroll.insert(node, clamped);
    }

    fn install_styles(&mut self, key: &str, sheet: &StyleSheet) {
        match self.sheets.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = sheet.clone(),
            None => self.sheets.push((key.to_string(), sheet.clone())),
        }
        self.recompile();
    }

    fn remove_styles(&mut self, key: &str) -> bool {
        let before = self.sheets.len();
        self.sheets.retain(|(k, _)| k != key);
        let removed = before != self.sheets.len();
        if removed {
            self.recompile();
        }
        removed
    }

    fn clear_text_selection(&mut self) {
        self.selection_clears += 1;
    }
}
