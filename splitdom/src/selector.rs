//! Minimal descendant-combinator selector matching.
//!
//! Supports compounds of `tag`, `#id` and `.class` joined by whitespace,
//! which is all the style rules produced for a grid ever use.

use crate::document::{Document, NodeId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(token: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = token;

        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_end > 0 {
            compound.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while !rest.is_empty() {
            let marker = rest.chars().next()?;
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                '#' => compound.id = Some(name.to_string()),
                '.' => compound.classes.push(name.to_string()),
                _ => return None,
            }
            rest = &body[end..];
        }
        Some(compound)
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(n) = doc.get(node) else {
            return false;
        };
        if let Some(tag) = &self.tag
            && !n.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && n.id.as_deref() != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|c| n.has_class(c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    /// Returns `None` for empty or unsupported selectors.
    pub fn parse(selector: &str) -> Option<Self> {
        let parts = selector
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(doc, node) {
            return false;
        }

        // Remaining compounds must match ancestors, right to left.
        let mut current = doc.parent(node);
        for compound in rest.iter().rev() {
            loop {
                let Some(candidate) = current else {
                    return false;
                };
                current = doc.parent(candidate);
                if compound.matches(doc, candidate) {
                    break;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn doc_with_tree() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let grid = doc
            .mount(
                root,
                &Element::div().id("g1").child(
                    Element::div()
                        .class("pane")
                        .child(Element::div().class("col").class("col-2").id("leaf")),
                ),
            )
            .unwrap();
        let leaf = doc.by_id("leaf").unwrap();
        assert!(doc.contains(grid));
        (doc, leaf)
    }

    #[test]
    fn test_descendant_match() {
        let (doc, leaf) = doc_with_tree();
        assert!(Selector::parse("#g1 .col-2").unwrap().matches(&doc, leaf));
        assert!(Selector::parse("#g1 .pane .col.col-2").unwrap().matches(&doc, leaf));
        assert!(Selector::parse("div.col").unwrap().matches(&doc, leaf));
    }

    #[test]
    fn test_non_match() {
        let (doc, leaf) = doc_with_tree();
        assert!(!Selector::parse("#g2 .col-2").unwrap().matches(&doc, leaf));
        assert!(!Selector::parse(".pane .col-3").unwrap().matches(&doc, leaf));
    }

    #[test]
    fn test_unsupported_selector() {
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse(".a..b").is_none());
    }
}
