//! Pane structure every grid renders into.
//!
//! ```text
//! div#splitgrid-N.sg-base
//!   div.sg-head  > div.sg-head-fixed + div.sg-head-static
//!   div.sg-body  > div.sg-body-fixed + div.sg-body-static   (scrolls)
//!   div.sg-foot  > div.sg-foot-fixed + div.sg-foot-static
//!   div.sg-grid-resize                                      (optional)
//! ```

use splitdom::{Direction, Document, Element, NodeId};

use crate::classes;
use crate::model::Section;
use crate::styles::StyleRegistry;

/// Handles to the mounted panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub base: NodeId,
    pub head: NodeId,
    pub head_fixed: NodeId,
    pub head_static: NodeId,
    pub body: NodeId,
    pub body_fixed: NodeId,
    pub body_static: NodeId,
    pub foot: NodeId,
    pub foot_fixed: NodeId,
    pub foot_static: NodeId,
    pub grid_resize: Option<NodeId>,
}

impl Panes {
    /// `(fixed, static)` panes of a section.
    pub fn section(&self, section: Section) -> (NodeId, NodeId) {
        match section {
            Section::Head => (self.head_fixed, self.head_static),
            Section::Body => (self.body_fixed, self.body_static),
            Section::Foot => (self.foot_fixed, self.foot_static),
        }
    }

    /// The pane whose scrolling drives every other pane.
    pub fn scroller(&self) -> NodeId {
        self.body_static
    }
}

fn band(outer: &str, fixed: &str, scrolling: &str) -> Element {
    Element::div()
        .class(outer)
        .direction(Direction::Row)
        .child(Element::div().class(fixed))
        .child(Element::div().class(scrolling))
}

pub fn build(scope_id: &str, grid_resize: bool) -> Element {
    let mut base = Element::div()
        .id(scope_id)
        .class(classes::BASE)
        .child(band(classes::HEAD, classes::HEAD_FIXED, classes::HEAD_STATIC))
        .child(band(classes::BODY, classes::BODY_FIXED, classes::BODY_STATIC))
        .child(band(classes::FOOT, classes::FOOT_FIXED, classes::FOOT_STATIC));
    if grid_resize {
        base = base.child(Element::div().class(classes::GRID_RESIZE));
    }
    base
}

/// Mount the skeleton into `container`.
pub fn mount(
    doc: &mut Document,
    container: NodeId,
    scope_id: &str,
    grid_resize: bool,
) -> Option<Panes> {
    let base = doc.mount(container, &build(scope_id, grid_resize))?;
    let find = |class: &str| doc.first_by_class(base, class);

    let panes = Panes {
        base,
        head: find(classes::HEAD)?,
        head_fixed: find(classes::HEAD_FIXED)?,
        head_static: find(classes::HEAD_STATIC)?,
        body: find(classes::BODY)?,
        body_fixed: find(classes::BODY_FIXED)?,
        body_static: find(classes::BODY_STATIC)?,
        foot: find(classes::FOOT)?,
        foot_fixed: find(classes::FOOT_FIXED)?,
        foot_static: find(classes::FOOT_STATIC)?,
        grid_resize: find(classes::GRID_RESIZE),
    };
    log::debug!("[skeleton] mounted {scope_id} at {base}");
    Some(panes)
}

/// Hide the bands of sections the source did not provide.
///
/// A missing body only hides its fixed pane; the scrolling pane still holds
/// the no-results placeholder.
pub fn hide_absent(styles: &mut StyleRegistry, scope: &str, head: bool, body: bool, foot: bool) {
    for (present, class) in [
        (head, classes::HEAD),
        (body, classes::BODY_FIXED),
        (foot, classes::FOOT),
    ] {
        let selector = format!("{scope} .{class}");
        if present {
            styles.sheet_mut().remove(&selector);
        } else {
            styles.sheet_mut().rule_mut(&selector).set("display", "none");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_resolves_every_pane() {
        let mut doc = Document::new();
        let root = doc.root();
        let panes = mount(&mut doc, root, "splitgrid-1", true).unwrap();
        assert_eq!(doc.by_id("splitgrid-1"), Some(panes.base));
        assert_eq!(doc.parent(panes.body_static), Some(panes.body));
        assert!(panes.grid_resize.is_some());
        assert_eq!(panes.section(Section::Foot).0, panes.foot_fixed);
    }

    #[test]
    fn test_grid_resize_handle_optional() {
        let mut doc = Document::new();
        let root = doc.root();
        let panes = mount(&mut doc, root, "splitgrid-2", false).unwrap();
        assert!(panes.grid_resize.is_none());
    }

    #[test]
    fn test_hide_absent_sections() {
        let mut styles = StyleRegistry::new("g");
        hide_absent(&mut styles, "#g", false, false, true);
        let head = styles.sheet().rule("#g .sg-head").unwrap();
        assert_eq!(head.get("display"), Some("none"));
        assert!(styles.sheet().rule("#g .sg-body-fixed").is_some());
        assert!(styles.sheet().rule("#g .sg-body-static").is_none());
        assert!(styles.sheet().rule("#g .sg-foot").is_none());

        hide_absent(&mut styles, "#g", true, true, true);
        assert_eq!(styles.sheet().len(), 0);
    }
}
