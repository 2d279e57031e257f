//! Selected-row highlighting.
//!
//! Each selected row gets one background rule per body pane, using a
//! separate color for the fixed pane, and its selection control (if any) is
//! marked `checked`. Rules are appended after the column rules so they win.

use splitdom::{Color, Document, NodeId};

use crate::classes;
use crate::styles::StyleRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightColors {
    pub selected: Color,
    pub selected_fixed: Color,
}

fn pane_prefix(scope: &str, pane: &str) -> String {
    format!("{scope} .{pane} .sg-row-")
}

pub fn row_selector(scope: &str, pane: &str, row: usize) -> String {
    format!("{scope} .{pane} .{}", classes::row(row))
}

/// Rewrite the highlight rules for `selected` rows.
pub fn apply_rules(
    styles: &mut StyleRegistry,
    scope: &str,
    colors: &HighlightColors,
    selected: &[usize],
    fixed_pane: bool,
) {
    let prefixes = [
        pane_prefix(scope, classes::BODY_STATIC),
        pane_prefix(scope, classes::BODY_FIXED),
    ];
    styles
        .sheet_mut()
        .retain(|rule| !prefixes.iter().any(|p| rule.selector.starts_with(p.as_str())));

    let mut rows = selected.to_vec();
    rows.sort_unstable();
    for row in rows {
        styles.sheet_mut().rule_mut(&row_selector(scope, classes::BODY_STATIC, row)).set(
            "background-color",
            colors.selected.to_css(),
        );
        if fixed_pane {
            styles.sheet_mut().rule_mut(&row_selector(scope, classes::BODY_FIXED, row)).set(
                "background-color",
                colors.selected_fixed.to_css(),
            );
        }
    }
}

/// Sync the `checked` attribute of every selection control under `roots`.
pub fn apply_checked(doc: &mut Document, roots: &[NodeId], selected: &[usize]) {
    let controls: Vec<NodeId> = roots
        .iter()
        .flat_map(|root| doc.find_by_class(*root, classes::SELECT_CONTROL))
        .collect();

    for control in controls {
        let row = doc
            .get(control)
            .and_then(|n| n.attr(classes::DATA_ROW))
            .and_then(|v| v.parse::<usize>().ok());
        match row {
            Some(row) if selected.contains(&row) => doc.set_attr(control, "checked", ""),
            _ => {
                doc.remove_attr(control, "checked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use splitdom::{Element, StyleRule};

    use super::*;

    fn colors() -> HighlightColors {
        HighlightColors {
            selected: Color::hex(0x111111),
            selected_fixed: Color::hex(0x222222),
        }
    }

    #[test]
    fn test_rules_replace_previous_highlight() {
        let mut styles = StyleRegistry::new("g");
        styles
            .sheet_mut()
            .upsert(StyleRule::new("#g .sg-col-0").declare("width", "10px"));
        apply_rules(&mut styles, "#g", &colors(), &[3, 1], true);
        assert_eq!(styles.sheet().len(), 5);
        apply_rules(&mut styles, "#g", &colors(), &[2], false);
        assert_eq!(styles.sheet().len(), 2);
        let rule = styles.sheet().rule("#g .sg-body-static .sg-row-2").unwrap();
        assert_eq!(rule.get("background-color"), Some("#111111"));
    }

    #[test]
    fn test_checked_follows_selection() {
        let mut doc = Document::new();
        let root = doc.root();
        let body = doc
            .mount(
                root,
                &Element::div().children((0..3).map(|r| {
                    Element::input("checkbox")
                        .class(classes::SELECT_CONTROL)
                        .attr(classes::DATA_ROW, r.to_string())
                })),
            )
            .unwrap();
        apply_checked(&mut doc, &[body], &[1]);
        let checked: Vec<bool> = doc
            .children(body)
            .iter()
            .map(|n| doc.get(*n).unwrap().attr("checked").is_some())
            .collect();
        assert_eq!(checked, vec![false, true, false]);
        apply_checked(&mut doc, &[body], &[]);
        assert!(doc.find_by_class(body, classes::SELECT_CONTROL)
            .iter()
            .all(|n| doc.get(*n).unwrap().attr("checked").is_none()));
    }
}
