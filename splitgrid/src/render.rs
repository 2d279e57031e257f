//! Section rendering.
//!
//! [`render_section`] is pure: it turns one section's [`CellMatrix`] into a
//! full fragment holding every column and, when there are fixed columns, a
//! parallel fixed fragment holding the leading ones. [`mount_section`] places
//! both into the document and records the column containers for layout.

use splitdom::{Direction, Document, Element, NodeId};

use crate::classes;
use crate::model::{Cell, CellMatrix, ControlKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Leading columns duplicated into the fixed fragment.
    pub fixed_columns: usize,
    /// Emit a resize handle at the end of each column container.
    pub resize_handles: bool,
    /// `name` shared by the radio controls of one grid.
    pub control_group: Option<String>,
}

/// Rendered fragments of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub fixed: Option<Element>,
    pub full: Element,
}

impl RenderedSection {
    pub fn fixed_markup(&self) -> String {
        self.fixed.as_ref().map(Element::to_markup).unwrap_or_default()
    }

    pub fn full_markup(&self) -> String {
        self.full.to_markup()
    }
}

pub fn render_section(matrix: &CellMatrix, options: &RenderOptions) -> RenderedSection {
    let fixed_count = options.fixed_columns.min(matrix.column_count());

    let columns: Vec<Element> = matrix
        .columns()
        .enumerate()
        .map(|(c, cells)| render_column(c, cells, options))
        .collect();

    let fixed = (fixed_count > 0)
        .then(|| fragment().children(columns.iter().take(fixed_count).cloned()));

    RenderedSection {
        fixed,
        full: fragment().children(columns),
    }
}

fn fragment() -> Element {
    Element::div()
        .class(classes::FRAGMENT)
        .direction(Direction::Row)
}

fn render_column(column: usize, cells: &[Cell], options: &RenderOptions) -> Element {
    let mut container = Element::div()
        .class(classes::COLUMN)
        .class(classes::column(column))
        .attr(classes::DATA_COLUMN, column.to_string())
        .children(
            cells
                .iter()
                .enumerate()
                .map(|(row, cell)| render_cell(row, cell, options)),
        );

    if options.resize_handles {
        container = container.child(
            Element::div()
                .class(classes::RESIZE_HANDLE)
                .class(classes::resize_handle(column))
                .attr(classes::DATA_COLUMN, column.to_string()),
        );
    }
    container
}

fn render_cell(row: usize, cell: &Cell, options: &RenderOptions) -> Element {
    let wrapper = Element::div()
        .class(classes::CELL)
        .class(classes::row(row))
        .attr(classes::DATA_ROW, row.to_string());

    match cell {
        Cell::Markup(markup) => wrapper.markup(markup.clone()),
        Cell::Control(kind) => wrapper.child(render_control(row, *kind, options)),
    }
}

fn render_control(row: usize, kind: ControlKind, options: &RenderOptions) -> Element {
    let control = match kind {
        ControlKind::Checkbox => Element::input("checkbox"),
        ControlKind::Radio => {
            let input = Element::input("radio");
            match &options.control_group {
                Some(group) => input.attr("name", group.clone()),
                None => input,
            }
        }
    };
    control
        .class(classes::SELECT_CONTROL)
        .attr(classes::DATA_ROW, row.to_string())
}

/// Node handles of a mounted section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountedSection {
    pub fixed_root: Option<NodeId>,
    pub full_root: Option<NodeId>,
    /// Every column container as `(column, node)`, fixed pane first.
    pub columns: Vec<(usize, NodeId)>,
}

impl MountedSection {
    /// Containers of `column` in every pane it appears in.
    pub fn column_nodes(&self, column: usize) -> impl Iterator<Item = NodeId> + '_ {
        self.columns
            .iter()
            .filter(move |(c, _)| *c == column)
            .map(|(_, node)| *node)
    }
}

/// Mount `rendered` under the section's panes, replacing what was there.
///
/// The fixed fragment is dropped when there is no fixed pane to hold it.
pub fn mount_section(
    doc: &mut Document,
    fixed_pane: Option<NodeId>,
    full_pane: NodeId,
    rendered: &RenderedSection,
) -> MountedSection {
    let mut mounted = MountedSection::default();

    if let (Some(pane), Some(fragment)) = (fixed_pane, &rendered.fixed) {
        doc.clear_children(pane);
        mounted.fixed_root = doc.mount(pane, fragment);
    }
    doc.clear_children(full_pane);
    mounted.full_root = doc.mount(full_pane, &rendered.full);

    for root in [mounted.fixed_root, mounted.full_root].into_iter().flatten() {
        for &node in doc.children(root) {
            let column = doc
                .get(node)
                .and_then(|n| n.attr(classes::DATA_COLUMN))
                .and_then(|v| v.parse::<usize>().ok());
            if let Some(column) = column {
                mounted.columns.push((column, node));
            }
        }
    }
    mounted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CellMatrix {
        let rows = vec![
            vec!["a".to_string(), "1".to_string(), "x".to_string()],
            vec!["b".to_string(), "2".to_string(), "y".to_string()],
        ];
        CellMatrix::from_rows(&rows, 3, None)
    }

    #[test]
    fn test_no_fixed_fragment_without_fixed_columns() {
        let rendered = render_section(&matrix(), &RenderOptions::default());
        assert!(rendered.fixed.is_none());
        assert_eq!(rendered.fixed_markup(), "");
        assert_eq!(rendered.full.child_elements().len(), 3);
    }

    #[test]
    fn test_fixed_fragment_holds_leading_columns() {
        let options = RenderOptions {
            fixed_columns: 2,
            ..Default::default()
        };
        let rendered = render_section(&matrix(), &options);
        let fixed = rendered.fixed.as_ref().unwrap();
        let tagged: Vec<_> = fixed
            .child_elements()
            .iter()
            .map(|c| c.get_attr(classes::DATA_COLUMN).unwrap().to_string())
            .collect();
        assert_eq!(tagged, vec!["0", "1"]);
    }

    #[test]
    fn test_cells_keep_row_order() {
        let rendered = render_section(&matrix(), &RenderOptions::default());
        let first = &rendered.full.child_elements()[0];
        assert_eq!(
            first.to_markup(),
            "<div class=\"sg-col sg-col-0\" data-col=\"0\">\
             <div class=\"sg-cell sg-row-0\" data-row=\"0\">a</div>\
             <div class=\"sg-cell sg-row-1\" data-row=\"1\">b</div></div>"
        );
    }

    #[test]
    fn test_radio_controls_share_group() {
        let rows = vec![vec!["a".to_string()]];
        let matrix = CellMatrix::from_rows(&rows, 1, Some(&Cell::Control(ControlKind::Radio)));
        let options = RenderOptions {
            control_group: Some("g1".into()),
            ..Default::default()
        };
        let rendered = render_section(&matrix, &options);
        assert!(rendered.full_markup().contains("type=\"radio\""));
        assert!(rendered.full_markup().contains("name=\"g1\""));
    }

    #[test]
    fn test_mount_records_columns_in_both_panes() {
        let mut doc = Document::new();
        let root = doc.root();
        let fixed = doc.mount(root, &Element::div()).unwrap();
        let full = doc.mount(root, &Element::div()).unwrap();
        let options = RenderOptions {
            fixed_columns: 1,
            resize_handles: true,
            ..Default::default()
        };
        let mounted = mount_section(&mut doc, Some(fixed), full, &render_section(&matrix(), &options));
        assert_eq!(mounted.columns.len(), 4);
        assert_eq!(mounted.column_nodes(0).count(), 2);
        assert_eq!(mounted.column_nodes(2).count(), 1);
        assert_eq!(doc.find_by_class(full, classes::RESIZE_HANDLE).len(), 3);
    }
}
