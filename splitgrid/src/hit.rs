//! Mapping event targets to grid parts.

use splitdom::{Document, NodeId};

use crate::classes;
use crate::skeleton::Panes;

/// What a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A head cell of `column`, fixed or scrolling pane.
    HeadCell { column: usize },
    /// A body cell.
    BodyCell { row: usize, column: usize },
    /// The checkbox or radio of `row`.
    SelectControl { row: usize },
    /// The resize handle at the right edge of `column`.
    ColumnHandle { column: usize },
    /// The grid resize handle.
    GridHandle,
}

fn index_attr(doc: &Document, node: NodeId, name: &str) -> Option<usize> {
    doc.get(node)?.attr(name)?.parse().ok()
}

/// Walk up from `target` to the first grid part that contains it.
///
/// Nodes outside the grid, in the foot, or in a placeholder resolve to
/// `None`.
pub fn resolve(doc: &Document, panes: &Panes, target: NodeId) -> Option<HitTarget> {
    let mut row = None;
    let mut column = None;

    for node in doc.ancestors(target) {
        if node == panes.base {
            return None;
        }
        if node == panes.head_fixed || node == panes.head_static {
            return column.map(|column| HitTarget::HeadCell { column });
        }
        if node == panes.body_fixed || node == panes.body_static {
            return match (row, column) {
                (Some(row), Some(column)) => Some(HitTarget::BodyCell { row, column }),
                _ => None,
            };
        }
        if Some(node) == panes.grid_resize {
            return Some(HitTarget::GridHandle);
        }

        let n = doc.get(node)?;
        if n.has_class(classes::RESIZE_HANDLE) {
            return index_attr(doc, node, classes::DATA_COLUMN)
                .map(|column| HitTarget::ColumnHandle { column });
        }
        if n.has_class(classes::SELECT_CONTROL) {
            return index_attr(doc, node, classes::DATA_ROW)
                .map(|row| HitTarget::SelectControl { row });
        }
        if row.is_none() && n.has_class(classes::CELL) {
            row = index_attr(doc, node, classes::DATA_ROW);
        }
        if column.is_none() && n.has_class(classes::COLUMN) {
            column = index_attr(doc, node, classes::DATA_COLUMN);
        }
    }
    None
}
