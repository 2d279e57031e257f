//! Row selection state machine.
//!
//! Selected rows are positions in the current body order, kept in the order
//! they were selected. The first entry anchors shift-range selection. Every
//! operation returns the [`SelectionChange`] it caused.

use crate::sort::remap_positions;

/// Rows added and removed by one selection operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub added: Vec<usize>,
    pub removed: Vec<usize>,
    /// Row that was clicked, `None` for bulk operations.
    pub origin: Option<usize>,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Vec<usize>,
    multi: bool,
}

impl SelectionController {
    pub fn new(multi: bool) -> Self {
        Self {
            selected: Vec::new(),
            multi,
        }
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    /// Selected rows in ascending order.
    pub fn sorted(&self) -> Vec<usize> {
        let mut rows = self.selected.clone();
        rows.sort_unstable();
        rows
    }

    /// Select every row (only row 0 in single mode), or clear the selection.
    pub fn toggle_all(&mut self, select: bool, row_count: usize) -> SelectionChange {
        if !select {
            let removed = std::mem::take(&mut self.selected);
            return SelectionChange {
                removed,
                ..Default::default()
            };
        }
        let target: Vec<usize> = if self.multi {
            (0..row_count).collect()
        } else {
            (0..row_count.min(1)).collect()
        };
        self.replace(target, None)
    }

    /// Add rows (multi mode) or select only the first one (single mode).
    ///
    /// Rows outside `0..row_count` are ignored.
    pub fn select_indexes(&mut self, indexes: &[usize], row_count: usize) -> SelectionChange {
        let valid = indexes.iter().copied().filter(|r| *r < row_count);
        if !self.multi {
            let target: Vec<usize> = valid.take(1).collect();
            if target.is_empty() {
                return SelectionChange::default();
            }
            return self.replace(target, None);
        }

        let mut added = Vec::new();
        for row in valid {
            if !self.selected.contains(&row) {
                self.selected.push(row);
                added.push(row);
            }
        }
        SelectionChange {
            added,
            ..Default::default()
        }
    }

    /// Apply a click on `row`.
    ///
    /// Without multi mode, with nothing selected or without modifiers the
    /// selection becomes just `row`, or empty if `row` was the lone
    /// selection. `toggle` flips `row` alone. `range` adds every row between
    /// the first selected row and `row`, inclusive.
    pub fn update_selection(
        &mut self,
        row: usize,
        toggle: bool,
        range: bool,
        row_count: usize,
    ) -> SelectionChange {
        if row >= row_count {
            log::debug!("[selection] row {row} out of range ({row_count} rows)");
            return SelectionChange::default();
        }

        let origin = Some(row);
        if !self.multi || self.selected.is_empty() || (!toggle && !range) {
            if self.selected == [row] {
                let removed = std::mem::take(&mut self.selected);
                return SelectionChange {
                    removed,
                    origin,
                    ..Default::default()
                };
            }
            return self.replace(vec![row], origin);
        }

        if toggle {
            return match self.selected.iter().position(|r| *r == row) {
                Some(index) => {
                    self.selected.remove(index);
                    SelectionChange {
                        removed: vec![row],
                        origin,
                        ..Default::default()
                    }
                }
                None => {
                    self.selected.push(row);
                    SelectionChange {
                        added: vec![row],
                        origin,
                        ..Default::default()
                    }
                }
            };
        }

        let anchor = self.selected[0];
        let span: Vec<usize> = if anchor <= row {
            (anchor..=row).collect()
        } else {
            (row..=anchor).rev().collect()
        };
        let mut added = Vec::new();
        for r in span {
            if !self.selected.contains(&r) {
                self.selected.push(r);
                added.push(r);
            }
        }
        SelectionChange {
            added,
            origin,
            ..Default::default()
        }
    }

    /// Make selected positions follow their rows through a sort.
    pub fn remap(&mut self, mapping: &[usize]) {
        self.selected = remap_positions(&self.selected, mapping);
    }

    fn replace(&mut self, target: Vec<usize>, origin: Option<usize>) -> SelectionChange {
        let removed = self
            .selected
            .iter()
            .copied()
            .filter(|r| !target.contains(r))
            .collect();
        let added = target
            .iter()
            .copied()
            .filter(|r| !self.selected.contains(r))
            .collect();
        self.selected = target;
        SelectionChange {
            added,
            removed,
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_click_replaces_and_toggles_lone_row() {
        let mut sel = SelectionController::new(true);
        sel.update_selection(1, false, false, 5);
        let change = sel.update_selection(3, false, false, 5);
        assert_eq!(sel.selected(), &[3]);
        assert_eq!(change.added, vec![3]);
        assert_eq!(change.removed, vec![1]);
        let change = sel.update_selection(3, false, false, 5);
        assert!(sel.selected().is_empty());
        assert_eq!(change.removed, vec![3]);
    }

    #[test]
    fn test_ctrl_toggles_independently() {
        let mut sel = SelectionController::new(true);
        sel.update_selection(1, false, false, 5);
        sel.update_selection(4, true, false, 5);
        assert_eq!(sel.selected(), &[1, 4]);
        let change = sel.update_selection(1, true, false, 5);
        assert_eq!(sel.selected(), &[4]);
        assert_eq!(change.removed, vec![1]);
    }

    #[test]
    fn test_range_downward_from_anchor() {
        let mut sel = SelectionController::new(true);
        sel.update_selection(4, false, false, 6);
        let change = sel.update_selection(1, false, true, 6);
        assert_eq!(change.added, vec![3, 2, 1]);
        assert_eq!(sel.sorted(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_toggle_all_single_mode_selects_first_row() {
        let mut sel = SelectionController::new(false);
        sel.update_selection(2, false, false, 4);
        let change = sel.toggle_all(true, 4);
        assert_eq!(sel.selected(), &[0]);
        assert_eq!(change.removed, vec![2]);
        assert_eq!(change.origin, None);
    }

    #[test]
    fn test_toggle_all_off_reports_everything_removed() {
        let mut sel = SelectionController::new(true);
        sel.toggle_all(true, 3);
        let change = sel.toggle_all(false, 3);
        assert_eq!(change.removed, vec![0, 1, 2]);
        assert!(sel.selected().is_empty());
    }

    #[test]
    fn test_select_indexes_skips_known_and_invalid() {
        let mut sel = SelectionController::new(true);
        sel.select_indexes(&[1], 4);
        let change = sel.select_indexes(&[1, 2, 9], 4);
        assert_eq!(change.added, vec![2]);
        assert_eq!(sel.selected(), &[1, 2]);
    }

    #[test]
    fn test_remap_follows_rows() {
        let mut sel = SelectionController::new(true);
        sel.select_indexes(&[0], 2);
        sel.remap(&[1, 0]);
        assert_eq!(sel.selected(), &[1]);
    }
}
