//! Normalized cell matrices for the head, body and foot sections.

use crate::source::SourceData;

/// One body record as loaded from the source.
pub type RawRow = Vec<String>;

/// A horizontal band of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Head,
    Body,
    Foot,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Head, Section::Body, Section::Foot];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Body => "body",
            Self::Foot => "foot",
        }
    }
}

/// Interactive control rendered in the selection column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Checkbox,
    Radio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Source cell markup, emitted verbatim.
    Markup(String),
    /// Selection control for the row.
    Control(ControlKind),
}

impl Cell {
    pub fn empty() -> Self {
        Self::Markup(String::new())
    }
}

/// Column-major cells of one section: `columns[c][r]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellMatrix {
    columns: Vec<Vec<Cell>>,
    rows: usize,
}

impl CellMatrix {
    /// Build a rectangular matrix from rows.
    ///
    /// Rows are padded with empty cells or truncated to `data_columns`. When
    /// `lead` is set it becomes the first cell of every row.
    pub fn from_rows(rows: &[RawRow], data_columns: usize, lead: Option<&Cell>) -> Self {
        let offset = usize::from(lead.is_some());
        let mut columns: Vec<Vec<Cell>> = (0..data_columns + offset)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for row in rows {
            if let Some(lead) = lead {
                columns[0].push(lead.clone());
            }
            for c in 0..data_columns {
                let cell = row.get(c).cloned().unwrap_or_default();
                columns[c + offset].push(Cell::Markup(cell));
            }
        }

        Self {
            columns,
            rows: rows.len(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column(&self, index: usize) -> &[Cell] {
        self.columns.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    pub fn columns(&self) -> impl Iterator<Item = &[Cell]> {
        self.columns.iter().map(Vec::as_slice)
    }
}

/// Inputs to [`DataModel::build`] derived from options and capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelConfig {
    pub show_selection_column: bool,
    pub multi_select: bool,
    pub fixed_columns: usize,
    pub fixed_columns_supported: bool,
}

#[derive(Debug, Clone)]
pub struct DataModel {
    head: Option<CellMatrix>,
    foot: Option<CellMatrix>,
    raw_rows: Option<Vec<RawRow>>,
    data_columns: usize,
    selection_control: Option<ControlKind>,
    fixed_columns: usize,
}

impl DataModel {
    /// Normalize source sections. Returns `None` when no section is present.
    pub fn build(source: SourceData, config: ModelConfig) -> Option<Self> {
        if source.head.is_none() && source.body.is_none() && source.foot.is_none() {
            log::debug!("[model] no head, body or foot present");
            return None;
        }

        let data_columns = [&source.head, &source.body, &source.foot]
            .into_iter()
            .flatten()
            .find_map(|rows| rows.first())
            .map(Vec::len)
            .unwrap_or(0);

        let selection_control = config.show_selection_column.then_some(if config.multi_select {
            ControlKind::Checkbox
        } else {
            ControlKind::Radio
        });
        let lead = selection_control.map(|_| Cell::empty());

        let fixed_columns = if config.fixed_columns_supported {
            config.fixed_columns + usize::from(selection_control.is_some())
        } else {
            0
        };

        let head = source
            .head
            .map(|rows| CellMatrix::from_rows(&rows, data_columns, lead.as_ref()));
        let foot = source
            .foot
            .map(|rows| CellMatrix::from_rows(&rows, data_columns, lead.as_ref()));

        let model = Self {
            head,
            foot,
            raw_rows: source.body,
            data_columns,
            selection_control,
            fixed_columns,
        };
        log::debug!(
            "[model] {} columns ({} fixed), {} body rows",
            model.columns(),
            model.fixed_columns,
            model.row_count()
        );
        Some(model)
    }

    /// Rendered column count, including the selection column.
    pub fn columns(&self) -> usize {
        self.data_columns + self.column_offset()
    }

    pub fn data_columns(&self) -> usize {
        self.data_columns
    }

    /// 1 when the selection column is present, else 0.
    pub fn column_offset(&self) -> usize {
        usize::from(self.selection_control.is_some())
    }

    pub fn selection_control(&self) -> Option<ControlKind> {
        self.selection_control
    }

    pub fn fixed_columns(&self) -> usize {
        self.fixed_columns.min(self.columns())
    }

    pub fn head(&self) -> Option<&CellMatrix> {
        self.head.as_ref()
    }

    pub fn foot(&self) -> Option<&CellMatrix> {
        self.foot.as_ref()
    }

    pub fn has_body(&self) -> bool {
        self.raw_rows.is_some()
    }

    /// Body matrix built from the rows in their current order.
    pub fn body(&self) -> Option<CellMatrix> {
        let lead = self.selection_control.map(Cell::Control);
        self.raw_rows
            .as_ref()
            .map(|rows| CellMatrix::from_rows(rows, self.data_columns, lead.as_ref()))
    }

    pub fn raw_rows(&self) -> &[RawRow] {
        self.raw_rows.as_deref().unwrap_or(&[])
    }

    pub fn raw_rows_mut(&mut self) -> Option<&mut Vec<RawRow>> {
        self.raw_rows.as_mut()
    }

    pub fn row_count(&self) -> usize {
        self.raw_rows().len()
    }

    /// Map a rendered column to its index in the raw rows.
    pub fn data_column(&self, column: usize) -> Option<usize> {
        column
            .checked_sub(self.column_offset())
            .filter(|c| *c < self.data_columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        ModelConfig {
            show_selection_column: false,
            multi_select: true,
            fixed_columns: 0,
            fixed_columns_supported: true,
        }
    }

    fn rows(data: &[&[&str]]) -> Vec<RawRow> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_matrix_pads_and_truncates() {
        let matrix = CellMatrix::from_rows(&rows(&[&["a"], &["b", "c", "d"]]), 2, None);
        assert_eq!(matrix.column_count(), 2);
        assert_eq!(matrix.column(1), &[Cell::empty(), Cell::Markup("c".into())]);
    }

    #[test]
    fn test_data_column_accounts_for_selection_column() {
        let source = SourceData {
            body: Some(rows(&[&["a", "b"]])),
            ..Default::default()
        };
        let model = DataModel::build(
            source,
            ModelConfig {
                show_selection_column: true,
                ..config()
            },
        )
        .unwrap();
        assert_eq!(model.data_column(0), None);
        assert_eq!(model.data_column(1), Some(0));
        assert_eq!(model.data_column(3), None);
    }

    #[test]
    fn test_fixed_columns_clamped_to_columns() {
        let source = SourceData {
            body: Some(rows(&[&["a", "b"]])),
            ..Default::default()
        };
        let model = DataModel::build(
            source,
            ModelConfig {
                fixed_columns: 5,
                ..config()
            },
        )
        .unwrap();
        assert_eq!(model.fixed_columns(), 2);
    }
}
