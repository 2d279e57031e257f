//! Source adapters.
//!
//! Every supported input shape is normalized into [`SourceData`] before the
//! data model sees it.

mod document;
mod object;
mod table;

pub use document::read_document;
pub use object::{read_object, read_object_str};
pub use table::read_table;

use std::fmt;

use serde::{Deserialize, Serialize};
use splitdom::Element;

use crate::error::SourceError;
use crate::model::RawRow;

/// Normalized sections, each an ordered list of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceData {
    pub head: Option<Vec<RawRow>>,
    pub body: Option<Vec<RawRow>>,
    pub foot: Option<Vec<RawRow>>,
}

impl SourceData {
    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.body.is_none() && self.foot.is_none()
    }
}

/// Which adapter reads the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A table-shaped element tree.
    #[default]
    Table,
    /// An object with `Head`/`Body`/`Foot` arrays.
    #[serde(alias = "json")]
    Object,
    /// A hierarchical document with head/body/foot groups.
    Xml,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Object => "object",
            Self::Xml => "xml",
        })
    }
}

/// Raw input handed to a grid.
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// An already parsed element tree.
    Tree(Element),
    /// A JSON value.
    Value(serde_json::Value),
    /// Serialized JSON.
    Text(String),
    /// Data that is already normalized.
    Data(SourceData),
}

impl SourceInput {
    fn kind(&self) -> &'static str {
        match self {
            Self::Tree(_) => "tree",
            Self::Value(_) => "value",
            Self::Text(_) => "text",
            Self::Data(_) => "data",
        }
    }
}

impl From<SourceData> for SourceInput {
    fn from(data: SourceData) -> Self {
        Self::Data(data)
    }
}

impl From<Element> for SourceInput {
    fn from(tree: Element) -> Self {
        Self::Tree(tree)
    }
}

impl From<String> for SourceInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for SourceInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<serde_json::Value> for SourceInput {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

/// Normalize `input` with the adapter selected by `source_type`.
pub fn load(source_type: SourceType, input: SourceInput) -> Result<SourceData, SourceError> {
    match (source_type, input) {
        (_, SourceInput::Data(data)) => Ok(data),
        (SourceType::Object, SourceInput::Value(value)) => read_object(&value),
        (SourceType::Object, SourceInput::Text(text)) => read_object_str(&text),
        (SourceType::Table, SourceInput::Tree(tree)) => read_table(&tree),
        (SourceType::Xml, SourceInput::Tree(tree)) => read_document(&tree),
        (source_type, input) => Err(SourceError::unsupported(source_type, input.kind())),
    }
}

/// Rows of `<row><cell/>..</row>` children, with each cell's inner markup.
pub(crate) fn rows_of(group: &Element, is_row: impl Fn(&Element) -> bool) -> Vec<RawRow> {
    group
        .child_elements()
        .iter()
        .filter(|child| is_row(child))
        .map(|row| row.child_elements().iter().map(Element::inner_markup).collect())
        .collect()
}

/// Append `rows` to an optional section.
pub(crate) fn extend_section(section: &mut Option<Vec<RawRow>>, rows: Vec<RawRow>) {
    section.get_or_insert_with(Vec::new).extend(rows);
}
