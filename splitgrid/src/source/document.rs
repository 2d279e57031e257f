//! Adapter for hierarchical documents: a root holding head/body/foot groups,
//! each holding row elements whose children are cells.

use splitdom::Element;

use super::{SourceData, extend_section, rows_of};
use crate::error::SourceError;
use crate::model::Section;

fn group_of(tag: &str) -> Option<Section> {
    match tag.to_ascii_lowercase().as_str() {
        "head" | "thead" => Some(Section::Head),
        "body" | "tbody" => Some(Section::Body),
        "foot" | "tfoot" => Some(Section::Foot),
        _ => None,
    }
}

pub fn read_document(root: &Element) -> Result<SourceData, SourceError> {
    // Accept either the table-like root itself or a wrapper around it.
    let table = if root.child_elements().iter().any(|c| group_of(&c.tag).is_some()) {
        root
    } else {
        root.child_elements()
            .iter()
            .find(|c| c.child_elements().iter().any(|g| group_of(&g.tag).is_some()))
            .ok_or_else(|| SourceError::malformed("no head, body or foot group found"))?
    };

    let mut data = SourceData::default();
    for group in table.child_elements() {
        let rows = rows_of(group, |_| true);
        match group_of(&group.tag) {
            Some(Section::Head) => extend_section(&mut data.head, rows),
            Some(Section::Body) => extend_section(&mut data.body, rows),
            Some(Section::Foot) => extend_section(&mut data.foot, rows),
            None => {}
        }
    }
    Ok(data)
}
