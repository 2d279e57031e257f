//! Adapter for table-shaped element trees (`table > thead|tbody|tfoot > tr > td|th`).

use splitdom::Element;

use super::{SourceData, extend_section, rows_of};
use crate::error::SourceError;

fn is_tag(element: &Element, tag: &str) -> bool {
    element.tag.eq_ignore_ascii_case(tag)
}

pub fn read_table(root: &Element) -> Result<SourceData, SourceError> {
    if !is_tag(root, "table") {
        return Err(SourceError::malformed(format!(
            "expected a <table> root, found <{}>",
            root.tag
        )));
    }

    let is_row = |e: &Element| is_tag(e, "tr");
    let mut data = SourceData::default();
    for child in root.child_elements() {
        if is_tag(child, "thead") {
            extend_section(&mut data.head, rows_of(child, is_row));
        } else if is_tag(child, "tbody") {
            extend_section(&mut data.body, rows_of(child, is_row));
        } else if is_tag(child, "tfoot") {
            extend_section(&mut data.foot, rows_of(child, is_row));
        } else if is_row(child) {
            let row = child.child_elements().iter().map(Element::inner_markup).collect();
            extend_section(&mut data.body, vec![row]);
        }
    }
    Ok(data)
}
