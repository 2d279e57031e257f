use serde_json::json;
use splitdom::Element;
use splitgrid::error::SourceError;
use splitgrid::source::{self, SourceData, SourceInput, SourceType, read_document, read_object, read_object_str, read_table};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

// ============================================================================
// Object
// ============================================================================

#[test]
fn test_object_sections_and_cell_text() {
    let data = read_object(&json!({
        "head": [["Name", "Qty", "Note"]],
        "BODY": [["apple", 3, null], ["kiwi", 12.5, true]]
    }))
    .unwrap();
    assert_eq!(data.head, Some(vec![row(&["Name", "Qty", "Note"])]));
    assert_eq!(
        data.body,
        Some(vec![row(&["apple", "3", ""]), row(&["kiwi", "12.5", "true"])])
    );
    assert_eq!(data.foot, None);
}

#[test]
fn test_object_null_section_is_absent() {
    let data = read_object(&json!({ "Head": null, "Body": [] })).unwrap();
    assert_eq!(data.head, None);
    assert_eq!(data.body, Some(vec![]));
}

#[test]
fn test_object_rejects_bad_shapes() {
    assert!(matches!(
        read_object(&json!([1, 2])),
        Err(SourceError::Malformed { .. })
    ));
    assert!(matches!(
        read_object(&json!({ "Body": "rows" })),
        Err(SourceError::Malformed { .. })
    ));
    assert!(matches!(
        read_object(&json!({ "Body": [1] })),
        Err(SourceError::Malformed { .. })
    ));
    assert!(matches!(read_object_str("{ nope"), Err(SourceError::Parse(_))));
}

#[test]
fn test_object_from_text() {
    let data = read_object_str(r#"{"Foot": [["total", "15"]]}"#).unwrap();
    assert_eq!(data.foot, Some(vec![row(&["total", "15"])]));
    assert!(data.head.is_none() && data.body.is_none());
}

// ============================================================================
// Table
// ============================================================================

fn tr(tag: &str, cells: &[&str]) -> Element {
    Element::new("tr").children(cells.iter().map(|c| Element::new(tag).markup(*c)))
}

#[test]
fn test_table_groups_and_bare_rows() {
    let table = Element::new("TABLE")
        .child(Element::new("thead").child(tr("th", &["A", "B"])))
        .child(Element::new("tbody").child(tr("td", &["1", "<i>2</i>"])))
        .child(tr("td", &["3", "4"]))
        .child(Element::new("tfoot").child(tr("td", &["sum", "10"])));
    let data = read_table(&table).unwrap();
    assert_eq!(data.head, Some(vec![row(&["A", "B"])]));
    assert_eq!(data.body, Some(vec![row(&["1", "<i>2</i>"]), row(&["3", "4"])]));
    assert_eq!(data.foot, Some(vec![row(&["sum", "10"])]));
}

#[test]
fn test_table_requires_table_root() {
    assert!(matches!(
        read_table(&Element::div()),
        Err(SourceError::Malformed { .. })
    ));
}

// ============================================================================
// Document
// ============================================================================

fn doc_row(cells: &[&str]) -> Element {
    Element::new("row").children(cells.iter().map(|c| Element::new("cell").text(*c)))
}

#[test]
fn test_document_groups() {
    let root = Element::new("grid")
        .child(Element::new("head").child(doc_row(&["Name"])))
        .child(Element::new("body").child(doc_row(&["fig"])).child(doc_row(&["date"])));
    let data = read_document(&root).unwrap();
    assert_eq!(data.head, Some(vec![row(&["Name"])]));
    assert_eq!(data.body, Some(vec![row(&["fig"]), row(&["date"])]));
}

#[test]
fn test_document_wrapped_root() {
    let root = Element::new("response").child(
        Element::new("grid").child(Element::new("Foot").child(doc_row(&["x"]))),
    );
    let data = read_document(&root).unwrap();
    assert_eq!(data.foot, Some(vec![row(&["x"])]));
}

#[test]
fn test_document_without_groups() {
    assert!(read_document(&Element::new("empty")).is_err());
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_load_dispatch() {
    let data = SourceData {
        body: Some(vec![row(&["a"])]),
        ..Default::default()
    };
    assert_eq!(
        source::load(SourceType::Xml, SourceInput::Data(data.clone())).unwrap(),
        data
    );
    assert!(matches!(
        source::load(SourceType::Table, SourceInput::Text("{}".into())),
        Err(SourceError::UnsupportedInput { .. })
    ));
    assert!(
        source::load(SourceType::Object, SourceInput::Value(json!({})))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_source_type_names() {
    let parsed: SourceType = serde_json::from_str("\"json\"").unwrap();
    assert_eq!(parsed, SourceType::Object);
    assert_eq!(SourceType::Xml.to_string(), "xml");
}
