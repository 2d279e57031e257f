use splitdom::{
    Direction, Element, MemorySurface, ScrollOffset, StyleRule, StyleSheet, Surface, TextMetrics,
};

fn surface() -> MemorySurface {
    MemorySurface::new().with_metrics(TextMetrics {
        char_width: 10,
        cell_padding: 4,
        control_width: 12,
    })
}

// ============================================================================
// Measurement
// ============================================================================

#[test]
fn test_text_width_uses_display_columns() {
    let mut s = surface();
    let root = s.document().root();
    let ascii = s.document_mut().mount(root, &Element::div().text("abc")).unwrap();
    let wide = s.document_mut().mount(root, &Element::div().text("日本")).unwrap();
    assert_eq!(s.measure_width(ascii), 34);
    assert_eq!(s.measure_width(wide), 44);
}

#[test]
fn test_markup_tags_are_not_measured() {
    let mut s = surface();
    let root = s.document().root();
    let node = s
        .document_mut()
        .mount(root, &Element::div().markup("<a href=\"#\">ab</a>"))
        .unwrap();
    assert_eq!(s.measure_width(node), 24);
}

#[test]
fn test_column_takes_max_and_row_takes_sum() {
    let mut s = surface();
    let root = s.document().root();
    let column = |a: &str, b: &str| {
        Element::div()
            .direction(Direction::Column)
            .child(Element::div().text(a))
            .child(Element::div().text(b))
    };
    let row = s
        .document_mut()
        .mount(
            root,
            &Element::div()
                .direction(Direction::Row)
                .child(column("a", "aaaa"))
                .child(column("bb", "b")),
        )
        .unwrap();
    let cols = s.document().children(row).to_vec();
    assert_eq!(s.measure_width(cols[0]), 44);
    assert_eq!(s.measure_width(cols[1]), 24);
    assert_eq!(s.measure_width(row), 68);
}

#[test]
fn test_style_sheet_width_overrides_natural_width() {
    let mut s = surface();
    let root = s.document().root();
    s.document_mut()
        .mount(root, &Element::div().id("g").child(Element::div().class("c0").text("abc")));
    let cell = s.document().first_by_class(root, "c0").unwrap();

    let mut sheet = StyleSheet::new();
    sheet.upsert(StyleRule::new("#g .c0").declare("width", "90px"));
    s.install_styles("g", &sheet);
    assert_eq!(s.measure_width(cell), 90);

    assert!(s.remove_styles("g"));
    assert_eq!(s.measure_width(cell), 34);
    assert!(!s.remove_styles("g"));
}

#[test]
fn test_later_rule_wins() {
    let mut s = surface();
    let root = s.document().root();
    let node = s.document_mut().mount(root, &Element::div().class("c")).unwrap();
    let mut sheet = StyleSheet::new();
    sheet.upsert(StyleRule::new(".c").declare("width", "10px"));
    sheet.upsert(StyleRule::new("div.c").declare("width", "20px"));
    s.install_styles("k", &sheet);
    assert_eq!(s.measure_width(node), 20);
}

// ============================================================================
// Sizing and scrolling
// ============================================================================

#[test]
fn test_size_defaults_to_viewport() {
    let mut s = MemorySurface::new().with_viewport(300, 200);
    let root = s.document().root();
    let node = s.document_mut().mount(root, &Element::div()).unwrap();
    assert_eq!(s.size(node), (300, 200));
    s.set_size(node, 120, 40);
    assert_eq!(s.size(node), (120, 40));
    assert_eq!(s.measure_width(node), 120);
}

#[test]
fn test_scroll_offsets_clamp_at_zero() {
    let mut s = surface();
    let root = s.document().root();
    let pane = s.document_mut().mount(root, &Element::div()).unwrap();
    assert_eq!(s.scroll_offset(pane), ScrollOffset::default());
    s.set_scroll_offset(pane, ScrollOffset::new(-5, 40));
    assert_eq!(s.scroll_offset(pane), ScrollOffset::new(0, 40));
}

#[test]
fn test_text_selection_clears_are_counted() {
    let mut s = surface();
    s.clear_text_selection();
    s.clear_text_selection();
    assert_eq!(s.selection_clears(), 2);
}
