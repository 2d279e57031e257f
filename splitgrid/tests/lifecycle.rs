use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;
use splitdom::{Element, MemorySurface, NodeId};
use splitgrid::classes;
use splitgrid::grid::NO_RESULTS_TEXT;
use splitgrid::prelude::*;

fn mounted() -> (MemorySurface, NodeId) {
    let mut surface = MemorySurface::new();
    let root = surface.document().root();
    let host = surface
        .document_mut()
        .mount(root, &Element::div().id("host"))
        .unwrap();
    (surface, host)
}

fn object_options() -> Options {
    Options {
        source_type: SourceType::Object,
        ..Default::default()
    }
}

fn fruit() -> serde_json::Value {
    json!({
        "Head": [["Name", "Qty"]],
        "Body": [["apple", "3"], ["kiwi", "12"]]
    })
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_container_by_node_or_id() {
    let (surface, host) = mounted();
    let grid = Grid::new(surface, host, fruit(), object_options(), PlatformCapabilities::mouse());
    assert!(grid.is_live());
    assert_eq!(grid.container(), Some(host));
    assert!(grid.markup().contains("apple"));

    let (surface, host) = mounted();
    let grid = Grid::new(surface, "host", fruit(), object_options(), PlatformCapabilities::mouse());
    assert_eq!(grid.container(), Some(host));
}

#[test]
fn test_missing_container_makes_inert_grid() {
    let (surface, _) = mounted();
    let mut grid = Grid::new(surface, "nowhere", fruit(), object_options(), PlatformCapabilities::mouse());
    assert!(!grid.is_live());
    assert_eq!(grid.container(), None);
    assert_eq!(grid.markup(), "");
    assert_eq!(grid.handle_event(&Event::PointerMove { x: 1, y: 1 }), EventResult::Ignored);
    grid.sort_column(0, None);
    grid.toggle_select_all(true);
    assert!(grid.selection().is_empty());
    grid.destroy();
}

#[test]
fn test_grid_ids_are_unique() {
    let (surface, _) = mounted();
    let a = Grid::new(surface, "host", fruit(), object_options(), PlatformCapabilities::mouse());
    let (surface, _) = mounted();
    let b = Grid::new(surface, "host", fruit(), object_options(), PlatformCapabilities::mouse());
    assert_ne!(a.id(), b.id());
    assert_eq!(a.id().scope(), format!("#{}", a.id()));
    assert!(a.id().to_string().starts_with("splitgrid-"));
}

#[test]
fn test_on_load_fires_once() {
    let loads = Rc::new(Cell::new(0));
    let counter = loads.clone();
    let options = object_options().on_load(move || counter.set(counter.get() + 1));
    let (surface, _) = mounted();
    let mut grid = Grid::new(surface, "host", fruit(), options, PlatformCapabilities::mouse());
    grid.sort_column(0, None);
    grid.sort_column(0, None);
    assert_eq!(loads.get(), 1);
}

#[test]
fn test_missing_body_shows_placeholder() {
    let (surface, _) = mounted();
    let data = json!({ "Head": [["Name", "Qty"]] });
    let grid = Grid::new(surface, "host", data, object_options(), PlatformCapabilities::mouse());
    assert!(grid.is_live());
    assert_eq!(grid.row_count(), 0);
    let panes = *grid.panes().unwrap();
    let placeholder = grid
        .surface()
        .document()
        .first_by_class(panes.body_static, classes::NO_RESULTS)
        .unwrap();
    let markup = grid.surface().document().outer_markup(placeholder);
    assert!(markup.contains(NO_RESULTS_TEXT));
}

#[test]
fn test_no_sections_renders_nothing() {
    let (surface, host) = mounted();
    let grid = Grid::new(surface, "host", json!({}), object_options(), PlatformCapabilities::mouse());
    assert!(!grid.is_live());
    assert_eq!(grid.container(), Some(host));
    assert_eq!(grid.markup(), "");
}

#[test]
fn test_unreadable_text_renders_empty() {
    let (surface, _) = mounted();
    let grid = Grid::new(surface, "host", "{ not json", object_options(), PlatformCapabilities::mouse());
    assert!(!grid.is_live());
    assert_eq!(grid.row_count(), 0);
    assert_eq!(grid.markup(), "");
}

#[test]
fn test_wrong_input_kind_renders_empty() {
    let (surface, _) = mounted();
    // A table source cannot read JSON values.
    let grid = Grid::new(surface, "host", fruit(), Options::default(), PlatformCapabilities::mouse());
    assert!(!grid.is_live());
}

#[test]
fn test_table_tree_source() {
    let table = Element::new("table")
        .child(Element::new("thead").child(Element::new("tr").child(Element::new("th").text("Name"))))
        .child(
            Element::new("tbody")
                .child(Element::new("tr").child(Element::new("td").markup("<b>fig</b>")))
                .child(Element::new("tr").child(Element::new("td").text("date"))),
        );
    let (surface, _) = mounted();
    let grid = Grid::new(surface, "host", table, Options::default(), PlatformCapabilities::mouse());
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.body_rows()[0], vec!["<b>fig</b>".to_string()]);
    assert!(grid.markup().contains("<b>fig</b>"));
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_destroy_clears_container_and_styles() {
    let (surface, host) = mounted();
    let options = Options {
        allow_column_resize: true,
        ..object_options()
    };
    let mut grid = Grid::new(surface, "host", fruit(), options, PlatformCapabilities::mouse());
    let key = grid.id().to_string();
    assert!(grid.surface().sheet(&key).is_some());

    grid.destroy();
    assert!(!grid.is_live());
    assert!(grid.surface().document().children(host).is_empty());
    assert!(grid.surface().sheet(&key).is_none());
    assert_eq!(grid.css(), "");

    grid.destroy();
    assert!(grid.surface().document().children(host).is_empty());
    assert_eq!(grid.surface().sheet_count(), 0);
}

#[test]
fn test_destroy_mid_drag_releases_listeners() {
    let (surface, _) = mounted();
    let options = Options {
        allow_column_resize: true,
        ..object_options()
    };
    let mut grid = Grid::new(surface, "host", fruit(), options, PlatformCapabilities::mouse());
    let panes = *grid.panes().unwrap();
    let handle = grid
        .surface()
        .document()
        .first_by_class(panes.head_static, classes::RESIZE_HANDLE)
        .unwrap();
    grid.handle_event(&Event::PointerDown {
        target: Some(handle),
        x: 10,
        y: 10,
        button: PointerButton::Primary,
        modifiers: Modifiers::new(),
    });
    assert!(grid.drag_active());

    grid.destroy();
    assert!(!grid.drag_active());
    assert_eq!(grid.listeners().active_count(), 0);
}

#[test]
fn test_events_after_destroy_are_ignored() {
    let (surface, _) = mounted();
    let mut grid = Grid::new(surface, "host", fruit(), object_options(), PlatformCapabilities::mouse());
    let panes = *grid.panes().unwrap();
    grid.destroy();

    assert_eq!(
        grid.handle_event(&Event::Scroll {
            target: panes.scroller()
        }),
        EventResult::Ignored
    );
    grid.select_indexes(&[0]);
    assert!(grid.selection().is_empty());
    grid.sort_column(0, None);
    assert_eq!(grid.sort_state(), None);
}
