//! The grid controller.
//!
//! [`Grid`] owns the surface it renders into and every piece of per-grid
//! state: the data model, mounted section handles, the style sheet, the sort
//! engine, the selection and the drag controllers. Host input arrives
//! through [`Grid::handle_event`]; everything else is a plain method call.
//!
//! Failures never escape: a missing container makes the grid inert, and a
//! source that cannot be read renders as an empty grid.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use splitdom::{
    Document, Element, Event, Listeners, Modifiers, NodeId, PointerButton, StyleSheet, Surface,
};

use crate::capabilities::PlatformCapabilities;
use crate::classes;
use crate::error::OptionsError;
use crate::highlight::{self, HighlightColors};
use crate::hit::{self, HitTarget};
use crate::layout::ColumnLayoutEngine;
use crate::model::{DataModel, ModelConfig, RawRow, Section};
use crate::options::Options;
use crate::render::{MountedSection, RenderOptions, mount_section, render_section};
use crate::resize::{ColumnResizeController, GridResizeController};
use crate::scroll::{ScrollSync, ScrollTargets};
use crate::selection::{SelectionChange, SelectionController};
use crate::skeleton::{self, Panes};
use crate::sort::{SortEngine, SortRequest, SortState};
use crate::source::{self, SourceData, SourceInput};
use crate::styles::StyleRegistry;

/// Text shown in the body when the source has no body section.
pub const NO_RESULTS_TEXT: &str = "No results returned";

/// Unique identifier for a grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Selector prefix scoping this grid's style rules.
    pub fn scope(&self) -> String {
        format!("#{self}")
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "splitgrid-{}", self.0)
    }
}

/// Where a grid mounts itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerRef {
    Node(NodeId),
    /// The `id` of a mounted node.
    Id(String),
}

impl ContainerRef {
    fn resolve(&self, doc: &Document) -> Option<NodeId> {
        match self {
            Self::Node(node) => doc.contains(*node).then_some(*node),
            Self::Id(id) => doc.by_id(id),
        }
    }
}

impl From<NodeId> for ContainerRef {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for ContainerRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for ContainerRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

/// Whether the grid acted on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

/// State that exists only while the grid is rendered.
#[derive(Debug)]
struct Live {
    panes: Panes,
    model: DataModel,
    head: Option<MountedSection>,
    body: Option<MountedSection>,
    foot: Option<MountedSection>,
    body_options: RenderOptions,
    layout: ColumnLayoutEngine,
    scroll: ScrollSync,
}

impl Live {
    fn scroll_targets(&self) -> ScrollTargets {
        ScrollTargets {
            scroller: self.panes.scroller(),
            head: self.head.as_ref().and_then(|s| s.full_root),
            foot: self.foot.as_ref().and_then(|s| s.full_root),
            fixed_body: self.body.as_ref().and_then(|s| s.fixed_root),
        }
    }

    fn body_roots(&self) -> Vec<NodeId> {
        self.body
            .as_ref()
            .map(|s| [s.fixed_root, s.full_root].into_iter().flatten().collect())
            .unwrap_or_default()
    }
}

pub struct Grid<S: Surface> {
    id: GridId,
    surface: S,
    options: Options,
    capabilities: PlatformCapabilities,
    container: Option<NodeId>,
    live: Option<Live>,
    styles: StyleRegistry,
    sort: SortEngine,
    selection: SelectionController,
    grid_resize: GridResizeController,
    column_resize: ColumnResizeController,
    listeners: Listeners,
    loaded: bool,
}

impl<S: Surface> Grid<S> {
    pub fn new(
        surface: S,
        container: impl Into<ContainerRef>,
        source: impl Into<SourceInput>,
        options: Options,
        capabilities: PlatformCapabilities,
    ) -> Self {
        let id = GridId::next();
        let mut grid = Self {
            id,
            surface,
            styles: StyleRegistry::new(id.to_string()),
            sort: SortEngine::new(options.sort_cache_limit),
            selection: SelectionController::new(options.multi_selection()),
            options,
            capabilities,
            container: None,
            live: None,
            grid_resize: GridResizeController::new(),
            column_resize: ColumnResizeController::new(),
            listeners: Listeners::new(),
            loaded: false,
        };

        if let Err(e) = grid.options.validate() {
            log::warn!("[grid] {id}: {e}");
        }

        let container = container.into();
        grid.container = container.resolve(grid.surface.document());
        let Some(container_node) = grid.container else {
            log::warn!("[grid] {id}: container {container:?} not found, grid is inert");
            return grid;
        };

        let data = match source::load(grid.options.source_type, source.into()) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("[grid] {id}: {e}");
                SourceData::default()
            }
        };
        grid.build(container_node, data);
        grid
    }

    fn build(&mut self, container: NodeId, data: SourceData) {
        let config = ModelConfig {
            show_selection_column: self.options.show_selection_column && self.options.allow_selection,
            multi_select: self.options.multi_selection(),
            fixed_columns: self.options.fixed_columns,
            fixed_columns_supported: self.capabilities.supports_fixed_columns(),
        };
        let Some(model) = DataModel::build(data, config) else {
            log::debug!("[grid] {}: no sections, nothing rendered", self.id);
            return;
        };
        if self.options.fixed_columns > model.data_columns() {
            let e = OptionsError::FixedColumns {
                requested: self.options.fixed_columns,
                columns: model.data_columns(),
            };
            log::warn!("[grid] {}: {e}", self.id);
        }

        let column_resize = self.column_resize_enabled();
        let doc = self.surface.document_mut();
        let Some(panes) =
            skeleton::mount(doc, container, &self.id.to_string(), self.options.allow_grid_resize)
        else {
            log::warn!("[grid] {}: skeleton could not be mounted", self.id);
            return;
        };

        let fixed = model.fixed_columns();
        let fixed_pane = |section: Section| (fixed > 0).then_some(panes.section(section).0);
        let body_options = RenderOptions {
            fixed_columns: fixed,
            resize_handles: false,
            control_group: Some(format!("{}-select", self.id)),
        };
        let head_options = RenderOptions {
            resize_handles: column_resize,
            ..body_options.clone()
        };

        let head = model.head().map(|matrix| {
            let rendered = render_section(matrix, &head_options);
            mount_section(doc, fixed_pane(Section::Head), panes.head_static, &rendered)
        });
        let body = match model.body() {
            Some(matrix) => {
                let rendered = render_section(&matrix, &body_options);
                Some(mount_section(doc, fixed_pane(Section::Body), panes.body_static, &rendered))
            }
            None => {
                doc.mount(
                    panes.body_static,
                    &Element::div().class(classes::NO_RESULTS).text(NO_RESULTS_TEXT),
                );
                None
            }
        };
        let foot = model.foot().map(|matrix| {
            let rendered = render_section(matrix, &body_options);
            mount_section(doc, fixed_pane(Section::Foot), panes.foot_static, &rendered)
        });

        skeleton::hide_absent(
            &mut self.styles,
            &self.id.scope(),
            model.head().is_some(),
            model.has_body(),
            model.foot().is_some(),
        );
        let settings = self
            .options
            .column_settings(model.columns(), model.column_offset() == 1);
        let layout = ColumnLayoutEngine::new(self.id.scope(), settings, column_resize);

        log::debug!(
            "[grid] {}: rendered {} columns ({fixed} fixed), {} rows",
            self.id,
            model.columns(),
            model.row_count()
        );
        self.live = Some(Live {
            panes,
            model,
            head,
            body,
            foot,
            body_options,
            layout,
            scroll: ScrollSync::new(),
        });

        self.relayout(false);
        self.refresh_highlight();

        if !self.loaded {
            self.loaded = true;
            if let Some(on_load) = &self.options.callbacks.on_load {
                on_load();
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn capabilities(&self) -> PlatformCapabilities {
        self.capabilities
    }

    /// The resolved container, if any.
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// True while the grid is rendered and responds to input.
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn panes(&self) -> Option<&Panes> {
        self.live.as_ref().map(|l| &l.panes)
    }

    /// Rendered column count, including the selection column.
    pub fn columns(&self) -> usize {
        self.live.as_ref().map_or(0, |l| l.model.columns())
    }

    pub fn fixed_columns(&self) -> usize {
        self.live.as_ref().map_or(0, |l| l.model.fixed_columns())
    }

    /// Selected rows, in selection order.
    pub fn selection(&self) -> &[usize] {
        self.selection.selected()
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort.state()
    }

    pub fn column_widths(&self) -> &[u32] {
        self.live.as_ref().map_or(&[], |l| l.layout.widths())
    }

    /// Body rows in their current order.
    pub fn body_rows(&self) -> &[RawRow] {
        self.live.as_ref().map_or(&[], |l| l.model.raw_rows())
    }

    pub fn row_count(&self) -> usize {
        self.body_rows().len()
    }

    pub fn style_sheet(&self) -> &StyleSheet {
        self.styles.sheet()
    }

    pub fn css(&self) -> String {
        self.styles.sheet().to_css()
    }

    /// Markup of everything inside the container.
    pub fn markup(&self) -> String {
        self.container
            .map(|c| self.surface.document().inner_markup(c))
            .unwrap_or_default()
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn drag_active(&self) -> bool {
        self.grid_resize.is_active() || self.column_resize.is_active()
    }

    fn column_resize_enabled(&self) -> bool {
        self.options.allow_column_resize && self.capabilities.supports_column_resize()
    }

    fn selection_enabled(&self) -> bool {
        self.live.is_some() && self.options.allow_selection
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sort the body on `column`.
    ///
    /// Without an explicit direction, sorting the last sorted column again
    /// flips its direction; any other column sorts ascending. Sorts never
    /// overlap: each one holds `&mut self` until its callback has returned.
    ///
    /// Column widths keep their current rules, including widths set by
    /// dragging a column.
    pub fn sort_column(&mut self, column: usize, ascending: Option<bool>) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        let Some(sort_type) = live.layout.settings(column).map(|s| s.sort_type) else {
            log::debug!("[grid] {}: no column {column} to sort", self.id);
            return;
        };
        let Some(data_column) = live.model.data_column(column) else {
            return;
        };
        let ascending = self.sort.resolve_direction(column, ascending);
        let Some(rows) = live.model.raw_rows_mut() else {
            return;
        };
        let request = SortRequest {
            column,
            data_column,
            sort_type,
            ascending,
        };
        let Some(outcome) = self
            .sort
            .sort(rows, request, self.options.sort_cleaner.as_ref())
        else {
            return;
        };

        self.rerender_body();
        self.relayout(false);
        self.selection.remap(&outcome.mapping);
        self.refresh_highlight();
        if let Some(live) = self.live.as_mut() {
            live.scroll.invalidate();
        }
        self.sync_scroll();

        if let Some(on_sort) = &self.options.callbacks.on_column_sort {
            on_sort(&outcome.mapping, outcome.column, outcome.previous);
        }
    }

    fn rerender_body(&mut self) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        let Some(matrix) = live.model.body() else {
            return;
        };
        let fixed_pane = (live.model.fixed_columns() > 0).then_some(live.panes.body_fixed);
        let rendered = render_section(&matrix, &live.body_options);
        live.body = Some(mount_section(
            self.surface.document_mut(),
            fixed_pane,
            live.panes.body_static,
            &rendered,
        ));
    }

    fn relayout(&mut self, force: bool) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        let sections: Vec<&MountedSection> = [&live.head, &live.body, &live.foot]
            .into_iter()
            .flatten()
            .collect();
        live.layout
            .recompute_widths(&mut self.surface, &mut self.styles, &sections, force);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select every row (row 0 in single-select mode), or clear the selection.
    pub fn toggle_select_all(&mut self, select: bool) {
        if !self.selection_enabled() {
            return;
        }
        let change = self.selection.toggle_all(select, self.row_count());
        self.after_selection(change);
    }

    /// Add rows to the selection, or select only the first in single-select mode.
    pub fn select_indexes(&mut self, indexes: &[usize]) {
        if !self.selection_enabled() {
            return;
        }
        let change = self.selection.select_indexes(indexes, self.row_count());
        self.after_selection(change);
    }

    fn update_selection(&mut self, row: usize, toggle: bool, range: bool) {
        let change = self
            .selection
            .update_selection(row, toggle, range, self.row_count());
        self.after_selection(change);
    }

    fn after_selection(&mut self, change: SelectionChange) {
        log::trace!(
            "[grid] {}: +{:?} -{:?} from {:?}",
            self.id,
            change.added,
            change.removed,
            change.origin
        );
        self.refresh_highlight();
        if let Some(on_select) = &self.options.callbacks.on_row_select {
            on_select(&change.added, &change.removed, change.origin);
        }
    }

    fn refresh_highlight(&mut self) {
        let Some(live) = self.live.as_ref() else {
            return;
        };
        let colors = HighlightColors {
            selected: self.options.selected_background.clone(),
            selected_fixed: self.options.selected_background_fixed.clone(),
        };
        highlight::apply_rules(
            &mut self.styles,
            &self.id.scope(),
            &colors,
            self.selection.selected(),
            live.model.fixed_columns() > 0,
        );
        self.styles.flush(&mut self.surface);
        let roots = live.body_roots();
        highlight::apply_checked(self.surface.document_mut(), &roots, self.selection.selected());
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        let Some(panes) = self.live.as_ref().map(|l| l.panes) else {
            return EventResult::Ignored;
        };

        match *event {
            Event::PointerDown {
                target,
                x,
                y,
                button,
                ..
            } => self.on_pointer_down(&panes, target, x, y, button),
            Event::PointerMove { x, y } => self.on_pointer_move(x, y),
            Event::PointerUp { x, y, .. } => self.on_pointer_up(x, y),
            Event::Click {
                target,
                button,
                modifiers,
            } => self.on_click(&panes, target, button, modifiers),
            Event::Scroll { target } => {
                if target != panes.scroller() {
                    return EventResult::Ignored;
                }
                self.sync_scroll();
                EventResult::Consumed
            }
            Event::Wheel { target, delta_y } => {
                let over_fixed = target.is_some_and(|t| {
                    self.surface.document().is_descendant_of(t, panes.body_fixed)
                });
                if !over_fixed || self.fixed_columns() == 0 {
                    return EventResult::Ignored;
                }
                if let Some(live) = self.live.as_mut() {
                    let targets = live.scroll_targets();
                    live.scroll.wheel(&mut self.surface, &targets, delta_y);
                }
                EventResult::Consumed
            }
        }
    }

    /// End any drag after the host lost pointer capture.
    ///
    /// The drag finishes with the last applied size, firing the end callback.
    pub fn pointer_cancel(&mut self) {
        if let Some((width, height)) = self.grid_resize.cancel() {
            log::debug!("[grid] {}: grid resize cancelled", self.id);
            self.sync_scroll();
            if let Some(on_end) = &self.options.callbacks.on_resize_grid_end {
                on_end(width, height);
            }
        }
        if self.column_resize.is_active() {
            log::debug!("[grid] {}: column resize cancelled", self.id);
            self.finish_column_resize();
        }
    }

    fn on_pointer_down(
        &mut self,
        panes: &Panes,
        target: Option<NodeId>,
        x: i32,
        y: i32,
        button: PointerButton,
    ) -> EventResult {
        let Some(target) = target else {
            return EventResult::Ignored;
        };
        if self.drag_active() {
            return EventResult::Ignored;
        }

        let started = match hit::resolve(self.surface.document(), panes, target) {
            Some(HitTarget::GridHandle) if self.options.allow_grid_resize => self
                .grid_resize
                .start(&self.surface, &self.listeners, panes.base, x, y, button),
            Some(HitTarget::ColumnHandle { column }) if self.column_resize_enabled() => {
                self.start_column_resize(panes, column, x, button)
            }
            _ => false,
        };
        if started {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    fn start_column_resize(
        &mut self,
        panes: &Panes,
        column: usize,
        x: i32,
        button: PointerButton,
    ) -> bool {
        let Some(live) = self.live.as_ref() else {
            return false;
        };
        let Some(width) = live.layout.width(column) else {
            return false;
        };
        let scroll_x = if column < live.model.fixed_columns() {
            0
        } else {
            self.surface.scroll_offset(panes.scroller()).x
        };
        let origin_left = live.layout.column_left(column) as i32 + width as i32 - scroll_x;

        self.column_resize.start(
            self.surface.document_mut(),
            &self.listeners,
            panes.base,
            column,
            x,
            width,
            origin_left,
            button,
        )
    }

    fn on_pointer_move(&mut self, x: i32, y: i32) -> EventResult {
        if self.grid_resize.is_active() {
            if let Some((width, height)) = self.grid_resize.on_move(&mut self.surface, x, y) {
                if let Some(on_resize) = &self.options.callbacks.on_resize_grid {
                    on_resize(width, height);
                }
                self.sync_scroll();
            }
            return EventResult::Consumed;
        }
        if self.column_resize.is_active() {
            if let Some(moved) = self.column_resize.on_move(&mut self.surface, x)
                && let Some(on_resize) = &self.options.callbacks.on_resize_column
            {
                on_resize(moved.column, moved.width);
            }
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn on_pointer_up(&mut self, x: i32, y: i32) -> EventResult {
        if self.grid_resize.is_active() {
            if let Some((width, height)) = self.grid_resize.end(&mut self.surface, x, y) {
                self.sync_scroll();
                if let Some(on_end) = &self.options.callbacks.on_resize_grid_end {
                    on_end(width, height);
                }
            }
            return EventResult::Consumed;
        }
        if self.column_resize.is_active() {
            self.finish_column_resize();
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn finish_column_resize(&mut self) {
        let Some(commit) = self.column_resize.end(self.surface.document_mut()) else {
            return;
        };
        if let Some(live) = self.live.as_mut() {
            live.layout.set_column_width(
                &mut self.surface,
                &mut self.styles,
                commit.column,
                commit.width,
            );
        }
        self.sync_scroll();
        if let Some(on_end) = &self.options.callbacks.on_resize_column_end {
            on_end(commit.column, commit.width);
        }
    }

    fn on_click(
        &mut self,
        panes: &Panes,
        target: Option<NodeId>,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> EventResult {
        if button != PointerButton::Primary {
            return EventResult::Ignored;
        }
        let Some(target) = target else {
            return EventResult::Ignored;
        };

        match hit::resolve(self.surface.document(), panes, target) {
            Some(HitTarget::HeadCell { column }) => {
                if !self.options.allow_client_sort {
                    return EventResult::Ignored;
                }
                if self.drag_active() {
                    log::debug!("[grid] {}: sort ignored during drag", self.id);
                    return EventResult::Ignored;
                }
                self.sort_column(column, None);
                EventResult::Consumed
            }
            Some(HitTarget::SelectControl { row }) if self.selection_enabled() => {
                self.select_from_click(row, true, modifiers)
            }
            Some(HitTarget::BodyCell { row, column }) if self.selection_enabled() => {
                let selection_column = self
                    .live
                    .as_ref()
                    .is_some_and(|l| l.model.selection_control().is_some());
                let in_selection_column = selection_column && column == 0;
                // Touch hosts with a selection column only select from it.
                if self.capabilities.taps_toggle() && selection_column && !in_selection_column {
                    return EventResult::Ignored;
                }
                self.select_from_click(row, in_selection_column, modifiers)
            }
            _ => EventResult::Ignored,
        }
    }

    /// Clicks in the selection column and taps on touch hosts act as if the
    /// toggle modifier were held. Toggle wins over range.
    fn select_from_click(
        &mut self,
        row: usize,
        in_selection_column: bool,
        modifiers: Modifiers,
    ) -> EventResult {
        let toggle =
            modifiers.toggle_held() || in_selection_column || self.capabilities.taps_toggle();
        self.update_selection(row, toggle, modifiers.range_held());
        EventResult::Consumed
    }

    fn sync_scroll(&mut self) {
        if let Some(live) = self.live.as_mut() {
            let targets = live.scroll_targets();
            live.scroll.sync(&mut self.surface, &targets);
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Release listeners, clear the container and remove the style sheet.
    ///
    /// Safe to call any number of times.
    pub fn destroy(&mut self) {
        self.grid_resize.cancel();
        self.column_resize.end(self.surface.document_mut());
        self.styles.detach(&mut self.surface);
        if let Some(container) = self.container {
            self.surface.document_mut().clear_children(container);
        }
        if self.live.take().is_some() {
            log::debug!("[grid] {}: destroyed", self.id);
        }
    }
}

impl<S: Surface> fmt::Debug for Grid<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("live", &self.live.is_some())
            .field("rows", &self.row_count())
            .field("selection", &self.selection.selected())
            .field("sort", &self.sort.state())
            .finish()
    }
}
