//! The table handle.
//!
//! [`Table`] owns the ordered column sequence and everything that rewrites
//! it: sort state, the reorder and resize gestures, and pinned offsets. Every
//! rewrite happens in place under one lock and marks the table dirty; the
//! rendering layer reads [`Table::columns`] when it redraws.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::column::{Column, ColumnId, RawColumn, decorate, ids_equal, position};
use crate::config::TableConfig;
use crate::event::{ACTIVATE_KEY, ColumnEvent, EventResult, Key};
use crate::freeze;
use crate::gesture::GestureState;
use crate::layout::{FlowLayout, LayoutProbe};
use crate::reorder::is_draggable;
use crate::resize::{self, HandleRef, ResizeGesture};
use crate::signal::{PointerSignal, PointerSignals};
use crate::sort::{SortChange, SortDirection, SortState};

type OrderListener = Arc<dyn Fn(&[Column]) + Send + Sync>;
type SortListener = Arc<dyn Fn(&SortChange) + Send + Sync>;

struct TableInner {
    /// The ordered column sequence.
    columns: Vec<Column>,
    config: TableConfig,
    sort: SortState,
    gesture: GestureState,
    /// Columns moved or changed width since the last layout pass.
    layout_stale: bool,
    layout: Arc<dyn LayoutProbe>,
    on_column_order_change: Option<OrderListener>,
    on_sort: Option<SortListener>,
}

impl TableInner {
    /// Re-measure pinned columns after a layout change.
    fn refresh_offsets(&mut self) -> Vec<ColumnId> {
        let remeasure = self.gesture.is_active() || self.layout_stale;
        freeze::refresh_offsets(&mut self.columns, self.layout.as_ref(), remeasure)
    }

    /// Measure after the rendering layer laid the columns out again.
    ///
    /// Positions reported here already reflect every swap and width change,
    /// so once no gesture is running the stale mark can go.
    fn layout_pass(&mut self) -> Vec<ColumnId> {
        let changed = self.refresh_offsets();
        if !self.gesture.is_active() {
            self.layout_stale = false;
        }
        changed
    }

    fn resize_move(&mut self, pointer_x: i32) -> bool {
        let Some(id) = self.gesture.resizing_column_id().cloned() else {
            log::trace!("Ignoring pointer move while not resizing");
            return false;
        };
        let Some(left) = self.layout.client_left(&self.columns, &id) else {
            log::trace!("Column {} has no layout, skipping resize move", id);
            return false;
        };

        let candidate = pointer_x.saturating_sub(left) as f64;
        if resize::apply_width(&mut self.columns, &id, candidate).is_none() {
            return false;
        }
        self.layout_stale = true;
        self.refresh_offsets();
        true
    }

    fn resize_stop(&mut self) -> bool {
        self.gesture.resize.stop().is_some()
    }
}

/// Interactive column state for one table.
///
/// Cloning yields another handle to the same table.
///
/// # Example
///
/// ```
/// use tabula::{RawColumn, Table, TableConfig};
///
/// let table = Table::new(
///     vec![
///         RawColumn::new("A").id("a").reorderable(),
///         RawColumn::new("B").id("b").reorderable(),
///     ],
///     TableConfig::default(),
/// );
/// table.drag_start(Some(&"a".into()));
/// table.drag_enter(Some(&"b".into()));
/// table.drag_end();
/// assert_eq!(table.columns()[0].id.to_string(), "b");
/// ```
#[derive(Clone)]
pub struct Table {
    inner: Arc<RwLock<TableInner>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
    signals: PointerSignals,
}

impl Table {
    /// Create a table from host column definitions.
    ///
    /// Geometry comes from a [`FlowLayout`] until another probe is attached
    /// with [`Table::with_layout`]. The table gets its own pointer hub; use
    /// [`Table::with_pointer_signals`] to share one across tables.
    pub fn new(columns: Vec<RawColumn>, config: TableConfig) -> Self {
        let columns = decorate(columns);
        let sort = SortState::new(&columns, &config);
        let mut inner = TableInner {
            columns,
            config,
            sort,
            gesture: GestureState::new(),
            layout_stale: false,
            layout: Arc::new(FlowLayout::default()),
            on_column_order_change: None,
            on_sort: None,
        };
        inner.refresh_offsets();

        Self {
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(true)),
            signals: PointerSignals::new(),
        }
    }

    /// Measure geometry with `probe`.
    pub fn with_layout(self, probe: impl LayoutProbe + 'static) -> Self {
        self.set_layout(Arc::new(probe));
        self
    }

    /// Subscribe resize gestures to a shared pointer hub.
    ///
    /// Ends any resize in progress, since its listeners live on the old hub.
    pub fn with_pointer_signals(mut self, signals: PointerSignals) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.gesture.resize.stop();
        }
        self.signals = signals;
        self
    }

    /// Called with the new order after every successful reorder swap.
    pub fn on_column_order_change(self, f: impl Fn(&[Column]) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_column_order_change = Some(Arc::new(f));
        }
        self
    }

    /// Called after every successful sort toggle.
    pub fn on_sort(self, f: impl Fn(&SortChange) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_sort = Some(Arc::new(f));
        }
        self
    }

    /// The hub window-level pointer events should be dispatched into.
    pub fn pointer_signals(&self) -> &PointerSignals {
        &self.signals
    }

    /// Replace the layout probe.
    ///
    /// Offsets measured by the previous probe are discarded and pinned
    /// columns are measured again with the new one.
    pub fn set_layout(&self, probe: Arc<dyn LayoutProbe>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.layout = probe;
            for column in guard.columns.iter_mut().filter(|c| c.is_frozen()) {
                column.left_offset = None;
            }
            guard.refresh_offsets();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// The full ordered sequence, omitted columns included.
    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    /// Columns that render.
    pub fn visible_columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.iter().filter(|c| !c.omit).cloned().collect())
            .unwrap_or_default()
    }

    pub fn column(&self, id: &ColumnId) -> Option<Column> {
        self.inner
            .read()
            .ok()
            .and_then(|g| position(&g.columns, id).map(|i| g.columns[i].clone()))
    }

    pub fn column_count(&self) -> usize {
        self.inner.read().map(|g| g.columns.len()).unwrap_or(0)
    }

    /// Replace the columns with a new host-supplied list.
    ///
    /// The list is decorated from scratch, so widths and offsets set by
    /// earlier gestures are dropped in favour of what the host supplied.
    pub fn set_columns(&self, columns: Vec<RawColumn>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns = decorate(columns);
            guard.layout_stale = true;
            log::debug!("Columns replaced ({} columns)", guard.columns.len());
            guard.refresh_offsets();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn config(&self) -> TableConfig {
        self.inner
            .read()
            .map(|g| g.config.clone())
            .unwrap_or_default()
    }

    /// Replace the policy flags. Sort state is kept.
    pub fn set_config(&self, config: TableConfig) {
        if let Ok(mut guard) = self.inner.write() {
            guard.config = config;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort_direction(&self) -> SortDirection {
        self.inner
            .read()
            .map(|g| g.sort.direction())
            .unwrap_or_default()
    }

    /// The selected sort column, if it is still in the table.
    pub fn selected_column(&self) -> Option<Column> {
        self.inner.read().ok().and_then(|g| {
            let id = g.sort.selected()?;
            position(&g.columns, id).map(|i| g.columns[i].clone())
        })
    }

    /// Whether `id` shows an active sort indicator.
    pub fn sort_active(&self, id: &ColumnId) -> bool {
        self.inner
            .read()
            .map(|g| {
                position(&g.columns, id).is_some_and(|i| g.sort.is_active(&g.columns[i]))
            })
            .unwrap_or(false)
    }

    /// Toggle sorting on a column and notify the host.
    ///
    /// Returns the change, or `None` when the column is unknown or cannot sort.
    pub fn toggle_sort(&self, id: Option<&ColumnId>) -> Option<SortChange> {
        let id = id?;
        let (change, listener) = {
            let mut guard = self.inner.write().ok()?;
            let column = position(&guard.columns, id).map(|i| guard.columns[i].clone())?;
            let state = &mut *guard;
            let change = state.sort.toggle(&column, &state.config)?;
            (change, state.on_sort.clone())
        };
        self.dirty.store(true, Ordering::SeqCst);

        if let Some(listener) = listener {
            listener(&change);
        }
        Some(change)
    }

    /// Header click.
    ///
    /// Only sortable headers react, and nothing does while the table is
    /// disabled. Columns that sort through a selector alone are toggled by
    /// the host with [`Table::toggle_sort`].
    pub fn activate(&self, id: Option<&ColumnId>) -> EventResult {
        let Some(id) = id else {
            return EventResult::Ignored;
        };
        let enabled = self
            .inner
            .read()
            .map(|g| {
                !g.config.disabled
                    && position(&g.columns, id).is_some_and(|i| g.columns[i].sortable)
            })
            .unwrap_or(false);
        if !enabled {
            log::trace!("Ignoring header activation on {}", id);
            return EventResult::Ignored;
        }
        EventResult::from_changed(self.toggle_sort(Some(id)).is_some())
    }

    /// Key press on a focused header. The activate key behaves like a click.
    pub fn on_key(&self, id: Option<&ColumnId>, key: Key) -> EventResult {
        if key == ACTIVATE_KEY {
            return self.activate(id);
        }
        EventResult::Ignored
    }

    // -------------------------------------------------------------------------
    // Reordering
    // -------------------------------------------------------------------------

    pub fn dragging_column_id(&self) -> Option<ColumnId> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.gesture.dragging_column_id().cloned())
    }

    pub fn is_dragging(&self, id: &ColumnId) -> bool {
        ids_equal(self.dragging_column_id().as_ref(), Some(id))
    }

    /// Whether the header of `id` can start a drag right now.
    pub fn is_draggable(&self, id: &ColumnId) -> bool {
        self.inner
            .read()
            .map(|g| {
                let resizing = g.gesture.resize.is_active();
                position(&g.columns, id).is_some_and(|i| is_draggable(&g.columns[i], resizing))
            })
            .unwrap_or(false)
    }

    pub fn drag_start(&self, id: Option<&ColumnId>) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let state = &mut *guard;
        let resizing = state.gesture.resize.is_active();
        let started = state.gesture.drag.start(&state.columns, id, resizing);
        if started {
            self.dirty.store(true, Ordering::SeqCst);
        }
        started
    }

    /// Swap the dragged column with `id` and publish the new order.
    pub fn drag_enter(&self, id: Option<&ColumnId>) -> bool {
        let (order, listener) = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            let state = &mut *guard;
            if !state.gesture.drag.enter(&mut state.columns, id) {
                return false;
            }
            state.layout_stale = true;
            state.refresh_offsets();
            (state.columns.clone(), state.on_column_order_change.clone())
        };
        self.dirty.store(true, Ordering::SeqCst);

        if let Some(listener) = listener {
            listener(&order);
        }
        true
    }

    /// Dragging over a header. Only asks the host to allow the drop.
    pub fn drag_over(&self) -> EventResult {
        EventResult::PreventDefault
    }

    /// Dragging out of a header. Only asks the host to allow the drop.
    pub fn drag_leave(&self) -> EventResult {
        EventResult::PreventDefault
    }

    /// End or cancel the drag. Returns whether a drag was running.
    pub fn drag_end(&self) -> bool {
        let ended = self
            .inner
            .write()
            .map(|mut g| g.gesture.drag.end().is_some())
            .unwrap_or(false);
        if ended {
            self.dirty.store(true, Ordering::SeqCst);
        }
        ended
    }

    // -------------------------------------------------------------------------
    // Resizing
    // -------------------------------------------------------------------------

    pub fn resizing_column_id(&self) -> Option<ColumnId> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.gesture.resizing_column_id().cloned())
    }

    pub fn resizing_handle(&self) -> Option<HandleRef> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.gesture.resizing_handle().cloned())
    }

    pub fn is_resizing(&self, id: &ColumnId) -> bool {
        ids_equal(self.resizing_column_id().as_ref(), Some(id))
    }

    /// Start resizing from `handle` and listen for window-level pointer signals.
    ///
    /// Ignored for unknown or non-resizable columns and while a drag runs.
    pub fn resize_start(&self, id: Option<&ColumnId>, handle: HandleRef) -> bool {
        let Some(id) = id else {
            log::trace!("Ignoring resize start without a column id");
            return false;
        };
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if guard.gesture.drag.is_active() {
            log::trace!("Ignoring resize start on {} during a drag", id);
            return false;
        }
        let Some(column) = position(&guard.columns, id).map(|i| &guard.columns[i]) else {
            return false;
        };
        if !column.resize {
            log::trace!("Column {} is not resizable", id);
            return false;
        }
        let column_id = column.id.clone();

        // Release the previous gesture's listeners before subscribing new ones.
        guard.gesture.resize.stop();

        let on_move = {
            let inner = Arc::downgrade(&self.inner);
            let dirty = Arc::clone(&self.dirty);
            move |signal: &PointerSignal| resize_move_weak(&inner, &dirty, signal.x())
        };
        let on_up = {
            let inner = Arc::downgrade(&self.inner);
            let dirty = Arc::clone(&self.dirty);
            move |_: &PointerSignal| resize_stop_weak(&inner, &dirty)
        };
        let gesture = ResizeGesture::begin(column_id, handle, &self.signals, on_move, on_up);
        guard.gesture.resize.begin(gesture);
        self.dirty.store(true, Ordering::SeqCst);
        true
    }

    /// Resize the active column so its right edge follows `pointer_x`.
    pub fn resize_move(&self, pointer_x: i32) -> bool {
        let moved = self
            .inner
            .write()
            .map(|mut g| g.resize_move(pointer_x))
            .unwrap_or(false);
        if moved {
            self.dirty.store(true, Ordering::SeqCst);
        }
        moved
    }

    /// Finish the resize and drop its listeners.
    pub fn resize_stop(&self) -> bool {
        let stopped = self
            .inner
            .write()
            .map(|mut g| g.resize_stop())
            .unwrap_or(false);
        if stopped {
            self.dirty.store(true, Ordering::SeqCst);
        }
        stopped
    }

    // -------------------------------------------------------------------------
    // Pinning
    // -------------------------------------------------------------------------

    /// Record a freshly measured offset for a frozen column.
    pub fn set_column_offset(&self, offset: i32, id: &ColumnId) -> bool {
        let changed = self
            .inner
            .write()
            .map(|mut g| freeze::set_offset(&mut g.columns, id, offset))
            .unwrap_or(false);
        if changed {
            self.dirty.store(true, Ordering::SeqCst);
        }
        changed
    }

    /// The rendering layer finished a layout pass.
    ///
    /// Measures frozen columns seen for the first time, and all frozen
    /// columns while a drag or resize is running or when columns moved since
    /// the previous pass. Returns the ids whose offset changed.
    pub fn on_layout(&self) -> Vec<ColumnId> {
        let changed = self
            .inner
            .write()
            .map(|mut g| g.layout_pass())
            .unwrap_or_default();
        if !changed.is_empty() {
            self.dirty.store(true, Ordering::SeqCst);
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Route an interaction event to its handler.
    pub fn handle_event(&self, event: ColumnEvent) -> EventResult {
        match event {
            ColumnEvent::DragStart { column } => {
                EventResult::from_changed(self.drag_start(column.as_ref()))
            }
            ColumnEvent::DragEnter { column } => {
                EventResult::from_changed(self.drag_enter(column.as_ref()))
            }
            ColumnEvent::DragOver { .. } => self.drag_over(),
            ColumnEvent::DragLeave { .. } => self.drag_leave(),
            ColumnEvent::DragEnd { .. } => {
                self.drag_end();
                EventResult::PreventDefault
            }
            ColumnEvent::ResizeStart { column, handle } => {
                EventResult::from_changed(self.resize_start(column.as_ref(), handle))
            }
            ColumnEvent::Activate { column } => self.activate(column.as_ref()),
            ColumnEvent::Key { column, key } => self.on_key(column.as_ref(), key),
            ColumnEvent::Layout => EventResult::from_changed(!self.on_layout().is_empty()),
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the columns changed since the last [`Table::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.column_count())
            .field("dragging", &self.dragging_column_id())
            .field("resizing", &self.resizing_column_id())
            .finish()
    }
}

fn resize_move_weak(inner: &Weak<RwLock<TableInner>>, dirty: &AtomicBool, pointer_x: i32) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let moved = inner
        .write()
        .map(|mut g| g.resize_move(pointer_x))
        .unwrap_or(false);
    if moved {
        dirty.store(true, Ordering::SeqCst);
    }
}

fn resize_stop_weak(inner: &Weak<RwLock<TableInner>>, dirty: &AtomicBool) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let stopped = inner.write().map(|mut g| g.resize_stop()).unwrap_or(false);
    if stopped {
        dirty.store(true, Ordering::SeqCst);
    }
}
