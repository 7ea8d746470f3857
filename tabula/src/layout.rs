//! Live layout measurements.
//!
//! The table never lays anything out. Resizing needs the left edge of a
//! column's container in pointer coordinates, and pinning needs its offset
//! from the table's scroll origin. Both come from a [`LayoutProbe`] the
//! rendering layer provides.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use crate::column::{Column, ColumnId, ids_equal};

/// Default rendered width for a column without a usable `width`.
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.y.saturating_add(self.height)
    }
}

/// Source of on-demand column geometry.
///
/// `columns` is the table's current sequence, for probes that derive geometry
/// from the model rather than from a rendered tree. Returning `None` means the
/// column is not rendered; callers skip it.
pub trait LayoutProbe: Send + Sync {
    /// Left edge of the column's container relative to the table's scroll origin.
    fn offset_left(&self, columns: &[Column], id: &ColumnId) -> Option<i32>;

    /// Left edge of the column's container in pointer coordinates.
    fn client_left(&self, columns: &[Column], id: &ColumnId) -> Option<i32> {
        self.offset_left(columns, id)
    }
}

#[derive(Debug, Default)]
struct LayoutMapInner {
    rects: Vec<(ColumnId, Rect)>,
    client_origin: i32,
}

/// Column rectangles recorded by the rendering layer after each layout pass.
///
/// Rectangles are in table content coordinates. `client_origin` is where the
/// content origin currently sits in pointer coordinates (table left edge minus
/// horizontal scroll). Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct LayoutMap {
    inner: Arc<RwLock<LayoutMapInner>>,
}

impl LayoutMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or replace a column's rectangle.
    pub fn insert(&self, id: impl Into<ColumnId>, rect: Rect) {
        let id = id.into();
        if let Ok(mut guard) = self.inner.write() {
            match guard.rects.iter_mut().find(|(k, _)| ids_equal(Some(k), Some(&id))) {
                Some(entry) => entry.1 = rect,
                None => guard.rects.push((id, rect)),
            }
        }
    }

    pub fn remove(&self, id: &ColumnId) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rects.retain(|(k, _)| !ids_equal(Some(k), Some(id)));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rects.clear();
        }
    }

    pub fn get(&self, id: &ColumnId) -> Option<Rect> {
        self.inner.read().ok().and_then(|g| {
            g.rects
                .iter()
                .find(|(k, _)| ids_equal(Some(k), Some(id)))
                .map(|(_, rect)| *rect)
        })
    }

    pub fn set_client_origin(&self, x: i32) {
        if let Ok(mut guard) = self.inner.write() {
            guard.client_origin = x;
        }
    }

    pub fn client_origin(&self) -> i32 {
        self.inner.read().map(|g| g.client_origin).unwrap_or(0)
    }
}

impl LayoutProbe for LayoutMap {
    fn offset_left(&self, _columns: &[Column], id: &ColumnId) -> Option<i32> {
        self.get(id).map(|rect| rect.left())
    }

    fn client_left(&self, _columns: &[Column], id: &ColumnId) -> Option<i32> {
        self.get(id)
            .map(|rect| self.client_origin().saturating_add(rect.left()))
    }
}

/// Geometry derived from the column model itself.
///
/// Visible columns sit side by side in sequence order, each as wide as its
/// `width` magnitude (or [`DEFAULT_COLUMN_WIDTH`]). Useful for hosts that
/// render exactly what the model says, such as a terminal table.
#[derive(Debug)]
pub struct FlowLayout {
    origin_x: AtomicI32,
    scroll_x: AtomicI32,
}

impl FlowLayout {
    /// A flow layout whose table starts at `origin_x` in pointer coordinates.
    pub fn new(origin_x: i32) -> Self {
        Self {
            origin_x: AtomicI32::new(origin_x),
            scroll_x: AtomicI32::new(0),
        }
    }

    pub fn set_origin_x(&self, x: i32) {
        self.origin_x.store(x, Ordering::SeqCst);
    }

    pub fn set_scroll_x(&self, x: i32) {
        self.scroll_x.store(x, Ordering::SeqCst);
    }

    pub fn scroll_x(&self) -> i32 {
        self.scroll_x.load(Ordering::SeqCst)
    }

    /// Rendered width of a column.
    pub fn column_width(column: &Column) -> f64 {
        column
            .width
            .as_ref()
            .and_then(|w| w.magnitude())
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Left edge of every visible column, in content coordinates.
    pub fn positions(columns: &[Column]) -> Vec<(ColumnId, i32)> {
        let mut positions = Vec::with_capacity(columns.len());
        let mut x = 0.0_f64;
        for column in columns.iter().filter(|c| !c.omit) {
            positions.push((column.id.clone(), x.trunc() as i32));
            x += Self::column_width(column);
        }
        positions
    }
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new(0)
    }
}

impl LayoutProbe for FlowLayout {
    fn offset_left(&self, columns: &[Column], id: &ColumnId) -> Option<i32> {
        Self::positions(columns)
            .into_iter()
            .find(|(k, _)| ids_equal(Some(k), Some(id)))
            .map(|(_, x)| x)
    }

    fn client_left(&self, columns: &[Column], id: &ColumnId) -> Option<i32> {
        self.offset_left(columns, id)
            .map(|x| {
                self.origin_x
                    .load(Ordering::SeqCst)
                    .saturating_add(x)
                    .saturating_sub(self.scroll_x())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{RawColumn, decorate};

    #[test]
    fn test_flow_positions_skip_omitted() {
        let columns = decorate(vec![
            RawColumn::new("A").width("50px"),
            RawColumn::new("B").width("70px").omit(),
            RawColumn::new("C"),
            RawColumn::new("D").width("30px"),
        ]);
        let positions: Vec<i32> = FlowLayout::positions(&columns)
            .into_iter()
            .map(|(_, x)| x)
            .collect();
        assert_eq!(positions, vec![0, 50, 150]);
    }

    #[test]
    fn test_flow_client_left_applies_origin_and_scroll() {
        let columns = decorate(vec![
            RawColumn::new("A").width("50px"),
            RawColumn::new("B").width("70px"),
        ]);
        let layout = FlowLayout::new(20);
        layout.set_scroll_x(10);
        assert_eq!(layout.client_left(&columns, &columns[1].id), Some(60));
        assert_eq!(layout.offset_left(&columns, &columns[1].id), Some(50));
    }

    #[test]
    fn test_layout_map_shared_between_clones() {
        let map = LayoutMap::new();
        let probe = map.clone();
        map.insert("a", Rect::new(40, 0, 100, 1));
        map.set_client_origin(5);
        assert_eq!(probe.offset_left(&[], &ColumnId::from("a")), Some(40));
        assert_eq!(probe.client_left(&[], &ColumnId::from("a")), Some(45));
        map.insert("a", Rect::new(80, 0, 100, 1));
        assert_eq!(probe.offset_left(&[], &ColumnId::from("a")), Some(80));
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let map = LayoutMap::new();
        map.insert("a", Rect::new(i32::MAX - 5, 0, 100, 1));
        map.set_client_origin(100);
        assert_eq!(map.client_left(&[], &ColumnId::from("a")), Some(i32::MAX));
        assert_eq!(Rect::new(i32::MAX - 5, 0, 100, 1).right(), i32::MAX);

        let columns = decorate(vec![RawColumn::new("A").width("50px")]);
        let flow = FlowLayout::new(i32::MIN);
        flow.set_scroll_x(10);
        assert_eq!(flow.client_left(&columns, &columns[0].id), Some(i32::MIN));
    }
}
