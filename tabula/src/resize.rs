//! Drag-to-resize.
//!
//! While a resize runs the table listens to window-level pointer signals; the
//! [`ResizeGesture`] owns those subscriptions, so the listeners exist exactly
//! as long as the state is [`ResizeState::Resizing`].

use std::fmt;

use crate::column::{Column, ColumnId, Length, position, resolve_unit};
use crate::signal::{PointerSignal, PointerSignals, SignalKind, Subscription};

/// Smallest width a resize can produce when no `min_width` applies.
pub const MIN_COLUMN_WIDTH: f64 = 10.0;

/// The rendered handle a resize started from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandleRef(String);

impl HandleRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A running resize: the column, its handle, and the pointer listeners.
pub struct ResizeGesture {
    column: ColumnId,
    handle: HandleRef,
    _on_move: Subscription,
    _on_up: Subscription,
}

impl ResizeGesture {
    /// Start a resize and subscribe its pointer listeners.
    pub fn begin(
        column: ColumnId,
        handle: HandleRef,
        signals: &PointerSignals,
        on_move: impl Fn(&PointerSignal) + Send + Sync + 'static,
        on_up: impl Fn(&PointerSignal) + Send + Sync + 'static,
    ) -> Self {
        Self {
            column,
            handle,
            _on_move: signals.subscribe(SignalKind::Move, on_move),
            _on_up: signals.subscribe(SignalKind::Up, on_up),
        }
    }

    pub fn column(&self) -> &ColumnId {
        &self.column
    }

    pub fn handle(&self) -> &HandleRef {
        &self.handle
    }
}

impl fmt::Debug for ResizeGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeGesture")
            .field("column", &self.column)
            .field("handle", &self.handle)
            .finish()
    }
}

/// Resize gesture state.
#[derive(Debug, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing(ResizeGesture),
}

impl ResizeState {
    pub fn is_active(&self) -> bool {
        matches!(self, ResizeState::Resizing(_))
    }

    /// Id of the column being resized.
    pub fn column(&self) -> Option<&ColumnId> {
        match self {
            ResizeState::Idle => None,
            ResizeState::Resizing(gesture) => Some(gesture.column()),
        }
    }

    pub fn handle(&self) -> Option<&HandleRef> {
        match self {
            ResizeState::Idle => None,
            ResizeState::Resizing(gesture) => Some(gesture.handle()),
        }
    }

    /// Enter the resizing state, releasing any previous gesture first.
    pub fn begin(&mut self, gesture: ResizeGesture) {
        self.stop();
        log::debug!("Resize started on column {} ({})", gesture.column, gesture.handle);
        *self = ResizeState::Resizing(gesture);
    }

    /// Leave the resizing state. Dropping the gesture unsubscribes its listeners.
    pub fn stop(&mut self) -> Option<ColumnId> {
        match std::mem::take(self) {
            ResizeState::Idle => None,
            ResizeState::Resizing(gesture) => {
                log::debug!("Resize stopped on column {}", gesture.column);
                Some(gesture.column)
            }
        }
    }
}

/// Constrain a candidate width.
///
/// A configured `min` wins when the candidate is below it, then a configured
/// `max` when above it; otherwise the candidate is floored at
/// [`MIN_COLUMN_WIDTH`]. Bounds without a positive magnitude are ignored.
pub fn clamp_width(candidate: f64, min: Option<&Length>, max: Option<&Length>) -> f64 {
    let min = min.and_then(Length::bound);
    let max = max.and_then(Length::bound);

    match (min, max) {
        (Some(min), _) if candidate < min => min,
        (_, Some(max)) if candidate > max => max,
        _ => candidate.max(MIN_COLUMN_WIDTH),
    }
}

/// The width a column gets for a candidate, in the column's own unit.
pub fn resolved_width(column: &Column, candidate: f64) -> Length {
    let width = clamp_width(candidate, column.min_width.as_ref(), column.max_width.as_ref());
    let unit = resolve_unit(&[
        column.width.as_ref(),
        column.min_width.as_ref(),
        column.max_width.as_ref(),
    ]);
    Length::with_unit(width, unit)
}

/// Write the resolved width for `candidate` into the column with `id`.
pub fn apply_width(columns: &mut [Column], id: &ColumnId, candidate: f64) -> Option<Length> {
    let index = position(columns, id)?;
    let column = &mut columns[index];
    let width = resolved_width(column, candidate);
    log::trace!("Column {} resized to {} (candidate {})", column.id, width, candidate);
    column.width = Some(width.clone());
    Some(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(v: &str) -> Length {
        Length::new(v)
    }

    #[test]
    fn test_clamp_to_min() {
        assert_eq!(clamp_width(10.0, Some(&px("50px")), Some(&px("300px"))), 50.0);
    }

    #[test]
    fn test_clamp_to_max() {
        assert_eq!(clamp_width(400.0, Some(&px("50px")), Some(&px("300px"))), 300.0);
    }

    #[test]
    fn test_floor_without_bounds() {
        assert_eq!(clamp_width(5.0, None, None), 10.0);
        assert_eq!(clamp_width(-40.0, None, None), 10.0);
        assert_eq!(clamp_width(120.0, None, None), 120.0);
    }

    #[test]
    fn test_non_numeric_bounds_are_absent() {
        assert_eq!(clamp_width(5.0, Some(&px("auto")), None), 10.0);
        assert_eq!(clamp_width(900.0, None, Some(&px("wide"))), 900.0);
    }

    #[test]
    fn test_floor_applies_below_small_min() {
        // min of 4 is satisfied by 6, but 6 is still under the absolute floor
        assert_eq!(clamp_width(6.0, Some(&px("4px")), None), 10.0);
    }
}
