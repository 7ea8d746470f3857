//! Per-table gesture state.
//!
//! Each table owns one of these; nothing about an in-flight drag or resize
//! lives outside the table it belongs to.

use crate::column::ColumnId;
use crate::reorder::DragState;
use crate::resize::{HandleRef, ResizeState};

/// In-flight reorder and resize gestures.
///
/// At most one of the two is active at a time.
#[derive(Debug, Default)]
pub struct GestureState {
    pub drag: DragState,
    pub resize: ResizeState,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging_column_id(&self) -> Option<&ColumnId> {
        self.drag.source()
    }

    pub fn resizing_column_id(&self) -> Option<&ColumnId> {
        self.resize.column()
    }

    pub fn resizing_handle(&self) -> Option<&HandleRef> {
        self.resize.handle()
    }

    /// A drag or resize is changing the layout.
    pub fn is_active(&self) -> bool {
        self.drag.is_active() || self.resize.is_active()
    }
}
