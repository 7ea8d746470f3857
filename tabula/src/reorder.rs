//! Drag-to-reorder.
//!
//! A drag swaps the dragged column with whichever column the pointer enters.
//! The dragged column is tracked by id, so after a swap the next enter swaps
//! it again from its new position.

use crate::column::{Column, ColumnId, ids_equal, position};

/// Reorder gesture state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ColumnId),
}

impl DragState {
    /// Id of the column being dragged.
    pub fn source(&self) -> Option<&ColumnId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(id) => Some(id),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    /// Begin dragging `target`.
    ///
    /// Only reorderable columns start a drag, and never while a resize is in
    /// progress. The recorded id is the column's own, not the event's.
    pub fn start(&mut self, columns: &[Column], target: Option<&ColumnId>, resizing: bool) -> bool {
        let Some(target) = target else {
            log::trace!("Ignoring drag start without a column id");
            return false;
        };
        let Some(column) = position(columns, target).map(|i| &columns[i]) else {
            log::trace!("Ignoring drag start on unknown column {}", target);
            return false;
        };
        if !is_draggable(column, resizing) {
            log::trace!("Column {} is not draggable", column.id);
            return false;
        }

        log::debug!("Drag started on column {}", column.id);
        *self = DragState::Dragging(column.id.clone());
        true
    }

    /// The pointer entered `target` while dragging.
    ///
    /// Swaps the dragged column and the target in place. Returns whether the
    /// order changed.
    pub fn enter(&self, columns: &mut [Column], target: Option<&ColumnId>) -> bool {
        let DragState::Dragging(source) = self else {
            return false;
        };
        let Some(target) = target else {
            return false;
        };
        if ids_equal(Some(source), Some(target)) {
            return false;
        }
        let (Some(from), Some(to)) = (position(columns, source), position(columns, target)) else {
            log::trace!("Ignoring drag enter: {} or {} is not in the table", source, target);
            return false;
        };

        columns.swap(from, to);
        log::debug!("Swapped column {} (at {}) with {} (at {})", source, from, target, to);
        true
    }

    /// End the drag, whether or not anything moved.
    pub fn end(&mut self) -> Option<ColumnId> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging(id) => {
                log::debug!("Drag ended on column {}", id);
                Some(id)
            }
        }
    }
}

/// A column can be dragged when it is reorderable and no resize is running.
pub fn is_draggable(column: &Column, resizing: bool) -> bool {
    column.reorder && !resizing
}
