//! Interaction events.
//!
//! The rendering layer translates whatever its input system delivers into
//! these, attaching the id of the column the event landed on. A `None` column
//! means the event hit nothing the table knows about; it is ignored.

use crate::column::ColumnId;
use crate::resize::HandleRef;

/// Key that activates a focused header, same as a click.
pub const ACTIVATE_KEY: Key = Key::Enter;

/// Events routed to [`Table::handle_event`](crate::Table::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnEvent {
    /// A header drag began.
    DragStart { column: Option<ColumnId> },
    /// A dragged header entered another header.
    DragEnter { column: Option<ColumnId> },
    /// A dragged header is over another header.
    DragOver { column: Option<ColumnId> },
    /// A dragged header left another header.
    DragLeave { column: Option<ColumnId> },
    /// The drag finished or was cancelled.
    DragEnd { column: Option<ColumnId> },
    /// The pointer went down on a column's resize handle.
    ResizeStart {
        column: Option<ColumnId>,
        handle: HandleRef,
    },
    /// A header was clicked.
    Activate { column: Option<ColumnId> },
    /// A key was pressed on a focused header.
    Key { column: Option<ColumnId>, key: Key },
    /// The rendering layer finished a layout pass.
    Layout,
}

/// What the table did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing happened.
    Ignored,
    /// State changed.
    Consumed,
    /// The host must suppress its platform default (e.g. drop rejection).
    PreventDefault,
}

impl EventResult {
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    pub fn is_ignored(&self) -> bool {
        *self == EventResult::Ignored
    }
}

/// A key press on a focused header, reduced to what headers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    /// Any key a header does not handle.
    Other,
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        match code {
            crossterm::event::KeyCode::Enter => Key::Enter,
            _ => Key::Other,
        }
    }
}

impl From<&crossterm::event::KeyEvent> for Key {
    fn from(event: &crossterm::event::KeyEvent) -> Self {
        event.code.into()
    }
}
