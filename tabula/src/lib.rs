//! Headless column management for table widgets.
//!
//! `tabula` keeps a table's ordered columns and the interactions that rewrite
//! them: drag-to-reorder, drag-to-resize with width bounds, pinned (frozen)
//! columns whose offsets follow the layout, and sort toggling with its
//! selection side effect. Rendering, pagination and row selection stay with
//! the host, which talks to a [`Table`] through typed events and callbacks.

pub mod column;
pub mod config;
pub mod error;
pub mod event;
pub mod freeze;
pub mod gesture;
pub mod layout;
pub mod reorder;
pub mod resize;
pub mod signal;
pub mod sort;
pub mod table;

pub use column::{Column, ColumnId, Freeze, Label, Length, RawColumn, decorate, ids_equal};
pub use config::TableConfig;
pub use error::{ConfigError, LengthError};
pub use event::{ColumnEvent, EventResult, Key};
pub use layout::{FlowLayout, LayoutMap, LayoutProbe, Rect};
pub use resize::HandleRef;
pub use signal::{PointerSignal, PointerSignals, SignalKind, Subscription};
pub use sort::{SortChange, SortDirection};
pub use table::Table;

pub mod prelude {
    pub use crate::column::{Column, ColumnId, Freeze, Label, Length, RawColumn};
    pub use crate::config::TableConfig;
    pub use crate::event::{ColumnEvent, EventResult, Key};
    pub use crate::layout::{FlowLayout, LayoutMap, LayoutProbe, Rect};
    pub use crate::resize::HandleRef;
    pub use crate::signal::{PointerSignal, PointerSignals};
    pub use crate::sort::{SortChange, SortDirection};
    pub use crate::table::Table;
}
