//! Sort state: which column is sorted, in which direction, and what a change
//! means for row selection.
//!
//! The table does not sort rows. It tracks the state and reports every change
//! as a [`SortChange`]; the host sorts its data.

use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnId, ids_equal, position};
use crate::config::TableConfig;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `true` is ascending.
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Asc
    }
}

/// Reported to the host after every successful toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct SortChange {
    pub direction: SortDirection,
    pub selected_column: Column,
    /// The row-selection collaborator should drop its selection.
    pub clear_selected_on_sort: bool,
}

/// Whether a sort change invalidates the current row selection.
///
/// Selection is dropped when rows are paged by the server (unless the host
/// asked to keep it), when sorting itself happens on the server, or when only
/// visible rows can be selected.
pub fn clear_selected_on_sort(config: &TableConfig) -> bool {
    (config.pagination && config.pagination_server && !config.persist_selected_on_sort)
        || config.sort_server
        || config.selectable_rows_visible_only
}

/// Active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortState {
    selected: Option<ColumnId>,
    direction: SortDirection,
}

impl SortState {
    /// Initial state from the host's default sort field and direction.
    ///
    /// A default field id that names no column selects nothing.
    pub fn new(columns: &[Column], config: &TableConfig) -> Self {
        let selected = config
            .default_sort_field_id
            .as_ref()
            .and_then(|id| position(columns, id))
            .map(|index| columns[index].id.clone());
        Self {
            selected,
            direction: SortDirection::from_ascending(config.default_sort_asc),
        }
    }

    pub fn selected(&self) -> Option<&ColumnId> {
        self.selected.as_ref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Whether `column` shows an active sort indicator.
    pub fn is_active(&self, column: &Column) -> bool {
        column.sortable && ids_equal(self.selected.as_ref(), Some(&column.id))
    }

    /// Toggle sorting on `column`.
    ///
    /// The selected column flips direction. Another column becomes selected
    /// with its own default direction, or the current direction if it has
    /// none. Columns that cannot sort leave the state untouched.
    pub fn toggle(&mut self, column: &Column, config: &TableConfig) -> Option<SortChange> {
        if !column.can_sort() {
            log::trace!("Ignoring sort toggle on unsortable column {}", column.id);
            return None;
        }

        let direction = if ids_equal(self.selected.as_ref(), Some(&column.id)) {
            self.direction.toggled()
        } else {
            column.default_sort.unwrap_or(self.direction)
        };

        self.selected = Some(column.id.clone());
        self.direction = direction;
        log::debug!("Sort changed to column {} ({:?})", column.id, direction);

        Some(SortChange {
            direction,
            selected_column: column.clone(),
            clear_selected_on_sort: clear_selected_on_sort(config),
        })
    }
}
