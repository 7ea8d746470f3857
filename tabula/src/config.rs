//! Table configuration.

use serde::Deserialize;

use crate::column::ColumnId;
use crate::error::ConfigError;

/// Per-table configuration supplied by the host.
///
/// The pagination and selection flags only feed the "clear selection on
/// sort" decision; this crate does not paginate or select rows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Rows are paginated.
    pub pagination: bool,

    /// Pagination happens on the server.
    pub pagination_server: bool,

    /// Keep the row selection across sorts with server pagination.
    pub persist_selected_on_sort: bool,

    /// Sorting happens on the server.
    pub sort_server: bool,

    /// Only visible rows can be selected.
    pub selectable_rows_visible_only: bool,

    /// Header activation (click or key) does nothing.
    pub disabled: bool,

    /// Column sorted initially.
    pub default_sort_field_id: Option<ColumnId>,

    /// Initial sort direction.
    pub default_sort_asc: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            pagination: false,
            pagination_server: false,
            persist_selected_on_sort: false,
            sort_server: false,
            selectable_rows_visible_only: false,
            disabled: false,
            default_sort_field_id: None,
            default_sort_asc: true,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable pagination, optionally server-driven.
    pub fn pagination(mut self, server: bool) -> Self {
        self.pagination = true;
        self.pagination_server = server;
        self
    }

    pub fn persist_selected_on_sort(mut self) -> Self {
        self.persist_selected_on_sort = true;
        self
    }

    pub fn sort_server(mut self) -> Self {
        self.sort_server = true;
        self
    }

    pub fn selectable_rows_visible_only(mut self) -> Self {
        self.selectable_rows_visible_only = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Sort by `id` initially, ascending when `ascending` is true.
    pub fn default_sort(mut self, id: impl Into<ColumnId>, ascending: bool) -> Self {
        self.default_sort_field_id = Some(id.into());
        self.default_sort_asc = ascending;
        self
    }
}
