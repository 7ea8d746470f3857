//! Column definitions and decoration.
//!
//! Hosts describe columns with [`RawColumn`]. [`decorate`] turns a list of
//! them into the canonical [`Column`] sequence the table owns: every column
//! gets a unique id, everything else passes through untouched, and input
//! order is kept.
//!
//! # Examples
//!
//! ```
//! use tabula::column::{decorate, RawColumn};
//!
//! let columns = decorate(vec![
//!     RawColumn::new("Name").id("name").sortable().reorderable(),
//!     RawColumn::new("Email").width("240px").resizable(),
//! ]);
//! assert_eq!(columns[0].id.to_string(), "name");
//! assert_eq!(columns[1].id.to_string(), "2");
//! ```

mod id;
mod length;

pub use id::{ColumnId, ids_equal};
pub use length::{DEFAULT_UNIT, Length, resolve_unit};

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::sort::SortDirection;

/// Header label.
///
/// In JSON a plain string is text and `{"fragment": "key"}` is a fragment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LabelRepr")]
pub enum Label {
    /// Plain text.
    Text(String),
    /// Opaque key the rendering layer resolves to its own content.
    Fragment(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Text(String),
    Fragment { fragment: String },
}

impl From<LabelRepr> for Label {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::Text(s) => Label::Text(s),
            LabelRepr::Fragment { fragment } => Label::Fragment(fragment),
        }
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

/// Viewport size from which a frozen column is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freeze {
    /// Pinned above the small breakpoint (`"sm"`).
    Small,
    /// Pinned above the medium breakpoint (`"md"`).
    Medium,
    /// Pinned above the large breakpoint (`"lg"`).
    Large,
    /// Pinned above a custom viewport width.
    Width(u32),
    /// Always pinned (`true`).
    Always,
}

impl Freeze {
    /// Small breakpoint in pixels.
    pub const SMALL: u32 = 599;
    /// Medium breakpoint in pixels.
    pub const MEDIUM: u32 = 959;
    /// Large breakpoint in pixels.
    pub const LARGE: u32 = 1280;

    /// Breakpoint this freeze applies above, if any.
    pub fn breakpoint(&self) -> Option<u32> {
        match self {
            Freeze::Small => Some(Self::SMALL),
            Freeze::Medium => Some(Self::MEDIUM),
            Freeze::Large => Some(Self::LARGE),
            Freeze::Width(w) => Some(*w),
            Freeze::Always => None,
        }
    }

    /// Whether the column renders pinned at this viewport width.
    pub fn is_pinned_at(&self, viewport_width: u32) -> bool {
        match self.breakpoint() {
            Some(breakpoint) => viewport_width > breakpoint,
            None => true,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FreezeRepr {
    Flag(bool),
    Width(u32),
    Name(String),
}

fn deserialize_freeze<'de, D>(deserializer: D) -> Result<Option<Freeze>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<FreezeRepr>::deserialize(deserializer)?;
    let freeze = match repr {
        None | Some(FreezeRepr::Flag(false)) => None,
        Some(FreezeRepr::Flag(true)) => Some(Freeze::Always),
        Some(FreezeRepr::Width(w)) => Some(Freeze::Width(w)),
        Some(FreezeRepr::Name(name)) => match name.as_str() {
            "sm" => Some(Freeze::Small),
            "md" => Some(Freeze::Medium),
            "lg" => Some(Freeze::Large),
            other => {
                return Err(serde::de::Error::unknown_variant(other, &["sm", "md", "lg"]));
            }
        },
    };
    Ok(freeze)
}

/// A column as the host describes it.
///
/// `id` may be left out; [`decorate`] assigns one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawColumn {
    pub id: Option<ColumnId>,
    pub name: Option<Label>,
    pub width: Option<Length>,
    pub min_width: Option<Length>,
    pub max_width: Option<Length>,
    /// Pin position carried over from an earlier decoration. A column that
    /// already has one counts as measured. Never read from host JSON.
    #[serde(skip_deserializing)]
    pub left_offset: Option<Length>,
    #[serde(deserialize_with = "deserialize_freeze")]
    pub freeze: Option<Freeze>,
    pub sortable: bool,
    /// The host can derive a sort value for this column.
    pub selector: bool,
    pub resize: bool,
    pub reorder: bool,
    pub omit: bool,
    /// Direction adopted when sorting switches to this column.
    pub default_sort: Option<SortDirection>,
}

impl RawColumn {
    /// Create a column with a text label.
    pub fn new(name: impl Into<Label>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<ColumnId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(Length::new(width));
        self
    }

    pub fn min_width(mut self, width: impl Into<String>) -> Self {
        self.min_width = Some(Length::new(width));
        self
    }

    pub fn max_width(mut self, width: impl Into<String>) -> Self {
        self.max_width = Some(Length::new(width));
        self
    }

    /// Pin the column during horizontal scroll.
    pub fn freeze(mut self, freeze: Freeze) -> Self {
        self.freeze = Some(freeze);
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Mark the column as having a sort value selector.
    pub fn selector(mut self) -> Self {
        self.selector = true;
        self
    }

    /// Allow resizing by dragging the header edge.
    pub fn resizable(mut self) -> Self {
        self.resize = true;
        self
    }

    /// Allow reordering by dragging the header.
    pub fn reorderable(mut self) -> Self {
        self.reorder = true;
        self
    }

    /// Exclude the column from rendering.
    pub fn omit(mut self) -> Self {
        self.omit = true;
        self
    }

    pub fn default_sort(mut self, direction: SortDirection) -> Self {
        self.default_sort = Some(direction);
        self
    }
}

/// A decorated, uniquely identified column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: ColumnId,
    pub name: Option<Label>,
    pub width: Option<Length>,
    pub min_width: Option<Length>,
    pub max_width: Option<Length>,
    /// Measured pin position, in the unit of `width`. Only set for frozen columns.
    pub left_offset: Option<Length>,
    pub freeze: Option<Freeze>,
    pub sortable: bool,
    pub selector: bool,
    pub resize: bool,
    pub reorder: bool,
    pub omit: bool,
    pub default_sort: Option<SortDirection>,
}

impl Column {
    fn from_raw(id: ColumnId, raw: RawColumn) -> Self {
        Self {
            id,
            name: raw.name,
            width: raw.width,
            min_width: raw.min_width,
            max_width: raw.max_width,
            left_offset: raw.left_offset,
            freeze: raw.freeze,
            sortable: raw.sortable,
            selector: raw.selector,
            resize: raw.resize,
            reorder: raw.reorder,
            omit: raw.omit,
            default_sort: raw.default_sort,
        }
    }

    /// Whether this column matches `id`.
    pub fn is(&self, id: &ColumnId) -> bool {
        ids_equal(Some(&self.id), Some(id))
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze.is_some()
    }

    /// Whether toggling sort on this column does anything.
    pub fn can_sort(&self) -> bool {
        self.sortable || self.selector
    }
}

impl From<Column> for RawColumn {
    fn from(column: Column) -> Self {
        Self {
            id: Some(column.id),
            name: column.name,
            width: column.width,
            min_width: column.min_width,
            max_width: column.max_width,
            left_offset: column.left_offset,
            freeze: column.freeze,
            sortable: column.sortable,
            selector: column.selector,
            resize: column.resize,
            reorder: column.reorder,
            omit: column.omit,
            default_sort: column.default_sort,
        }
    }
}

/// Normalize host column definitions.
///
/// Explicit ids are kept; the first occurrence of an id wins and later
/// duplicates are treated as missing. Missing ids get the 1-based position,
/// bumped past any id already in use. Running this over an already
/// decorated sequence returns it unchanged.
pub fn decorate(raw: impl IntoIterator<Item = RawColumn>) -> Vec<Column> {
    let raw: Vec<RawColumn> = raw.into_iter().collect();
    let mut taken: Vec<ColumnId> = Vec::with_capacity(raw.len());

    let explicit: Vec<Option<ColumnId>> = raw
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let id = column.id.as_ref().filter(|id| !id.is_empty())?;
            if taken.iter().any(|t| ids_equal(Some(t), Some(id))) {
                log::warn!("Column {} reuses id '{}', assigning a fallback", index, id);
                return None;
            }
            taken.push(id.clone());
            Some(id.clone())
        })
        .collect();

    raw.into_iter()
        .zip(explicit)
        .enumerate()
        .map(|(index, (column, id))| {
            let id = id.unwrap_or_else(|| fallback_id(index, &mut taken));
            Column::from_raw(id, column)
        })
        .collect()
}

fn fallback_id(index: usize, taken: &mut Vec<ColumnId>) -> ColumnId {
    let mut n = index as i64 + 1;
    while taken
        .iter()
        .any(|t| ids_equal(Some(t), Some(&ColumnId::Number(n))))
    {
        n += 1;
    }
    let id = ColumnId::Number(n);
    taken.push(id.clone());
    id
}

/// Decode a JSON array of column definitions.
///
/// Unlike [`decorate`], which recovers from duplicate ids, this rejects them:
/// a document with two columns claiming the same id is a host bug.
pub fn decode_columns(json: &str) -> Result<Vec<RawColumn>, ConfigError> {
    let columns: Vec<RawColumn> = serde_json::from_str(json)?;
    let mut seen: Vec<&ColumnId> = Vec::new();
    for id in columns.iter().filter_map(|c| c.id.as_ref()) {
        if seen.iter().any(|s| ids_equal(Some(*s), Some(id))) {
            return Err(ConfigError::DuplicateId(id.to_string()));
        }
        seen.push(id);
    }
    Ok(columns)
}

/// Index of the column matching `id`.
pub fn position(columns: &[Column], id: &ColumnId) -> Option<usize> {
    columns.iter().position(|c| c.is(id))
}
