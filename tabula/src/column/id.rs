//! Column identifiers and cross-type identity.
//!
//! Hosts hand us ids from several places: explicit ids in column definitions
//! (text or integer), positional fallbacks assigned during decoration, and ids
//! carried by input events. [`ids_equal`] is the single comparison used
//! everywhere a column is matched against a gesture or sort target.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable column identifier.
///
/// `ColumnId::Text("3")` and `ColumnId::Number(3)` name the same logical
/// column; use [`ids_equal`] rather than `==` when matching ids that may come
/// from different sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnId {
    Number(i64),
    Text(String),
}

impl ColumnId {
    /// Numeric view of this id, if it has one.
    ///
    /// Text ids are trimmed and parsed, so `" 7 "` yields `Some(7.0)`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ColumnId::Number(n) => Some(*n as f64),
            ColumnId::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()
            }
        }
    }

    /// An empty text id carries no identity.
    pub fn is_empty(&self) -> bool {
        matches!(self, ColumnId::Text(s) if s.is_empty())
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnId::Number(n) => write!(f, "{}", n),
            ColumnId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ColumnId {
    fn from(n: i64) -> Self {
        ColumnId::Number(n)
    }
}

impl From<i32> for ColumnId {
    fn from(n: i32) -> Self {
        ColumnId::Number(n as i64)
    }
}

impl From<usize> for ColumnId {
    fn from(n: usize) -> Self {
        ColumnId::Number(n as i64)
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        ColumnId::Text(s.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        ColumnId::Text(s)
    }
}

/// Compare two possibly-absent column ids.
///
/// Absent ids never match anything, including another absent id. Text and
/// numeric ids match when the text parses to the same number.
pub fn ids_equal(a: Option<&ColumnId>, b: Option<&ColumnId>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    if a.is_empty() || b.is_empty() {
        return false;
    }

    match (a, b) {
        (ColumnId::Number(x), ColumnId::Number(y)) => x == y,
        (ColumnId::Text(x), ColumnId::Text(y)) => x == y,
        (ColumnId::Number(_), ColumnId::Text(_)) | (ColumnId::Text(_), ColumnId::Number(_)) => {
            match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
    }
}
