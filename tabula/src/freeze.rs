//! Pinned column offsets.
//!
//! A frozen column renders at a fixed left offset while the rest of the row
//! scrolls. The offset is wherever the column's container currently sits, so it
//! goes stale whenever a neighbour moves or changes width: after a swap or
//! during a resize every frozen column is measured again.

use crate::column::{Column, ColumnId, Length, position, resolve_unit};
use crate::layout::LayoutProbe;

/// Whether `column` should be measured now.
///
/// Frozen, rendered columns are measured once when first seen, and again on
/// every layout change while `remeasure` holds (a gesture is running, or
/// columns moved since the last layout pass). An offset already present
/// counts as measured.
pub fn needs_measure(column: &Column, remeasure: bool) -> bool {
    column.is_frozen() && !column.omit && (column.left_offset.is_none() || remeasure)
}

/// Store a measured offset for a frozen column.
///
/// Offsets are written in the unit of the column's width. Returns whether
/// the stored value changed; unknown and unfrozen columns are ignored.
pub fn set_offset(columns: &mut [Column], id: &ColumnId, offset: i32) -> bool {
    let Some(index) = position(columns, id) else {
        log::trace!("Ignoring offset for unknown column {}", id);
        return false;
    };
    let column = &mut columns[index];
    if !column.is_frozen() {
        log::trace!("Ignoring offset for unfrozen column {}", id);
        return false;
    }

    let unit = resolve_unit(&[column.width.as_ref()]);
    let offset = Length::with_unit(offset as f64, unit);
    if column.left_offset.as_ref() == Some(&offset) {
        return false;
    }
    log::debug!("Column {} pinned at {}", column.id, offset);
    column.left_offset = Some(offset);
    true
}

/// Measure every column that [`needs_measure`] and publish its offset.
///
/// Returns the ids whose offset changed.
pub fn refresh_offsets(
    columns: &mut [Column],
    probe: &dyn LayoutProbe,
    remeasure: bool,
) -> Vec<ColumnId> {
    let measured: Vec<(ColumnId, i32)> = columns
        .iter()
        .filter(|c| needs_measure(c, remeasure))
        .filter_map(|c| probe.offset_left(columns, &c.id).map(|x| (c.id.clone(), x)))
        .collect();

    measured
        .into_iter()
        .filter(|(id, offset)| set_offset(columns, id, *offset))
        .map(|(id, _)| id)
        .collect()
}
