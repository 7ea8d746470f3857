use tabula::{
    ColumnId, Freeze, HandleRef, LayoutMap, Length, RawColumn, Rect, Table, TableConfig,
};

fn id(s: &str) -> ColumnId {
    ColumnId::from(s)
}

fn offset(table: &Table, column: &str) -> Option<Length> {
    table.column(&id(column)).and_then(|c| c.left_offset)
}

// ============================================================================
// Flow layout (geometry from the model)
// ============================================================================

#[test]
fn test_frozen_column_measured_on_mount() {
    let raw = vec![
        RawColumn::new("A").id("a").width("50px"),
        RawColumn::new("B").id("b").width("80px").freeze(Freeze::Always),
        RawColumn::new("C").id("c").width("30px"),
    ];
    let table = Table::new(raw, TableConfig::default());

    assert_eq!(offset(&table, "b"), Some(Length::new("50px")));
    assert_eq!(offset(&table, "a"), None);
    assert_eq!(offset(&table, "c"), None);
}

#[test]
fn test_swap_moves_frozen_offset() {
    let raw = vec![
        RawColumn::new("A").id("a").width("50px").reorderable(),
        RawColumn::new("B").id("b").width("80px").freeze(Freeze::Always),
        RawColumn::new("C").id("c").width("30px").reorderable(),
    ];
    let table = Table::new(raw, TableConfig::default());
    assert_eq!(offset(&table, "b"), Some(Length::new("50px")));

    table.drag_start(Some(&id("a")));
    table.drag_enter(Some(&id("c")));
    assert_eq!(offset(&table, "b"), Some(Length::new("30px")));
}

#[test]
fn test_resizing_neighbour_moves_frozen_offset() {
    let raw = vec![
        RawColumn::new("A").id("a").width("100px").resizable(),
        RawColumn::new("B").id("b").width("80px").freeze(Freeze::Small),
    ];
    let table = Table::new(raw, TableConfig::default());
    assert_eq!(offset(&table, "b"), Some(Length::new("100px")));

    table.resize_start(Some(&id("a")), HandleRef::new("a-handle"));
    table.resize_move(150);
    assert_eq!(offset(&table, "b"), Some(Length::new("150px")));
}

#[test]
fn test_omitted_frozen_column_is_not_measured() {
    let raw = vec![
        RawColumn::new("A").id("a").width("50px"),
        RawColumn::new("B").id("b").freeze(Freeze::Always).omit(),
    ];
    let table = Table::new(raw, TableConfig::default());
    assert_eq!(offset(&table, "b"), None);
    assert_eq!(table.visible_columns().len(), 1);
    assert_eq!(table.column_count(), 2);
}

#[test]
fn test_offset_uses_width_unit() {
    let raw = vec![
        RawColumn::new("A").id("a").width("4rem"),
        RawColumn::new("B").id("b").width("6rem").freeze(Freeze::Always),
    ];
    let table = Table::new(raw, TableConfig::default());
    assert_eq!(offset(&table, "b"), Some(Length::new("4rem")));
}

// ============================================================================
// Measured layout (geometry from the rendering layer)
// ============================================================================

fn measured_table() -> (Table, LayoutMap) {
    let raw = vec![
        RawColumn::new("A").id("a").width("50px").reorderable(),
        RawColumn::new("B").id("b").width("80px").freeze(Freeze::Always).reorderable(),
        RawColumn::new("C").id("c").width("30px").reorderable(),
    ];
    let layout = LayoutMap::new();
    let table = Table::new(raw, TableConfig::default()).with_layout(layout.clone());
    (table, layout)
}

#[test]
fn test_first_layout_pass_measures() {
    let (table, layout) = measured_table();
    // Nothing rendered yet.
    assert_eq!(offset(&table, "b"), None);

    layout.insert("a", Rect::new(0, 0, 50, 1));
    layout.insert("b", Rect::new(50, 0, 80, 1));
    layout.insert("c", Rect::new(130, 0, 30, 1));
    assert_eq!(table.on_layout(), vec![id("b")]);
    assert_eq!(offset(&table, "b"), Some(Length::new("50px")));
}

#[test]
fn test_layout_after_swap_replaces_stale_offset() {
    let (table, layout) = measured_table();
    layout.insert("a", Rect::new(0, 0, 50, 1));
    layout.insert("b", Rect::new(50, 0, 80, 1));
    layout.insert("c", Rect::new(130, 0, 30, 1));
    table.on_layout();

    table.drag_start(Some(&id("c")));
    table.drag_enter(Some(&id("a")));

    // The host lays out the new order [c, b, a] and reports back.
    layout.insert("c", Rect::new(0, 0, 30, 1));
    layout.insert("b", Rect::new(30, 0, 80, 1));
    layout.insert("a", Rect::new(110, 0, 50, 1));
    assert_eq!(table.on_layout(), vec![id("b")]);
    assert_eq!(offset(&table, "b"), Some(Length::new("30px")));
}

#[test]
fn test_layout_after_finished_drag_replaces_stale_offset() {
    let (table, layout) = measured_table();
    layout.insert("a", Rect::new(0, 0, 50, 1));
    layout.insert("b", Rect::new(50, 0, 80, 1));
    layout.insert("c", Rect::new(130, 0, 30, 1));
    table.on_layout();

    // The drop lands before the host lays out [c, b, a].
    table.drag_start(Some(&id("a")));
    table.drag_enter(Some(&id("c")));
    table.drag_end();

    layout.insert("c", Rect::new(0, 0, 30, 1));
    layout.insert("b", Rect::new(30, 0, 80, 1));
    layout.insert("a", Rect::new(110, 0, 50, 1));
    assert_eq!(table.on_layout(), vec![id("b")]);
    assert_eq!(offset(&table, "b"), Some(Length::new("30px")));

    // Settled: later host moves are not picked up without a change.
    layout.insert("b", Rect::new(90, 0, 80, 1));
    assert!(table.on_layout().is_empty());
    assert_eq!(offset(&table, "b"), Some(Length::new("30px")));
}

#[test]
fn test_layout_after_finished_resize_replaces_stale_offset() {
    let raw = vec![
        RawColumn::new("A").id("a").width("100px").resizable(),
        RawColumn::new("B").id("b").width("80px").freeze(Freeze::Always),
    ];
    let layout = LayoutMap::new();
    layout.insert("a", Rect::new(0, 0, 100, 1));
    layout.insert("b", Rect::new(100, 0, 80, 1));
    let table = Table::new(raw, TableConfig::default()).with_layout(layout.clone());
    assert_eq!(offset(&table, "b"), Some(Length::new("100px")));

    table.resize_start(Some(&id("a")), HandleRef::new("a-handle"));
    table.resize_move(150);
    table.resize_stop();

    layout.insert("a", Rect::new(0, 0, 150, 1));
    layout.insert("b", Rect::new(150, 0, 80, 1));
    assert_eq!(table.on_layout(), vec![id("b")]);
    assert_eq!(offset(&table, "b"), Some(Length::new("150px")));
}

#[test]
fn test_layout_after_new_column_list_remeasures() {
    let (table, layout) = measured_table();
    layout.insert("b", Rect::new(50, 0, 80, 1));
    table.on_layout();

    table.set_columns(vec![
        RawColumn::new("C").id("c").width("30px"),
        RawColumn::new("B").id("b").width("80px").freeze(Freeze::Always),
    ]);
    layout.insert("b", Rect::new(30, 0, 80, 1));
    assert_eq!(table.on_layout(), vec![id("b")]);
    assert_eq!(offset(&table, "b"), Some(Length::new("30px")));
}

#[test]
fn test_measured_offsets_settle_when_idle() {
    let (table, layout) = measured_table();
    layout.insert("b", Rect::new(50, 0, 80, 1));
    table.on_layout();

    layout.insert("b", Rect::new(70, 0, 80, 1));
    assert!(table.on_layout().is_empty());
    assert_eq!(offset(&table, "b"), Some(Length::new("50px")));
}

// ============================================================================
// Host-reported offsets
// ============================================================================

#[test]
fn test_set_column_offset() {
    let (table, _) = measured_table();
    assert!(table.set_column_offset(42, &id("b")));
    assert_eq!(offset(&table, "b"), Some(Length::new("42px")));
    assert!(!table.set_column_offset(42, &id("b")));
}

#[test]
fn test_set_offset_ignores_unfrozen_and_unknown() {
    let (table, _) = measured_table();
    assert!(!table.set_column_offset(10, &id("a")));
    assert!(!table.set_column_offset(10, &id("zzz")));
    assert_eq!(offset(&table, "a"), None);
}
