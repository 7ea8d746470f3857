use std::fs::File;

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use simplelog::{Config, LevelFilter, WriteLogger};
use tabula::{
    Column, ColumnEvent, ColumnId, Freeze, HandleRef, Key, PointerSignal, RawColumn, Table,
    TableConfig,
};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("headless.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let table = Table::new(columns(), TableConfig::new().pagination(true).sort_server())
        .on_column_order_change(|cols| {
            let order: Vec<String> = cols.iter().map(|c| c.id.to_string()).collect();
            println!("order changed: {}", order.join(", "));
        })
        .on_sort(|change| {
            println!(
                "sort by {} {:?} (clear selection: {})",
                change.selected_column.id, change.direction, change.clear_selected_on_sort
            );
        });
    print_columns("initial", &table.columns());

    // Sort by name, then flip it with the keyboard.
    let name = Some(ColumnId::from("name"));
    table.handle_event(ColumnEvent::Activate {
        column: name.clone(),
    });
    table.handle_event(ColumnEvent::Key {
        column: name.clone(),
        key: Key::from(KeyCode::Enter),
    });

    // Drag "name" over "email".
    table.handle_event(ColumnEvent::DragStart {
        column: name.clone(),
    });
    table.handle_event(ColumnEvent::DragEnter {
        column: Some(ColumnId::from("email")),
    });
    table.handle_event(ColumnEvent::DragEnd { column: name });
    print_columns("after drag", &table.columns());

    // Resize "email" with window-level mouse events.
    table.handle_event(ColumnEvent::ResizeStart {
        column: Some(ColumnId::from("email")),
        handle: HandleRef::new("email-handle"),
    });
    for kind in [
        MouseEventKind::Drag(MouseButton::Left),
        MouseEventKind::Drag(MouseButton::Left),
        MouseEventKind::Up(MouseButton::Left),
    ] {
        let event = MouseEvent {
            kind,
            column: 260,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        if let Some(signal) = PointerSignal::from_mouse(&event) {
            table.pointer_signals().dispatch(signal);
        }
    }
    print_columns("after resize", &table.columns());

    Ok(())
}

fn columns() -> Vec<RawColumn> {
    vec![
        RawColumn::new("ID")
            .id(1)
            .width("60px")
            .freeze(Freeze::Always),
        RawColumn::new("Name")
            .id("name")
            .width("120px")
            .sortable()
            .reorderable(),
        RawColumn::new("Email")
            .id("email")
            .width("200px")
            .min_width("80px")
            .max_width("400px")
            .resizable()
            .reorderable(),
        RawColumn::new("Status")
            .id("status")
            .width("90px")
            .freeze(Freeze::Medium),
    ]
}

fn print_columns(title: &str, columns: &[Column]) {
    println!("{}:", title);
    for column in columns {
        println!(
            "  {:<8} width={:<8} offset={}",
            column.id.to_string(),
            column.width.as_ref().map(|w| w.as_str()).unwrap_or("-"),
            column.left_offset.as_ref().map(|o| o.as_str()).unwrap_or("-"),
        );
    }
}
