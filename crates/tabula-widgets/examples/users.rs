//! Users table demo: sorting by a computed date column and multi-selection.
//!
//! Run with `cargo run -p tabula-widgets --example users`.

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use tabula_core::{Brick, Constraints, Rect, RecordingCanvas, Size, Widget};
use tabula_widgets::{CellValue, DataTable, Record, RowId, TableColumn, TableBody};

struct User {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    age: u32,
    joined_at: &'static str,
}

impl Record for User {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => self.name.into(),
            "email" => self.email.into(),
            "age" => self.age.into(),
            "joined_at" => self.joined_at.into(),
            _ => CellValue::Null,
        }
    }
}

fn joined(user: &User) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(user.joined_at, "%Y-%m-%d").ok()
}

fn print_body(table: &DataTable<User>) {
    match table.body() {
        TableBody::Loading { rows } => println!("  (loading, {rows} placeholder rows)"),
        TableBody::Empty(message) => println!("  {message}"),
        TableBody::Rows(rows) => {
            for row in rows {
                let mark = if row.selected { "[x]" } else { "[ ]" };
                println!("  {mark} {}", row.cells.join(" | "));
            }
        }
    }
}

fn main() {
    let columns = vec![
        TableColumn::new("name", "Name").sortable(),
        TableColumn::new("email", "Email"),
        TableColumn::new("age", "Age").sortable(),
        TableColumn::computed("Member Since")
            .sortable()
            .render(|u: &User| joined(u).map_or_else(String::new, |d| d.format("%d/%m/%Y").to_string()))
            .sort_by(|u: &User| joined(u).into()),
    ];

    let data = vec![
        User {
            id: "u1",
            name: "Aditya",
            email: "aditya@example.com",
            age: 22,
            joined_at: "2024-02-12",
        },
        User {
            id: "u2",
            name: "Sara",
            email: "sara@example.com",
            age: 28,
            joined_at: "2023-11-07",
        },
        User {
            id: "u3",
            name: "Vikram",
            email: "vikram@example.com",
            age: 25,
            joined_at: "2025-04-30",
        },
    ];

    let selected: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&selected);
    let mut table = DataTable::new(columns)
        .rows(data)
        .selectable(true)
        .row_id(|u: &User, _| RowId::from(u.id))
        .on_row_select(move |rows: &[&User]| {
            let names: Vec<String> = rows.iter().map(|u| u.name.to_string()).collect();
            println!("Selected: {names:?}");
            if let Ok(mut current) = sink.lock() {
                *current = names;
            }
        });

    println!("Input order:");
    print_body(&table);

    if let Some(change) = table.activate_column(3) {
        println!("\nSorted by {} ({:?}):", change.column, change.direction);
        print_body(&table);
    }

    println!();
    table.toggle_all();
    table.toggle_row(1);
    print_body(&table);

    let size = table.measure(Constraints::loose(Size::new(800.0, 600.0)));
    table.layout(Rect::from_size(size));
    let mut canvas = RecordingCanvas::new();
    table.paint(&mut canvas);
    println!(
        "\nPainted {} draw commands into {}x{}",
        canvas.command_count(),
        size.width,
        size.height
    );
    println!("\n{}", table.to_html());
}
