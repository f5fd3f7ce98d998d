//! Widget and brick integration for `DataTable`.

use super::cell::Record;
use super::column::TextAlign;
use super::view::TableBody;
use super::{DataTable, TableSelectionChanged};
use std::any::Any;
use std::fmt::Write as _;
use std::time::Duration;
use tabula_core::{
    escape_html,
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickBudget, BrickVerification, Canvas, Constraints, Event, MouseButton,
    Point, Rect, Size, TypeId, Widget,
};

/// Width of the leading checkbox column.
const CHECKBOX_COLUMN: f32 = 40.0;
const CHECKBOX_SIZE: f32 = 16.0;
const DEFAULT_COLUMN_WIDTH: f32 = 100.0;
const CELL_PADDING: f32 = 8.0;

impl<T: Record> DataTable<T> {
    fn checkbox_width(&self) -> f32 {
        if self.shows_checkboxes() {
            CHECKBOX_COLUMN
        } else {
            0.0
        }
    }

    fn body_row_count(&self) -> usize {
        if self.loading {
            super::SKELETON_ROWS
        } else {
            self.rows.len().max(1)
        }
    }

    fn calculate_width(&self) -> f32 {
        let columns: f32 = self
            .columns
            .iter()
            .map(|c| c.width.unwrap_or(DEFAULT_COLUMN_WIDTH))
            .sum();
        (columns + self.checkbox_width()).max(100.0)
    }

    fn calculate_height(&self) -> f32 {
        (self.body_row_count() as f32).mul_add(self.row_height, self.header_height)
    }

    fn row_y(&self, position: usize) -> f32 {
        (position as f32).mul_add(self.row_height, self.bounds.y + self.header_height)
    }

    /// Checkbox square centered vertically in a band starting at `y`.
    fn checkbox_rect(&self, y: f32, height: f32) -> Rect {
        Rect::new(
            self.bounds.x + (CHECKBOX_COLUMN - CHECKBOX_SIZE) / 2.0,
            y + (height - CHECKBOX_SIZE) / 2.0,
            CHECKBOX_SIZE,
            CHECKBOX_SIZE,
        )
    }

    /// Column index under horizontal position `x`.
    fn column_at(&self, x: f32) -> Option<usize> {
        let mut left = self.bounds.x + self.checkbox_width();
        if x < left {
            return None;
        }
        for (index, column) in self.columns.iter().enumerate() {
            let right = left + column.width.unwrap_or(DEFAULT_COLUMN_WIDTH);
            if x < right {
                return Some(index);
            }
            left = right;
        }
        None
    }

    /// Display position of the body row under vertical position `y`.
    fn row_at(&self, y: f32) -> Option<usize> {
        let offset = y - self.bounds.y - self.header_height;
        if offset < 0.0 {
            return None;
        }
        let position = (offset / self.row_height) as usize;
        (position < self.ids.len()).then_some(position)
    }

    fn text_x(align: TextAlign, left: f32, width: f32) -> f32 {
        match align {
            TextAlign::Left => left + CELL_PADDING,
            TextAlign::Center => left + width / 2.0,
            TextAlign::Right => left + width - CELL_PADDING,
        }
    }

    fn paint_checkbox(&self, canvas: &mut dyn Canvas, rect: Rect, checked: bool) {
        if checked {
            canvas.fill_rect(rect, self.accent_color);
        }
        canvas.stroke_rect(rect, self.border_color, 1.0);
    }

    fn paint_header(&self, canvas: &mut dyn Canvas) {
        let header_rect = self.bounds.band(0.0, self.header_height);
        canvas.fill_rect(header_rect, self.header_bg);

        if self.shows_checkboxes() {
            let rect = self.checkbox_rect(self.bounds.y, self.header_height);
            self.paint_checkbox(canvas, rect, self.is_all_selected());
        }

        let style = TextStyle {
            size: 14.0,
            color: self.header_text_color,
            weight: FontWeight::Bold,
        };
        let baseline = self.bounds.y + self.header_height / 2.0;
        let mut x = self.bounds.x + self.checkbox_width();
        for (column, view) in self.columns.iter().zip(self.header_views()) {
            let width = column.width.unwrap_or(DEFAULT_COLUMN_WIDTH);
            canvas.draw_text(
                &view.header,
                Point::new(x + CELL_PADDING, baseline),
                &style,
            );
            if let Some(glyph) = view.indicator {
                let glyph_style = TextStyle {
                    size: 11.0,
                    ..style.clone()
                };
                canvas.draw_text(
                    glyph,
                    Point::new(x + width - CELL_PADDING - 10.0, baseline),
                    &glyph_style,
                );
            }
            x += width;
        }
    }

    fn paint_skeleton(&self, canvas: &mut dyn Canvas, rows: usize) {
        for position in 0..rows {
            let y = self.row_y(position);
            canvas.fill_rect(
                Rect::new(self.bounds.x, y, self.bounds.width, self.row_height),
                self.row_bg,
            );
            if self.shows_checkboxes() {
                let rect = self.checkbox_rect(y, self.row_height);
                canvas.fill_rect(rect, self.skeleton_color);
            }
            let mut x = self.bounds.x + self.checkbox_width();
            for column in &self.columns {
                let width = column.width.unwrap_or(DEFAULT_COLUMN_WIDTH);
                let bar = Rect::new(
                    x + CELL_PADDING,
                    y + self.row_height / 2.0 - 8.0,
                    (width - 2.0 * CELL_PADDING) * 0.75,
                    16.0,
                );
                canvas.fill_rect(bar, self.skeleton_color);
                x += width;
            }
        }
    }

    fn paint_body(&self, canvas: &mut dyn Canvas) {
        match self.body() {
            TableBody::Loading { rows } => self.paint_skeleton(canvas, rows),
            TableBody::Empty(message) => {
                let y = self.row_y(0);
                canvas.fill_rect(
                    Rect::new(self.bounds.x, y, self.bounds.width, self.row_height),
                    self.row_bg,
                );
                let style = TextStyle {
                    size: 14.0,
                    color: self.header_text_color,
                    ..TextStyle::default()
                };
                canvas.draw_text(
                    &message,
                    Point::new(self.bounds.center().x, y + self.row_height / 2.0),
                    &style,
                );
            }
            TableBody::Rows(rows) => {
                let style = TextStyle {
                    size: 14.0,
                    color: self.text_color,
                    ..TextStyle::default()
                };
                for row in rows {
                    let y = self.row_y(row.position);
                    let bg = if row.selected {
                        self.selected_bg
                    } else if self.striped && row.position % 2 == 1 {
                        self.row_alt_bg
                    } else {
                        self.row_bg
                    };
                    canvas.fill_rect(
                        Rect::new(self.bounds.x, y, self.bounds.width, self.row_height),
                        bg,
                    );
                    if self.shows_checkboxes() {
                        let rect = self.checkbox_rect(y, self.row_height);
                        self.paint_checkbox(canvas, rect, row.selected);
                    }
                    let mut x = self.bounds.x + self.checkbox_width();
                    for (column, text) in self.columns.iter().zip(&row.cells) {
                        let width = column.width.unwrap_or(DEFAULT_COLUMN_WIDTH);
                        if !text.is_empty() {
                            canvas.draw_text(
                                text,
                                Point::new(
                                    Self::text_x(column.align, x, width),
                                    y + self.row_height / 2.0,
                                ),
                                &style,
                            );
                        }
                        x += width;
                    }
                }
            }
        }
    }

    fn selection_message(&self) -> Box<dyn Any + Send> {
        Box::new(TableSelectionChanged {
            selected: self.selected_ids(),
        })
    }

    fn handle_click(&mut self, position: Point) -> Option<Box<dyn Any + Send>> {
        if !self.bounds.contains_point(&position) {
            return None;
        }
        let in_checkbox_column = position.x < self.bounds.x + self.checkbox_width();
        if position.y < self.bounds.y + self.header_height {
            if in_checkbox_column {
                return self.toggle_all().then(|| self.selection_message());
            }
            let index = self.column_at(position.x)?;
            return self
                .activate_column(index)
                .map(|msg| Box::new(msg) as Box<dyn Any + Send>);
        }
        let row = self.row_at(position.y)?;
        let hit = if self.shows_checkboxes() {
            in_checkbox_column
        } else {
            self.selectable
        };
        if hit && self.toggle_row(row) {
            Some(self.selection_message())
        } else {
            None
        }
    }

    fn header_html(&self, html: &mut String) {
        html.push_str("<thead><tr>");
        if let Some(label) = self.select_all_label() {
            let checked = if self.is_all_selected() { " checked" } else { "" };
            let _ = write!(
                html,
                r#"<th class="tabula-select"><input type="checkbox" aria-label="{label}"{checked}></th>"#
            );
        }
        for view in self.header_views() {
            let _ = write!(html, r#"<th scope="col" aria-sort="{}""#, view.aria_sort);
            if let Some(width) = view.width {
                let _ = write!(html, r#" style="width: {width}px""#);
            }
            if let Some(class) = &view.class_name {
                let _ = write!(html, r#" class="{}""#, escape_html(class));
            }
            html.push('>');
            let header = escape_html(&view.header);
            match view.indicator {
                Some(glyph) => {
                    let _ = write!(
                        html,
                        r#"<button type="button">{header}<span aria-hidden="true">{glyph}</span></button>"#
                    );
                }
                None => {
                    let _ = write!(html, "<span>{header}</span>");
                }
            }
            html.push_str("</th>");
        }
        html.push_str("</tr></thead>");
    }

    fn body_html(&self, html: &mut String) {
        let checkbox_cell = self.shows_checkboxes();
        html.push_str("<tbody>");
        match self.body() {
            TableBody::Loading { rows } => {
                let cells = self.columns.len() + usize::from(checkbox_cell);
                for _ in 0..rows {
                    html.push_str(r#"<tr class="tabula-skeleton">"#);
                    for _ in 0..cells {
                        html.push_str(r#"<td><div class="tabula-skeleton-bar"></div></td>"#);
                    }
                    html.push_str("</tr>");
                }
            }
            TableBody::Empty(message) => {
                let span = self.columns.len() + usize::from(checkbox_cell);
                let _ = write!(
                    html,
                    r#"<tr><td colspan="{span}" class="tabula-empty">{}</td></tr>"#,
                    escape_html(&message)
                );
            }
            TableBody::Rows(rows) => {
                let clickable = self.selectable && !checkbox_cell;
                for row in rows {
                    let id = escape_html(&row.id.to_string());
                    let _ = write!(html, r#"<tr data-row-id="{id}""#);
                    if row.selected {
                        html.push_str(r#" class="selected" aria-selected="true""#);
                    }
                    html.push('>');
                    if checkbox_cell {
                        let checked = if row.selected { " checked" } else { "" };
                        let _ = write!(
                            html,
                            r#"<td><input type="checkbox" aria-label="Select row {}"{checked}></td>"#,
                            row.position + 1
                        );
                    }
                    for (column, text) in self.columns.iter().zip(&row.cells) {
                        let mut classes: Vec<&str> = Vec::new();
                        if let Some(class) = &column.class_name {
                            classes.push(class);
                        }
                        if clickable {
                            classes.push("clickable");
                        }
                        if classes.is_empty() {
                            html.push_str("<td>");
                        } else {
                            let _ = write!(html, r#"<td class="{}">"#, escape_html(&classes.join(" ")));
                        }
                        html.push_str(&escape_html(text));
                        html.push_str("</td>");
                    }
                    html.push_str("</tr>");
                }
            }
        }
        html.push_str("</tbody>");
    }
}

impl<T: Record + Send + Sync + 'static> Widget for DataTable<T> {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let preferred = Size::new(self.calculate_width(), self.calculate_height());
        constraints.constrain(preferred)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.push_clip(self.bounds);
        self.paint_header(canvas);
        self.paint_body(canvas);
        if self.bordered {
            let border = Rect::new(
                self.bounds.x,
                self.bounds.y,
                self.bounds.width,
                self.calculate_height().min(self.bounds.height),
            );
            canvas.stroke_rect(border, self.border_color, 1.0);
        }
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.handle_click(*position),
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        !self.loading && (self.selectable || self.columns.iter().any(|c| c.sortable))
    }

    fn is_focusable(&self) -> bool {
        self.selectable
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Table
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<T: Record + Send + Sync + 'static> Brick for DataTable<T> {
    fn brick_name(&self) -> &'static str {
        "DataTable"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::MaxLatencyMs(16)]
    }

    fn budget(&self) -> BrickBudget {
        BrickBudget::uniform(16)
    }

    fn verify(&self) -> BrickVerification {
        let mut failed = Vec::new();
        if !self.loading && self.selection.ids().any(|id| !self.ids.contains(id)) {
            failed.push((
                BrickAssertion::custom("selection-visible"),
                "selection holds rows that are not displayed".to_string(),
            ));
        }
        BrickVerification {
            passed: self.assertions().to_vec(),
            failed,
            verification_time: Duration::from_micros(10),
        }
    }

    fn to_html(&self) -> String {
        let test_id = self.test_id_value.as_deref().unwrap_or("data-table");
        let mut html = String::from(r#"<div class="tabula-data-table"#);
        if let Some(class) = &self.class_name {
            html.push(' ');
            html.push_str(&escape_html(class));
        }
        let _ = write!(html, r#"" data-testid="{}">"#, escape_html(test_id));
        html.push_str(r#"<table role="table""#);
        if let Some(name) = &self.accessible_name_value {
            let _ = write!(html, r#" aria-label="{}""#, escape_html(name));
        }
        if self.loading {
            html.push_str(r#" aria-busy="true""#);
        }
        html.push('>');
        self.header_html(&mut html);
        self.body_html(&mut html);
        html.push_str("</table></div>");
        html
    }

    fn to_css(&self) -> String {
        concat!(
            ".tabula-data-table { width: 100%; overflow-x: auto; }\n",
            ".tabula-data-table table { width: 100%; border-collapse: collapse; }\n",
            ".tabula-data-table tr.selected { background: #e6f2ff; }\n",
            ".tabula-data-table td.clickable { cursor: pointer; }\n",
            ".tabula-data-table .tabula-empty { text-align: center; color: #6b7280; }\n",
            ".tabula-data-table .tabula-skeleton-bar { height: 1rem; width: 75%; background: #e5e7eb; }",
        )
        .to_string()
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
