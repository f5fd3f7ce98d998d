//! `InputField` widget: labelled text entry with helper and error text.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Write as _;
use std::time::Duration;
use tabula_core::{
    escape_html,
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickBudget, BrickVerification, Canvas, Color, Constraints, Event, Key,
    MouseButton, Point, Rect, Size, TypeId, Widget,
};

const LABEL_HEIGHT: f32 = 20.0;
const MESSAGE_HEIGHT: f32 = 18.0;
/// Width of each trailing control (clear, password toggle, spinner).
const CONTROL_WIDTH: f32 = 24.0;

/// Message emitted when the value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputChanged {
    /// The new value
    pub value: String,
}

/// Message emitted when Enter is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSubmitted {
    /// The submitted value
    pub value: String,
}

/// Message emitted when the password visibility toggle is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordVisibilityToggled {
    /// Whether the password is now shown in clear text
    pub visible: bool,
}

/// Kind of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Password,
}

impl InputKind {
    const fn html_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
        }
    }
}

/// Visual treatment of the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputVariant {
    /// Tinted background, no visible border
    Filled,
    /// Transparent background with a border
    #[default]
    Outlined,
    /// No background or border until focused
    Ghost,
}

impl InputVariant {
    const fn class(self) -> &'static str {
        match self {
            Self::Filled => "filled",
            Self::Outlined => "outlined",
            Self::Ghost => "ghost",
        }
    }
}

/// Size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSize {
    Sm,
    #[default]
    Md,
    Lg,
}

/// Metrics derived from an [`InputSize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeMetrics {
    pub padding_x: f32,
    pub padding_y: f32,
    pub font_size: f32,
    pub radius: f32,
}

impl InputSize {
    /// Padding, font size and corner radius for this size.
    #[must_use]
    pub const fn metrics(self) -> SizeMetrics {
        match self {
            Self::Sm => SizeMetrics {
                padding_x: 12.0,
                padding_y: 6.0,
                font_size: 14.0,
                radius: 6.0,
            },
            Self::Md => SizeMetrics {
                padding_x: 20.0,
                padding_y: 12.0,
                font_size: 16.0,
                radius: 8.0,
            },
            Self::Lg => SizeMetrics {
                padding_x: 28.0,
                padding_y: 16.0,
                font_size: 18.0,
                radius: 12.0,
            },
        }
    }

    const fn class(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

/// Labelled text input with helper/error text, clear button and password
/// visibility toggle.
///
/// The input is disabled while `loading`; a spinner shows in its place.
/// When `invalid`, the error message replaces the helper text.
pub struct InputField {
    value: String,
    label: Option<String>,
    placeholder: String,
    helper_text: Option<String>,
    error_message: Option<String>,
    disabled: bool,
    invalid: bool,
    loading: bool,
    kind: InputKind,
    variant: InputVariant,
    size: InputSize,
    clearable: bool,
    max_length: usize,
    class_name: Option<String>,
    text_color: Color,
    placeholder_color: Color,
    muted_color: Color,
    fill_color: Color,
    border_color: Color,
    focus_border_color: Color,
    error_color: Color,
    min_width: f32,
    test_id_value: Option<String>,
    accessible_name_value: Option<String>,
    bounds: Rect,
    focused: bool,
    password_visible: bool,
    /// Cursor position in characters
    cursor: usize,
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl InputField {
    /// Create an empty outlined, medium text input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: String::new(),
            label: None,
            placeholder: String::new(),
            helper_text: None,
            error_message: None,
            disabled: false,
            invalid: false,
            loading: false,
            kind: InputKind::Text,
            variant: InputVariant::Outlined,
            size: InputSize::Md,
            clearable: false,
            max_length: 0,
            class_name: None,
            text_color: Color::new(0.07, 0.09, 0.15, 1.0),
            placeholder_color: Color::new(0.61, 0.64, 0.69, 1.0),
            muted_color: Color::new(0.42, 0.45, 0.5, 1.0),
            fill_color: Color::new(0.95, 0.96, 0.96, 1.0),
            border_color: Color::new(0.82, 0.84, 0.86, 1.0),
            focus_border_color: Color::new(0.23, 0.51, 0.96, 1.0),
            error_color: Color::new(0.94, 0.27, 0.27, 1.0),
            min_width: 200.0,
            test_id_value: None,
            accessible_name_value: None,
            bounds: Rect::default(),
            focused: false,
            password_visible: false,
            cursor: 0,
        }
    }

    /// Set the current value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the label shown above the input.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set helper text shown below the input.
    #[must_use]
    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    /// Set the message shown when invalid.
    #[must_use]
    pub fn error_message(mut self, text: impl Into<String>) -> Self {
        self.error_message = Some(text.into());
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set invalid state.
    #[must_use]
    pub const fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Set loading state.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set input kind.
    #[must_use]
    pub const fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set visual variant.
    #[must_use]
    pub const fn variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set size preset.
    #[must_use]
    pub const fn size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    /// Show a clear button while there is a value.
    #[must_use]
    pub const fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Set maximum length in characters (0 = unlimited).
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self.truncate_to_max();
        self
    }

    /// Set the presentation class.
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Set minimum width.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(0.0);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Replace the value, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.truncate_to_max();
        self.cursor = self.char_count();
    }

    /// Get current value.
    #[must_use]
    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get cursor position in characters.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Check if focused.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the password is shown in clear text.
    #[must_use]
    pub const fn is_password_visible(&self) -> bool {
        self.password_visible
    }

    /// Whether the input accepts edits.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// Whether the clear button is shown.
    #[must_use]
    pub fn shows_clear_button(&self) -> bool {
        self.clearable && !self.value.is_empty() && !self.disabled
    }

    /// Whether the password visibility toggle is shown.
    #[must_use]
    pub fn shows_password_toggle(&self) -> bool {
        self.kind == InputKind::Password
    }

    /// Text below the input: the error message when invalid, else the helper.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match (&self.error_message, &self.helper_text) {
            (Some(error), _) if self.invalid => Some(error),
            (_, Some(helper)) => Some(helper),
            _ => None,
        }
    }

    /// Text drawn in the input box, masked for hidden passwords.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.kind == InputKind::Password && !self.password_visible {
            "•".repeat(self.char_count())
        } else {
            self.value.clone()
        }
    }

    /// Clear the value. Returns whether it changed.
    pub fn clear(&mut self) -> bool {
        if self.disabled || self.value.is_empty() {
            return false;
        }
        self.value.clear();
        self.cursor = 0;
        true
    }

    /// Flip password visibility. Returns the new state.
    pub fn toggle_password_visibility(&mut self) -> bool {
        self.password_visible = !self.password_visible;
        self.password_visible
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(offset, _)| offset)
    }

    fn truncate_to_max(&mut self) {
        if self.max_length > 0 && self.char_count() > self.max_length {
            let end = self.byte_offset(self.max_length);
            self.value.truncate(end);
            self.cursor = self.cursor.min(self.max_length);
        }
    }

    fn insert_text(&mut self, text: &str) -> bool {
        if !self.is_editable() {
            return false;
        }
        let mut changed = false;
        for c in text.chars() {
            if self.max_length > 0 && self.char_count() >= self.max_length {
                break;
            }
            let at = self.byte_offset(self.cursor);
            self.value.insert(at, c);
            self.cursor += 1;
            changed = true;
        }
        changed
    }

    fn backspace(&mut self) -> bool {
        if !self.is_editable() || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if !self.is_editable() || self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    fn label_height(&self) -> f32 {
        if self.label.is_some() {
            LABEL_HEIGHT
        } else {
            0.0
        }
    }

    fn box_height(&self) -> f32 {
        let m = self.size.metrics();
        2.0f32.mul_add(m.padding_y, m.font_size)
    }

    fn input_rect(&self) -> Rect {
        self.bounds.band(self.label_height(), self.box_height())
    }

    /// Trailing control slots, right to left: clear, password toggle, spinner.
    fn control_rect(&self, slot: usize) -> Rect {
        let input = self.input_rect();
        let x = (slot as f32 + 1.0).mul_add(-CONTROL_WIDTH, input.right() - 4.0);
        Rect::new(x, input.y, CONTROL_WIDTH, input.height)
    }

    fn clear_button_rect(&self) -> Option<Rect> {
        self.shows_clear_button().then(|| self.control_rect(0))
    }

    fn password_toggle_rect(&self) -> Option<Rect> {
        let slot = usize::from(self.shows_clear_button());
        self.shows_password_toggle().then(|| self.control_rect(slot))
    }

    fn spinner_rect(&self) -> Option<Rect> {
        let slot = usize::from(self.shows_clear_button()) + usize::from(self.shows_password_toggle());
        self.loading.then(|| self.control_rect(slot))
    }

    fn changed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(InputChanged {
            value: self.value.clone(),
        }))
    }

    fn handle_click(&mut self, position: Point) -> Option<Box<dyn Any + Send>> {
        if self.clear_button_rect().is_some_and(|r| r.contains_point(&position)) {
            return if self.clear() { self.changed() } else { None };
        }
        if self
            .password_toggle_rect()
            .is_some_and(|r| r.contains_point(&position))
        {
            let visible = self.toggle_password_visibility();
            return Some(Box::new(PasswordVisibilityToggled { visible }));
        }
        let was_focused = self.focused;
        self.focused = self.is_editable() && self.input_rect().contains_point(&position);
        if self.focused && !was_focused {
            self.cursor = self.char_count();
        }
        None
    }

    fn handle_key(&mut self, key: Key) -> Option<Box<dyn Any + Send>> {
        match key {
            Key::Backspace if self.backspace() => self.changed(),
            Key::Delete if self.delete() => self.changed(),
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            Key::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                None
            }
            Key::Home => {
                self.cursor = 0;
                None
            }
            Key::End => {
                self.cursor = self.char_count();
                None
            }
            Key::Enter => Some(Box::new(InputSubmitted {
                value: self.value.clone(),
            })),
            _ => None,
        }
    }

    fn paint_box(&self, canvas: &mut dyn Canvas, rect: Rect) {
        let border = if self.invalid {
            Some(self.error_color)
        } else if self.focused {
            Some(self.focus_border_color)
        } else {
            match self.variant {
                InputVariant::Outlined => Some(self.border_color),
                InputVariant::Filled | InputVariant::Ghost => None,
            }
        };
        if self.variant == InputVariant::Filled {
            canvas.fill_rect(rect, self.fill_color);
        }
        if let Some(color) = border {
            canvas.stroke_rect(rect, color, 1.0);
        }
    }
}

impl Widget for InputField {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let message = if self.message().is_some() {
            MESSAGE_HEIGHT
        } else {
            0.0
        };
        let height = self.label_height() + self.box_height() + message;
        let width = self.min_width.max(constraints.min_width);
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let metrics = self.size.metrics();
        if let Some(label) = &self.label {
            let style = TextStyle {
                size: 14.0,
                color: if self.disabled {
                    self.placeholder_color
                } else {
                    self.text_color
                },
                weight: FontWeight::Medium,
            };
            canvas.draw_text(label, self.bounds.origin(), &style);
        }

        let input = self.input_rect();
        self.paint_box(canvas, input);

        let text_pos = Point::new(input.x + metrics.padding_x, input.y + metrics.padding_y);
        let mut style = TextStyle {
            size: metrics.font_size,
            color: self.text_color,
            ..TextStyle::default()
        };
        if self.disabled {
            style.color = style.color.with_alpha(0.6);
        }
        if self.value.is_empty() {
            style.color = self.placeholder_color;
            canvas.draw_text(&self.placeholder, text_pos, &style);
        } else {
            canvas.draw_text(&self.display_text(), text_pos, &style);
        }

        let control_style = TextStyle {
            size: 14.0,
            color: self.placeholder_color,
            ..TextStyle::default()
        };
        if let Some(rect) = self.clear_button_rect() {
            canvas.draw_text("×", rect.center(), &control_style);
        }
        if let Some(rect) = self.password_toggle_rect() {
            let glyph = if self.password_visible { "hide" } else { "show" };
            canvas.draw_text(glyph, rect.center(), &control_style);
        }
        if let Some(rect) = self.spinner_rect() {
            canvas.draw_text("⏳", rect.center(), &control_style);
        }

        if let Some(message) = self.message() {
            let color = if self.invalid && self.error_message.is_some() {
                self.error_color
            } else {
                self.muted_color
            };
            let style = TextStyle {
                size: 12.0,
                color,
                ..TextStyle::default()
            };
            canvas.draw_text(message, Point::new(input.x, input.bottom() + 4.0), &style);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.handle_click(*position),
            Event::FocusIn if self.is_editable() => {
                self.focused = true;
                None
            }
            Event::FocusOut => {
                self.focused = false;
                None
            }
            Event::TextInput { text } if self.focused => {
                if self.insert_text(text) {
                    self.changed()
                } else {
                    None
                }
            }
            Event::KeyDown { key } if self.focused => self.handle_key(*key),
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        self.is_editable()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value
            .as_deref()
            .or(self.label.as_deref())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TextInput
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for InputField {
    fn brick_name(&self) -> &'static str {
        "InputField"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::MaxLatencyMs(16)]
    }

    fn budget(&self) -> BrickBudget {
        BrickBudget::uniform(16)
    }

    fn verify(&self) -> BrickVerification {
        let mut failed = Vec::new();
        if self.invalid && self.error_message.is_none() {
            failed.push((
                BrickAssertion::TextVisible,
                "invalid input has no error message".to_string(),
            ));
        }
        BrickVerification {
            passed: self.assertions().to_vec(),
            failed,
            verification_time: Duration::from_micros(5),
        }
    }

    fn to_html(&self) -> String {
        let test_id = self.test_id_value.as_deref().unwrap_or("input-field");
        let mut html = String::from(r#"<div class="tabula-input-field"#);
        if let Some(class) = &self.class_name {
            html.push(' ');
            html.push_str(&escape_html(class));
        }
        let _ = write!(html, r#"" data-testid="{}">"#, escape_html(test_id));
        if let Some(label) = &self.label {
            let disabled = if self.disabled { r#" class="disabled""# } else { "" };
            let _ = write!(html, "<label{disabled}>{}</label>", escape_html(label));
        }

        html.push_str(r#"<div class="tabula-input-wrap">"#);
        let input_type = if self.kind == InputKind::Password && self.password_visible {
            InputKind::Text.html_type()
        } else {
            self.kind.html_type()
        };
        let _ = write!(
            html,
            r#"<input type="{input_type}" class="tabula-input tabula-input-{} tabula-input-{}{}" value="{}" placeholder="{}""#,
            self.variant.class(),
            self.size.class(),
            if self.invalid { " tabula-input-invalid" } else { "" },
            escape_html(&self.value),
            escape_html(&self.placeholder),
        );
        if let Some(name) = Widget::accessible_name(self) {
            let _ = write!(html, r#" aria-label="{}""#, escape_html(name));
        }
        if !self.is_editable() {
            html.push_str(" disabled");
        }
        if self.invalid {
            html.push_str(r#" aria-invalid="true""#);
        }
        if self.loading {
            html.push_str(r#" aria-busy="true""#);
        }
        html.push('>');
        if self.shows_clear_button() {
            html.push_str(r#"<button type="button" aria-label="Clear input">×</button>"#);
        }
        if self.shows_password_toggle() {
            let label = if self.password_visible {
                "Hide password"
            } else {
                "Show password"
            };
            let _ = write!(html, r#"<button type="button" aria-label="{label}"></button>"#);
        }
        if self.loading {
            html.push_str(r#"<span class="tabula-spinner" aria-hidden="true">⏳</span>"#);
        }
        html.push_str("</div>");

        if let Some(message) = self.message() {
            let class = if self.invalid && self.error_message.is_some() {
                "tabula-input-error"
            } else {
                "tabula-input-helper"
            };
            let _ = write!(html, r#"<p class="{class}">{}</p>"#, escape_html(message));
        }
        html.push_str("</div>");
        html
    }

    fn to_css(&self) -> String {
        let m = self.size.metrics();
        format!(
            ".tabula-input-field {{ display: flex; flex-direction: column; width: 100%; }}\n\
             .tabula-input-{size} {{ padding: {py}px {px}px; font-size: {fs}px; border-radius: {r}px; }}\n\
             .tabula-input-invalid {{ border-color: #ef4444; }}\n\
             .tabula-input-error {{ color: #ef4444; font-size: 12px; }}\n\
             .tabula-input-helper {{ color: #6b7280; font-size: 12px; }}",
            size = self.size.class(),
            py = m.padding_y,
            px = m.padding_x,
            fs = m.font_size,
            r = m.radius,
        )
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
