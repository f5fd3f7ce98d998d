//! Sort engine: value comparison, sort-state transitions and display order.

use super::cell::{CellValue, Record};
use super::column::TableColumn;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Input order
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Next direction when the same column header is activated again.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::None,
        }
    }

    /// Value for the `aria-sort` attribute.
    #[must_use]
    pub const fn aria_sort(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Header indicator glyph for a sortable column.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::None => "↕",
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Active sort column and direction.
///
/// A direction other than `None` always pairs with a column id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    column: Option<String>,
    direction: SortDirection,
}

impl SortState {
    /// Unsorted state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by `column` in `direction`.
    #[must_use]
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// Id of the active column, if any.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Current direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Whether rows are currently reordered.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.column.is_some() && self.direction != SortDirection::None
    }

    /// Indicator for the column with id `column_id`.
    #[must_use]
    pub fn direction_for(&self, column_id: &str) -> SortDirection {
        if self.column.as_deref() == Some(column_id) {
            self.direction
        } else {
            SortDirection::None
        }
    }

    /// Apply a header activation on `column`.
    ///
    /// The same column cycles `None -> Ascending -> Descending -> None`; a
    /// different column starts at `Ascending`. Non-sortable columns are
    /// ignored. Returns whether the state changed.
    pub fn activate<T>(&mut self, column: &TableColumn<T>) -> bool {
        if !column.sortable {
            return false;
        }
        let id = column.id();
        if self.column.as_deref() == Some(id) {
            self.direction = self.direction.next();
        } else {
            self.column = Some(id.to_string());
            self.direction = SortDirection::Ascending;
        }
        log::debug!(
            "sort state -> column {:?}, direction {:?}",
            self.column,
            self.direction
        );
        true
    }

    /// Reset to input order.
    pub fn clear(&mut self) {
        self.column = None;
        self.direction = SortDirection::None;
    }

    /// The column this state reorders by, if it exists, is sortable and has
    /// a key or sort accessor to read values from.
    #[must_use]
    pub fn active_column<'c, T>(&self, columns: &'c [TableColumn<T>]) -> Option<&'c TableColumn<T>> {
        if self.direction == SortDirection::None {
            return None;
        }
        let id = self.column.as_deref()?;
        columns
            .iter()
            .find(|c| c.id() == id)
            .filter(|c| c.sortable && c.has_sort_source())
    }
}

/// Compare two cell values.
///
/// 1. `Null` sorts after everything else; two nulls are equal.
/// 2. If either side is a date, both are compared as epoch milliseconds
///    (unparseable sides after parseable ones).
/// 3. Two numbers compare numerically, two booleans as `false < true`.
/// 4. Anything else compares as text with [`natural_cmp`].
#[must_use]
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        (CellValue::Null, _) => Ordering::Greater,
        (_, CellValue::Null) => Ordering::Less,
        _ if a.is_date() || b.is_date() => {
            compare_timestamps(a.timestamp_millis(), b.timestamp_millis())
        }
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        _ => natural_cmp(&sort_text(a), &sort_text(b)),
    }
}

fn compare_timestamps(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Text form used when values of different kinds meet.
fn sort_text(value: &CellValue) -> Cow<'_, str> {
    match value {
        CellValue::Null => Cow::Borrowed(""),
        CellValue::Text(s) => Cow::Borrowed(s),
        CellValue::Number(n) => Cow::Owned(format!("{n}")),
        CellValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        CellValue::Date(d) => Cow::Owned(d.to_rfc3339()),
    }
}

/// Text comparison ignoring case and accents, with digit runs compared
/// numerically: `"item2" < "item10"`, `"resume" == "Résumé"`.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let mut left = Tokens::new(&a);
    let mut right = Tokens::new(&b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => {}
                other => return other,
            },
        }
    }
}

/// Lowercase base letters: decompose, then drop combining marks.
fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    /// Digit run with leading zeros stripped
    Digits(&'a str),
    Char(char),
}

impl Ord for Token<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Digits(x), Self::Digits(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
            // A digit run sits where '0' would in the character order.
            (Self::Digits(_), Self::Char(c)) => '0'.cmp(c),
            (Self::Char(c), Self::Digits(_)) => c.cmp(&'0'),
            (Self::Char(x), Self::Char(y)) => x.cmp(y),
        }
    }
}

impl PartialOrd for Token<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    const fn new(input: &'a str) -> Self {
        Self { rest: input }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        if first.is_ascii_digit() {
            let end = self
                .rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(self.rest.len());
            let (run, rest) = self.rest.split_at(end);
            self.rest = rest;
            let trimmed = run.trim_start_matches('0');
            Some(Token::Digits(trimmed))
        } else {
            self.rest = &self.rest[first.len_utf8()..];
            Some(Token::Char(first))
        }
    }
}

/// Bring a date column's values to one temporal kind.
///
/// Any date makes the whole column temporal: other values become dates when
/// they coerce, text otherwise. Columns without dates are returned as is.
fn promote(values: Vec<CellValue>) -> Vec<CellValue> {
    if !values.iter().any(CellValue::is_date) {
        return values;
    }
    values
        .into_iter()
        .map(|v| match v {
            CellValue::Null | CellValue::Date(_) => v,
            other => other
                .timestamp_millis()
                .and_then(DateTime::from_timestamp_millis)
                .map_or_else(|| CellValue::Text(sort_text(&other).into_owned()), CellValue::Date),
        })
        .collect()
}

/// Whether [`compare_values`] is a total order over `values`.
///
/// Holds for temporal columns and for columns of a single kind. Mixed
/// number and text columns can form cycles (`-5 < "-7" < -10 < -5`).
fn is_total(values: &[CellValue]) -> bool {
    let all = |kind: fn(&CellValue) -> bool| values.iter().all(|v| v.is_null() || kind(v));
    values.iter().any(CellValue::is_date)
        || all(|v| matches!(v, CellValue::Number(_)))
        || all(|v| matches!(v, CellValue::Bool(_)))
        || all(|v| matches!(v, CellValue::Text(_)))
}

/// Stable bottom-up merge sort that accepts any comparator.
///
/// Each merge takes from the right run only on `Less`, so equal elements
/// keep their order. Inconsistent comparisons yield some permutation rather
/// than a panic.
fn merge_sort_by(items: &mut [usize], mut cmp: impl FnMut(&usize, &usize) -> Ordering) {
    let len = items.len();
    let mut buf = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j, mut k) = (start, mid, start);
            while i < mid && j < end {
                if cmp(&items[j], &items[i]) == Ordering::Less {
                    buf[k] = items[j];
                    j += 1;
                } else {
                    buf[k] = items[i];
                    i += 1;
                }
                k += 1;
            }
            let left = mid - i;
            buf[k..k + left].copy_from_slice(&items[i..mid]);
            buf[k + left..end].copy_from_slice(&items[j..end]);
            start = end;
        }
        items.copy_from_slice(&buf);
        width *= 2;
    }
}

/// Order two promoted values for `direction`; nulls stay last either way.
fn compare_directed(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_values(a, b);
            if direction == SortDirection::Descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

/// Display order of `rows` under `state`, as indices into `rows`.
///
/// Returns the input order when the state is unsorted, names no column, or
/// names a column that is not sortable. The sort is stable, so ties keep
/// their input order in both directions. Every pair is ordered by
/// [`compare_values`]; numbers in a column mixed with text still compare
/// numerically with each other.
#[must_use]
pub fn sort_order<T: Record>(rows: &[T], columns: &[TableColumn<T>], state: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(column) = state.active_column(columns) else {
        return order;
    };
    let direction = state.direction();
    let keys = promote(rows.iter().map(|row| column.sort_value(row)).collect());
    let cmp = |a: &usize, b: &usize| compare_directed(&keys[*a], &keys[*b], direction);
    if is_total(&keys) {
        order.sort_by(cmp);
    } else {
        merge_sort_by(&mut order, cmp);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_table::TableRow;
    use proptest::prelude::*;

    fn ages() -> Vec<TableRow> {
        vec![
            TableRow::new().cell("id", "u1").cell("age", 22),
            TableRow::new().cell("id", "u2").cell("age", 28),
            TableRow::new().cell("id", "u3").cell("age", 25),
        ]
    }

    fn age_column() -> Vec<TableColumn<TableRow>> {
        vec![TableColumn::new("age", "Age").sortable()]
    }

    // ===== compare_values =====

    #[test]
    fn test_compare_nulls_last() {
        assert_eq!(compare_values(&CellValue::Null, &CellValue::Null), Ordering::Equal);
        assert_eq!(
            compare_values(&CellValue::Null, &CellValue::Number(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(&CellValue::Text("a".into()), &CellValue::Null),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_numbers_and_bools() {
        assert_eq!(
            compare_values(&CellValue::Number(2.0), &CellValue::Number(10.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&CellValue::Bool(false), &CellValue::Bool(true)),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_dates_coerce_other_side() {
        let d = CellValue::Date(CellValue::parse_date("2024-02-12").unwrap());
        let earlier = CellValue::Text("2023-11-07".into());
        assert_eq!(compare_values(&d, &earlier), Ordering::Greater);
        assert_eq!(compare_values(&CellValue::Number(0.0), &d), Ordering::Less);
        assert_eq!(
            compare_values(&d, &CellValue::Text("garbage".into())),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_text_natural_case_insensitive() {
        let t = |s: &str| CellValue::Text(s.into());
        assert_eq!(compare_values(&t("item2"), &t("item10")), Ordering::Less);
        assert_eq!(compare_values(&t("apple"), &t("Banana")), Ordering::Less);
        assert_eq!(compare_values(&t("ABC"), &t("abc")), Ordering::Equal);
        assert_eq!(compare_values(&t("file007"), &t("file7")), Ordering::Equal);
    }

    #[test]
    fn test_compare_mixed_kinds_fall_back_to_text() {
        assert_eq!(
            compare_values(&CellValue::Number(5.0), &CellValue::Text("10 apples".into())),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&CellValue::Bool(true), &CellValue::Text("false".into())),
            Ordering::Greater
        );
    }

    #[test]
    fn test_natural_cmp_folds_accents() {
        assert_eq!(natural_cmp("Émile", "Zoe"), Ordering::Less);
        assert_eq!(natural_cmp("resume", "résumé"), Ordering::Equal);
        assert_eq!(natural_cmp("Ångström", "angstrom"), Ordering::Equal);
        assert_eq!(natural_cmp("café2", "cafe10"), Ordering::Less);
    }

    #[test]
    fn test_natural_cmp_digits_before_letters() {
        assert_eq!(natural_cmp("a1", "ab"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("x", ""), Ordering::Greater);
        assert_eq!(natural_cmp("v1.10", "v1.9"), Ordering::Greater);
    }

    // ===== SortDirection / SortState =====

    #[test]
    fn test_direction_cycle() {
        assert_eq!(SortDirection::None.next(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.next(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.next(), SortDirection::None);
        assert_eq!(SortDirection::Ascending.aria_sort(), "ascending");
        assert_eq!(SortDirection::None.glyph(), "↕");
    }

    #[test]
    fn test_activate_cycle_law() {
        let col: TableColumn<TableRow> = TableColumn::new("age", "Age").sortable();
        let mut state = SortState::new();
        let mut seen = Vec::new();
        for _ in 0..4 {
            assert!(state.activate(&col));
            seen.push(state.direction());
        }
        assert_eq!(
            seen,
            vec![
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::None,
                SortDirection::Ascending
            ]
        );
        assert_eq!(state.column(), Some("age"));
    }

    #[test]
    fn test_activate_other_column_resets_to_ascending() {
        let age: TableColumn<TableRow> = TableColumn::new("age", "Age").sortable();
        let name: TableColumn<TableRow> = TableColumn::new("name", "Name").sortable();
        let mut state = SortState::new();
        state.activate(&age);
        state.activate(&age);
        assert_eq!(state.direction(), SortDirection::Descending);
        state.activate(&name);
        assert_eq!(state, SortState::by("name", SortDirection::Ascending));
        assert_eq!(state.direction_for("age"), SortDirection::None);
        assert_eq!(state.direction_for("name"), SortDirection::Ascending);
    }

    #[test]
    fn test_activate_non_sortable_is_noop() {
        let email: TableColumn<TableRow> = TableColumn::new("email", "Email");
        let mut state = SortState::by("age", SortDirection::Descending);
        assert!(!state.activate(&email));
        assert_eq!(state, SortState::by("age", SortDirection::Descending));
    }

    #[test]
    fn test_clear() {
        let mut state = SortState::by("age", SortDirection::Ascending);
        assert!(state.is_sorted());
        state.clear();
        assert!(!state.is_sorted());
        assert_eq!(state.column(), None);
    }

    // ===== sort_order =====

    #[test]
    fn test_sort_order_age_scenario() {
        let rows = ages();
        let columns = age_column();
        let asc = SortState::by("age", SortDirection::Ascending);
        let desc = SortState::by("age", SortDirection::Descending);
        let none = SortState::by("age", SortDirection::None);
        assert_eq!(sort_order(&rows, &columns, &asc), vec![0, 2, 1]);
        assert_eq!(sort_order(&rows, &columns, &desc), vec![1, 2, 0]);
        assert_eq!(sort_order(&rows, &columns, &none), vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_order_noop_cases() {
        let rows = ages();
        let unsortable = vec![TableColumn::new("age", "Age")];
        let state = SortState::by("age", SortDirection::Ascending);
        assert_eq!(sort_order(&rows, &unsortable, &state), vec![0, 1, 2]);

        let missing = SortState::by("height", SortDirection::Ascending);
        assert_eq!(sort_order(&rows, &age_column(), &missing), vec![0, 1, 2]);

        let sourceless = vec![TableColumn::computed("Actions").sortable()];
        let state = SortState::by("Actions", SortDirection::Descending);
        assert!(state.active_column(&sourceless).is_none());
        assert_eq!(sort_order(&rows, &sourceless, &state), vec![0, 1, 2]);

        let accessor = vec![TableColumn::computed("Actions")
            .sortable()
            .sort_by(|r: &TableRow| r.field("age"))];
        assert!(state.active_column(&accessor).is_some());
        assert_eq!(sort_order(&rows, &accessor, &state), vec![1, 2, 0]);
    }

    #[test]
    fn test_sort_order_nulls_last_both_directions() {
        let rows = vec![
            TableRow::new().cell("v", 3),
            TableRow::new(),
            TableRow::new().cell("v", 1),
            TableRow::new(),
            TableRow::new().cell("v", 2),
        ];
        let columns = vec![TableColumn::new("v", "V").sortable()];
        let asc = sort_order(&rows, &columns, &SortState::by("v", SortDirection::Ascending));
        assert_eq!(asc, vec![2, 4, 0, 1, 3]);
        let desc = sort_order(&rows, &columns, &SortState::by("v", SortDirection::Descending));
        assert_eq!(desc, vec![0, 4, 2, 1, 3]);
    }

    #[test]
    fn test_sort_order_by_accessor_dates() {
        let rows = vec![
            TableRow::new().cell("joined", "2024-02-12"),
            TableRow::new().cell("joined", "2023-11-07"),
            TableRow::new().cell("joined", "2025-04-30"),
        ];
        let columns = vec![TableColumn::computed("Member Since")
            .sortable()
            .sort_by(|r: &TableRow| match r.field("joined") {
                CellValue::Text(s) => CellValue::parse_date(&s).map_or(CellValue::Null, CellValue::Date),
                other => other,
            })];
        let state = SortState::by("Member Since", SortDirection::Ascending);
        assert_eq!(sort_order(&rows, &columns, &state), vec![1, 0, 2]);
    }

    #[test]
    fn test_sort_order_promotes_mixed_date_column() {
        let rows = vec![
            TableRow::new().cell("d", "not a date"),
            TableRow::new().cell("d", CellValue::Date(CellValue::parse_date("2024-01-02").unwrap())),
            TableRow::new().cell("d", "2024-01-01"),
            TableRow::new(),
        ];
        let columns = vec![TableColumn::new("d", "D").sortable()];
        let asc = sort_order(&rows, &columns, &SortState::by("d", SortDirection::Ascending));
        assert_eq!(asc, vec![2, 1, 0, 3]);
    }

    #[test]
    fn test_sort_order_mixed_number_and_text() {
        let rows = vec![
            TableRow::new().cell("v", "item10"),
            TableRow::new().cell("v", 7),
            TableRow::new().cell("v", "item2"),
        ];
        let columns = vec![TableColumn::new("v", "V").sortable()];
        let asc = sort_order(&rows, &columns, &SortState::by("v", SortDirection::Ascending));
        assert_eq!(asc, vec![1, 2, 0]);
    }

    #[test]
    fn test_sort_order_mixed_column_keeps_numbers_numeric() {
        let columns = vec![TableColumn::new("v", "V").sortable()];
        let asc = SortState::by("v", SortDirection::Ascending);

        let negatives = vec![
            TableRow::new().cell("v", -5),
            TableRow::new().cell("v", -10),
            TableRow::new().cell("v", "x"),
        ];
        assert_eq!(sort_order(&negatives, &columns, &asc), vec![1, 0, 2]);

        let decimals = vec![
            TableRow::new().cell("v", 1.5),
            TableRow::new().cell("v", 1.25),
            TableRow::new().cell("v", "x"),
        ];
        assert_eq!(sort_order(&decimals, &columns, &asc), vec![1, 0, 2]);

        let desc = SortState::by("v", SortDirection::Descending);
        assert_eq!(sort_order(&decimals, &columns, &desc), vec![2, 0, 1]);
    }

    #[test]
    fn test_sort_order_name_column_folds_accents() {
        let rows = vec![
            TableRow::new().cell("name", "Zoe"),
            TableRow::new().cell("name", "Émile"),
            TableRow::new().cell("name", "adam"),
        ];
        let columns = vec![TableColumn::new("name", "Name").sortable()];
        let state = SortState::by("name", SortDirection::Ascending);
        assert_eq!(sort_order(&rows, &columns, &state), vec![2, 1, 0]);
    }

    #[test]
    fn test_merge_sort_survives_cyclic_comparator() {
        let mut items = vec![0, 1, 2, 3, 4];
        // rock-paper-scissors over i % 3
        merge_sort_by(&mut items, |a, b| match (a % 3 + 3 - b % 3) % 3 {
            0 => Ordering::Equal,
            1 => Ordering::Greater,
            _ => Ordering::Less,
        });
        items.sort_unstable();
        assert_eq!(items, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sort_order_stable_ties() {
        let rows = vec![
            TableRow::new().cell("k", 1).cell("id", "a"),
            TableRow::new().cell("k", 0).cell("id", "b"),
            TableRow::new().cell("k", 1).cell("id", "c"),
        ];
        let columns = vec![TableColumn::new("k", "K").sortable()];
        let desc = sort_order(&rows, &columns, &SortState::by("k", SortDirection::Descending));
        assert_eq!(desc, vec![0, 2, 1]);
    }

    fn arb_cell() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            Just(CellValue::Null),
            (-1000i32..1000).prop_map(CellValue::from),
            any::<bool>().prop_map(CellValue::Bool),
            "[a-c]{0,2}[0-9]{0,3}".prop_map(CellValue::Text),
            (0i64..4_000_000_000_000)
                .prop_map(|ms| CellValue::Date(DateTime::from_timestamp_millis(ms).unwrap())),
        ]
    }

    proptest! {
        #[test]
        fn prop_sort_is_permutation(values in prop::collection::vec(arb_cell(), 0..40), descending in any::<bool>()) {
            let rows: Vec<TableRow> = values.iter().cloned().map(|v| TableRow::new().cell("v", v)).collect();
            let columns = vec![TableColumn::new("v", "V").sortable()];
            let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
            let mut order = sort_order(&rows, &columns, &SortState::by("v", direction));
            prop_assert_eq!(order.len(), rows.len());
            order.sort_unstable();
            prop_assert_eq!(order, (0..rows.len()).collect::<Vec<_>>());

            let restored = sort_order(&rows, &columns, &SortState::by("v", SortDirection::None));
            prop_assert_eq!(restored, (0..rows.len()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_merge_sort_matches_std_on_total_orders(values in prop::collection::vec(-20i32..20, 0..50)) {
            let mut merged: Vec<usize> = (0..values.len()).collect();
            merge_sort_by(&mut merged, |a, b| values[*a].cmp(&values[*b]));
            let mut expected: Vec<usize> = (0..values.len()).collect();
            expected.sort_by_key(|i| values[*i]);
            prop_assert_eq!(merged, expected);
        }

        #[test]
        fn prop_nulls_always_last(values in prop::collection::vec(prop::option::of(-50i32..50), 0..30), descending in any::<bool>()) {
            let rows: Vec<TableRow> = values.iter().map(|v| TableRow::new().cell("v", *v)).collect();
            let columns = vec![TableColumn::new("v", "V").sortable()];
            let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
            let order = sort_order(&rows, &columns, &SortState::by("v", direction));
            let nulls: Vec<bool> = order.iter().map(|&i| values[i].is_none()).collect();
            let first_null = nulls.iter().position(|n| *n).unwrap_or(nulls.len());
            prop_assert!(nulls[first_null..].iter().all(|n| *n));
        }

        #[test]
        fn prop_natural_cmp_antisymmetric(a in "[a-zA-Z0-9]{0,6}", b in "[a-zA-Z0-9]{0,6}") {
            prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
        }
    }
}
