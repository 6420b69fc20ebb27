//! Client-Side Comparator
//!
//! Extracts a normalized sort key per field from loosely typed items and
//! orders them. Sorting is stable, so ties keep their input order.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{Item, SortDirection, SortField, SortState};

/// Nested objects searched, in order, for the owning institution.
const INSTITUTION_SOURCES: [&str; 3] = ["loan", "account", "contact"];

/// Normalized, comparable value extracted from an item.
///
/// `Missing` orders below every present value.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Missing,
    Int(i64),
    Number(f64),
    Text(String),
    Instant(i64),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Int(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Text(_) => 3,
            SortKey::Instant(_) => 4,
        }
    }

    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// First non-empty institution name along the loan -> account -> contact chain.
pub fn financial_institution(item: &Item) -> Option<&str> {
    INSTITUTION_SOURCES
        .iter()
        .find_map(|source| item.nested_text(source, "financial_institution"))
}

/// Past-due amount plus fees when positive, else the flat `amount_involved`.
pub fn total_owing(item: &Item) -> f64 {
    if item.nested("loan").is_some() {
        let past_due = item.nested_number("loan", "past_due_amount").unwrap_or(0.0);
        let fees = item.nested_number("loan", "past_due_fees").unwrap_or(0.0);
        let total = past_due + fees;
        if total > 0.0 {
            return total;
        }
    }
    item.number("amount_involved").unwrap_or(0.0)
}

pub fn days_past_due(item: &Item) -> Option<i64> {
    item.nested_number("loan", "days_past_due").map(|d| d as i64)
}

/// Parse backend timestamps into epoch milliseconds.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) and plain dates.
pub fn parse_instant(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn folded(value: Option<&str>) -> SortKey {
    SortKey::Text(value.unwrap_or("").to_lowercase())
}

pub fn sort_key(item: &Item, field: SortField) -> SortKey {
    match field {
        SortField::Id => SortKey::Int(item.id),
        SortField::Subject => folded(item.text("subject")),
        SortField::CaseType => folded(item.text("case_type")),
        SortField::Priority => folded(item.text("priority")),
        SortField::Status => folded(item.text("status")),
        SortField::FinancialInstitution => folded(financial_institution(item)),
        SortField::CreatedAt => item
            .text("created_at")
            .and_then(parse_instant)
            .map(SortKey::Instant)
            .unwrap_or(SortKey::Missing),
        SortField::DaysPastDue => SortKey::Int(days_past_due(item).unwrap_or(-1)),
        SortField::TotalOwing => SortKey::Number(total_owing(item)),
    }
}

/// Three-way comparison translated by direction.
pub fn compare_items(a: &Item, b: &Item, state: SortState) -> Ordering {
    let ordering = sort_key(a, state.field).compare(&sort_key(b, state.field));
    match state.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable in-place sort.
pub fn sort_items(items: &mut [Item], state: SortState) {
    items.sort_by_cached_key(|item| OrderedKey(sort_key(item, state.field)));
    if state.direction == SortDirection::Descending {
        reverse_stable(items, state.field);
    }
}

/// Sorted copy, leaving the input untouched.
pub fn sorted(items: &[Item], state: SortState) -> Vec<Item> {
    let mut out = items.to_vec();
    sort_items(&mut out, state);
    out
}

/// Descending order that still keeps equal keys in input order: reverse the
/// ascending result, then reverse each run of equal keys back.
fn reverse_stable(items: &mut [Item], field: SortField) {
    items.reverse();
    let mut start = 0;
    while start < items.len() {
        let key = sort_key(&items[start], field);
        let mut end = start + 1;
        while end < items.len() && sort_key(&items[end], field).compare(&key) == Ordering::Equal {
            end += 1;
        }
        items[start..end].reverse();
        start = end;
    }
}

struct OrderedKey(SortKey);

impl PartialEq for OrderedKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.compare(&other.0) == Ordering::Equal
    }
}

impl Eq for OrderedKey {}

impl PartialOrd for OrderedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.compare(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn case(id: i64) -> Item {
        Item::new(id)
    }

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    fn asc(field: SortField) -> SortState {
        SortState::new(field, SortDirection::Ascending)
    }

    fn desc(field: SortField) -> SortState {
        SortState::new(field, SortDirection::Descending)
    }

    /// One item per field value, with unique keys for every sortable field.
    fn unique_fixture() -> Vec<Item> {
        vec![
            case(3)
                .with("subject", json!("Bravo"))
                .with("case_type", json!("Complaint"))
                .with("priority", json!("High"))
                .with("status", json!("Open"))
                .with("created_at", json!("2024-03-01T09:00:00"))
                .with("loan", json!({
                    "financial_institution": "RBC",
                    "days_past_due": 45,
                    "past_due_amount": "300.00",
                    "past_due_fees": 25
                })),
            case(1)
                .with("subject", json!("alpha"))
                .with("case_type", json!("Account Inquiry"))
                .with("priority", json!("Low"))
                .with("status", json!("Closed"))
                .with("created_at", json!("2023-12-31"))
                .with("account", json!({"financial_institution": "BMO"}))
                .with("loan", json!({"days_past_due": 0}))
                .with("amount_involved", json!(10)),
            case(2)
                .with("subject", json!("Charlie"))
                .with("case_type", json!("Delinquency"))
                .with("priority", json!("Urgent"))
                .with("status", json!("New"))
                .with("created_at", json!("2024-05-10T12:30:00Z"))
                .with("contact", json!({"financial_institution": "td bank"}))
                .with("loan", json!({"days_past_due": 120}))
                .with("amount_involved", json!("99.5")),
        ]
    }

    #[test]
    fn test_ascending_then_descending_reverses_for_every_field() {
        let items = unique_fixture();
        for field in SortField::ALL {
            let up = sorted(&items, asc(field));
            let mut down = sorted(&items, desc(field));
            down.reverse();
            assert_eq!(ids(&up), ids(&down), "field {}", field);
        }
    }

    #[test]
    fn test_text_is_case_folded() {
        let items = unique_fixture();
        assert_eq!(ids(&sorted(&items, asc(SortField::Subject))), vec![1, 3, 2]);
    }

    #[test]
    fn test_institution_fallback_chain() {
        let items = unique_fixture();
        assert_eq!(financial_institution(&items[1]), Some("BMO"));
        assert_eq!(financial_institution(&items[2]), Some("td bank"));
        assert_eq!(ids(&sorted(&items, asc(SortField::FinancialInstitution))), vec![1, 3, 2]);
    }

    #[test]
    fn test_total_owing_nested_sum_with_flat_fallback() {
        let items = unique_fixture();
        assert_eq!(total_owing(&items[0]), 325.0);
        // loan present but nothing past due -> flat amount
        assert_eq!(total_owing(&items[1]), 10.0);
        assert_eq!(total_owing(&items[2]), 99.5);
        assert_eq!(total_owing(&case(7)), 0.0);
        assert_eq!(ids(&sorted(&items, asc(SortField::TotalOwing))), vec![1, 2, 3]);
    }

    #[test]
    fn test_dates_sort_chronologically() {
        let items = unique_fixture();
        assert_eq!(ids(&sorted(&items, asc(SortField::CreatedAt))), vec![1, 3, 2]);
    }

    #[test]
    fn test_missing_values_sort_lowest() {
        let mut items = unique_fixture();
        items.push(case(99));
        items.push(case(98).with("created_at", json!("not a date")));

        let by_date = sorted(&items, asc(SortField::CreatedAt));
        assert_eq!(&ids(&by_date)[..2], &[99, 98]);

        let by_days = sorted(&items, asc(SortField::DaysPastDue));
        assert_eq!(&ids(&by_days)[..2], &[99, 98]);

        let by_subject = sorted(&items, asc(SortField::Subject));
        assert_eq!(&ids(&by_subject)[..2], &[99, 98]);

        let by_total_desc = sorted(&items, desc(SortField::TotalOwing));
        assert_eq!(&ids(&by_total_desc)[3..], &[99, 98]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let items = vec![
            case(5).with("status", json!("Open")),
            case(4).with("status", json!("Closed")),
            case(6).with("status", json!("open")),
            case(7).with("status", json!("Closed")),
        ];
        assert_eq!(ids(&sorted(&items, asc(SortField::Status))), vec![4, 7, 5, 6]);
        assert_eq!(ids(&sorted(&items, desc(SortField::Status))), vec![5, 6, 4, 7]);
    }

    #[test]
    fn test_parse_instant_forms() {
        assert!(parse_instant("2024-01-15T10:30:00.123456").is_some());
        assert!(parse_instant("2024-01-15 10:30:00").is_some());
        assert_eq!(parse_instant("1970-01-01"), Some(0));
        assert_eq!(parse_instant("1970-01-01T00:00:01+00:00"), Some(1000));
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("yesterday"), None);
    }

    #[test]
    fn test_compare_items_respects_direction() {
        let a = case(1);
        let b = case(2);
        assert_eq!(compare_items(&a, &b, asc(SortField::Id)), Ordering::Less);
        assert_eq!(compare_items(&a, &b, desc(SortField::Id)), Ordering::Greater);
    }
}
