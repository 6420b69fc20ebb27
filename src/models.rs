//! Frontend Models
//!
//! Data structures matching backend payloads, plus the view-side sort and
//! filter state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One backend record (case, loan, account, contact or asset).
///
/// Only the identifier is required; everything else stays loosely typed and
/// is read through the accessors below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    pub fn new(id: i64) -> Self {
        Self { id, fields: Map::new() }
    }

    /// Builder used by tests and optimistic updates.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Non-empty string field
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Numeric field; numeric strings are accepted since the backend
    /// serializes decimals as text.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(number_value)
    }

    /// Nested object such as `loan`, `account` or `contact`
    pub fn nested(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn nested_text(&self, object: &str, key: &str) -> Option<&str> {
        self.nested(object)?
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn nested_number(&self, object: &str, key: &str) -> Option<f64> {
        self.nested(object)?.get(key).and_then(number_value)
    }
}

/// Read a JSON number, or a string that parses as one.
pub fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Collection endpoints answer either `{items, total}` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageBody {
    Envelope {
        #[serde(default)]
        items: Vec<Item>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<Item>),
}

impl PageBody {
    pub fn into_parts(self) -> (Vec<Item>, Option<u64>) {
        match self {
            PageBody::Envelope { items, total } => (items, total),
            PageBody::Bare(items) => (items, None),
        }
    }
}

// ========================
// Sort State
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Sortable case columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    Id,
    Subject,
    FinancialInstitution,
    CaseType,
    Priority,
    DaysPastDue,
    TotalOwing,
    Status,
    #[default]
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        SortField::Id,
        SortField::Subject,
        SortField::FinancialInstitution,
        SortField::CaseType,
        SortField::Priority,
        SortField::DaysPastDue,
        SortField::TotalOwing,
        SortField::Status,
        SortField::CreatedAt,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Subject => "subject",
            SortField::FinancialInstitution => "financial_institution",
            SortField::CaseType => "case_type",
            SortField::Priority => "priority",
            SortField::DaysPastDue => "days_past_due",
            SortField::TotalOwing => "total_owing",
            SortField::Status => "status",
            SortField::CreatedAt => "created_at",
        }
    }

    /// Unknown identifiers fall back to the default textual field.
    pub fn from_param(raw: &str) -> Self {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_param() == raw.trim())
            .unwrap_or(SortField::Subject)
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::Id => "Case",
            SortField::Subject => "Subject",
            SortField::FinancialInstitution => "Institution",
            SortField::CaseType => "Type",
            SortField::Priority => "Priority",
            SortField::DaysPastDue => "Days Past Due",
            SortField::TotalOwing => "Total Owing",
            SortField::Status => "Status",
            SortField::CreatedAt => "Created",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Same field flips direction, a new field starts ascending.
    pub fn clicked(self, field: SortField) -> Self {
        if field == self.field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }
}

// ========================
// Filters
// ========================

/// Filter key -> raw form value. Read fresh from the form on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Non-empty (trimmed) pairs only
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k, v.trim()))
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

/// Case filter keys as sent to `/api/cases/`
pub const FILTER_SEARCH: &str = "search";
pub const FILTER_STATUS: &str = "status";
pub const FILTER_CASE_TYPE: &str = "case_type";
pub const FILTER_INSTITUTION: &str = "financial_institution";

/// Dropdown options from `/api/admin/dynamic-filters/database-only`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub case_status: Vec<String>,
    #[serde(default)]
    pub case_type: Vec<String>,
    #[serde(default)]
    pub case_priority: Vec<String>,
    #[serde(default)]
    pub financial_institution: Vec<String>,
}

impl FilterOptions {
    pub fn total(&self) -> usize {
        self.case_status.len()
            + self.case_type.len()
            + self.case_priority.len()
            + self.financial_institution.len()
    }
}

// ========================
// Authorization claim
// ========================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccessCapabilities {
    #[serde(default)]
    pub is_admin: bool,
}

/// Response of `/api/admin/verify-access`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccessClaim {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub capabilities: AccessCapabilities,
}

impl AccessClaim {
    pub fn is_admin(&self) -> bool {
        self.success && self.capabilities.is_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_body_envelope_and_bare() {
        let env: PageBody = serde_json::from_value(json!({
            "items": [{"id": 1, "subject": "a"}],
            "total": 7
        }))
        .unwrap();
        let (items, total) = env.into_parts();
        assert_eq!(items.len(), 1);
        assert_eq!(total, Some(7));

        let bare: PageBody = serde_json::from_value(json!([{"id": 2}, {"id": 3}])).unwrap();
        let (items, total) = bare.into_parts();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(total, None);
    }

    #[test]
    fn test_item_accessors() {
        let item = Item::new(9)
            .with("subject", json!("Late payment"))
            .with("amount_involved", json!("125.50"))
            .with("loan", json!({"financial_institution": "RBC", "past_due_fees": 10}))
            .with("account", Value::Null);

        assert_eq!(item.text("subject"), Some("Late payment"));
        assert_eq!(item.number("amount_involved"), Some(125.5));
        assert_eq!(item.nested_text("loan", "financial_institution"), Some("RBC"));
        assert_eq!(item.nested_number("loan", "past_due_fees"), Some(10.0));
        assert!(item.nested("account").is_none());
        assert!(item.text("missing").is_none());
    }

    #[test]
    fn test_sort_state_click() {
        let state = SortState::new(SortField::CreatedAt, SortDirection::Descending);
        let next = state.clicked(SortField::TotalOwing);
        assert_eq!(next, SortState::new(SortField::TotalOwing, SortDirection::Ascending));
        let again = next.clicked(SortField::TotalOwing);
        assert_eq!(again.direction, SortDirection::Descending);
    }

    #[test]
    fn test_unknown_field_falls_back_to_subject() {
        assert_eq!(SortField::from_param("bogus"), SortField::Subject);
        assert_eq!(SortField::from_param("total_owing"), SortField::TotalOwing);
    }

    #[test]
    fn test_filter_pairs_skip_empty() {
        let filters = FilterSet::new()
            .with(FILTER_SEARCH, "  smith ")
            .with(FILTER_STATUS, "")
            .with(FILTER_CASE_TYPE, "   ")
            .with(FILTER_INSTITUTION, "TD Bank");
        assert_eq!(
            filters.query_pairs(),
            vec![
                (FILTER_INSTITUTION.to_string(), "TD Bank".to_string()),
                (FILTER_SEARCH.to_string(), "smith".to_string()),
            ]
        );
    }

    #[test]
    fn test_access_claim() {
        let claim: AccessClaim =
            serde_json::from_value(json!({"success": true, "capabilities": {"is_admin": true}})).unwrap();
        assert!(claim.is_admin());
        let denied: AccessClaim = serde_json::from_value(json!({"success": false})).unwrap();
        assert!(!denied.is_admin());
    }
}
