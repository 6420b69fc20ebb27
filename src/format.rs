//! Display Formatting
//!
//! Currency, dates and the small labels used by the cases table.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// US dollars with thousands separators, e.g. `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(dollars), cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `M/D/YYYY`; "N/A" when absent, the raw text when unparseable.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.filter(|s| !s.trim().is_empty()) {
        None => "N/A".to_string(),
        Some(text) => parse_date(text)
            .map(|d| format!("{}/{}/{}", d.month(), d.day(), d.year()))
            .unwrap_or_else(|| text.to_string()),
    }
}

/// `Jan 5, 2024`, same fallbacks as [`format_date`].
pub fn format_long_date(raw: Option<&str>) -> String {
    match raw.filter(|s| !s.trim().is_empty()) {
        None => "N/A".to_string(),
        Some(text) => parse_date(text)
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| text.to_string()),
    }
}

pub fn days_past_due_label(days: Option<i64>) -> String {
    match days {
        None => "N/A".to_string(),
        Some(d) if d > 0 => format!("{} days", d),
        Some(_) => "Current".to_string(),
    }
}

/// Collections severity bucket for a days-past-due count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelinquencyLevel {
    Current,
    Mild,
    Moderate,
    Serious,
    Severe,
}

impl DelinquencyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DelinquencyLevel::Current => "current",
            DelinquencyLevel::Mild => "mild",
            DelinquencyLevel::Moderate => "moderate",
            DelinquencyLevel::Serious => "serious",
            DelinquencyLevel::Severe => "severe",
        }
    }

    /// Text color of the days-past-due cell
    pub fn class(self) -> &'static str {
        match self {
            DelinquencyLevel::Current => "text-gray-900",
            DelinquencyLevel::Mild => "text-yellow-700",
            DelinquencyLevel::Moderate => "text-orange-700",
            DelinquencyLevel::Serious => "text-red-700",
            DelinquencyLevel::Severe => "text-red-900 font-semibold",
        }
    }
}

pub fn delinquency_level(days_past_due: Option<i64>) -> DelinquencyLevel {
    match days_past_due.unwrap_or(0) {
        d if d <= 0 => DelinquencyLevel::Current,
        1..=30 => DelinquencyLevel::Mild,
        31..=60 => DelinquencyLevel::Moderate,
        61..=90 => DelinquencyLevel::Serious,
        _ => DelinquencyLevel::Severe,
    }
}

/// Explicit case number, or `CASE` + zero-padded id.
pub fn case_number(id: i64, explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .unwrap_or_else(|| format!("CASE{:06}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.0), "$5.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-12.0), "-$12.00");
        assert_eq!(format_currency(f64::NAN), "$0.00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2024-01-05T10:30:00")), "1/5/2024");
        assert_eq!(format_date(Some("2023-12-31")), "12/31/2023");
        assert_eq!(format_date(Some("2024-06-01T00:00:00Z")), "6/1/2024");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("soon")), "soon");
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date(Some("2024-01-05")), "Jan 5, 2024");
        assert_eq!(format_long_date(None), "N/A");
    }

    #[test]
    fn test_labels() {
        assert_eq!(days_past_due_label(None), "N/A");
        assert_eq!(days_past_due_label(Some(0)), "Current");
        assert_eq!(days_past_due_label(Some(31)), "31 days");
        assert_eq!(case_number(42, None), "CASE000042");
        assert_eq!(case_number(42, Some("C-2024-9")), "C-2024-9");
    }

    #[test]
    fn test_delinquency_level() {
        assert_eq!(delinquency_level(None), DelinquencyLevel::Current);
        assert_eq!(delinquency_level(Some(0)), DelinquencyLevel::Current);
        assert_eq!(delinquency_level(Some(30)), DelinquencyLevel::Mild);
        assert_eq!(delinquency_level(Some(60)), DelinquencyLevel::Moderate);
        assert_eq!(delinquency_level(Some(90)), DelinquencyLevel::Serious);
        assert_eq!(delinquency_level(Some(91)).as_str(), "severe");
    }
}
