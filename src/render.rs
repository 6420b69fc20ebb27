//! Table Renderer
//!
//! Pure mapping from sorted cases, or a page of loans, to a structured table
//! body. The Leptos view turns this tree into DOM; nothing here touches the
//! browser.

use leptos_toast::ToastKind;

use crate::api::Resource;
use crate::controller::SortOutcome;
use crate::format::{
    case_number, days_past_due_label, delinquency_level, format_currency, format_date, format_long_date,
    DelinquencyLevel,
};
use crate::loan_math::{loan_progress, monthly_payment, remaining_payments};
use crate::models::{Item, SortDirection, SortField, SortState};
use crate::sorting::{days_past_due, financial_institution, total_owing};

pub const CASE_COLUMNS: usize = 10;
pub const EMPTY_MESSAGE: &str = "No cases found";
pub const LOAN_COLUMNS: usize = 8;
pub const EMPTY_LOANS_MESSAGE: &str = "No loans found";

/// Closed set of badge colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Gray,
}

impl BadgeTone {
    pub fn class(self) -> &'static str {
        match self {
            BadgeTone::Red => "bg-red-100 text-red-800",
            BadgeTone::Orange => "bg-orange-100 text-orange-800",
            BadgeTone::Yellow => "bg-yellow-100 text-yellow-800",
            BadgeTone::Green => "bg-green-100 text-green-800",
            BadgeTone::Blue => "bg-blue-100 text-blue-800",
            BadgeTone::Purple => "bg-purple-100 text-purple-800",
            BadgeTone::Pink => "bg-pink-100 text-pink-800",
            BadgeTone::Gray => "bg-gray-100 text-gray-800",
        }
    }
}

pub fn case_type_tone(case_type: &str) -> BadgeTone {
    match case_type {
        "Delinquency" => BadgeTone::Red,
        "Payment Issue" => BadgeTone::Yellow,
        "Collections" => BadgeTone::Orange,
        "Account Inquiry" => BadgeTone::Blue,
        "Technical Support" => BadgeTone::Purple,
        "Complaint" => BadgeTone::Pink,
        _ => BadgeTone::Gray,
    }
}

pub fn status_tone(status: &str) -> BadgeTone {
    match status {
        "New" => BadgeTone::Blue,
        "Open" => BadgeTone::Green,
        "In Progress" => BadgeTone::Yellow,
        _ => BadgeTone::Gray,
    }
}

pub fn loan_status_tone(status: &str) -> BadgeTone {
    match status {
        "Active" => BadgeTone::Green,
        "Default" => BadgeTone::Red,
        "Paid Off" => BadgeTone::Blue,
        "Pending" => BadgeTone::Yellow,
        _ => BadgeTone::Gray,
    }
}

pub fn priority_tone(priority: &str) -> BadgeTone {
    match priority {
        "Urgent" => BadgeTone::Red,
        "High" => BadgeTone::Orange,
        "Medium" => BadgeTone::Yellow,
        "Low" => BadgeTone::Green,
        _ => BadgeTone::Gray,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Primary line with a secondary line below
    Stacked { primary: String, secondary: String },
    Text(String),
    /// Placeholder text such as "Unknown" or "N/A"
    Muted(String),
    Badge { label: String, tone: BadgeTone },
    /// Days past due, colored by severity
    Days { label: String, level: DelinquencyLevel },
    /// Short date with the long form as its tooltip
    Date { short: String, long: String },
    Amount(String),
    /// Percent repaid, 0 to 100
    Progress(f64),
    Actions(RowActions),
}

/// Embedded controls of a row; clicks on these never navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActions {
    pub edit_href: String,
    pub can_close: bool,
    pub can_delete: bool,
    pub delete_label: String,
}

#[derive(Debug, Clone, PartialEq)]
/// One clickable table row; `href` is its detail page.
pub struct TableRow {
    pub id: i64,
    pub href: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Placeholder { colspan: usize, message: String },
    Rows(Vec<TableRow>),
}

/// Where a click inside a row started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    Row,
    EditLink,
    DeleteButton,
    StatusButton,
}

impl ClickOrigin {
    /// From the `data-action` of the nearest tagged ancestor of the click target.
    pub fn from_action(action: Option<&str>) -> Self {
        match action {
            Some("edit") => ClickOrigin::EditLink,
            Some("delete") => ClickOrigin::DeleteButton,
            Some("status") => ClickOrigin::StatusButton,
            _ => ClickOrigin::Row,
        }
    }

    /// `data-action` value that marks this control in the row markup
    pub fn action(self) -> Option<&'static str> {
        match self {
            ClickOrigin::Row => None,
            ClickOrigin::EditLink => Some("edit"),
            ClickOrigin::DeleteButton => Some("delete"),
            ClickOrigin::StatusButton => Some("status"),
        }
    }
}

/// Navigation target for a row click, if any.
pub fn row_click_target(row: &TableRow, origin: ClickOrigin) -> Option<&str> {
    match origin {
        ClickOrigin::Row => Some(&row.href),
        ClickOrigin::EditLink | ClickOrigin::DeleteButton | ClickOrigin::StatusButton => None,
    }
}

pub fn case_route(id: i64) -> String {
    Resource::Cases.detail_route(id)
}

fn badge(value: Option<&str>, default: &str, tone: fn(&str) -> BadgeTone) -> Cell {
    let label = value.unwrap_or(default).to_string();
    let tone = tone(&label);
    Cell::Badge { label, tone }
}

fn days_cell(days: Option<i64>) -> Cell {
    match days {
        None => Cell::Muted(days_past_due_label(None)),
        d => Cell::Days {
            label: days_past_due_label(d),
            level: delinquency_level(d),
        },
    }
}

fn placeholder(colspan: usize, message: &str) -> TableBody {
    TableBody::Placeholder {
        colspan,
        message: message.to_string(),
    }
}

pub fn case_row(item: &Item, is_admin: bool) -> TableRow {
    let status = item.text("status");
    let institution = match financial_institution(item) {
        Some(name) => Cell::Text(name.to_string()),
        None => Cell::Muted("Unknown".to_string()),
    };
    let days = days_cell(days_past_due(item));
    let created = item.text("created_at");

    let cells = vec![
        Cell::Stacked {
            primary: format!("Case #{}", item.id),
            secondary: case_number(item.id, item.text("case_number")),
        },
        Cell::Text(item.text("subject").unwrap_or("No Subject").to_string()),
        institution,
        badge(item.text("case_type"), "General", case_type_tone),
        badge(item.text("priority"), "Medium", priority_tone),
        days,
        Cell::Amount(format_currency(total_owing(item))),
        badge(status, "Open", status_tone),
        Cell::Date {
            short: format_date(created),
            long: format_long_date(created),
        },
        Cell::Actions(RowActions {
            edit_href: case_route(item.id),
            can_close: status == Some("Open"),
            can_delete: is_admin,
            delete_label: format!("Case #{}", item.id),
        }),
    ];

    TableRow {
        id: item.id,
        href: case_route(item.id),
        cells,
    }
}

/// Full replacement body for the cases table.
pub fn render_case_rows(items: &[Item], is_admin: bool) -> TableBody {
    if items.is_empty() {
        return placeholder(CASE_COLUMNS, EMPTY_MESSAGE);
    }
    TableBody::Rows(items.iter().map(|item| case_row(item, is_admin)).collect())
}

// ========================
// Loans
// ========================

/// Stored payment, or the amortized one when the record has none.
fn loan_payment(item: &Item) -> Option<f64> {
    item.number("monthly_payment").filter(|p| *p > 0.0).or_else(|| {
        monthly_payment(
            item.number("loan_amount")?,
            item.number("interest_rate")?,
            item.number("loan_term")?,
        )
    })
}

pub fn loan_row(item: &Item) -> TableRow {
    let amount = item.number("loan_amount").unwrap_or(0.0);
    let balance = item.number("principal_balance").unwrap_or(0.0);
    let payment = loan_payment(item);
    let remaining = payment
        .and_then(|p| remaining_payments(balance, item.number("interest_rate").unwrap_or(0.0), p));

    let cells = vec![
        Cell::Stacked {
            primary: item
                .text("contract_number")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Loan #{}", item.id)),
            secondary: item.text("loan_type").unwrap_or("N/A").to_string(),
        },
        badge(item.text("status"), "Active", loan_status_tone),
        Cell::Amount(format_currency(amount)),
        Cell::Amount(format_currency(balance)),
        Cell::Progress(loan_progress(amount, balance)),
        match payment {
            Some(p) => Cell::Amount(format_currency(p)),
            None => Cell::Muted("N/A".to_string()),
        },
        match remaining {
            Some(n) => Cell::Text(format!("{} payments", n)),
            None => Cell::Muted("N/A".to_string()),
        },
        days_cell(item.number("days_past_due").map(|d| d as i64)),
    ];

    TableRow {
        id: item.id,
        href: Resource::Loans.detail_route(item.id),
        cells,
    }
}

pub fn render_loan_rows(items: &[Item]) -> TableBody {
    if items.is_empty() {
        return placeholder(LOAN_COLUMNS, EMPTY_LOANS_MESSAGE);
    }
    TableBody::Rows(items.iter().map(loan_row).collect())
}

/// Footer text after a full-dataset render
pub fn full_dataset_summary(count: usize, capped: bool) -> String {
    if capped {
        format!("Showing first {} cases (sorted, limit reached)", count)
    } else {
        format!("Showing all {} cases (sorted)", count)
    }
}

/// Footer text for a single server page
pub fn page_summary(count: usize, total: Option<u64>) -> String {
    match total {
        Some(total) if total as usize > count => format!("Showing {} of {} cases", count, total),
        _ => format!("Showing {} cases", count),
    }
}

/// Toast for a finished load, if the user needs to hear about it.
pub fn outcome_notice(outcome: &SortOutcome) -> Option<(ToastKind, String)> {
    match outcome {
        SortOutcome::Degraded { message } => Some((
            ToastKind::Error,
            format!("Failed to load cases: {}. Sorted the visible rows only.", message),
        )),
        SortOutcome::Applied { count, capped: true } => {
            Some((ToastKind::Info, format!("Showing the first {} cases only", count)))
        }
        SortOutcome::Applied { capped: false, .. }
        | SortOutcome::PageLoaded { .. }
        | SortOutcome::SessionExpired
        | SortOutcome::Superseded => None,
    }
}

// ========================
// Sort indicators
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    Neutral,
}

impl SortIndicator {
    pub fn svg_path(self) -> &'static str {
        match self {
            SortIndicator::Descending => "M14.707 12.707a1 1 0 01-1.414 0L10 9.414l-3.293 3.293a1 1 0 01-1.414-1.414l4-4a1 1 0 011.414 0l4 4a1 1 0 010 1.414z",
            SortIndicator::Ascending => "M5.293 7.293a1 1 0 011.414 0L10 10.586l3.293-3.293a1 1 0 111.414 1.414l-4 4a1 1 0 01-1.414 0l-4-4a1 1 0 010-1.414z",
            SortIndicator::Neutral => "M5 12l5-5 5 5H5z",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            SortIndicator::Neutral => "sort-indicator text-gray-300",
            _ => "sort-indicator text-gray-600",
        }
    }
}

pub fn indicator_for(field: SortField, state: SortState) -> SortIndicator {
    if field != state.field {
        return SortIndicator::Neutral;
    }
    match state.direction {
        SortDirection::Ascending => SortIndicator::Ascending,
        SortDirection::Descending => SortIndicator::Descending,
    }
}
