//! UI Components
//!
//! Reusable Leptos components.

mod case_actions;
mod cases_table;
mod close_case_button;
mod delete_confirm_button;
mod filter_bar;
mod loans_table;
mod page_controls;
mod sort_header;
mod table_body;

pub use case_actions::CaseActions;
pub use cases_table::CasesTable;
pub use close_case_button::CloseCaseButton;
pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_bar::FilterBar;
pub use loans_table::LoansTable;
pub use page_controls::PageControls;
pub use sort_header::SortHeader;
pub use table_body::body_view;
