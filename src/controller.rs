//! Sort-State Controller
//!
//! View state for the cases table. A header click produces a [`SortTicket`];
//! the fetch that follows reports back through [`SortController::complete`],
//! which drops any result that a newer click has superseded.

use crate::api::ApiError;
use crate::models::{Item, SortField, SortState};
use crate::pagination::{Collected, Page, PageCursor, PageNav};
use crate::render::{full_dataset_summary, page_summary};
use crate::sorting::{sort_items, sorted};

/// Issued per sort request; only the latest may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortTicket {
    pub generation: u64,
    pub state: SortState,
    pub cursor: PageCursor,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// Full dataset fetched, sorted and shown.
    Applied { count: usize, capped: bool },
    /// First page shown, sorted locally.
    PageLoaded { count: usize, total: Option<u64> },
    /// Fetch failed; the visible rows were sorted instead.
    Degraded { message: String },
    /// The session ended; the caller is already being redirected.
    SessionExpired,
    /// A newer request owns the table.
    Superseded,
}

#[derive(Debug, Clone, Default)]
pub struct SortController {
    sort: SortState,
    cursor: PageCursor,
    generation: u64,
    rows: Vec<Item>,
    loading: bool,
    summary: Option<String>,
    nav: Option<PageNav>,
}

impl SortController {
    pub fn new(sort: SortState) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Start browsing at `cursor` instead of the first page.
    pub fn at_page(mut self, cursor: PageCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Set after a page load; cleared once the full dataset is shown.
    pub fn page_nav(&self) -> Option<PageNav> {
        self.nav
    }

    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[cfg(test)]
    pub fn set_rows(&mut self, rows: Vec<Item>) {
        self.rows = rows;
        self.summary = None;
    }

    /// Reload the current page under the current sort.
    pub fn refresh(&mut self) -> SortTicket {
        self.issue()
    }

    /// Load another page under the current sort.
    pub fn turn_page(&mut self, page: u64) -> SortTicket {
        self.cursor = self.cursor.at(page);
        log::debug!(target: "SORT", "turning to page {}", self.cursor.page);
        self.issue()
    }

    /// Record a header click and start a new request.
    pub fn begin(&mut self, field: SortField) -> SortTicket {
        self.sort = self.sort.clicked(field);
        self.cursor = self.cursor.at(1);
        log::info!(target: "SORT", "sort by {} {}", self.sort.field, self.sort.direction.as_param());
        self.issue()
    }

    fn issue(&mut self) -> SortTicket {
        self.generation += 1;
        self.loading = true;
        SortTicket {
            generation: self.generation,
            state: self.sort,
            cursor: self.cursor,
        }
    }

    pub fn complete(&mut self, ticket: SortTicket, result: Result<Collected, ApiError>) -> SortOutcome {
        if ticket.generation != self.generation {
            log::debug!(target: "SORT", "discarding stale generation {} (latest {})", ticket.generation, self.generation);
            return SortOutcome::Superseded;
        }
        self.loading = false;

        match result {
            Ok(collected) => {
                let count = collected.items.len();
                self.rows = sorted(&collected.items, ticket.state);
                self.summary = Some(full_dataset_summary(count, collected.capped));
                self.nav = None;
                SortOutcome::Applied {
                    count,
                    capped: collected.capped,
                }
            }
            Err(err) => self.fall_back(ticket, err),
        }
    }

    /// Commit a single-page load (initial view, filter change, prev/next).
    pub fn complete_page(&mut self, ticket: SortTicket, result: Result<Page, ApiError>) -> SortOutcome {
        if ticket.generation != self.generation {
            return SortOutcome::Superseded;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                let count = page.items.len();
                self.rows = sorted(&page.items, ticket.state);
                self.summary = Some(page_summary(count, page.total));
                self.nav = Some(ticket.cursor.nav(count, page.total));
                SortOutcome::PageLoaded {
                    count,
                    total: page.total,
                }
            }
            Err(err) => self.fall_back(ticket, err),
        }
    }

    fn fall_back(&mut self, ticket: SortTicket, err: ApiError) -> SortOutcome {
        if err.is_session_expired() {
            return SortOutcome::SessionExpired;
        }
        log::warn!(target: "SORT", "fetch failed, sorting visible rows: {}", err);
        sort_items(&mut self.rows, ticket.state);
        SortOutcome::Degraded {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterSet, SortDirection};
    use crate::pagination::{fetch_all, PageConfig, PageQuery, PageSource};
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::Cell;

    fn owing(id: i64, past_due: f64, fees: f64, flat: Option<f64>) -> Item {
        let mut item = Item::new(id).with("loan", json!({"past_due_amount": past_due, "past_due_fees": fees}));
        if let Some(amount) = flat {
            item = item.with("amount_involved", json!(amount));
        }
        item
    }

    fn ids(rows: &[Item]) -> Vec<i64> {
        rows.iter().map(|i| i.id).collect()
    }

    struct Backend {
        items: Vec<Item>,
        fail_at: Option<u64>,
        requests: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl PageSource for Backend {
        async fn fetch_page(&self, query: &PageQuery) -> Result<Page, ApiError> {
            self.requests.set(self.requests.get() + 1);
            if Some(query.skip) == self.fail_at {
                return Err(ApiError::Network("connection refused".to_string()));
            }
            let start = (query.skip as usize).min(self.items.len());
            let end = (start + query.limit as usize).min(self.items.len());
            Ok(Page {
                items: self.items[start..end].to_vec(),
                total: None,
            })
        }
    }

    fn backend(items: Vec<Item>, fail_at: Option<u64>) -> Backend {
        Backend {
            items,
            fail_at,
            requests: Cell::new(0),
        }
    }

    #[tokio::test]
    async fn test_total_owing_clicked_twice() {
        let data = vec![
            owing(1, 500.0, 50.0, None),
            owing(2, 0.0, 0.0, Some(75.0)),
            owing(3, 1000.0, 0.0, None),
            owing(4, 0.0, 0.0, None),
        ];
        let source = backend(data, None);
        let mut controller = SortController::default();

        let ticket = controller.begin(SortField::TotalOwing);
        assert_eq!(ticket.state, SortState::new(SortField::TotalOwing, SortDirection::Ascending));
        assert!(controller.is_loading());
        let result = fetch_all(&source, &FilterSet::new(), PageConfig::default()).await;
        let outcome = controller.complete(ticket, result);
        assert_eq!(outcome, SortOutcome::Applied { count: 4, capped: false });
        assert_eq!(ids(controller.rows()), vec![4, 2, 1, 3]);
        assert_eq!(controller.summary(), Some("Showing all 4 cases (sorted)"));

        let ticket = controller.begin(SortField::TotalOwing);
        assert_eq!(ticket.state.direction, SortDirection::Descending);
        let result = fetch_all(&source, &FilterSet::new(), PageConfig::default()).await;
        controller.complete(ticket, result);
        assert_eq!(ids(controller.rows()), vec![3, 1, 2, 4]);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_backend_failure_sorts_visible_rows() {
        let all: Vec<Item> = (1..=120).map(|id| Item::new(id).with("subject", json!(format!("s{:03}", 121 - id)))).collect();
        let source = backend(all.clone(), Some(50));
        let mut controller = SortController::default();
        controller.set_rows(all[..3].to_vec());

        let ticket = controller.begin(SortField::Subject);
        let result = fetch_all(&source, &FilterSet::new(), PageConfig::default()).await;
        let outcome = controller.complete(ticket, result);

        assert_eq!(source.requests.get(), 2);
        assert!(matches!(outcome, SortOutcome::Degraded { ref message } if message.contains("connection refused")));
        assert!(!controller.is_loading());
        // subjects s120, s119, s118 ascending
        assert_eq!(ids(controller.rows()), vec![3, 2, 1]);
        assert_eq!(controller.summary(), None);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut controller = SortController::default();
        controller.set_rows(vec![Item::new(1)]);

        let first = controller.begin(SortField::Id);
        let second = controller.begin(SortField::Status);
        assert!(second.generation > first.generation);

        let stale = Collected {
            items: vec![Item::new(9), Item::new(8)],
            capped: false,
        };
        assert_eq!(controller.complete(first, Ok(stale)), SortOutcome::Superseded);
        assert_eq!(ids(controller.rows()), vec![1]);
        assert!(controller.is_loading());

        let fresh = Collected {
            items: vec![Item::new(5)],
            capped: false,
        };
        assert_eq!(controller.complete(second, Ok(fresh)), SortOutcome::Applied { count: 1, capped: false });
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_unauthorized_is_not_degraded() {
        let mut controller = SortController::default();
        let ticket = controller.refresh();
        assert_eq!(controller.complete(ticket, Err(ApiError::Unauthorized)), SortOutcome::SessionExpired);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_capped_summary() {
        let mut controller = SortController::new(SortState::new(SortField::Id, SortDirection::Ascending));
        let ticket = controller.refresh();
        let collected = Collected {
            items: (1..=3).map(Item::new).collect(),
            capped: true,
        };
        assert_eq!(controller.complete(ticket, Ok(collected)), SortOutcome::Applied { count: 3, capped: true });
        assert!(controller.summary().unwrap_or_default().contains("limit reached"));
    }

    #[test]
    fn test_page_load_sorts_locally() {
        let mut controller = SortController::new(SortState::new(SortField::Id, SortDirection::Descending));
        let ticket = controller.refresh();
        let page = Page {
            items: vec![Item::new(2), Item::new(9), Item::new(4)],
            total: Some(130),
        };
        assert_eq!(
            controller.complete_page(ticket, Ok(page)),
            SortOutcome::PageLoaded { count: 3, total: Some(130) }
        );
        assert_eq!(ids(controller.rows()), vec![9, 4, 2]);
        assert_eq!(controller.summary(), Some("Showing 3 of 130 cases"));
    }

    #[test]
    fn test_page_navigation() {
        let sort = SortState::new(SortField::Id, SortDirection::Ascending);
        let mut controller = SortController::new(sort).at_page(PageCursor::new(2, 3));
        assert_eq!(controller.page_nav(), None);

        let ticket = controller.refresh();
        assert_eq!(ticket.cursor.skip(), 3);
        let page = Page {
            items: vec![Item::new(6), Item::new(4), Item::new(5)],
            total: Some(7),
        };
        controller.complete_page(ticket, Ok(page));
        let nav = controller.page_nav().unwrap();
        assert_eq!(
            nav,
            PageNav {
                page: 2,
                total_pages: Some(3),
                has_prev: true,
                has_next: true
            }
        );
        assert_eq!(nav.label(), "Page 2 of 3");

        let ticket = controller.turn_page(3);
        assert_eq!(ticket.cursor.skip(), 6);
        controller.complete_page(ticket, Ok(Page { items: vec![Item::new(7)], total: Some(7) }));
        let nav = controller.page_nav().unwrap();
        assert!(nav.has_prev);
        assert!(!nav.has_next);
    }

    #[test]
    fn test_header_click_restarts_paging() {
        let mut controller = SortController::default().at_page(PageCursor::new(4, 50));
        let ticket = controller.refresh();
        controller.complete_page(ticket, Ok(Page { items: vec![Item::new(1)], total: None }));
        assert_eq!(controller.page_nav().map(|n| n.page), Some(4));

        let ticket = controller.begin(SortField::Status);
        assert_eq!(ticket.cursor.page, 1);
        controller.complete(ticket, Ok(Collected { items: vec![Item::new(1)], capped: false }));
        assert_eq!(controller.page_nav(), None);
    }
}
