//! Paginated Fetcher
//!
//! Walks a filtered collection endpoint page by page and accumulates every
//! item. Pages are requested one at a time, in offset order.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::api::ApiError;
use crate::models::{FilterSet, Item, SortState};

/// Page size and safety bound for one collection walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    pub page_size: u64,
    /// Offsets at or beyond this are never requested.
    pub max_offset: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_offset: 500,
        }
    }
}

/// One page request: the non-empty filters plus `skip`/`limit`, and the
/// server-side ordering when one is wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub filters: Vec<(String, String)>,
    pub skip: u64,
    pub limit: u64,
    pub sort: Option<SortState>,
}

impl PageQuery {
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("skip".to_string(), self.skip.to_string()),
        ];
        params.extend(self.filters.iter().cloned());
        if let Some(sort) = self.sort {
            params.push(("sort_by".to_string(), sort.field.as_param().to_string()));
            params.push(("sort_order".to_string(), sort.direction.as_param().to_string()));
        }
        params
    }
}

/// Position in a browsed collection, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(1, PageConfig::default().page_size)
    }
}

impl PageCursor {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn skip(self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn at(self, page: u64) -> Self {
        Self::new(page, self.page_size)
    }

    /// Request for this page; the server orders it when `sort` is given.
    pub fn query(self, filters: &FilterSet, sort: Option<SortState>) -> PageQuery {
        PageQuery {
            filters: filters.query_pairs(),
            skip: self.skip(),
            limit: self.page_size,
            sort,
        }
    }

    /// Whether rows exist past this page, given what it returned.
    pub fn has_next(self, received: usize, total: Option<u64>) -> bool {
        match total {
            Some(total) => self.skip() + (received as u64) < total,
            None => received as u64 >= self.page_size,
        }
    }

    pub fn total_pages(self, total: Option<u64>) -> Option<u64> {
        total.map(|t| t.div_ceil(self.page_size).max(1))
    }

    /// Prev/next state once this page has loaded.
    pub fn nav(self, received: usize, total: Option<u64>) -> PageNav {
        PageNav {
            page: self.page,
            total_pages: self.total_pages(total),
            has_prev: self.page > 1,
            has_next: self.has_next(received, total),
        }
    }
}

/// Prev/next state of the page currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNav {
    pub page: u64,
    pub total_pages: Option<u64>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageNav {
    pub fn label(self) -> String {
        match self.total_pages {
            Some(pages) => format!("Page {} of {}", self.page, pages),
            None => format!("Page {}", self.page),
        }
    }
}

/// A fetched page and the server-reported total, when given.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Item>,
    pub total: Option<u64>,
}

/// Anything that can serve collection pages.
#[async_trait(?Send)]
pub trait PageSource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, ApiError>;
}

/// Result of a full collection walk.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub items: Vec<Item>,
    /// True when the safety cap ended the walk before the data did.
    pub capped: bool,
}

/// Fetch every matching item.
///
/// Fails as a whole on the first page error; a partial collection is never
/// returned.
pub async fn fetch_all<S>(source: &S, filters: &FilterSet, config: PageConfig) -> Result<Collected, ApiError>
where
    S: PageSource + ?Sized,
{
    let page_size = config.page_size.max(1);
    let filter_pairs = filters.query_pairs();
    let mut seen = HashSet::new();
    let mut items = Vec::new();
    let mut skip = 0u64;

    loop {
        if skip >= config.max_offset {
            log::warn!(target: "FETCH", "safety cap reached at offset {} ({} items)", skip, items.len());
            return Ok(Collected { items, capped: true });
        }

        let query = PageQuery {
            filters: filter_pairs.clone(),
            skip,
            limit: page_size,
            sort: None,
        };
        log::debug!(target: "FETCH", "loading batch skip={} limit={}", skip, page_size);

        let page = source.fetch_page(&query).await.map_err(|e| {
            log::error!(target: "FETCH", "batch {} failed: {}", skip / page_size + 1, e);
            e
        })?;

        let received = page.items.len() as u64;
        log::debug!(target: "FETCH", "batch {}: got {} items", skip / page_size + 1, received);
        if received == 0 {
            break;
        }

        items.extend(page.items.into_iter().filter(|item| seen.insert(item.id)));
        skip += page_size;

        if received < page_size {
            break;
        }
        if page.total.is_some_and(|total| items.len() as u64 >= total) {
            break;
        }
    }

    log::info!(target: "FETCH", "total loaded: {} items", items.len());
    Ok(Collected { items, capped: false })
}
