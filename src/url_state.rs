//! URL State
//!
//! Sort and filter state persisted in the page's query string, so a reload or
//! shared link reproduces the same table.

use reqwest::Url;

use crate::models::{
    FilterSet, SortDirection, SortField, SortState, FILTER_CASE_TYPE, FILTER_INSTITUTION, FILTER_SEARCH,
    FILTER_STATUS,
};

pub const SORT_BY: &str = "sort_by";
pub const SORT_ORDER: &str = "sort_order";
pub const PAGE: &str = "page";

// Only the query part of this URL is ever read.
const QUERY_HOST: &str = "http://localhost/";

/// Decoded `(key, value)` pairs in order; accepts a leading `?`.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let Ok(mut url) = Url::parse(QUERY_HOST) else {
        return Vec::new();
    };
    url.set_query(Some(query.trim_start_matches('?')));
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Form-encoded query string, without the leading `?`.
pub fn build_query(pairs: &[(String, String)]) -> String {
    let Ok(mut url) = Url::parse(QUERY_HOST) else {
        return String::new();
    };
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.query().unwrap_or_default().to_string()
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Sort state from the query string; `created_at` descending when absent.
pub fn sort_from_query(query: &str) -> SortState {
    let pairs = parse_query(query);
    let field = lookup(&pairs, SORT_BY)
        .filter(|v| !v.is_empty())
        .map(SortField::from_param)
        .unwrap_or_default();
    let direction = lookup(&pairs, SORT_ORDER)
        .and_then(SortDirection::from_param)
        .unwrap_or_default();
    SortState::new(field, direction)
}

/// Filters carried over from a shared link.
pub fn filters_from_query(query: &str) -> FilterSet {
    let pairs = parse_query(query);
    let mut filters = FilterSet::new();
    for key in [FILTER_SEARCH, FILTER_STATUS, FILTER_CASE_TYPE, FILTER_INSTITUTION] {
        if let Some(value) = lookup(&pairs, key) {
            filters.set(key, value);
        }
    }
    filters
}

/// 1-based page number; anything missing or invalid is page 1.
pub fn page_from_query(query: &str) -> u64 {
    let pairs = parse_query(query);
    lookup(&pairs, PAGE)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Rewrite `query` for `page`, keeping sort and filters. Page 1 is implied.
pub fn apply_page(query: &str, page: u64) -> String {
    let mut pairs = parse_query(query);
    if page > 1 {
        upsert(&mut pairs, PAGE, &page.to_string());
    } else {
        pairs.retain(|(k, _)| k != PAGE);
    }
    build_query(&pairs)
}

/// Rewrite `query` for `state`: sets both sort params in place, drops `page`,
/// and keeps everything else.
pub fn apply_sort(query: &str, state: SortState) -> String {
    let mut pairs: Vec<(String, String)> = parse_query(query)
        .into_iter()
        .filter(|(k, _)| k != PAGE)
        .collect();
    upsert(&mut pairs, SORT_BY, state.field.as_param());
    upsert(&mut pairs, SORT_ORDER, state.direction.as_param());
    build_query(&pairs)
}

/// Replace the first `key`, drop later duplicates, append if missing.
fn upsert(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let mut found = false;
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if found {
            return false;
        }
        found = true;
        *v = value.to_string();
        true
    });
    if !found {
        pairs.push((key.to_string(), value.to_string()));
    }
}

/// `location.search` of the current page, empty outside a browser.
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn replace_query(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let pathname = window.location().pathname().unwrap_or_default();
    let url = if query.is_empty() {
        pathname
    } else {
        format!("{}?{}", pathname, query)
    };
    let replaced = window
        .history()
        .and_then(|h| h.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url)));
    if replaced.is_err() {
        log::warn!(target: "URL", "could not update URL to {}", url);
    }
}

/// Persist `state` in the address bar without a navigation.
pub fn persist_sort(state: SortState) {
    replace_query(&apply_sort(&current_query(), state));
}

pub fn persist_page(page: u64) {
    replace_query(&apply_page(&current_query(), page));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort() {
        assert_eq!(
            sort_from_query(""),
            SortState::new(SortField::CreatedAt, SortDirection::Descending)
        );
        assert_eq!(
            sort_from_query("?sort_by=total_owing&sort_order=asc"),
            SortState::new(SortField::TotalOwing, SortDirection::Ascending)
        );
        assert_eq!(sort_from_query("?sort_by=bogus").field, SortField::Subject);
        assert_eq!(sort_from_query("?sort_order=sideways").direction, SortDirection::Descending);
    }

    #[test]
    fn test_apply_sort_drops_page_and_keeps_rest() {
        let state = SortState::new(SortField::Status, SortDirection::Ascending);
        assert_eq!(
            apply_sort("?status=Open&page=3&search=late+fee", state),
            "status=Open&search=late+fee&sort_by=status&sort_order=asc"
        );
    }

    #[test]
    fn test_apply_sort_replaces_in_place() {
        let state = SortState::new(SortField::Id, SortDirection::Descending);
        assert_eq!(
            apply_sort("sort_by=subject&x=1&sort_order=asc&sort_by=priority", state),
            "sort_by=id&x=1&sort_order=desc"
        );
    }

    #[test]
    fn test_parse_query_decodes() {
        assert_eq!(
            parse_query("?a=1%262&flag&b=R%C3%A9sum%C3%A9"),
            vec![
                ("a".to_string(), "1&2".to_string()),
                ("flag".to_string(), String::new()),
                ("b".to_string(), "Résumé".to_string()),
            ]
        );
    }

    #[test]
    fn test_filters_from_query() {
        let filters = filters_from_query("?status=Open&search=&case_type=Collections&page=2");
        assert_eq!(filters.get(FILTER_STATUS), "Open");
        assert_eq!(filters.get(FILTER_CASE_TYPE), "Collections");
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("case_type".to_string(), "Collections".to_string()),
                ("status".to_string(), "Open".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_query_escapes_reserved() {
        let pairs = vec![
            ("search".to_string(), "a&b=c d".to_string()),
            ("financial_institution".to_string(), "TD Bank".to_string()),
        ];
        let query = build_query(&pairs);
        assert_eq!(query, "search=a%26b%3Dc+d&financial_institution=TD+Bank");
        assert_eq!(parse_query(&query), pairs);
        assert_eq!(build_query(&[]), "");
    }

    #[test]
    fn test_page_from_query() {
        assert_eq!(page_from_query(""), 1);
        assert_eq!(page_from_query("?page=3&sort_by=id"), 3);
        assert_eq!(page_from_query("?page=0"), 1);
        assert_eq!(page_from_query("?page=-2"), 1);
        assert_eq!(page_from_query("?page=two"), 1);
    }

    #[test]
    fn test_apply_page_keeps_sort_and_filters() {
        assert_eq!(
            apply_page("?status=Open&sort_by=id&sort_order=asc", 2),
            "status=Open&sort_by=id&sort_order=asc&page=2"
        );
        assert_eq!(apply_page("?page=4&status=Open", 5), "page=5&status=Open");
        assert_eq!(apply_page("?page=4&status=Open", 1), "status=Open");
    }
}
