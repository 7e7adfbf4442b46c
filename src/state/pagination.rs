//! Page arithmetic over the backend's cursor pagination.
//!
//! The backend pages by a fixed [`PAGE_SIZE`] and only tells us `count` plus the `next` and
//! `previous` cursor URLs. Everything a listing renders (current page, total pages, the
//! "31 - 40" range, the page-number window) is derived from those three values here.

use crate::model::QueryParams;
use tracing::warn;
use url::Url;

/// Rows per page, fixed by the backend.
pub const PAGE_SIZE: u64 = 10;

/// Width of the page-number window when none is configured.
pub const DEFAULT_MAX_VISIBLE_PAGES: u64 = 3;

/// Extracts the query parameters of a cursor URL, e.g. `.../movie/?page=2&genre=Drama` gives
/// `{genre: "Drama", page: "2"}`.
///
/// An absent cursor yields an empty map, and so does one that is not an absolute URL.
/// Repeated keys keep their last value.
pub fn get_params(cursor: Option<&str>) -> QueryParams {
    let Some(cursor) = cursor else {
        return QueryParams::new();
    };
    match Url::parse(cursor) {
        Ok(url) => url.query_pairs().into_owned().collect(),
        Err(e) => {
            warn!(cursor, error = %e, "Unparsable page cursor");
            QueryParams::new()
        }
    }
}

/// Returns `params` with `page` set to `page`.
///
/// Page 1 is the backend default, so it is expressed by *removing* the key.
pub fn update_page(params: &QueryParams, page: u64) -> QueryParams {
    let mut updated = params.clone();
    if page == 1 {
        updated.remove("page");
    } else {
        updated.insert("page".to_string(), page.to_string());
    }
    updated
}

/// `ceil(count / PAGE_SIZE)`; zero for an empty collection.
pub fn total_pages(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE)
}

/// The page the current listing shows.
///
/// With a `next` cursor it is the cursor's page minus one. Without one we are on the last
/// page, which is `total_pages(count)`. A `next` cursor without a numeric `page` is read as
/// "page 2 follows", so the result is never below 1 in that branch. A cursor page beyond
/// the last page is clamped to the last page.
pub fn current_page(next: Option<&str>, count: u64) -> u64 {
    match next {
        Some(cursor) => get_params(Some(cursor))
            .get("page")
            .and_then(|page| page.parse::<u64>().ok())
            .map_or(1, |page| page.saturating_sub(1))
            .min(total_pages(count))
            .max(1),
        None => total_pages(count),
    }
}

/// The inclusive 1-based range of rows shown on `current`, rendered as `"start - end"`.
///
/// An empty collection renders as `"0 - 0"`. A `current` past the last page is read as the
/// last page.
pub fn shown_items(current: u64, count: u64) -> String {
    let current = current.min(total_pages(count));
    if current == 0 {
        return "0 - 0".to_string();
    }
    let start = (current - 1).saturating_mul(PAGE_SIZE).saturating_add(1);
    let end = current.saturating_mul(PAGE_SIZE).min(count);
    format!("{start} - {end}")
}

/// A window of at most `width` page numbers centred on `current`, clamped to
/// `[1, total]` and shifted left when it would run past the last page.
///
/// Empty exactly when `total` is 0. A `width` of 0 is treated as 1.
pub fn visible_pages(current: u64, total: u64, width: u64) -> Vec<u64> {
    if total == 0 {
        return Vec::new();
    }
    let width = width.max(1);
    let span = width - 1;
    let start = current.saturating_sub(width / 2).max(1);
    let end = total.min(start.saturating_add(span));
    let start = end.saturating_sub(span).max(1);
    (start..=end).collect()
}
