//! In-memory pagination over a fully fetched list.

use serde::Deserialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: usize = 15;

/// `?page=&limit=` query parameters, kept raw so each one falls back on its
/// own when it is not an integer.
///
/// Values below 1 are not rejected: `page` clamps to 1 and `limit` falls back
/// to the configured default.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn positive(raw: Option<&str>) -> Option<usize> {
    let value = raw?.trim().parse::<i64>().ok()?;
    if value < 1 {
        return None;
    }
    Some(usize::try_from(value).unwrap_or(usize::MAX))
}

impl PageQuery {
    /// Resolve to a 1-indexed page number and a positive page size.
    pub fn resolve(&self, default_limit: usize) -> (usize, usize) {
        let page = positive(self.page.as_deref()).unwrap_or(1);
        let limit = positive(self.limit.as_deref()).unwrap_or(default_limit.max(1));
        (page, limit)
    }
}

/// Slice one page out of `items` and return it together with the full count.
///
/// `page` is 1-indexed; 0 is treated as 1. A `limit` of 0 yields an empty
/// page. Pages past the end are empty, never an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> (Vec<T>, usize) {
    let total = items.len();
    let start = page.max(1).saturating_sub(1).saturating_mul(limit);
    let end = start.saturating_add(limit).min(total);

    let page_items = if start >= total {
        Vec::new()
    } else {
        items[start..end].to_vec()
    };

    (page_items, total)
}
