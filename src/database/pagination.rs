use serde::Serialize;

/// One page of a listing, with enough metadata for clients to render pagers.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

/// Number of pages needed for `total_items` at `per_page` items each.
/// An empty result set still has one (empty) page.
pub fn total_pages(total_items: i64, per_page: i64) -> i64 {
    if total_items <= 0 {
        return 1;
    }
    (total_items + per_page - 1) / per_page
}

/// Resolve the requested page number against the page count.
///
/// Mirrors forgiving pager semantics: a missing or unparseable value falls
/// back to the first page, while a numeric value outside [1, total_pages]
/// clamps to the last page on either side.
pub fn resolve_page(requested: Option<&str>, total_pages: i64) -> i64 {
    let Some(raw) = requested else {
        return 1;
    };
    match raw.parse::<i64>() {
        Err(_) => 1,
        Ok(page) if page < 1 => total_pages,
        Ok(page) if page > total_pages => total_pages,
        Ok(page) => page,
    }
}

pub fn offset(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}
