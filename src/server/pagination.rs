/// Fixed page size for every paginated question listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// 1-based page slice `[(page-1)*10, page*10)`, clamped to the available
/// range. Page 0 and any page past the end yield an empty slice.
pub fn page_slice<T>(items: &[T], page: u32) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page as usize - 1) * QUESTIONS_PER_PAGE;
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}

// An unparsable page value means "use the default", never a client error.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(1)
}
