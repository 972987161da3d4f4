//! Page arithmetic for board listings.

/// Parse a raw page parameter. Anything that is not a positive integer
/// defaults to page 1; values beyond `u32::MAX` saturate so they still
/// clamp down to the last page.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|p| *p >= 1)
        .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

/// Number of pages needed for `total_count` rows: at least 1 (an empty
/// board still reports "page 1 of 1") and never more than `max_pages`.
pub fn total_pages(total_count: i64, page_size: u32, max_pages: u32) -> u32 {
    let total = u64::try_from(total_count).unwrap_or(0).max(1);
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages.min(u64::from(max_pages)))
        .unwrap_or(max_pages)
        .max(1)
}

/// Clamp a requested page into `1..=total_pages`.
pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    requested.clamp(1, total_pages.max(1))
}
