use serde::Deserialize;
use serde::Serialize;

/// One control in a rendered pagination strip.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PageToken {
    Page(u32),
    PrevEllipsis,
    NextEllipsis,
}

/// Compute the ellipsis-compressed sequence of page controls.
///
/// Up to 7 pages are listed in full. Beyond that the strip keeps the first
/// and last page plus a window of one page around the current one, with
/// ellipsis markers covering the gaps.
pub fn plan(current_page: u32, total_pages: u32) -> Vec<PageToken> {
    let total_pages = total_pages.max(1);
    let current_page = current_page.clamp(1, total_pages);

    if total_pages <= 7 {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let mut tokens = vec![PageToken::Page(1)];
    if current_page > 3 {
        tokens.push(PageToken::PrevEllipsis);
    }
    let start = current_page.saturating_sub(1).max(2);
    let end = (current_page + 1).min(total_pages - 1);
    tokens.extend((start..=end).map(PageToken::Page));
    if current_page < total_pages - 2 {
        tokens.push(PageToken::NextEllipsis);
    }
    tokens.push(PageToken::Page(total_pages));
    tokens
}

/// Clamp a requested page to `[1, total_pages]`. Out-of-range requests are
/// silently corrected, never rejected.
pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    let upper = i64::from(total_pages.max(1));
    requested.clamp(1, upper) as u32
}
