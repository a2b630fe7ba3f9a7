use serde::Serialize;

/// Link to one page of a paged listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub index: u32,
    pub label: String,
    pub active: bool,
}

/// Pagination controls derived from the current page and the page count.
///
/// `previous` / `next` are `None` when the control is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub previous: Option<u32>,
    pub next: Option<u32>,
    pub pages: Vec<PageLink>,
}

/// Most page links rendered at once, centered on the current page.
pub const PAGE_WINDOW: u32 = 10;

impl PageControls {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let previous = current_page.checked_sub(1);
        let next = current_page
            .checked_add(1)
            .filter(|page| *page < total_pages);

        let start = current_page
            .saturating_sub(PAGE_WINDOW / 2)
            .min(total_pages.saturating_sub(PAGE_WINDOW));
        let end = start.saturating_add(PAGE_WINDOW).min(total_pages);

        let pages = (start..end)
            .map(|index| PageLink {
                index,
                label: (u64::from(index) + 1).to_string(),
                active: index == current_page,
            })
            .collect();

        Self {
            previous,
            next,
            pages,
        }
    }
}
