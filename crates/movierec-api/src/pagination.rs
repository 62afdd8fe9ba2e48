//! Pagination state derived from list responses.

/// Fixed backend page size used when only a total count is known.
pub const PAGE_SIZE: u32 = 20;

/// Page position and navigation availability for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-based).
    pub page: u32,
    /// Total pages, when derivable.
    pub total_pages: Option<u32>,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Whether a previous page exists.
    pub has_previous: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::hidden(1)
    }
}

impl Pagination {
    /// No pagination information; controls are hidden.
    #[must_use]
    pub const fn hidden(page: u32) -> Self {
        Self {
            page,
            total_pages: None,
            has_next: false,
            has_previous: false,
        }
    }

    /// From explicit page metadata.
    #[must_use]
    pub const fn from_total_pages(page: u32, total_pages: u32) -> Self {
        Self {
            page,
            total_pages: Some(total_pages),
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }

    /// From a total item count and a fixed page size.
    #[must_use]
    pub fn from_count(page: u32, count: u64, page_size: u32) -> Self {
        let size = u64::from(page_size.max(1));
        let total = u32::try_from(count.div_ceil(size)).unwrap_or(u32::MAX);
        Self::from_total_pages(page, total)
    }

    /// From next/previous link presence only.
    #[must_use]
    pub const fn from_links(page: u32, has_next: bool, has_previous: bool) -> Self {
        Self {
            page,
            total_pages: None,
            has_next,
            has_previous,
        }
    }

    /// Whether pagination controls should be shown at all.
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.has_next || self.has_previous || self.total_pages.is_some_and(|total| total > 1)
    }

    /// The next page number, if one exists.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        if self.has_next {
            self.page.checked_add(1)
        } else {
            None
        }
    }

    /// The previous page number, if one exists.
    #[must_use]
    pub fn previous_page(&self) -> Option<u32> {
        if self.has_previous {
            self.page.checked_sub(1).filter(|p| *p >= 1)
        } else {
            None
        }
    }

    /// Label such as `Page 2 of 7` or `Page 2`.
    #[must_use]
    pub fn label(&self) -> String {
        self.total_pages.map_or_else(
            || format!("Page {}", self.page),
            |total| format!("Page {} of {total}", self.page),
        )
    }
}
