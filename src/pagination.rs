//! Paged views over listings.
//!
//! Pages are zero-based. A listing always has at least one page, so an empty
//! listing yields a single empty page.

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    page: usize,
    total_pages: usize,
    total_items: usize,
}

impl<T> Page<T> {
    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Returns the number of pages in the listing; never zero.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns the number of items in the whole listing.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns `true` when a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Returns `true` when an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }
}

/// Cuts page `page` out of `items`.
///
/// A page index past the end is clamped to the last page. A `page_size` of
/// zero is treated as one.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(size).max(1);
    let current = page.min(total_pages - 1);

    Page {
        items: items
            .iter()
            .skip(current * size)
            .take(size)
            .cloned()
            .collect(),
        page: current,
        total_pages,
        total_items,
    }
}
