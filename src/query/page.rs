//! Committed page results and their invariants.

/// The slice of entities committed for the current query spec, plus the
/// totals the Collection Service reported with it.
///
/// Invariants enforced on construction:
/// - `items.len() <= page_size` (over-full responses are truncated)
/// - `total_pages >= 1` even when `total == 0`, so page clamping never
///   produces page zero
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    /// Entities on the committed page, in service order.
    pub items: Vec<T>,
    /// Total matching entities across all pages.
    pub total: u64,
    /// Total pages for the current page size; never zero.
    pub total_pages: u32,
}

impl<T> PageResult<T> {
    /// The page shown before any fetch has committed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            total_pages: 1,
        }
    }

    /// Builds a page from a raw service response, enforcing the invariants.
    #[must_use]
    pub fn from_response(mut items: Vec<T>, total: u64, total_pages: u32, page_size: u32) -> Self {
        items.truncate(page_size as usize);
        Self {
            items,
            total,
            total_pages: total_pages.max(1),
        }
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_still_has_one_total_page() {
        let page: PageResult<u32> = PageResult::empty();
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn zero_total_pages_is_normalized() {
        let page = PageResult::from_response(Vec::<u32>::new(), 0, 0, 10);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn overfull_responses_are_truncated_to_page_size() {
        let page = PageResult::from_response((0..25).collect::<Vec<u32>>(), 25, 3, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 25);
    }
}
