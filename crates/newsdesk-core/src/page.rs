//! Pagination types shared by the storage and cache layers.

use serde::{Deserialize, Serialize};

/// A request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Number of entries per page.
    pub size: u32,
}

impl PageRequest {
    /// Default page size when none is requested.
    pub const DEFAULT_SIZE: u32 = 20;

    /// Creates a page request. A zero size falls back to
    /// [`PageRequest::DEFAULT_SIZE`].
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: if size == 0 { Self::DEFAULT_SIZE } else { size },
        }
    }

    /// Returns the offset of the first entry on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// One page of results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The entries on this page.
    pub content: Vec<T>,
    /// Zero-based index of this page.
    pub page: u32,
    /// Requested page size (the content may be shorter on the last page).
    pub size: u32,
    /// Total number of matching entries across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Creates a page from its content and metadata.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total,
        }
    }

    /// Creates an empty page for the given request.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Returns the number of entries on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if this page holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the total number of pages for the recorded size and total.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total.div_ceil(u64::from(self.size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(3, 25);
        assert_eq!(request.offset(), 75);
    }

    #[test]
    fn test_page_request_zero_size_falls_back() {
        let request = PageRequest::new(1, 0);
        assert_eq!(request.size, PageRequest::DEFAULT_SIZE);
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::new(0, 10);
        let page = Page::new(vec![1, 2, 3], request, 23);
        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<i32> = Page::empty(PageRequest::default());
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
    }
}
