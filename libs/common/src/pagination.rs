//! Offset pagination primitives
//!
//! A [`PageRequest`] describes which slice of a filtered result set to fetch;
//! a [`Page`] carries that slice back together with the metadata the index
//! views render (`current_page`, `last_page`, `from`/`to` bounds, ...).

use serde::{Deserialize, Serialize};

/// A 1-based page of a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Build a request, clamping the page to at least 1 and the size to at least 1
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Parse a raw `page` query value; anything missing or unparsable is page 1
    pub fn parse(raw: Option<&str>, per_page: u64) -> Self {
        let page = raw
            .map(str::trim)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        Self::new(page, per_page)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of records to skip, capped so it always fits a signed 64-bit
    /// SQL parameter
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.per_page)
            .min(i64::MAX as u64)
    }

    /// Number of records to take
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

/// One page of a result set plus its position in the whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
    /// 1-based index of the first record on this page, `None` when the page is empty
    pub from: Option<u64>,
    /// 1-based index of the last record on this page, `None` when the page is empty
    pub to: Option<u64>,
}

impl<T> Page<T> {
    /// Assemble a page from the fetched slice and the total size of the filtered set
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let per_page = request.per_page();
        let last_page = total.div_ceil(per_page).max(1);

        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let from = request.offset() + 1;
            (Some(from), Some(from + data.len() as u64 - 1))
        };

        Self {
            data,
            current_page: request.page(),
            last_page,
            per_page,
            total,
            from,
            to,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_falls_back_to_first_page() {
        assert_eq!(PageRequest::parse(None, 3).page(), 1);
        assert_eq!(PageRequest::parse(Some("abc"), 3).page(), 1);
        assert_eq!(PageRequest::parse(Some("0"), 3).page(), 1);
        assert_eq!(PageRequest::parse(Some("-2"), 3).page(), 1);
        assert_eq!(PageRequest::parse(Some(" 4 "), 3).page(), 4);
    }

    #[test]
    fn test_offset_and_limit() {
        let request = PageRequest::new(3, 3);
        assert_eq!(request.offset(), 6);
        assert_eq!(request.limit(), 3);
    }

    #[test]
    fn test_partial_last_page_bounds() {
        let page = Page::new(vec!["g"], PageRequest::new(3, 3), 7);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.from, Some(7));
        assert_eq!(page.to, Some(7));
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_bounds_match_record_count() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(2, 3), 9);
        let (from, to) = (page.from.unwrap(), page.to.unwrap());
        assert_eq!(to - from + 1, page.data.len() as u64);
        assert_eq!((from, to), (4, 6));
    }

    #[test]
    fn test_empty_result_set() {
        let page: Page<i32> = Page::new(Vec::new(), PageRequest::new(1, 3), 0);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.from, None);
        assert_eq!(page.to, None);
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page: Page<i32> = Page::new(Vec::new(), PageRequest::new(5, 3), 4);
        assert_eq!(page.current_page, 5);
        assert_eq!(page.last_page, 2);
        assert_eq!(page.from, None);
    }

    #[test]
    fn test_huge_page_offset_fits_sql_bigint() {
        let request = PageRequest::parse(Some("9999999999999999999"), 3);
        assert_eq!(request.page(), 9_999_999_999_999_999_999);
        assert_eq!(request.offset(), i64::MAX as u64);
        assert!(i64::try_from(request.offset()).is_ok());

        let page: Page<i32> = Page::new(Vec::new(), request, 4);
        assert_eq!(page.from, None);
        assert_eq!(page.last_page, 2);
    }
}
