//! Page number → skip/limit

use crate::error::QueryError;

/// Fixed number of records per page
pub const PAGE_SIZE: i64 = 20;

/// A resolved, 1-based page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: i64,
    skip: i64,
}

impl Page {
    /// Resolve a caller page number. Values below 1 are treated as page 1.
    pub fn new(page_number: i64) -> Result<Self, QueryError> {
        let number = page_number.max(1);
        let skip = (number - 1).checked_mul(PAGE_SIZE).ok_or_else(|| {
            QueryError::invalid_argument(format!("page number {} is out of range", page_number))
        })?;
        Ok(Self { number, skip })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn skip(&self) -> i64 {
        self.skip
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    /// Apply this page to an already ordered in-memory sequence
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.skip as usize)
            .take(PAGE_SIZE as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_is_zero_based_offset() {
        assert_eq!(Page::new(1).unwrap().skip(), 0);
        assert_eq!(Page::new(2).unwrap().skip(), 20);
        assert_eq!(Page::new(5).unwrap().skip(), 80);
        assert_eq!(Page::new(3).unwrap().limit(), 20);
    }

    #[test]
    fn test_non_positive_pages_clamp_to_first() {
        let first = Page::new(1).unwrap();
        assert_eq!(Page::new(0).unwrap(), first);
        assert_eq!(Page::new(-7).unwrap(), first);
        assert_eq!(Page::new(i64::MIN).unwrap().number(), 1);
    }

    #[test]
    fn test_overflowing_page_is_rejected() {
        let err = Page::new(i64::MAX).unwrap_err();
        assert!(matches!(err, QueryError::InvalidArgument(_)));
    }

    #[test]
    fn test_slice() {
        let items: Vec<i32> = (1..=45).collect();
        let second = Page::new(2).unwrap().slice(items.clone());
        assert_eq!(second.first(), Some(&21));
        assert_eq!(second.last(), Some(&40));

        let third = Page::new(3).unwrap().slice(items.clone());
        assert_eq!(third.len(), 5);

        assert!(Page::new(4).unwrap().slice(items).is_empty());
    }
}
