//! Page window math for the post listing.

use crate::error::{AppError, Result};

/// Posts per listing page
pub const PAGE_SIZE: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Effective 1-based page
    pub page: i64,
    /// Documents to skip (`startIndex`)
    pub skip: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Window for a 1-based page. Pages below 1 are clamped to 1.
    pub fn for_page(page: i64) -> Self {
        let page = page.max(1);
        Self {
            page,
            skip: (page - 1).saturating_mul(PAGE_SIZE),
            limit: PAGE_SIZE,
        }
    }

    /// Parse the raw `page` query parameter. A missing parameter means page 1.
    /// Only base-10 integers are accepted; `2.0` and `1e1` are rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::for_page(1));
        };

        raw.parse::<i64>()
            .map(Self::for_page)
            .map_err(|_| AppError::Validation(format!("Invalid page number: {}", raw)))
    }
}

/// `ceil(total / PAGE_SIZE)`; zero documents means zero pages.
pub fn number_of_pages(total: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_index_follows_page() {
        for page in 1..=50 {
            let window = PageWindow::for_page(page);
            assert_eq!(window.skip, (page - 1) * 6);
            assert_eq!(window.limit, 6);
            assert_eq!(window.page, page);
        }
    }

    #[test]
    fn page_count_is_ceiling() {
        assert_eq!(number_of_pages(0), 0);
        assert_eq!(number_of_pages(1), 1);
        assert_eq!(number_of_pages(6), 1);
        assert_eq!(number_of_pages(7), 2);
        assert_eq!(number_of_pages(12), 2);
        assert_eq!(number_of_pages(13), 3);
    }

    #[test]
    fn low_pages_clamp_to_first() {
        assert_eq!(PageWindow::for_page(0), PageWindow::for_page(1));
        assert_eq!(PageWindow::for_page(-4).skip, 0);
    }

    #[test]
    fn parse_handles_missing_and_garbage() {
        assert_eq!(PageWindow::parse(None).unwrap().page, 1);
        assert_eq!(PageWindow::parse(Some("")).unwrap().page, 1);
        assert_eq!(PageWindow::parse(Some("3")).unwrap().skip, 12);
        assert!(matches!(
            PageWindow::parse(Some("abc")),
            Err(AppError::Validation(_))
        ));
        for raw in ["1.5", "2.0", "1e1", "0x2", "two"] {
            assert!(
                matches!(PageWindow::parse(Some(raw)), Err(AppError::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn huge_pages_do_not_overflow() {
        let window = PageWindow::for_page(i64::MAX);
        assert_eq!(window.skip, i64::MAX);
    }
}
