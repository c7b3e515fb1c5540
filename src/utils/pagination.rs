// src/utils/pagination.rs

use serde::Deserialize;

/// Fixed number of records per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Query parameters for paginated listings.
///
/// `page` is kept as raw text so that a non-numeric value falls back to the
/// first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    /// 1-based page number; absent or unparsable values yield 1.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Returns the `page`-th window of `QUESTIONS_PER_PAGE` items.
///
/// Out-of-range pages (including `page < 1`) yield an empty slice; turning
/// that into an error is the caller's decision.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE));

    match start {
        Some(start) if start < items.len() => {
            let end = (start + QUESTIONS_PER_PAGE).min(items.len());
            &items[start..end]
        }
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: i64) -> Vec<i64> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_holds_ten() {
        let data = items(25);
        assert_eq!(paginate(&data, 1), &data[0..10]);
    }

    #[test]
    fn last_page_is_partial() {
        let data = items(25);
        assert_eq!(paginate(&data, 3), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let data = items(25);
        assert!(paginate(&data, 4).is_empty());
        assert!(paginate(&data, 1000).is_empty());
    }

    #[test]
    fn empty_list_has_no_first_page() {
        let data: Vec<i64> = Vec::new();
        assert!(paginate(&data, 1).is_empty());
    }

    #[test]
    fn non_positive_page_is_empty() {
        let data = items(5);
        assert!(paginate(&data, 0).is_empty());
        assert!(paginate(&data, -1).is_empty());
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let data = items(5);
        assert!(paginate(&data, i64::MAX).is_empty());
    }

    #[test]
    fn page_param_defaults_to_one() {
        assert_eq!(PageParams::default().page(), 1);
        assert_eq!(PageParams { page: Some("abc".into()) }.page(), 1);
        assert_eq!(PageParams { page: Some("3".into()) }.page(), 3);
    }
}
