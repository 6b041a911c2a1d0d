//! Listing queries: case-insensitive search plus 1-based page/limit slicing.
//!
//! Page and limit arrive as raw query strings and are coerced leniently:
//! a leading integer is taken (`"3rd"` is 3) and anything unparseable falls
//! back to the default. No lower bound is enforced; the slice bounds are
//! clamped instead, so a page of zero or below yields an empty page.

use serde::Deserialize;

use shared_models::response::Page;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Anything a listing can search over.
pub trait Searchable {
    /// Text fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn matches_term(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle_lowercase))
    }
}

/// Raw `search`/`page`/`limit` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub search: String,
    pub page: i64,
    pub limit: i64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<&ListingParams> for ListingQuery {
    fn from(params: &ListingParams) -> Self {
        Self {
            search: params.search.clone().unwrap_or_default(),
            page: coerce_int(params.page.as_deref(), DEFAULT_PAGE),
            limit: coerce_int(params.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

impl ListingQuery {
    pub fn new(search: impl Into<String>, page: i64, limit: i64) -> Self {
        Self {
            search: search.into(),
            page,
            limit,
        }
    }

    /// Start offset of the requested page; negative for pages below 1.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Filters `items` by the search term, then slices out the requested page.
    pub fn apply<'a, T, I>(&self, items: I) -> Page<T>
    where
        T: Searchable + Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let needle = self.search.trim().to_lowercase();
        let matches: Vec<&T> = items
            .into_iter()
            .filter(|item| item.matches_term(&needle))
            .collect();
        self.paginate(matches.into_iter().cloned().collect())
    }

    /// Slices an already filtered sequence, keeping the full match count.
    pub fn paginate<T>(&self, matches: Vec<T>) -> Page<T> {
        let total = matches.len();
        let len = total as i64;
        let start = self.offset().clamp(0, len);
        let end = self.offset().saturating_add(self.limit).clamp(0, len);

        let items = if end > start {
            matches
                .into_iter()
                .skip(start as usize)
                .take((end - start) as usize)
                .collect()
        } else {
            Vec::new()
        };

        Page {
            items,
            total,
            page: self.page,
            limit: self.limit,
            total_pages: total_pages(total, self.limit),
        }
    }
}

fn total_pages(total: usize, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    let total = total as i64;
    total / limit + i64::from(total % limit != 0)
}

/// Leading-integer coercion: optional sign followed by digits.
pub fn coerce_int(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw.map(str::trim) else {
        return default;
    };

    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|value| sign * value)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        title: String,
        description: String,
    }

    impl Searchable for Item {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.title.as_str(), self.description.as_str()]
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|i| Item {
                title: format!("Item {}", i),
                description: if i % 2 == 0 { "Even Numbered".into() } else { "odd".into() },
            })
            .collect()
    }

    #[test]
    fn slice_matches_offset_formula() {
        let all = items(25);
        for page in -2..=5 {
            for limit in [1i64, 3, 10] {
                let result = ListingQuery::new("", page, limit).apply(&all);
                let start = ((page - 1) * limit).clamp(0, 25) as usize;
                let end = ((page - 1) * limit + limit).clamp(0, 25) as usize;
                let expected: Vec<Item> = if end > start { all[start..end].to_vec() } else { vec![] };
                assert_eq!(result.items, expected, "page={} limit={}", page, limit);
                assert_eq!(result.total, 25);
            }
        }
    }

    #[test]
    fn search_is_case_insensitive_and_total_counts_matches() {
        let all = items(10);
        let result = ListingQuery::new("EVEN", 1, 2).apply(&all);
        assert_eq!(result.total, 5);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].title, "Item 2");
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn out_of_range_page_is_empty_not_error() {
        let result = ListingQuery::new("", 99, 10).apply(&items(5));
        assert!(result.items.is_empty());
        assert_eq!(result.total, 5);
    }

    #[test]
    fn non_positive_pages_yield_empty_slices() {
        assert!(ListingQuery::new("", 0, 10).apply(&items(5)).items.is_empty());
        assert!(ListingQuery::new("", -3, 10).apply(&items(5)).items.is_empty());
        assert!(ListingQuery::new("", 1, 0).apply(&items(5)).items.is_empty());
    }

    #[test]
    fn extreme_limits_do_not_overflow() {
        let params = ListingParams {
            search: None,
            page: Some("2".into()),
            limit: Some("9223372036854775807".into()),
        };
        let query = ListingQuery::from(&params);
        assert_eq!(query.limit, i64::MAX);

        let page = query.paginate((0..5).collect::<Vec<i32>>());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 1);

        let first = ListingQuery::new("", 1, i64::MAX).apply(&items(5));
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.total_pages, 1);

        let far = ListingQuery::new("", i64::MAX, i64::MAX).apply(&items(5));
        assert!(far.items.is_empty());
    }

    #[test]
    fn repeated_queries_are_identical() {
        let all = items(12);
        let query = ListingQuery::new("item", 2, 5);
        assert_eq!(query.apply(&all), query.apply(&all));
    }

    #[test]
    fn params_are_coerced_leniently() {
        let params = ListingParams {
            search: None,
            page: Some("3rd".into()),
            limit: Some("abc".into()),
        };
        let query = ListingQuery::from(&params);
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(coerce_int(Some("-2"), 1), -2);
        assert_eq!(coerce_int(Some(" 7 "), 1), 7);
        assert_eq!(coerce_int(None, 1), 1);
        assert_eq!(ListingQuery::from(&ListingParams::default()), ListingQuery::default());
    }
}
