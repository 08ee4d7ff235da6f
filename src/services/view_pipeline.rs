//! View Pipeline
//!
//! The filter-then-paginate transformation every list page runs:
//!
//! 1. search: keep records where any search field contains the search text
//! 2. equality filters: keep records matching every non-`All` filter exactly
//! 3. page math: count, page total, clamp the requested page
//! 4. slice: cut out the current page, preserving collection order
//!
//! Stages 1–2 produce a [`FilteredView`], which also carries the aggregate
//! statistics (see `services::aggregates`). Nothing here mutates its input.

use tracing::debug;

use crate::error::DashboardResult;
use crate::models::record::ViewRecord;
use crate::models::view::{validate_page_size, ViewQuery, ViewResult};

/// Records that survived the search and equality stages, in collection order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a, T> {
    records: Vec<&'a T>,
}

impl<'a, T> FilteredView<'a, T> {
    pub fn records(&self) -> &[&'a T] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Page math and slicing over the filtered set.
    ///
    /// `page` is clamped to `[1, max(total_pages, 1)]`. An empty set reports
    /// zero pages and page 1 with no items.
    pub fn paginate(&self, page: i32, page_size: i32) -> DashboardResult<ViewResult<T>>
    where
        T: Clone,
    {
        validate_page_size(page_size)?;
        let page_size = page_size as usize;

        let total_filtered_count = self.records.len();
        let total_pages = total_filtered_count.div_ceil(page_size);
        let last_page = total_pages.max(1);
        let current_page = (page.max(1) as usize).min(last_page);

        let start = (current_page - 1) * page_size;
        let items: Vec<T> = self
            .records
            .iter()
            .skip(start)
            .take(page_size)
            .map(|record| (*record).clone())
            .collect();

        Ok(ViewResult {
            items,
            total_filtered_count,
            total_pages,
            current_page,
        })
    }
}

/// Run the search and equality stages.
pub fn filter<'a, T: ViewRecord>(collection: &'a [T], query: &ViewQuery) -> FilteredView<'a, T> {
    let needle = query.normalized_search();

    let records: Vec<&T> = collection
        .iter()
        .filter(|record| match &needle {
            Some(needle) => matches_search(*record, &query.search_fields, needle),
            None => true,
        })
        .filter(|record| {
            query
                .active_filters()
                .all(|(field, expected)| matches_equality(*record, field, expected))
        })
        .collect();

    debug!(
        total = collection.len(),
        matched = records.len(),
        search = %query.search_text,
        "View filter applied"
    );

    FilteredView { records }
}

/// Run the whole pipeline and return the requested page.
pub fn apply<T: ViewRecord + Clone>(collection: &[T], query: &ViewQuery) -> DashboardResult<ViewResult<T>> {
    query.validate()?;
    filter(collection, query).paginate(query.page, query.page_size)
}

/// `needle` must already be trimmed and lower-cased.
fn matches_search<T: ViewRecord>(record: &T, fields: &[String], needle: &str) -> bool {
    fields.iter().any(|field| {
        record
            .field(field)
            .and_then(|value| value.as_text().map(|text| text.to_lowercase().contains(needle)))
            .unwrap_or(false)
    })
}

fn matches_equality<T: ViewRecord>(record: &T, field: &str, expected: &str) -> bool {
    record
        .field(field)
        .is_some_and(|value| value.to_string() == expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::record::FieldValue;
    use crate::models::view::ALL_FILTER;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        status: &'static str,
        amount: i64,
    }

    impl ViewRecord for Row {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "name" => Some(self.name.into()),
                "status" => Some(self.status.into()),
                "amount" => Some(self.amount.into()),
                _ => None,
            }
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                name: if i % 2 == 0 { "John Smith" } else { "Mary Johnson" },
                status: if i % 3 == 0 { "Pending" } else { "Approved" },
                amount: i as i64,
            })
            .collect()
    }

    #[test]
    fn test_empty_query_passes_everything() {
        let data = rows(7);
        let result = apply(&data, &ViewQuery::new(10)).unwrap();
        assert_eq!(result.total_filtered_count, 7);
        assert_eq!(result.items, data);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let data = rows(6);
        let upper = ViewQuery::new(10).searching(["name"]).with_search("  JOHN ");
        let lower = ViewQuery::new(10).searching(["name"]).with_search("john");
        // "John Smith" and "Mary Johnson" both contain "john"
        assert_eq!(apply(&data, &upper).unwrap(), apply(&data, &lower).unwrap());
        assert_eq!(apply(&data, &lower).unwrap().total_filtered_count, 6);

        let smith = ViewQuery::new(10).searching(["name"]).with_search("SMITH");
        assert_eq!(apply(&data, &smith).unwrap().total_filtered_count, 3);
    }

    #[test]
    fn test_search_ignores_non_text_fields() {
        let data = rows(20);
        let query = ViewQuery::new(10).searching(["amount"]).with_search("1");
        assert_eq!(apply(&data, &query).unwrap().total_filtered_count, 0);
    }

    #[test]
    fn test_equality_filter_is_case_sensitive() {
        let data = rows(6);
        let query = ViewQuery::new(10).with_filter("status", "pending");
        assert_eq!(apply(&data, &query).unwrap().total_filtered_count, 0);

        let query = ViewQuery::new(10).with_filter("status", "Pending");
        assert_eq!(apply(&data, &query).unwrap().total_filtered_count, 2);
    }

    #[test]
    fn test_all_sentinel_does_not_constrain() {
        let data = rows(6);
        let query = ViewQuery::new(10).with_filter("status", ALL_FILTER);
        assert_eq!(apply(&data, &query).unwrap().total_filtered_count, 6);
    }

    #[test]
    fn test_missing_field_fails_filter() {
        let data = rows(3);
        let query = ViewQuery::new(10).with_filter("location", "Texas");
        assert_eq!(apply(&data, &query).unwrap().total_filtered_count, 0);
    }

    #[test]
    fn test_page_clamping() {
        let data = rows(25);
        let result = apply(&data, &ViewQuery::new(10).with_page(5)).unwrap();
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.current_page, 3);
        assert_eq!(result.items.len(), 5);
        assert_eq!(result.items[0].amount, 20);
        assert!(!result.has_next());
        assert!(result.has_prev());

        let result = apply(&data, &ViewQuery::new(10).with_page(-2)).unwrap();
        assert_eq!(result.current_page, 1);
        assert_eq!(result.items.len(), 10);
    }

    #[test]
    fn test_empty_result_is_single_empty_page() {
        let data = rows(4);
        let query = ViewQuery::new(10).searching(["name"]).with_search("nobody").with_page(3);
        let result = apply(&data, &query).unwrap();
        assert_eq!(result.total_filtered_count, 0);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.current_page, 1);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_page_size() {
        let data = rows(4);
        let err = apply(&data, &ViewQuery::new(0)).unwrap_err();
        assert!(matches!(err, DashboardError::Configuration(_)));
    }

    #[test]
    fn test_input_is_untouched() {
        let data = rows(12);
        let before = data.clone();
        let _ = apply(&data, &ViewQuery::new(5).with_filter("status", "Approved").with_page(2)).unwrap();
        assert_eq!(data, before);
    }
}
