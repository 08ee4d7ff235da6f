//! Aggregate statistics over a filtered view.
//!
//! Stats are always computed over the filtered set (after search and
//! equality filters, before pagination), never over the raw collection or
//! the current page only.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DashboardError, DashboardResult};
use crate::models::record::ViewRecord;
use crate::services::view_pipeline::FilteredView;

/// `matching / total * 100`, rounded to one decimal. Zero when `total` is zero.
pub fn percentage(matching: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(matching as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

impl<'a, T: ViewRecord> FilteredView<'a, T> {
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Numeric total of `field`. Any non-numeric or missing value is an error.
    pub fn sum(&self, field: &str) -> DashboardResult<Decimal> {
        self.iter().try_fold(Decimal::ZERO, |acc, record| {
            numeric(record, field).map(|value| acc + value)
        })
    }

    /// Largest value of a numeric `field`, `None` on an empty view.
    pub fn max(&self, field: &str) -> DashboardResult<Option<Decimal>> {
        self.iter().try_fold(None, |best: Option<Decimal>, record| {
            let value = numeric(record, field)?;
            Ok(Some(best.map_or(value, |b| b.max(value))))
        })
    }

    /// Count per distinct display value of `field`, ordered by first
    /// appearance. Records without the field are skipped.
    pub fn count_by_distinct_value(&self, field: &str) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for value in self.iter().filter_map(|record| record.field(field)) {
            let key = value.to_string();
            match counts.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, count)) => *count += 1,
                None => counts.push((key, 1)),
            }
        }
        counts
    }

    pub fn count_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.iter().filter(|record| predicate(record)).count()
    }

    /// Percentage of records matching `predicate`, one decimal place.
    pub fn rate(&self, predicate: impl Fn(&T) -> bool) -> Decimal {
        percentage(self.count_where(predicate), self.count())
    }
}

fn numeric<T: ViewRecord>(record: &T, field: &str) -> DashboardResult<Decimal> {
    record
        .field(field)
        .and_then(|value| value.as_number())
        .ok_or_else(|| DashboardError::NonNumericField {
            field: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::batch::{Batch, BatchStatus};
    use crate::models::view::ViewQuery;
    use crate::services::view_pipeline::filter;
    use rust_decimal_macros::dec;

    fn batch(id: &str, status: BatchStatus, value: Decimal) -> Batch {
        Batch {
            id: id.to_string(),
            status,
            crop: "Wheat".to_string(),
            quantity: 1000,
            farmer: "John Smith".to_string(),
            value,
        }
    }

    fn six_batches() -> Vec<Batch> {
        vec![
            batch("B1", BatchStatus::InTransit, dec!(15000)),
            batch("B2", BatchStatus::Delivered, dec!(12000)),
            batch("B3", BatchStatus::InTransit, dec!(18000)),
            batch("B4", BatchStatus::Delivered, dec!(13500)),
            batch("B5", BatchStatus::InTransit, dec!(16500)),
            batch("B6", BatchStatus::Delivered, dec!(11250)),
        ]
    }

    #[test]
    fn test_count_by_distinct_value_first_appearance_order() {
        let batches = six_batches();
        let view = filter(&batches, &ViewQuery::default());
        assert_eq!(
            view.count_by_distinct_value("status"),
            vec![("In Transit".to_string(), 3), ("Delivered".to_string(), 3)]
        );
    }

    #[test]
    fn test_stats_follow_filtered_set() {
        let batches = six_batches();
        let view = filter(&batches, &ViewQuery::default().with_filter("status", "Delivered"));
        assert_eq!(view.count(), 3);
        assert_eq!(view.sum("value").unwrap(), dec!(36750));
        assert_eq!(view.max("value").unwrap(), Some(dec!(13500)));
    }

    #[test]
    fn test_stats_ignore_pagination() {
        let batches = six_batches();
        let query = ViewQuery::new(2).with_page(2);
        let view = filter(&batches, &query);
        let page = view.paginate(query.page, query.page_size).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(view.count(), 6);
        assert_eq!(view.sum("value").unwrap(), dec!(86250));
    }

    #[test]
    fn test_sum_rejects_non_numeric() {
        let batches = six_batches();
        let view = filter(&batches, &ViewQuery::default());
        let err = view.sum("crop").unwrap_err();
        assert!(matches!(err, DashboardError::NonNumericField { ref field } if field == "crop"));
        assert!(view.sum("unknown").is_err());
    }

    #[test]
    fn test_sum_of_empty_view_is_zero() {
        let batches: Vec<Batch> = Vec::new();
        let view = filter(&batches, &ViewQuery::default());
        assert_eq!(view.sum("value").unwrap(), Decimal::ZERO);
        assert_eq!(view.max("value").unwrap(), None);
    }

    #[test]
    fn test_rate() {
        let batches = six_batches();
        let view = filter(&batches, &ViewQuery::default());
        assert_eq!(view.rate(|b| b.status == BatchStatus::Delivered), dec!(50.0));
        assert_eq!(view.rate(|b| b.id == "B1"), dec!(16.7));
    }

    #[test]
    fn test_rate_over_empty_set_is_zero() {
        let batches: Vec<Batch> = Vec::new();
        let view = filter(&batches, &ViewQuery::default());
        assert_eq!(view.rate(|_| true), Decimal::ZERO);
        assert_eq!(percentage(0, 0), Decimal::ZERO);
    }
}
