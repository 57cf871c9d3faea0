//! Month grouping
//!
//! One bucket per calendar month present in the result, each with its own
//! running balance.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::BudgetResult;
use crate::models::Money;
use crate::storage::Storage;

use super::budget_items::{assemble, BudgetItem};
use super::query::ReportQuery;

/// Budget items for a single calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetItemsByMonth {
    /// `YYYY/MM`
    pub month: String,
    pub details: Vec<BudgetItem>,
    pub total: Money,
}

/// Label for the month containing `date`
pub fn month_label(date: NaiveDateTime) -> String {
    format!("{:04}/{:02}", date.year(), date.month())
}

/// First and last instant of the month containing `date`
pub fn month_span(date: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let first_day = date.date().with_day(1).unwrap_or(date.date());
    let start = first_day.and_time(NaiveTime::MIN);

    let end = first_day
        .checked_add_months(Months::new(1))
        .map(|next: NaiveDate| next.and_time(NaiveTime::MIN))
        .and_then(|next| next.checked_sub_signed(Duration::nanoseconds(1)))
        .unwrap_or(NaiveDateTime::MAX);

    (start, end)
}

pub(crate) fn group_by_month(
    storage: &Storage,
    query: &ReportQuery,
) -> BudgetResult<Vec<BudgetItemsByMonth>> {
    let all_items = assemble(storage, query)?;

    // items are date-ordered, so equal months are adjacent
    let mut months: Vec<(i32, u32, NaiveDateTime)> = Vec::new();
    for item in &all_items {
        let key = (item.date.year(), item.date.month());
        if months.last().map(|(y, m, _)| (*y, *m)) != Some(key) {
            months.push((key.0, key.1, item.date));
        }
    }

    months
        .into_iter()
        .map(|(_, _, sample)| {
            let (start, end) = month_span(sample);
            let details = assemble(storage, &query.narrowed_to(start, end))?;
            let total = details.iter().map(|item| item.amount).sum();
            tracing::trace!(month = %month_label(sample), items = details.len(), "month bucket");
            Ok(BudgetItemsByMonth {
                month: month_label(sample),
                details,
                total,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use crate::reports::test_support::{at, scenario_storage};

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(at(2018, 1, 10)), "2018/01");
        assert_eq!(month_label(at(2020, 12, 31)), "2020/12");
    }

    #[test]
    fn test_month_span() {
        let (start, end) = month_span(at(2020, 2, 17));
        assert_eq!(start, at(2020, 2, 1));
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
        assert!(end.time() > NaiveTime::from_hms_opt(23, 59, 59).unwrap());

        let (start, end) = month_span(at(2019, 12, 5));
        assert_eq!(start, at(2019, 12, 1));
        assert_eq!(end + Duration::nanoseconds(1), at(2020, 1, 1));
    }

    #[test]
    fn test_groups_scenario_into_three_months() {
        let (_temp_dir, storage) = scenario_storage();
        let months = group_by_month(&storage, &ReportQuery::all()).unwrap();

        let labels: Vec<_> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["2018/01", "2019/01", "2020/01"]);

        let sizes: Vec<_> = months.iter().map(|m| m.details.len()).collect();
        assert_eq!(sizes, vec![2, 1, 3]);

        let totals: Vec<_> = months.iter().map(|m| m.total).collect();
        assert_eq!(
            totals,
            vec![Money::zero(), Money::from_units(15), Money::from_units(55)]
        );
    }

    #[test]
    fn test_balance_resets_each_month() {
        let (_temp_dir, storage) = scenario_storage();
        let months = group_by_month(&storage, &ReportQuery::all()).unwrap();

        for month in &months {
            assert_eq!(month.details[0].balance, month.details[0].amount);
            let last = month.details.last().unwrap();
            assert_eq!(last.balance, month.total);
        }

        let jan_2020: Vec<_> = months[2].details.iter().map(|i| i.balance).collect();
        assert_eq!(
            jan_2020,
            vec![
                Money::from_units(-15),
                Money::from_units(30),
                Money::from_units(55)
            ]
        );
    }

    #[test]
    fn test_single_item_month() {
        let (_temp_dir, storage) = scenario_storage();
        let months = group_by_month(&storage, &ReportQuery::all()).unwrap();

        assert_eq!(months[1].details.len(), 1);
        assert_eq!(months[1].total, Money::from_units(15));
    }

    #[test]
    fn test_month_buckets_respect_range_and_filter() {
        let (_temp_dir, storage) = scenario_storage();
        let query = ReportQuery::all()
            .between(at(2020, 1, 11), at(2020, 12, 31))
            .category(CategoryId::new(14));
        let months = group_by_month(&storage, &query).unwrap();

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].details.len(), 2);
        assert_eq!(months[0].total, Money::from_units(70));
    }

    #[test]
    fn test_range_start_inside_month_is_honored() {
        let (_temp_dir, storage) = scenario_storage();
        let query = ReportQuery::all().between(at(2020, 1, 12), at(2020, 1, 31));
        let months = group_by_month(&storage, &query).unwrap();

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].details.len(), 1);
        assert_eq!(months[0].total, Money::from_units(25));
    }

    #[test]
    fn test_empty_range() {
        let (_temp_dir, storage) = scenario_storage();
        let query = ReportQuery::all().between(at(2021, 1, 1), at(2021, 12, 31));
        assert!(group_by_month(&storage, &query).unwrap().is_empty());
    }
}
