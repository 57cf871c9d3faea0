//! Report query parameters
//!
//! Every report takes the same four inputs: an optional date range and an
//! optional single-category filter.

use chrono::NaiveDateTime;

use crate::models::CategoryId;

/// Date range and category filter shared by all budget reports
///
/// Both range bounds are inclusive. A missing bound leaves that side of the
/// range open. `category_id` is ignored unless `filter_by_category` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub filter_by_category: bool,
    pub category_id: CategoryId,
}

impl ReportQuery {
    /// Build a query from its four raw parts
    pub fn new(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        filter_by_category: bool,
        category_id: CategoryId,
    ) -> Self {
        Self {
            start,
            end,
            filter_by_category,
            category_id,
        }
    }

    /// Everything in the store
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to `[start, end]`
    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Restrict to one category
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.filter_by_category = true;
        self.category_id = category_id;
        self
    }

    /// Effective lower bound
    pub fn start_bound(&self) -> NaiveDateTime {
        self.start.unwrap_or(NaiveDateTime::MIN)
    }

    /// Effective upper bound
    pub fn end_bound(&self) -> NaiveDateTime {
        self.end.unwrap_or(NaiveDateTime::MAX)
    }

    /// The category to filter on, if filtering is enabled
    pub fn category_filter(&self) -> Option<CategoryId> {
        self.filter_by_category.then_some(self.category_id)
    }

    /// Same filter, narrowed to `[start, end]` intersected with the current range
    pub(crate) fn narrowed_to(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start.max(self.start_bound())),
            end: Some(end.min(self.end_bound())),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_open_range_defaults() {
        let query = ReportQuery::all();
        assert_eq!(query.start_bound(), NaiveDateTime::MIN);
        assert_eq!(query.end_bound(), NaiveDateTime::MAX);
        assert_eq!(query.category_filter(), None);
    }

    #[test]
    fn test_category_ignored_without_flag() {
        let query = ReportQuery::new(None, None, false, CategoryId::new(9));
        assert_eq!(query.category_filter(), None);

        let query = ReportQuery::all().category(CategoryId::new(9));
        assert_eq!(query.category_filter(), Some(CategoryId::new(9)));
    }

    #[test]
    fn test_narrowed_to_intersects() {
        let query = ReportQuery::all()
            .between(at(2020, 1, 15), at(2020, 3, 1))
            .category(CategoryId::new(3));

        let narrowed = query.narrowed_to(at(2020, 1, 1), at(2020, 1, 31));
        assert_eq!(narrowed.start, Some(at(2020, 1, 15)));
        assert_eq!(narrowed.end, Some(at(2020, 1, 31)));
        assert_eq!(narrowed.category_filter(), Some(CategoryId::new(3)));
    }
}
