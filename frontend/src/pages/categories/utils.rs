use crate::{
    api::{Category, SortOrder},
    utils::format::parse_timestamp,
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::cmp::Ordering;

pub const CATEGORIES_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySortField {
    Name,
    ProductsCount,
    CreatedAt,
}

/// Per-column filters typed into the table's filter row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRowFilters {
    pub name: String,
    pub products_count: String,
    pub created_on: Option<NaiveDate>,
}

impl CategoryRowFilters {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.products_count.trim().is_empty()
            && self.created_on.is_none()
    }

    pub fn matches(&self, category: &Category, tz: Tz) -> bool {
        let name = self.name.trim();
        if !name.is_empty() && !category.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
        let count = self.products_count.trim();
        if !count.is_empty() && count.parse::<i64>().ok() != Some(category.products_count) {
            return false;
        }
        if let Some(day) = self.created_on {
            if created_on(category, tz) != Some(day) {
                return false;
            }
        }
        true
    }
}

/// `yyyy-mm-dd` from a date input; anything else clears the filter.
pub fn parse_filter_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn created_on(category: &Category, tz: Tz) -> Option<NaiveDate> {
    parse_timestamp(&category.created_at).map(|dt| dt.with_timezone(&tz).date_naive())
}

fn compare(a: &Category, b: &Category, field: CategorySortField) -> Ordering {
    match field {
        CategorySortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        CategorySortField::ProductsCount => a.products_count.cmp(&b.products_count),
        CategorySortField::CreatedAt => {
            parse_timestamp(&a.created_at).cmp(&parse_timestamp(&b.created_at))
        }
    }
}

/// Filters then sorts; without a sort the server order is kept.
pub fn visible_categories(
    categories: &[Category],
    filters: &CategoryRowFilters,
    sort: Option<(CategorySortField, SortOrder)>,
    tz: Tz,
) -> Vec<Category> {
    let mut rows: Vec<Category> = categories
        .iter()
        .filter(|category| filters.matches(category, tz))
        .cloned()
        .collect();
    if let Some((field, order)) = sort {
        rows.sort_by(|a, b| {
            let ordering = compare(a, b, field);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
    rows
}

/// A new column starts ascending; the same column flips direction.
pub fn next_category_sort(
    current: Option<(CategorySortField, SortOrder)>,
    clicked: CategorySortField,
) -> (CategorySortField, SortOrder) {
    match current {
        Some((field, order)) if field == clicked => (field, order.toggled()),
        _ => (clicked, SortOrder::Asc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIME_ZONE;

    fn category(id: i64, name: &str, count: i64, created_at: &str) -> Category {
        Category {
            id,
            name: name.into(),
            products_count: count,
            created_at: created_at.into(),
            updated_at: created_at.into(),
        }
    }

    fn sample() -> Vec<Category> {
        vec![
            category(1, "electronics", 6, "2024-05-10T14:20:00Z"),
            category(2, "jewelery", 4, "2024-05-12T10:00:00Z"),
            category(3, "men's clothing", 4, "2024-05-11T01:30:00Z"),
        ]
    }

    fn names(rows: &[Category]) -> Vec<&str> {
        rows.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn name_filter_is_case_insensitive_contains() {
        let filters = CategoryRowFilters {
            name: "ELEC".into(),
            ..Default::default()
        };
        let rows = visible_categories(&sample(), &filters, None, DEFAULT_TIME_ZONE);
        assert_eq!(names(&rows), vec!["electronics"]);
    }

    #[test]
    fn products_count_filter_is_exact() {
        let filters = CategoryRowFilters {
            products_count: " 4 ".into(),
            ..Default::default()
        };
        let rows = visible_categories(&sample(), &filters, None, DEFAULT_TIME_ZONE);
        assert_eq!(names(&rows), vec!["jewelery", "men's clothing"]);

        let garbage = CategoryRowFilters {
            products_count: "quatro".into(),
            ..Default::default()
        };
        assert!(visible_categories(&sample(), &garbage, None, DEFAULT_TIME_ZONE).is_empty());
    }

    #[test]
    fn date_filter_uses_display_time_zone() {
        // 01:30 UTC on the 11th is still the 10th in São Paulo.
        let filters = CategoryRowFilters {
            created_on: parse_filter_date("2024-05-10"),
            ..Default::default()
        };
        let rows = visible_categories(&sample(), &filters, None, DEFAULT_TIME_ZONE);
        assert_eq!(names(&rows), vec!["electronics", "men's clothing"]);
    }

    #[test]
    fn sorting_by_count_then_reversed() {
        let asc = visible_categories(
            &sample(),
            &CategoryRowFilters::default(),
            Some((CategorySortField::ProductsCount, SortOrder::Asc)),
            DEFAULT_TIME_ZONE,
        );
        assert_eq!(asc[2].name, "electronics");

        let desc = visible_categories(
            &sample(),
            &CategoryRowFilters::default(),
            Some((CategorySortField::CreatedAt, SortOrder::Desc)),
            DEFAULT_TIME_ZONE,
        );
        assert_eq!(names(&desc), vec!["jewelery", "men's clothing", "electronics"]);
    }

    #[test]
    fn sort_cycle_toggles_same_column() {
        let first = next_category_sort(None, CategorySortField::Name);
        assert_eq!(first, (CategorySortField::Name, SortOrder::Asc));
        let second = next_category_sort(Some(first), CategorySortField::Name);
        assert_eq!(second, (CategorySortField::Name, SortOrder::Desc));
        let other = next_category_sort(Some(second), CategorySortField::CreatedAt);
        assert_eq!(other, (CategorySortField::CreatedAt, SortOrder::Asc));
    }

    #[test]
    fn empty_filters_report_empty() {
        assert!(CategoryRowFilters::default().is_empty());
        assert!(parse_filter_date("10/05/2024").is_none());
    }
}
