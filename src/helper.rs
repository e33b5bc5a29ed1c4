//! Ready-made conditions for common list filters.

use std::collections::HashMap;

use crate::{bind::IntoBind, condition::Condition};

const DIRECTION_TOKEN: &str = "{dir}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Requested sort items such as `["createdAt:desc", "name", "qty:asc"]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sorting(pub Vec<String>);

fn split_item(item: &str) -> (&str, Option<&str>) {
    let item = item.trim_matches([' ', '\t']);
    match item.split_once(':') {
        Some((field, direction)) => (field, Some(direction)),
        None => (item, None),
    }
}

impl Sorting {
    /// Maps every allowed field to its SQL expression, dropping unknown ones.
    ///
    /// A `{dir}` token in the expression receives the direction. Without
    /// the token a descending item gets ` DESC` appended.
    pub fn allowed(&self, items: &HashMap<&str, &str>) -> Vec<String> {
        let mut result = Vec::with_capacity(self.0.len());
        for item in &self.0 {
            let (field, direction) = split_item(item);
            let Some(expression) = items.get(field) else {
                continue;
            };
            let direction = direction.and_then(SortDirection::parse);
            let sql = if expression.contains(DIRECTION_TOKEN) {
                match direction {
                    Some(direction) => expression.replace(DIRECTION_TOKEN, direction.as_str()),
                    None => expression
                        .replace(DIRECTION_TOKEN, "")
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" "),
                }
            } else if direction == Some(SortDirection::Desc) {
                format!("{expression} DESC")
            } else {
                (*expression).to_string()
            };
            result.push(sql);
        }
        result
    }

    /// Whether `field` was requested, with the direction it was asked in.
    pub fn contains(&self, field: &str) -> (bool, Option<SortDirection>) {
        self.0
            .iter()
            .map(|item| split_item(item))
            .find(|(name, _)| *name == field)
            .map_or((false, None), |(_, direction)| {
                (true, direction.and_then(SortDirection::parse))
            })
    }
}

/// A closed or half-open range over a column.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodFilter<T> {
    pub start: Option<T>,
    pub end: Option<T>,
}

impl<T> Default for PeriodFilter<T> {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
        }
    }
}

impl<T> PeriodFilter<T>
where
    T: IntoBind + Clone,
{
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn field_condition(&self, column: &str) -> Condition {
        let mut cond = Condition::and();
        if let Some(ref start) = self.start {
            cond.add_expression(&format!("{column} >= ?"), start.clone());
        }
        if let Some(ref end) = self.end {
            cond.add_expression(&format!("{column} <= ?"), end.clone());
        }
        cond
    }
}

/// Free text matched word by word against a column.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchString(pub String);

impl SearchString {
    pub fn like_condition(&self, column: &str) -> Condition {
        let mut cond = Condition::and();
        let normal = self.0.trim_matches([' ', '\t']).to_lowercase();
        if normal.is_empty() {
            return cond;
        }
        let predicate = format!("{column} like lower(?)");
        for part in normal.split(' ') {
            cond.add_expression(&predicate, format!("%{part}%"));
        }
        cond
    }
}

#[cfg(test)]
mod tests {
    use crate::bind::Bind;

    use super::*;

    #[test]
    fn test_sorting_allowed() {
        let sorting = Sorting(vec![
            "   createdAt:desc".into(),
            "name".into(),
            "qty:ASC".into(),
            "secret".into(),
        ]);
        let items = HashMap::from([
            ("createdAt", "created_at {dir} NULLS LAST"),
            ("name", "internal_name"),
            ("qty", "quantity"),
        ]);
        assert_eq!(
            vec!["created_at DESC NULLS LAST", "internal_name", "quantity"],
            sorting.allowed(&items)
        );
    }

    #[test]
    fn test_sorting_token_without_direction() {
        let sorting = Sorting(vec!["createdAt".into(), "name:desc".into()]);
        let items = HashMap::from([
            ("createdAt", "created_at {dir} NULLS LAST"),
            ("name", "internal_name"),
        ]);
        assert_eq!(
            vec!["created_at NULLS LAST", "internal_name DESC"],
            sorting.allowed(&items)
        );
    }

    #[test]
    fn test_sorting_contains() {
        let sorting = Sorting(vec!["foo".into(), "bar:DESC".into(), "baz:asc".into()]);
        assert_eq!((true, None), sorting.contains("foo"));
        assert_eq!((true, Some(SortDirection::Desc)), sorting.contains("bar"));
        assert_eq!((true, Some(SortDirection::Asc)), sorting.contains("baz"));
        assert_eq!((false, None), sorting.contains("bar1"));
    }

    #[test]
    fn test_period_filter() {
        let period = PeriodFilter {
            start: Some(10i64),
            end: Some(20i64),
        };
        assert!(!period.is_empty());
        let cond = period.field_condition("created_at");
        assert_eq!("(created_at >= ? AND created_at <= ?)", cond.to_string());
        assert_eq!(vec![Bind::I64(10), Bind::I64(20)], cond.arguments());

        let open = PeriodFilter {
            start: None,
            end: Some(5i32),
        };
        assert_eq!("(created_at <= ?)", open.field_condition("created_at").to_string());
        assert!(PeriodFilter::<i32>::default().field_condition("x").is_empty());
    }

    #[test]
    fn test_search_string() {
        let search = SearchString("Foo Bar".into());
        let cond = search.like_condition("fullname");
        assert_eq!(
            "(fullname like lower(?) AND fullname like lower(?))",
            cond.to_string()
        );
        assert_eq!(
            vec![Bind::String("%foo%".into()), Bind::String("%bar%".into())],
            cond.arguments()
        );
    }

    #[test]
    fn test_search_string_blank() {
        let cond = SearchString(" \t ".into()).like_condition("fullname");
        assert!(cond.is_empty());
        assert!(cond.arguments().is_empty());
    }
}
