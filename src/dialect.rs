use std::borrow::Cow;

use crate::{
    statement::{Query, Statement},
    writer::FormatContext,
    MARKER,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    /// Whether the dialect wants numbered placeholders instead of the marker.
    pub fn is_positional(self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    /// Rewrites every marker into this dialect's placeholder token.
    ///
    /// Borrows the input when nothing has to change. The scan is not aware
    /// of quoted literals: a marker inside a string literal is rewritten too,
    /// so callers must never pass the marker through as literal data.
    pub fn rewrite<'a>(self, query: &'a str) -> Cow<'a, str> {
        if !self.is_positional() || !query.contains(MARKER) {
            return Cow::Borrowed(query);
        }
        let mut str = String::with_capacity(query.len() * 2);
        let mut context = FormatContext::new(&mut str, self);
        context
            .write_query(query)
            .expect("should not fail on a string writer");
        tracing::trace!(placeholders = context.placeholder, "rewrote positional placeholders");
        Cow::Owned(str)
    }

    /// Renders a statement and rewrites its text for this dialect.
    pub fn render<S: Statement + ?Sized>(self, statement: &S) -> Query {
        let mut query = statement.sql();
        let rewritten = match self.rewrite(&query.text) {
            Cow::Owned(text) => Some(text),
            Cow::Borrowed(_) => None,
        };
        if let Some(text) = rewritten {
            query.text = text;
        }
        tracing::debug!(
            dialect = ?self,
            params = query.params.len(),
            returning = query.returning.len(),
            "rendered statement"
        );
        query
    }
}

/// Replaces the n-th marker with `$n`, left to right, starting at one.
pub fn postgres_query_param_hook(query: &str) -> String {
    Dialect::Postgres.rewrite(query).into_owned()
}

/// Renders a statement with postgres positional placeholders.
pub fn pgsql<S: Statement + ?Sized>(statement: &S) -> Query {
    Dialect::Postgres.render(statement)
}

/// Renders a statement for the dialect of `Database`.
pub fn render<Database: HasDialect, S: Statement + ?Sized>(statement: &S) -> Query {
    Database::DIALECT.render(statement)
}

pub trait HasDialect {
    const DIALECT: Dialect;
}

pub struct Postgres;

impl HasDialect for Postgres {
    const DIALECT: Dialect = Dialect::Postgres;
}

pub struct MySql;

impl HasDialect for MySql {
    const DIALECT: Dialect = Dialect::MySql;
}

pub struct Sqlite;

impl HasDialect for Sqlite {
    const DIALECT: Dialect = Dialect::Sqlite;
}

#[cfg(feature = "postgres")]
impl HasDialect for sqlx::Postgres {
    const DIALECT: Dialect = Dialect::Postgres;
}

#[cfg(feature = "mysql")]
impl HasDialect for sqlx::MySql {
    const DIALECT: Dialect = Dialect::MySql;
}

#[cfg(feature = "sqlite")]
impl HasDialect for sqlx::Sqlite {
    const DIALECT: Dialect = Dialect::Sqlite;
}

#[cfg(test)]
mod tests {
    use crate::{bind::Bind, condition::Condition, tests::Select};

    use super::*;

    #[test]
    fn test_rewrite_normal() {
        let query = "update apple_attribute set code = 'name_test_update' where id = ? AND ab = ? OR ad = ? AND aa = ANY(ARRAY[1,2,3])";
        assert_eq!(
            "update apple_attribute set code = 'name_test_update' where id = $1 AND ab = $2 OR ad = $3 AND aa = ANY(ARRAY[1,2,3])",
            postgres_query_param_hook(query)
        );
    }

    #[test]
    fn test_rewrite_serial() {
        assert_eq!("$1$2$3$4$5", postgres_query_param_hook("?????"));
    }

    #[test]
    fn test_rewrite_without_marker() {
        let query = "update apple_attribute set code = 'name_test_update' where id = 1 AND ab = '2'";
        assert_eq!(query, postgres_query_param_hook(query));
        assert!(matches!(Dialect::Postgres.rewrite(query), Cow::Borrowed(_)));
        let once = postgres_query_param_hook(query);
        assert_eq!(once, postgres_query_param_hook(&once));
    }

    #[test]
    fn test_rewrite_idempotent_after_first_pass() {
        let once = postgres_query_param_hook("a = ? and b = ?");
        assert_eq!("a = $1 and b = $2", once);
        assert_eq!(once, postgres_query_param_hook(&once));
    }

    #[test]
    fn test_rewrite_max_args() {
        let mut query = String::from(
            "INSERT INTO test_table (id, name, date, value, count, type_id, created_at, updated_at) VALUES ",
        );
        let rows = 255 * 255 / 8 + 1;
        for row in 0..rows {
            if row > 0 {
                query.push_str(", ");
            }
            query.push_str("(?, ?, ?, ?, ?, ?, ?, ?)");
        }
        let rewritten = postgres_query_param_hook(&query);
        assert!(rewritten.ends_with(')'));
        let last = rows * 8;
        assert!(rewritten.ends_with(&format!("${last})")));
        assert!(!rewritten.contains(MARKER));
    }

    #[test]
    fn test_rewrite_is_not_quote_aware() {
        // markers inside literals are rewritten as well
        assert_eq!("name = '$1' and id = $2", postgres_query_param_hook("name = '?' and id = ?"));
    }

    #[test]
    fn test_non_positional_dialects_borrow() {
        let query = "a = ? and b = ?";
        assert!(matches!(Dialect::MySql.rewrite(query), Cow::Borrowed("a = ? and b = ?")));
        assert!(matches!(Dialect::Sqlite.rewrite(query), Cow::Borrowed(_)));
    }

    #[test]
    fn test_pgsql() {
        let mut select = Select::new("some_table", "foo, bar");
        let mut cond = Condition::default();
        cond.add_expression("field_1 = ?", 1)
            .add_expression("field_2 = ?", true)
            .add_expression("field_3 = ?", "some");
        select.filter = cond;
        let query = pgsql(&select);
        assert_eq!(
            "SELECT foo, bar FROM some_table WHERE (field_1 = $1 AND field_2 = $2 AND field_3 = $3);",
            query.text
        );
        assert_eq!(
            vec![Bind::I32(1), Bind::Bool(true), Bind::StaticString("some")],
            query.params
        );
        assert!(query.returning.is_empty());
    }

    #[test]
    fn test_render_by_database() {
        let mut select = Select::new("t", "*");
        select.filter.add_expression("id = ?", 3);
        assert_eq!("SELECT * FROM t WHERE (id = ?);", render::<MySql, _>(&select).text);
        assert_eq!("SELECT * FROM t WHERE (id = $1);", render::<Postgres, _>(&select).text);
    }
}
