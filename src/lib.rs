//! Building blocks for SQL statement builders.
//!
//! Statement builders accumulate text into [`Expression`], [`Condition`]
//! and [`OrderedExpression`] values, each keeping its fragments in step
//! with the parameters they bind. Fragments use [`MARKER`] for every
//! parameter; a [`Dialect`] turns the markers into positional tokens once
//! the whole statement is assembled.

mod bind;
mod condition;
mod detailed;
mod dialect;
mod expression;
mod helper;
mod ordered;
mod statement;
mod writer;

pub use bind::{Array, Bind, Binds, IntoBind, IntoBinds};

pub use condition::{Condition, Conjunction, Group, Leaf};
pub use detailed::DetailedExpression;
pub use expression::{Expression, SENTINEL};
pub use ordered::{concat, OrderedExpression};

pub use dialect::{
    pgsql, postgres_query_param_hook, render, Dialect, HasDialect, MySql, Postgres, Sqlite,
};
pub use statement::{Query, Statement};
pub use writer::{FormatContext, FormatWriter};

pub use helper::{PeriodFilter, SearchString, SortDirection, Sorting};

/// Stands for the next bound parameter in fragment text.
///
/// The rewriter does not track quoted literals, so this character must
/// never be passed through as literal data.
pub const MARKER: char = '?';
