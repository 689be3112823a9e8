//! Query builders.
//!
//! - [`QueryBuilder`] accumulates one SELECT (columns, joins, flat and grouped
//!   WHERE conditions with their bind values, ORDER BY, Oracle pagination) and
//!   can absorb sibling builders via UNION / UNION ALL.
//! - [`OuterQueryBuilder`] wraps a `QueryBuilder` as the derived table
//!   `inner_table`, re-aliases its columns and applies its own ORDER BY and
//!   pagination.
//!
//! # Usage
//!
//! ```
//! use oraqb::{qb, params};
//!
//! let active = qb::select_from("EMPLOYEE e")
//!     .select_column("e.id", Some("id"))
//!     .r#where("e.status = ?", params!["A"]);
//! let inactive = qb::select_from("EMPLOYEE e")
//!     .select_column("e.id", Some("id"))
//!     .r#where("e.status = ?", params!["I"]);
//!
//! let outer = qb::wrap(active.union_all(&inactive))
//!     .select_from_inner("id", Some("RollNo"))
//!     .order_by("RollNo ASC")
//!     .limit(100);
//!
//! assert_eq!(
//!     outer.build(),
//!     "SELECT inner_table.id AS RollNo FROM (SELECT e.id AS id FROM EMPLOYEE e WHERE e.status = ? \
//!      UNION ALL SELECT e.id AS id FROM EMPLOYEE e WHERE e.status = ?) inner_table \
//!      ORDER BY RollNo ASC FETCH FIRST 100 ROWS ONLY"
//! );
//! assert_eq!(outer.parameters(), params!["A", "I"]);
//! ```

mod case;
mod outer;
mod pagination;
mod placeholder;
mod select;
mod traits;
mod union;

pub use case::CaseExpr;
pub use outer::{INNER_TABLE_ALIAS, OuterQueryBuilder};
pub use pagination::Pagination;
pub use placeholder::{PlaceholderStyle, count_placeholders, render_placeholders};
pub use select::QueryBuilder;
pub use traits::{BuiltQuery, SqlQb};
pub use union::{UnionMember, UnionMode};

/// Create a SELECT builder over a table or any FROM expression (`"EMPLOYEE e"`).
pub fn select_from(source: &str) -> QueryBuilder {
    QueryBuilder::new(source)
}

/// Wrap `inner` as a derived table.
pub fn wrap(inner: QueryBuilder) -> OuterQueryBuilder {
    OuterQueryBuilder::new(inner)
}

/// A condition fragment that may be absent.
///
/// `None`, `""` and whitespace-only strings all mean "no condition". The text
/// is kept as given, untrimmed.
pub trait IntoCondition {
    fn into_condition(self) -> Option<String>;
}

impl IntoCondition for &str {
    fn into_condition(self) -> Option<String> {
        (!self.trim().is_empty()).then(|| self.to_string())
    }
}

impl IntoCondition for String {
    fn into_condition(self) -> Option<String> {
        (!self.trim().is_empty()).then_some(self)
    }
}

impl IntoCondition for &String {
    fn into_condition(self) -> Option<String> {
        self.as_str().into_condition()
    }
}

impl<T: IntoCondition> IntoCondition for Option<T> {
    fn into_condition(self) -> Option<String> {
        self.and_then(IntoCondition::into_condition)
    }
}

/// `expr` or `expr AS alias`; an empty alias counts as none.
pub(crate) fn with_alias(expr: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) if !alias.is_empty() => format!("{} AS {}", expr, alias),
        _ => expr.to_string(),
    }
}
