//! Derived-table wrapper around a [`QueryBuilder`].

use crate::error::QbResult;
use crate::qb::pagination::Pagination;
use crate::qb::select::QueryBuilder;
use crate::qb::traits::SqlQb;
use crate::qb::with_alias;
use crate::trace;
use crate::value::ParamList;

/// Alias given to the wrapped query in the outer FROM clause.
pub const INNER_TABLE_ALIAS: &str = "inner_table";

/// Wraps one [`QueryBuilder`] as `(<inner>) inner_table`.
///
/// The outer layer only reads the inner builder. Its pagination renders as
/// literals, so it binds no values of its own: [`parameters`](OuterQueryBuilder::parameters)
/// is always exactly the inner builder's, before or after any `build()`.
///
/// # Example
/// ```
/// use oraqb::{OuterQueryBuilder, QueryBuilder};
///
/// let inner = QueryBuilder::new("STUDENT s").select_column("s.id", Some("id"));
/// let outer = OuterQueryBuilder::new(inner)
///     .select_from_inner("id", Some("RollNo"))
///     .select_static("'X'", Some("Label"));
/// assert_eq!(
///     outer.build(),
///     "SELECT inner_table.id AS RollNo, 'X' AS Label FROM (SELECT s.id AS id FROM STUDENT s) inner_table"
/// );
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct OuterQueryBuilder {
    inner: QueryBuilder,
    columns: Vec<String>,
    order_by: Option<String>,
    pagination: Pagination,
}

impl OuterQueryBuilder {
    /// Take ownership of `inner`. Clone it first to wrap the same query twice.
    pub fn new(inner: QueryBuilder) -> Self {
        Self {
            inner,
            columns: Vec::new(),
            order_by: None,
            pagination: Pagination::default(),
        }
    }

    /// Append `inner_table.<column> [AS alias]`.
    pub fn select_from_inner(mut self, column: &str, alias: Option<&str>) -> Self {
        let qualified = format!("{}.{}", INNER_TABLE_ALIAS, column);
        self.columns.push(with_alias(&qualified, alias));
        self
    }

    /// Append an unqualified constant or computed expression `[AS alias]`.
    ///
    /// Expressions that read inner columns must spell out `inner_table.` themselves.
    pub fn select_static(mut self, expr: &str, alias: Option<&str>) -> Self {
        self.columns.push(with_alias(expr, alias));
        self
    }

    /// Set the outer ORDER BY expression (overwrites).
    pub fn order_by(mut self, expr: &str) -> Self {
        self.order_by = Some(expr.to_string());
        self
    }

    /// Set the outer row limit.
    pub fn limit(self, n: i64) -> Self {
        self.limit_opt(Some(n))
    }

    /// Set or clear the outer row limit.
    pub fn limit_opt(mut self, n: Option<i64>) -> Self {
        self.pagination.limit = n;
        self
    }

    /// Set the outer row offset.
    pub fn offset(self, n: i64) -> Self {
        self.offset_opt(Some(n))
    }

    /// Set or clear the outer row offset.
    pub fn offset_opt(mut self, n: Option<i64>) -> Self {
        self.pagination.offset = n;
        self
    }

    /// Limit to `when_true` rows if `condition` holds, else `when_false`. Offset untouched.
    pub fn limit_based_on_condition(mut self, condition: bool, when_true: i64, when_false: i64) -> Self {
        self.pagination.limit_if(condition, when_true, when_false);
        self
    }

    /// Pagination helper, same clamping as [`QueryBuilder::paginate`].
    pub fn paginate(mut self, page: i64, per_page: i64) -> Self {
        self.pagination.paginate(page, per_page);
        self
    }

    pub fn inner(&self) -> &QueryBuilder {
        &self.inner
    }

    pub fn into_inner(self) -> QueryBuilder {
        self.inner
    }

    /// Render `SELECT <columns|*> FROM (<inner>) inner_table [ORDER BY ..] [pagination]`.
    pub fn build(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        sql.push_str(" FROM (");
        sql.push_str(&self.inner.build());
        sql.push_str(") ");
        sql.push_str(INNER_TABLE_ALIAS);

        if let Some(ref order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        self.pagination.write_to(&mut sql);

        trace::rendered("outer", &sql, self.inner.parameters().len());
        sql
    }

    /// The inner builder's parameters; the outer layer adds none.
    pub fn parameters(&self) -> ParamList {
        self.inner.parameters()
    }
}

impl SqlQb for OuterQueryBuilder {
    fn build_sql(&self) -> String {
        self.build()
    }

    fn params(&self) -> ParamList {
        self.parameters()
    }

    fn validate_state(&self) -> QbResult<()> {
        self.inner.validate_state()?;
        self.pagination.validate()
    }
}
