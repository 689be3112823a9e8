//! SELECT query builder with flat and grouped WHERE conditions, Oracle
//! pagination and UNION / UNION ALL combination.

use crate::error::{QbError, QbResult};
use crate::qb::case::{CaseExpr, nested_case_sql};
use crate::qb::pagination::Pagination;
use crate::qb::traits::SqlQb;
use crate::qb::union::{UnionMember, UnionMode, UnionSet};
use crate::qb::{IntoCondition, with_alias};
use crate::trace;
use crate::value::{ParamList, Value};

/// Accumulates the pieces of one logical SELECT.
///
/// Every configuring call mutates and returns the builder; nothing is rendered
/// until [`build`](QueryBuilder::build). Conditions are raw SQL fragments with
/// positional `?` placeholders, and their bind values are tracked so that
/// [`parameters`](QueryBuilder::parameters) always lines up with the rendered
/// text.
///
/// # Union mode
///
/// The first [`union`](QueryBuilder::union) / [`union_all`](QueryBuilder::union_all)
/// call freezes this builder's current state as the first member. From then on
/// the output is the frozen members only: later column, join, condition,
/// ordering and pagination calls are accepted but have no visible effect.
///
/// # Example
/// ```
/// use oraqb::{QueryBuilder, params};
///
/// let qb = QueryBuilder::new("T t")
///     .select_column("t.id", Some("id"))
///     .r#where("t.x = ?", params![5]);
/// assert_eq!(qb.build(), "SELECT t.id AS id FROM T t WHERE t.x = ?");
/// assert_eq!(qb.parameters(), params![5]);
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct QueryBuilder {
    /// FROM target (table + optional alias)
    source: String,
    /// Rendered "expr [AS alias]" columns
    columns: Vec<String>,
    /// Raw JOIN fragments
    joins: Vec<String>,
    /// Conditions joined with AND
    where_flat: Vec<String>,
    /// Bind values of `where_flat`, in order
    flat_params: ParamList,
    /// Parenthesized condition groups
    where_groups: Vec<String>,
    /// Bind values of `where_groups`, in order
    group_params: ParamList,
    /// ORDER BY expression
    order_by: Option<String>,
    pagination: Pagination,
    union: UnionSet,
}

impl QueryBuilder {
    /// Create an empty query selecting from `source`. No validation is performed.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            columns: Vec::new(),
            joins: Vec::new(),
            where_flat: Vec::new(),
            flat_params: ParamList::new(),
            where_groups: Vec::new(),
            group_params: ParamList::new(),
            order_by: None,
            pagination: Pagination::default(),
            union: UnionSet::default(),
        }
    }

    fn note_if_frozen(&self, op: &'static str) {
        if self.union.is_active() {
            trace::ignored(op, "builder is in union mode");
        }
    }

    // ==================== SELECT columns ====================

    /// Append `expr` or `expr AS alias`. An empty alias renders the bare expression.
    pub fn select_column(mut self, expr: &str, alias: Option<&str>) -> Self {
        self.note_if_frozen("select_column");
        self.columns.push(with_alias(expr, alias));
        self
    }

    /// Append several `(expr, alias)` columns in order.
    pub fn select_columns(mut self, columns: &[(&str, Option<&str>)]) -> Self {
        self.note_if_frozen("select_columns");
        for (expr, alias) in columns {
            self.columns.push(with_alias(expr, *alias));
        }
        self
    }

    /// Append a CASE column from an interleaved `[cond, result, ..., else?]` slice.
    ///
    /// Results are quoted verbatim, see [`CaseExpr`] for the injection caveat.
    pub fn select_case(self, alias: &str, conditions_and_results: &[&str]) -> Self {
        self.select_case_expr(alias, &CaseExpr::from_interleaved(conditions_and_results))
    }

    /// Append a typed [`CaseExpr`] column.
    pub fn select_case_expr(mut self, alias: &str, case: &CaseExpr) -> Self {
        self.note_if_frozen("select_case");
        self.columns.push(with_alias(&case.to_sql(), Some(alias)));
        self
    }

    /// Append a two-level CASE column:
    /// `CASE WHEN outer THEN (CASE WHEN inner THEN 'inner_result' ELSE 'else' END) ELSE 'else' END`.
    pub fn select_nested_case(
        mut self,
        alias: &str,
        outer_condition: &str,
        inner_condition: &str,
        inner_result: &str,
        else_result: &str,
    ) -> Self {
        self.note_if_frozen("select_nested_case");
        let expr = nested_case_sql(outer_condition, inner_condition, inner_result, else_result);
        self.columns.push(with_alias(&expr, Some(alias)));
        self
    }

    // ==================== JOIN ====================

    /// Append a raw join fragment, e.g. `"JOIN dept d ON d.id = e.dept_id"`.
    pub fn join(mut self, clause: &str) -> Self {
        self.note_if_frozen("join");
        self.joins.push(clause.to_string());
        self
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: &str, on: &str) -> Self {
        self.join(&format!("INNER JOIN {} ON {}", table, on))
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: &str, on: &str) -> Self {
        self.join(&format!("LEFT JOIN {} ON {}", table, on))
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: &str, on: &str) -> Self {
        self.join(&format!("RIGHT JOIN {} ON {}", table, on))
    }

    /// Add FULL OUTER JOIN.
    pub fn full_join(self, table: &str, on: &str) -> Self {
        self.join(&format!("FULL OUTER JOIN {} ON {}", table, on))
    }

    // ==================== WHERE conditions ====================

    /// Add a condition to the flat AND-list, binding `params` to its `?` markers.
    ///
    /// A missing or blank condition is a no-op and its params are dropped too.
    pub fn r#where<V: Into<Value>>(
        mut self,
        condition: impl IntoCondition,
        params: impl IntoIterator<Item = V>,
    ) -> Self {
        self.note_if_frozen("where");
        match condition.into_condition() {
            Some(condition) => {
                self.where_flat.push(condition);
                self.flat_params.extend_values(params);
            }
            None => trace::ignored("where", "empty condition"),
        }
        self
    }

    /// Add a parenthesized condition group, binding `params` to its `?` markers.
    ///
    /// Same emptiness rule as [`r#where`](QueryBuilder::r#where).
    pub fn and_where<V: Into<Value>>(
        mut self,
        condition: impl IntoCondition,
        params: impl IntoIterator<Item = V>,
    ) -> Self {
        self.note_if_frozen("and_where");
        match condition.into_condition() {
            Some(condition) => {
                self.where_groups.push(format!("({})", condition));
                self.group_params.extend_values(params);
            }
            None => trace::ignored("and_where", "empty condition"),
        }
        self
    }

    /// Add one `(c1 OR c2 OR ...)` group from the non-empty entries.
    ///
    /// Takes no parameters, so entries must be literal. No-op if every entry is empty.
    pub fn or_where_group<C: IntoCondition>(mut self, conditions: impl IntoIterator<Item = C>) -> Self {
        self.note_if_frozen("or_where_group");
        let group: Vec<String> = conditions
            .into_iter()
            .filter_map(IntoCondition::into_condition)
            .collect();
        if group.is_empty() {
            trace::ignored("or_where_group", "no non-empty conditions");
        } else {
            self.where_groups.push(format!("({})", group.join(" OR ")));
        }
        self
    }

    // ==================== Ordering & Pagination ====================

    /// Set the ORDER BY expression (overwrites).
    pub fn order_by(mut self, expr: &str) -> Self {
        self.note_if_frozen("order_by");
        self.order_by = Some(expr.to_string());
        self
    }

    /// Set the row limit.
    pub fn limit(self, n: i64) -> Self {
        self.limit_opt(Some(n))
    }

    /// Set or clear the row limit.
    pub fn limit_opt(mut self, n: Option<i64>) -> Self {
        self.note_if_frozen("limit");
        self.pagination.limit = n;
        self
    }

    /// Set the row offset.
    pub fn offset(self, n: i64) -> Self {
        self.offset_opt(Some(n))
    }

    /// Set or clear the row offset.
    pub fn offset_opt(mut self, n: Option<i64>) -> Self {
        self.note_if_frozen("offset");
        self.pagination.offset = n;
        self
    }

    /// Limit to `when_true` rows if `condition` holds, else `when_false`. Offset untouched.
    pub fn limit_based_on_condition(mut self, condition: bool, when_true: i64, when_false: i64) -> Self {
        self.note_if_frozen("limit_based_on_condition");
        self.pagination.limit_if(condition, when_true, when_false);
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: i64, per_page: i64) -> Self {
        self.note_if_frozen("paginate");
        self.pagination.paginate(page, per_page);
        self
    }

    // ==================== UNION ====================

    /// Combine with `other` using `UNION`.
    ///
    /// On the first union call this builder's current simple form is frozen as
    /// the first member. `other` is frozen as it is right now; later changes to
    /// it are not seen. Condition groups and pagination are never part of a
    /// member.
    pub fn union(self, other: &QueryBuilder) -> Self {
        self.combine(UnionMode::Union, other)
    }

    /// Combine with `other` using `UNION ALL`. Same mechanics as [`union`](QueryBuilder::union).
    pub fn union_all(self, other: &QueryBuilder) -> Self {
        self.combine(UnionMode::UnionAll, other)
    }

    fn combine(mut self, mode: UnionMode, other: &QueryBuilder) -> Self {
        if !self.union.is_active() {
            let first = self.simple_member();
            self.union.seed(first);
        }
        self.union.push(mode, other.as_union_member());
        self
    }

    /// Snapshot used when this builder joins someone else's union.
    fn as_union_member(&self) -> UnionMember {
        if self.union.is_active() {
            UnionMember {
                sql: format!("({})", self.union.sql()),
                params: self.union.params(),
            }
        } else {
            self.simple_member()
        }
    }

    fn simple_member(&self) -> UnionMember {
        UnionMember {
            sql: self.render_simple(),
            params: self.flat_params.clone(),
        }
    }

    // ==================== Accessors ====================

    /// The FROM target given at construction.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn union_mode(&self) -> UnionMode {
        self.union.mode()
    }

    /// Whether a union call has frozen this builder.
    pub fn is_union(&self) -> bool {
        self.union.is_active()
    }

    /// Frozen members, empty unless in union mode.
    pub fn union_members(&self) -> &[UnionMember] {
        self.union.members()
    }

    // ==================== Build ====================

    fn write_head(&self, sql: &mut String) {
        sql.push_str("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        sql.push_str(" FROM ");
        sql.push_str(&self.source);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }
    }

    fn write_order_by(&self, sql: &mut String) {
        if let Some(ref order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
    }

    /// Columns, FROM, joins, flat WHERE and ORDER BY only: the union member form.
    fn render_simple(&self) -> String {
        let mut sql = String::new();
        self.write_head(&mut sql);
        if !self.where_flat.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_flat.join(" AND "));
        }
        self.write_order_by(&mut sql);
        sql
    }

    fn render_full(&self) -> String {
        let mut sql = String::new();
        self.write_head(&mut sql);

        // Flat conditions first, then groups, under a single WHERE.
        let conditions: Vec<&str> = self
            .where_flat
            .iter()
            .chain(self.where_groups.iter())
            .map(String::as_str)
            .collect();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        self.write_order_by(&mut sql);
        self.pagination.write_to(&mut sql);
        sql
    }

    /// Render the statement.
    ///
    /// In union mode this is the frozen members joined by the union operator.
    /// Otherwise:
    /// `SELECT <columns|*> FROM <source> [joins] [WHERE <flat AND groups>] [ORDER BY ..] [pagination]`.
    pub fn build(&self) -> String {
        let sql = if self.union.is_active() {
            self.union.sql()
        } else {
            self.render_full()
        };
        trace::rendered("select", &sql, self.param_count());
        sql
    }

    fn param_count(&self) -> usize {
        if self.union.is_active() {
            self.union.members().iter().map(|m| m.params.len()).sum()
        } else {
            self.flat_params.len() + self.group_params.len()
        }
    }

    /// Bind values in the order their placeholders appear in [`build`](QueryBuilder::build).
    pub fn parameters(&self) -> ParamList {
        if self.union.is_active() {
            return self.union.params();
        }
        let mut params = self.flat_params.clone();
        params.extend(&self.group_params);
        params
    }
}

impl SqlQb for QueryBuilder {
    fn build_sql(&self) -> String {
        self.build()
    }

    fn params(&self) -> ParamList {
        self.parameters()
    }

    fn validate_state(&self) -> QbResult<()> {
        if self.source.trim().is_empty() {
            return Err(QbError::malformed("FROM source is empty"));
        }
        if !self.union.is_active() {
            self.pagination.validate()?;
        }
        Ok(())
    }
}
