//! CASE expression builders.
//!
//! # Injection
//!
//! Conditions are raw SQL and result values are wrapped in single quotes
//! **verbatim**. A result containing `'` produces broken (or hostile) SQL.
//! Call [`CaseExpr::escape_results`] or pre-escape with
//! [`quote_literal`](crate::quote_literal) when results are not trusted.

use crate::literal::escape_literal_body;

/// A searched `CASE WHEN ... THEN '...' [ELSE '...'] END` expression with string-literal results.
///
/// # Example
/// ```
/// use oraqb::CaseExpr;
///
/// let case = CaseExpr::new()
///     .when("e.status = 'A'", "Active")
///     .when("e.status = 'I'", "Inactive")
///     .otherwise("Unknown");
/// assert_eq!(
///     case.to_sql(),
///     "CASE WHEN e.status = 'A' THEN 'Active' WHEN e.status = 'I' THEN 'Inactive' ELSE 'Unknown' END"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct CaseExpr {
    branches: Vec<(String, String)>,
    otherwise: Option<String>,
    escape: bool,
}

impl CaseExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an interleaved `[cond, result, cond, result, ..., else?]` slice.
    ///
    /// An odd-length slice means the last entry is the ELSE result.
    pub fn from_interleaved(parts: &[&str]) -> Self {
        let mut case = Self::new();
        for pair in parts.chunks_exact(2) {
            case.branches.push((pair[0].to_string(), pair[1].to_string()));
        }
        if parts.len() % 2 == 1 {
            case.otherwise = parts.last().map(|s| s.to_string());
        }
        case
    }

    /// Add a `WHEN condition THEN 'result'` branch.
    pub fn when(mut self, condition: impl Into<String>, result: impl Into<String>) -> Self {
        self.branches.push((condition.into(), result.into()));
        self
    }

    /// Set the `ELSE 'result'` branch (overwrites a previous one).
    pub fn otherwise(mut self, result: impl Into<String>) -> Self {
        self.otherwise = Some(result.into());
        self
    }

    /// Double single quotes inside result values when rendering.
    pub fn escape_results(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Number of WHEN branches.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    fn literal<'a>(&self, result: &'a str) -> std::borrow::Cow<'a, str> {
        if self.escape {
            std::borrow::Cow::Owned(escape_literal_body(result))
        } else {
            std::borrow::Cow::Borrowed(result)
        }
    }

    /// Render the expression.
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("CASE ");
        for (condition, result) in &self.branches {
            sql.push_str("WHEN ");
            sql.push_str(condition);
            sql.push_str(" THEN '");
            sql.push_str(&self.literal(result));
            sql.push_str("' ");
        }
        if let Some(ref otherwise) = self.otherwise {
            sql.push_str("ELSE '");
            sql.push_str(&self.literal(otherwise));
            sql.push_str("' ");
        }
        sql.push_str("END");
        sql
    }
}

/// Two-level CASE where `else_result` serves as both the inner and the outer ELSE.
pub(crate) fn nested_case_sql(
    outer_condition: &str,
    inner_condition: &str,
    inner_result: &str,
    else_result: &str,
) -> String {
    format!(
        "CASE WHEN {outer_condition} THEN (CASE WHEN {inner_condition} THEN '{inner_result}' \
         ELSE '{else_result}' END) ELSE '{else_result}' END"
    )
}
