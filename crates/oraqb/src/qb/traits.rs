//! Trait definitions for query builders.

use crate::error::{QbError, QbResult};
use crate::qb::placeholder::{PlaceholderStyle, count_placeholders, render_placeholders};
use crate::value::{ParamList, Value};

/// Base trait for both builders.
///
/// Provides rendering, parameter extraction and the opt-in validation pass.
pub trait SqlQb {
    /// Build the SQL string.
    fn build_sql(&self) -> String;

    /// Parameters in placeholder order.
    fn params(&self) -> ParamList;

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> String {
        self.build_sql()
    }

    /// Structural checks that builder state alone can answer.
    fn validate_state(&self) -> QbResult<()> {
        Ok(())
    }

    /// Validate builder state and placeholder/parameter agreement.
    ///
    /// Never called implicitly: rendering always succeeds.
    fn validate(&self) -> QbResult<()> {
        self.validate_state()?;
        let placeholders = count_placeholders(&self.build_sql());
        let params = self.params().len();
        if placeholders != params {
            return Err(QbError::ParamMismatch {
                placeholders,
                params,
            });
        }
        Ok(())
    }

    /// Render-and-freeze into an immutable [`BuiltQuery`].
    fn to_query(&self) -> BuiltQuery {
        BuiltQuery::new(self.build_sql(), self.params())
    }

    /// [`validate`](SqlQb::validate), then [`to_query`](SqlQb::to_query).
    fn build_checked(&self) -> QbResult<BuiltQuery> {
        self.validate()?;
        Ok(self.to_query())
    }
}

/// The result of building a query: SQL text plus its bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: ParamList,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, params: ParamList) -> Self {
        Self { sql, params }
    }

    /// SQL with placeholders rendered in `style`.
    pub fn to_sql_with(&self, style: PlaceholderStyle) -> String {
        render_placeholders(&self.sql, style)
    }

    /// Parameters as a slice, ready to bind in order.
    pub fn params(&self) -> &[Value] {
        self.params.as_slice()
    }

    pub fn into_parts(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}
