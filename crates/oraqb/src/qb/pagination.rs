//! Oracle row-limiting clause.
//!
//! The textual forms below are a compatibility contract with the target
//! dialect and are reproduced verbatim:
//!
//! | limit | offset | clause                                   |
//! |-------|--------|------------------------------------------|
//! | -     | -      | *(none)*                                 |
//! | L     | -      | `FETCH FIRST L ROWS ONLY`                |
//! | -     | O      | `OFFSET O ROWS`                          |
//! | L     | O      | `OFFSET O ROWS FETCH NEXT L ROWS ONLY`   |

use crate::error::{QbError, QbResult};

/// Row-limiting bounds shared by both builders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    /// Render the clause without a leading space, or `None` when neither bound is set.
    pub fn clause(&self) -> Option<String> {
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => Some(format!(
                "OFFSET {offset} ROWS FETCH NEXT {limit} ROWS ONLY"
            )),
            (Some(limit), None) => Some(format!("FETCH FIRST {limit} ROWS ONLY")),
            (None, Some(offset)) => Some(format!("OFFSET {offset} ROWS")),
            (None, None) => None,
        }
    }

    /// Append ` <clause>` to `sql` if any bound is set.
    pub(crate) fn write_to(&self, sql: &mut String) {
        if let Some(clause) = self.clause() {
            sql.push(' ');
            sql.push_str(&clause);
        }
    }

    /// Pick one of two limits; leaves the offset alone.
    pub(crate) fn limit_if(&mut self, condition: bool, when_true: i64, when_false: i64) {
        self.limit = Some(if condition { when_true } else { when_false });
    }

    /// 1-based page helper. `page` and `per_page` are clamped to >= 1; the
    /// offset saturates at `i64::MAX`.
    pub(crate) fn paginate(&mut self, page: i64, per_page: i64) {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = Some(size);
        self.offset = Some((p - 1).saturating_mul(size));
    }

    pub(crate) fn validate(&self) -> QbResult<()> {
        if let Some(limit) = self.limit.filter(|n| *n < 0) {
            return Err(QbError::invalid_fragment(format!(
                "limit must be non-negative, got {limit}"
            )));
        }
        if let Some(offset) = self.offset.filter(|n| *n < 0) {
            return Err(QbError::invalid_fragment(format!(
                "offset must be non-negative, got {offset}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(limit: Option<i64>, offset: Option<i64>) -> Option<String> {
        Pagination { limit, offset }.clause()
    }

    #[test]
    fn test_clause_forms() {
        assert_eq!(clause(None, None), None);
        assert_eq!(clause(Some(10), None).as_deref(), Some("FETCH FIRST 10 ROWS ONLY"));
        assert_eq!(clause(None, Some(20)).as_deref(), Some("OFFSET 20 ROWS"));
        assert_eq!(
            clause(Some(10), Some(20)).as_deref(),
            Some("OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY")
        );
    }

    #[test]
    fn test_limit_if_keeps_offset() {
        let mut p = Pagination { limit: None, offset: Some(5) };
        p.limit_if(false, 100, 2000);
        assert_eq!(p, Pagination { limit: Some(2000), offset: Some(5) });
    }

    #[test]
    fn test_paginate_clamps() {
        let mut p = Pagination::default();
        p.paginate(0, 0);
        assert_eq!(p, Pagination { limit: Some(1), offset: Some(0) });
        p.paginate(3, 25);
        assert_eq!(p, Pagination { limit: Some(25), offset: Some(50) });
    }

    #[test]
    fn test_paginate_saturates() {
        let mut p = Pagination::default();
        p.paginate(i64::MAX, 2);
        assert_eq!(p, Pagination { limit: Some(2), offset: Some(i64::MAX) });
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_bounds() {
        let err = Pagination { limit: Some(-1), offset: None }.validate().unwrap_err();
        assert!(err.is_invalid_fragment());
        let err = Pagination { limit: None, offset: Some(-3) }.validate().unwrap_err();
        assert!(err.is_invalid_fragment());
        assert!(Pagination { limit: Some(0), offset: Some(0) }.validate().is_ok());
    }
}
