//! Convenient imports for typical `oraqb` usage.
//!
//! ```
//! use oraqb::prelude::*;
//! ```

pub use crate::{
    BuiltQuery, CaseExpr, OuterQueryBuilder, ParamList, PlaceholderStyle, QbError, QbResult,
    QueryBuilder, SqlQb, Value, params, quote_literal,
};
