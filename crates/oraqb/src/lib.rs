//! # oraqb
//!
//! A fluent builder for parameterized Oracle-style SELECT statements.
//!
//! ## Features
//!
//! - **SQL explicit**: columns, joins and conditions are raw SQL fragments, passed through verbatim
//! - **Ordered binds**: every `?` placeholder has its value tracked in render order
//! - **Oracle pagination**: `OFFSET .. ROWS FETCH NEXT .. ROWS ONLY` and friends
//! - **UNION / UNION ALL**: members are frozen at union time
//! - **Derived tables**: [`OuterQueryBuilder`] wraps a query as `inner_table`
//! - **Opt-in validation**: [`SqlQb::validate`] catches placeholder/parameter drift
//!
//! Nothing here executes SQL. Hand [`QueryBuilder::build`] and
//! [`QueryBuilder::parameters`] to a prepared-statement API.
//!
//! Builders are single-owner values with no internal synchronization; build
//! them on one thread and move them if needed.
//!
//! ## Example
//!
//! ```
//! use oraqb::{QueryBuilder, params};
//!
//! let qb = QueryBuilder::new("EMPLOYEE e")
//!     .select_column("e.id", Some("EmployeeId"))
//!     .select_case("Status", &["e.status = 'A'", "Active", "e.status = 'I'", "Inactive", "Unknown"])
//!     .and_where("e.department = ?", params!["IT"])
//!     .or_where_group(["e.city = 'New York'", "e.city = 'Chicago'"])
//!     .order_by("e.name")
//!     .limit(10);
//!
//! assert!(qb.build().ends_with("ORDER BY e.name FETCH FIRST 10 ROWS ONLY"));
//! assert_eq!(qb.parameters(), params!["IT"]);
//! ```

pub mod error;
pub mod literal;
pub mod prelude;
pub mod qb;
pub mod value;

mod trace;

pub use error::{QbError, QbResult};
pub use literal::quote_literal;
pub use value::{ParamList, Value};

pub use qb::{
    BuiltQuery, CaseExpr, INNER_TABLE_ALIAS, IntoCondition, OuterQueryBuilder, Pagination,
    PlaceholderStyle, QueryBuilder, SqlQb, UnionMember, UnionMode,
};
