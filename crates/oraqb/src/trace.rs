//! `tracing` events for renders and union snapshots.
//!
//! Every function here compiles to nothing without the `tracing` feature.

#[cfg(feature = "tracing")]
const TARGET: &str = "oraqb.sql";

/// Maximum SQL length (in bytes) included in events.
#[cfg(feature = "tracing")]
const MAX_SQL_LENGTH: usize = 200;

#[cfg(feature = "tracing")]
fn truncate_sql(sql: &str) -> std::borrow::Cow<'_, str> {
    if sql.len() <= MAX_SQL_LENGTH {
        return std::borrow::Cow::Borrowed(sql);
    }
    let mut end = MAX_SQL_LENGTH;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    std::borrow::Cow::Owned(format!("{}...", &sql[..end]))
}

/// A builder produced its final text.
#[allow(unused_variables)]
pub(crate) fn rendered(kind: &'static str, sql: &str, param_count: usize) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: TARGET,
        kind,
        param_count,
        sql = %truncate_sql(sql),
        "rendered query"
    );
}

/// A union member was frozen into a builder.
#[allow(unused_variables)]
pub(crate) fn union_snapshot(mode: &str, members: usize, param_count: usize) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: TARGET,
        mode,
        members,
        param_count,
        "froze union member"
    );
}

/// A call was accepted but has no effect on the output.
#[allow(unused_variables)]
pub(crate) fn ignored(op: &'static str, reason: &'static str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(target: TARGET, op, reason, "ignored builder call");
}
