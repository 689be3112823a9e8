//! SQL string literal helpers.
//!
//! Builders take raw SQL fragments verbatim. When a caller must inline a
//! string literal (for example a CASE result), [`quote_literal`] produces a
//! properly escaped one.

/// Wrap `s` in single quotes, doubling any embedded single quote.
///
/// ```
/// assert_eq!(oraqb::quote_literal("Active"), "'Active'");
/// assert_eq!(oraqb::quote_literal("O'Brien"), "'O''Brien'");
/// ```
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Escape `s` for use between quotes the caller already writes.
pub(crate) fn escape_literal_body(s: &str) -> String {
    s.replace('\'', "''")
}
