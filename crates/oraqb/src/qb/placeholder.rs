//! Positional `?` placeholder scanning.
//!
//! A `?` inside a single-quoted string literal or a double-quoted identifier
//! is text, not a placeholder.

/// How placeholders appear in rendered SQL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` markers, bound positionally (JDBC/ODBC style).
    #[default]
    Question,
    /// `:1, :2, ...` markers (Oracle native bind style).
    Numbered,
}

enum Token {
    Text(char),
    Placeholder,
}

/// Walk `sql`, reporting each bind marker and every other char.
fn scan(sql: &str, mut visit: impl FnMut(Token)) {
    let mut in_single = false;
    let mut in_double = false;
    for ch in sql.chars() {
        match ch {
            '\'' if !in_double => {
                in_single = !in_single;
                visit(Token::Text(ch));
            }
            '"' if !in_single => {
                in_double = !in_double;
                visit(Token::Text(ch));
            }
            '?' if !in_single && !in_double => visit(Token::Placeholder),
            _ => visit(Token::Text(ch)),
        }
    }
}

/// Count bind markers in `sql`.
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    scan(sql, |token| {
        if matches!(token, Token::Placeholder) {
            count += 1;
        }
    });
    count
}

/// Rewrite `?` markers in the requested style.
pub fn render_placeholders(sql: &str, style: PlaceholderStyle) -> String {
    match style {
        PlaceholderStyle::Question => sql.to_string(),
        PlaceholderStyle::Numbered => {
            let mut out = String::with_capacity(sql.len() + 8);
            let mut idx = 0usize;
            scan(sql, |token| match token {
                Token::Text(ch) => out.push(ch),
                Token::Placeholder => {
                    idx += 1;
                    out.push(':');
                    out.push_str(&idx.to_string());
                }
            });
            out
        }
    }
}
