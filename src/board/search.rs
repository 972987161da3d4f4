//! Literal substring search over message content.
//!
//! User input is matched with SQL LIKE. Characters with pattern meaning
//! (`%`, `_`, and the escape character itself) are escaped so arbitrary
//! input always matches literally: searching `50%` finds literal `50%`,
//! never acts as a wildcard. SQLite LIKE is ASCII case-insensitive, which
//! is the board's match semantics.

/// Escape LIKE pattern metacharacters with a backslash.
///
/// Pure function, independent of the storage engine; queries using the
/// result must declare `ESCAPE '\'`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// A content filter built from a raw search term.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    term: String,
    pattern: Option<String>,
}

impl ContentFilter {
    /// Build a filter from raw input. Whitespace-only input yields a
    /// match-all filter with an empty normalized term.
    pub fn new(raw: &str) -> Self {
        let term = raw.trim();
        if term.is_empty() {
            return Self::default();
        }
        Self {
            term: term.to_string(),
            pattern: Some(format!("%{}%", escape_like(term))),
        }
    }

    /// Normalized (trimmed) term for echoing back in the UI.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// LIKE pattern with `\` escapes, or `None` for match-all.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}
