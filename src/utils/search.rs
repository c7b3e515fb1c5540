// src/utils/search.rs

/// Builds an `ILIKE` pattern matching `term` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped with a backslash,
/// which is Postgres' default `LIKE` escape.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
