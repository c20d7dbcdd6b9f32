//! Shared text utilities for diagram emission
//!
//! Identifier sanitization and member-text escaping used by every encoder,
//! so block labels and relationship endpoints always agree.

use super::model::UNKNOWN_NAME;

/// Reduce a name to a Mermaid-safe identifier
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`. An empty name becomes
/// `Unknown`. The result always matches `[A-Za-z0-9_]+`.
///
/// # Example
/// ```
/// use classgraph::core::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("ns.Base<T>"), "ns_Base_T_");
/// assert_eq!(sanitize_identifier(""), "Unknown");
/// ```
pub fn sanitize_identifier(name: &str) -> String {
    if name.is_empty() {
        return UNKNOWN_NAME.to_string();
    }
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Escape type or member text for use inside a class body
///
/// Angle brackets become `~` (Mermaid generic notation), braces are dropped,
/// and whitespace runs including line breaks collapse to one space.
pub fn escape_member_text(text: &str) -> String {
    let escaped: String = text
        .chars()
        .filter(|c| !matches!(c, '{' | '}'))
        .map(|c| if matches!(c, '<' | '>') { '~' } else { c })
        .collect();
    single_line(&escaped)
}

/// Collapse whitespace runs to single spaces and trim the ends
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape a label for a quoted or piped flowchart position
///
/// Mermaid has no escape for `"` or `|` inside labels; they are replaced
/// with entity codes.
pub fn escape_label(text: &str) -> String {
    single_line(text).replace('"', "#quot;").replace('|', "#124;")
}
