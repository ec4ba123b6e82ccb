//! Attribute value text: lexer, parser and the extraction helpers used by
//! the sync layer

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::{AttrValue, Unit};
pub use grammar::parse_value;

/// Read a dp length (`8dp`, `8dip`, `0`) as an integer.
///
/// Returns `None` for anything else, including lengths in other units and
/// values that do not fit in an `i32`.
pub fn extract_dp(text: &str) -> Option<i32> {
    parse_value(text)
        .ok()?
        .as_dp()
        .and_then(|v| i32::try_from(v).ok())
}

const ID_PREFIXES: [&str; 4] = ["@+id/", "@id/", "@+android:id/", "@android:id/"];

/// Read the id name out of an `@+id/name` style reference.
///
/// The name is everything after the prefix, so ids such as `b.ok` or
/// `my-button` that the value grammar cannot tokenize still resolve.
pub fn extract_id(text: &str) -> Option<String> {
    let text = text.trim();
    let name = ID_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))?;
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some(name.to_string())
}

/// Format a dp length the way the attribute model stores it
pub fn format_dp(value: i32) -> String {
    format!("{}dp", value)
}

/// Format an id reference the way the attribute model stores it
pub fn format_id_reference(name: &str) -> String {
    format!("@+id/{}", name)
}
