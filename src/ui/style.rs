use console::style;
use std::fmt::Display;

/// Green bold: confirmations ("Saved", "Signed in").
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: outfit titles and section headers.
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: ids, timestamps, secondary lines.
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: warnings and rewear notices.
pub fn warn<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Green: values the user set (names, colours, paths).
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: list numbers and bullets.
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan: field labels.
pub fn label<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Cyan underlined: grounding source links.
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}
