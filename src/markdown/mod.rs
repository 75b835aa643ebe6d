//! Markdown building blocks: pipe tables, links and `.md.in` templates.

mod table;
mod template;

pub use table::{Align, MarkdownTable};
pub use template::{output_name, Template, TemplateError};

/// Escape a value for use inside a pipe table cell.
///
/// `|` would end the cell and a newline would end the row, so the former is
/// backslash escaped and the latter becomes `<br>`.
pub fn escape_cell(value: &str) -> String {
    value
        .replace("\r\n", "\n")
        .replace('|', "\\|")
        .replace('\n', "<br>")
}

/// Inline link. Spaces in the URL are percent-encoded.
pub fn link(label: &str, url: &str) -> String {
    format!("[{}]({})", label, url.trim().replace(' ', "%20"))
}

/// Inline image
pub fn image(alt: &str, path: &str) -> String {
    format!("![{}]({})", alt, path.trim().replace(' ', "%20"))
}
