//! # BibTeX reading
//!
//! A small reader for the subset of BibTeX found in publication lists:
//! `@type{key, field = {..} | ".." | 2024 | macro, ...}`, `#` concatenation,
//! `@string` macros, and `@comment`/`@preamble` blocks (skipped).

mod latex;
mod parser;


use std::collections::BTreeMap;

pub use latex::to_text;
pub use parser::parse;

/// Malformed BibTeX input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BibError {
    /// Syntax error
    #[error("BibTeX syntax error at line {line}: {message}")]
    Syntax {
        /// Line of the error
        line: usize,
        /// What went wrong
        message: String,
    },
}

/// One bibliography entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    /// Entry type, lowercase (`article`, `book`, ...)
    pub kind: String,
    /// Citation key
    pub key: String,
    /// Fields by lowercase name; values keep their LaTeX markup
    pub fields: BTreeMap<String, String>,
    /// Line where the entry starts
    pub line: usize,
}

impl BibEntry {
    /// Raw field value
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_lowercase())
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Field value converted to plain text
    pub fn text(&self, name: &str) -> Option<String> {
        self.field(name).map(to_text)
    }

    /// Publication year, when the `year` field is a number
    pub fn year(&self) -> Option<i32> {
        self.field("year")?.trim().parse().ok()
    }

    /// Authors in order. Braced names (`{IBEX Consortium}`) are kept whole.
    pub fn authors(&self) -> Vec<Name> {
        self.field("author")
            .map(|authors| split_names(authors).iter().map(|n| Name::parse(n)).collect())
            .unwrap_or_default()
    }
}

/// Split an author list on top-level ` and `
fn split_names(value: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let words: Vec<&str> = value.split_whitespace().collect();

    for word in words {
        if depth == 0 && word.eq_ignore_ascii_case("and") {
            names.push(std::mem::take(&mut current));
            continue;
        }
        for c in word.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    names.push(current);
    names.into_iter().filter(|n| !n.is_empty()).collect()
}

/// A person (or organisation) name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Family name (the whole name for organisations)
    pub last: String,
    /// Given names, possibly empty
    pub first: String,
}

impl Name {
    /// Parse `Last, First`, `First Last` or `{Organisation}`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with('{') && raw.ends_with('}') && !raw.contains(',') {
            return Self {
                last: to_text(raw),
                first: String::new(),
            };
        }
        if let Some((last, first)) = raw.split_once(',') {
            return Self {
                last: to_text(last),
                first: to_text(first),
            };
        }
        let text = to_text(raw);
        match text.rsplit_once(' ') {
            Some((first, last)) => Self {
                last: last.to_string(),
                first: first.to_string(),
            },
            None => Self {
                last: text,
                first: String::new(),
            },
        }
    }

    /// Initials of the given names: `Ziv R.` gives `ZR`, `Jean-Luc` gives `J-L`
    pub fn initials(&self) -> String {
        self.first
            .split_whitespace()
            .map(|part| {
                part.split('-')
                    .filter_map(|p| p.chars().find(|c| c.is_alphabetic()))
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join("-")
            })
            .collect()
    }

    /// `Last Initials`, the form used in citations
    pub fn short(&self) -> String {
        let initials = self.initials();
        if initials.is_empty() {
            self.last.clone()
        } else {
            format!("{} {}", self.last, initials)
        }
    }
}
