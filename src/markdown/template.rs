use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{KbError, Result};

/// Errors in a Markdown template or in the values supplied to it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// `{` without a matching `}`
    #[error("{template}:{line}: unclosed '{{'")]
    Unclosed {
        /// Template name
        template: String,
        /// Line of the opening brace
        line: usize,
    },

    /// `}` that does not close a placeholder and is not doubled
    #[error("{template}:{line}: single '}}' encountered, use '}}}}' for a literal brace")]
    UnmatchedClose {
        /// Template name
        template: String,
        /// Line of the brace
        line: usize,
    },

    /// Placeholder name that is not an identifier
    #[error("{template}:{line}: invalid placeholder '{{{name}}}'")]
    InvalidName {
        /// Template name
        template: String,
        /// Line of the placeholder
        line: usize,
        /// Offending name
        name: String,
    },

    /// Placeholder with no supplied value
    #[error("{template}: no value for placeholder '{{{name}}}'")]
    MissingValue {
        /// Template name
        template: String,
        /// Placeholder name
        name: String,
    },

    /// Supplied value the template never uses
    #[error("{template}: template has no placeholder '{{{name}}}'")]
    UnusedValue {
        /// Template name
        template: String,
        /// Value name
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

/// A Markdown page template with `{name}` placeholders.
///
/// `{{` and `}}` stand for literal braces. Templates are parsed when loaded so
/// syntax errors surface before any input table is read.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Load and parse a template file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| KbError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::parse(name, &text)?)
    }

    /// Parse template text
    pub fn parse(name: impl Into<String>, text: &str) -> std::result::Result<Self, TemplateError> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars().peekable();
        let mut line = 1;

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let start_line = line;
                    let mut placeholder = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => {
                                if c == '\n' {
                                    line += 1;
                                }
                                placeholder.push(c);
                            }
                            None => {
                                return Err(TemplateError::Unclosed {
                                    template: name,
                                    line: start_line,
                                })
                            }
                        }
                    }
                    if !is_identifier(&placeholder) {
                        return Err(TemplateError::InvalidName {
                            template: name,
                            line: start_line,
                            name: placeholder,
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                }
                '}' => {
                    return Err(TemplateError::UnmatchedClose {
                        template: name,
                        line,
                    })
                }
                c => {
                    if c == '\n' {
                        line += 1;
                    }
                    literal.push(c);
                }
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Text(literal));
        }

        Ok(Self { name, segments })
    }

    /// Template name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distinct placeholder names in sorted order
    pub fn placeholders(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// Substitute every placeholder.
    ///
    /// Every placeholder needs a value and every value needs a placeholder; a
    /// mismatch means the template and the generator disagree about the page.
    pub fn render(&self, values: &[(&str, &str)]) -> std::result::Result<String, TemplateError> {
        let values: BTreeMap<&str, &str> = values.iter().copied().collect();
        let placeholders = self.placeholders();

        if let Some(unused) = values.keys().find(|k| !placeholders.contains(*k)) {
            return Err(TemplateError::UnusedValue {
                template: self.name.clone(),
                name: unused.to_string(),
            });
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => match values.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::MissingValue {
                            template: self.name.clone(),
                            name: name.clone(),
                        })
                    }
                },
            }
        }
        Ok(out)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

/// Output file name for a template: the template file name without its
/// trailing `.in` (`probes.md.in` gives `probes.md`).
pub fn output_name(template_path: &Path) -> Option<String> {
    let name = template_path.file_name()?.to_string_lossy();
    name.strip_suffix(".in").map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_and_unescapes() {
        let template = Template::parse(
            "probes.md.in",
            "---\nlayout: {{ page }}\n---\n\n{probe_table}\n",
        )
        .unwrap();
        let page = template.render(&[("probe_table", "| A |")]).unwrap();

        assert_eq!(page, "---\nlayout: { page }\n---\n\n| A |\n");
    }

    #[test]
    fn test_missing_and_unused_values() {
        let template = Template::parse("t.md.in", "{a} and {b}").unwrap();

        assert_eq!(
            template.render(&[("a", "1")]).unwrap_err(),
            TemplateError::MissingValue {
                template: "t.md.in".to_string(),
                name: "b".to_string()
            }
        );
        assert!(matches!(
            template.render(&[("a", "1"), ("b", "2"), ("c", "3")]),
            Err(TemplateError::UnusedValue { .. })
        ));
    }

    #[test]
    fn test_syntax_errors_report_lines() {
        let err = Template::parse("t", "ok\n{open").unwrap_err();
        assert_eq!(err.to_string(), "t:2: unclosed '{'");

        let err = Template::parse("t", "a } b").unwrap_err();
        assert!(matches!(err, TemplateError::UnmatchedClose { line: 1, .. }));

        let err = Template::parse("t", "{not valid}").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidName { .. }));
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = Template::parse("t", "{x}-{x}").unwrap();
        assert_eq!(template.render(&[("x", "y")]).unwrap(), "y-y");
        assert_eq!(template.placeholders().len(), 1);
    }

    #[test]
    fn test_output_name() {
        assert_eq!(
            output_name(Path::new("site/probes.md.in")).as_deref(),
            Some("probes.md")
        );
        assert_eq!(output_name(Path::new("probes.md")), None);
    }
}
