use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

use super::{BibEntry, BibError};

/// Month macros every BibTeX style predefines
const MONTHS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    macros: BTreeMap<String, String>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let macros = MONTHS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            chars: input.chars().peekable(),
            line: 1,
            macros,
        }
    }

    fn error(&self, message: impl Into<String>) -> BibError {
        BibError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), BibError> {
        self.skip_whitespace();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of file", expected))),
        }
    }

    fn identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || "_-:.+/'".contains(c) {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        ident
    }

    /// Body of a `{...}` group after the opening brace, without the closing one
    fn braced(&mut self) -> Result<String, BibError> {
        let start = self.line;
        let mut depth = 0usize;
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('{') => {
                    depth += 1;
                    text.push('{');
                }
                Some('}') if depth == 0 => return Ok(text),
                Some('}') => {
                    depth -= 1;
                    text.push('}');
                }
                Some(c) => text.push(c),
                None => {
                    return Err(BibError::Syntax {
                        line: start,
                        message: "unbalanced braces".to_string(),
                    })
                }
            }
        }
    }

    /// Body of a `"..."` value after the opening quote
    fn quoted(&mut self) -> Result<String, BibError> {
        let start = self.line;
        let mut depth = 0usize;
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') if depth == 0 => return Ok(text),
                Some('{') => {
                    depth += 1;
                    text.push('{');
                }
                Some('}') => {
                    depth = depth.saturating_sub(1);
                    text.push('}');
                }
                Some(c) => text.push(c),
                None => {
                    return Err(BibError::Syntax {
                        line: start,
                        message: "unterminated string".to_string(),
                    })
                }
            }
        }
    }

    /// A field value: parts joined with `#`
    fn value(&mut self) -> Result<String, BibError> {
        let mut value = String::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('{') => {
                    self.bump();
                    value.push_str(&self.braced()?);
                }
                Some('"') => {
                    self.bump();
                    value.push_str(&self.quoted()?);
                }
                Some(c) if c.is_ascii_digit() => {
                    while let Some(d) = self.peek().filter(char::is_ascii_digit) {
                        value.push(d);
                        self.bump();
                    }
                }
                Some(c) if c.is_alphabetic() => {
                    let name = self.identifier().to_lowercase();
                    match self.macros.get(&name) {
                        Some(expansion) => value.push_str(expansion),
                        None => {
                            return Err(self.error(format!("undefined string macro '{}'", name)))
                        }
                    }
                }
                Some(c) => return Err(self.error(format!("unexpected '{}' in field value", c))),
                None => return Err(self.error("unexpected end of file in field value")),
            }
            self.skip_whitespace();
            if self.peek() == Some('#') {
                self.bump();
            } else {
                return Ok(normalize_whitespace(&value));
            }
        }
    }

    fn closing_for(&mut self) -> Result<char, BibError> {
        self.skip_whitespace();
        match self.bump() {
            Some('{') => Ok('}'),
            Some('(') => Ok(')'),
            Some(c) => Err(self.error(format!("expected '{{' or '(', found '{}'", c))),
            None => Err(self.error("unexpected end of file after entry type")),
        }
    }

    /// Skip a `@comment` or `@preamble` body
    fn skip_group(&mut self, close: char) -> Result<(), BibError> {
        if close == '}' {
            self.braced().map(|_| ())
        } else {
            self.value()?;
            self.expect(')')
        }
    }

    fn string_definition(&mut self, close: char) -> Result<(), BibError> {
        self.skip_whitespace();
        let name = self.identifier().to_lowercase();
        if name.is_empty() {
            return Err(self.error("missing @string name"));
        }
        self.expect('=')?;
        let value = self.value()?;
        self.expect(close)?;
        self.macros.insert(name, value);
        Ok(())
    }

    fn entry(&mut self, kind: String, close: char, line: usize) -> Result<BibEntry, BibError> {
        self.skip_whitespace();
        let mut key = String::new();
        while let Some(c) = self.peek() {
            if c == ',' || c == close || c.is_whitespace() {
                break;
            }
            key.push(c);
            self.bump();
        }
        if key.is_empty() {
            return Err(self.error(format!("@{} entry without a citation key", kind)));
        }

        let mut fields = BTreeMap::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    let name = self.identifier().to_lowercase();
                    if name.is_empty() {
                        return Err(self.error(format!("malformed field in entry '{}'", key)));
                    }
                    self.expect('=')?;
                    let value = self.value()?;
                    if fields.insert(name.clone(), value).is_some() {
                        return Err(self.error(format!(
                            "field '{}' repeated in entry '{}'",
                            name, key
                        )));
                    }
                }
                None => return Err(self.error(format!("unterminated entry '{}'", key))),
            }
        }

        Ok(BibEntry {
            kind,
            key,
            fields,
            line,
        })
    }

    fn entries(mut self) -> Result<Vec<BibEntry>, BibError> {
        let mut entries = Vec::new();
        // Text outside entries is a comment
        while let Some(c) = self.bump() {
            if c != '@' {
                continue;
            }
            let line = self.line;
            self.skip_whitespace();
            let kind = self.identifier().to_lowercase();
            if kind.is_empty() {
                return Err(self.error("missing entry type after '@'"));
            }
            let close = self.closing_for()?;
            match kind.as_str() {
                "comment" | "preamble" => self.skip_group(close)?,
                "string" => self.string_definition(close)?,
                _ => entries.push(self.entry(kind, close, line)?),
            }
        }
        Ok(entries)
    }
}

fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse every entry of a BibTeX document, in file order.
pub fn parse(input: &str) -> Result<Vec<BibEntry>, BibError> {
    let entries = Parser::new(input).entries()?;
    log::debug!("Parsed {} BibTeX entries", entries.len());
    Ok(entries)
}
