/// Precomposed character for an accent command applied to a letter
fn accented(accent: char, letter: char) -> Option<char> {
    let table: &[(char, &str, &str)] = &[
        ('"', "aeiouyAEIOU", "äëïöüÿÄËÏÖÜ"),
        ('\'', "aeiouyAEIOUcnsz", "áéíóúýÁÉÍÓÚćńśź"),
        ('`', "aeiouAEIOU", "àèìòùÀÈÌÒÙ"),
        ('^', "aeiouAEIOU", "âêîôûÂÊÎÔÛ"),
        ('~', "anoANO", "ãñõÃÑÕ"),
        ('c', "csCS", "çşÇŞ"),
        ('v', "cszrnCSZRN", "čšžřňČŠŽŘŇ"),
    ];
    let (_, plain, marked) = table.iter().find(|(a, _, _)| *a == accent)?;
    let index = plain.chars().position(|c| c == letter)?;
    marked.chars().nth(index)
}

/// Letter-only commands with a fixed replacement
fn symbol(command: &str) -> Option<&'static str> {
    Some(match command {
        "ss" => "ß",
        "o" => "ø",
        "O" => "Ø",
        "aa" => "å",
        "AA" => "Å",
        "ae" => "æ",
        "AE" => "Æ",
        "l" => "ł",
        "L" => "Ł",
        "i" => "ı",
        _ => return None,
    })
}

/// Convert BibTeX field text to plain Unicode text.
///
/// Handles common accent commands (`\"o`, `{\'e}`, `\c{c}`), escaped
/// specials (`\&`, `\%`, `\_`), `--` dashes and `~` ties. Other commands such
/// as `\emph` are dropped while their arguments are kept. Grouping braces are
/// removed.
pub fn to_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                let Some(&next) = chars.get(i + 1) else {
                    i += 1;
                    continue;
                };
                if "&%_$#{}".contains(next) {
                    out.push(next);
                    i += 2;
                } else if "\"'`^~".contains(next) {
                    let (letter, consumed) = accent_argument(&chars, i + 2);
                    push_accented(&mut out, next, letter);
                    i += 2 + consumed;
                } else if next.is_ascii_alphabetic() {
                    let start = i + 1;
                    let mut end = start;
                    while end < chars.len() && chars[end].is_ascii_alphabetic() {
                        end += 1;
                    }
                    let command: String = chars[start..end].iter().collect();
                    i = end;
                    if command == "c" || command == "v" {
                        while chars.get(i) == Some(&' ') {
                            i += 1;
                        }
                        let (letter, consumed) = accent_argument(&chars, i);
                        let accent = if command == "c" { 'c' } else { 'v' };
                        push_accented(&mut out, accent, letter);
                        i += consumed;
                    } else if let Some(s) = symbol(&command) {
                        out.push_str(s);
                        // A space after a letter command only terminates it
                        if chars.get(i) == Some(&' ') {
                            i += 1;
                        }
                    }
                } else {
                    out.push(next);
                    i += 2;
                }
            }
            '{' | '}' => i += 1,
            '~' => {
                out.push(' ');
                i += 1;
            }
            '-' if chars.get(i + 1) == Some(&'-') => {
                if chars.get(i + 2) == Some(&'-') {
                    out.push('—');
                    i += 3;
                } else {
                    out.push('–');
                    i += 2;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The letter an accent applies to, either bare (`\"o`) or braced (`\"{o}`),
/// and how many characters it spans.
fn accent_argument(chars: &[char], at: usize) -> (Option<char>, usize) {
    match chars.get(at) {
        Some('{') => match (chars.get(at + 1), chars.get(at + 2)) {
            (Some(&letter), Some('}')) => (Some(letter), 3),
            (Some('}'), _) => (None, 2),
            _ => (None, 1),
        },
        Some(&letter) if letter.is_alphabetic() => (Some(letter), 1),
        _ => (None, 0),
    }
}

fn push_accented(out: &mut String, accent: char, letter: Option<char>) {
    if let Some(letter) = letter {
        out.push(accented(accent, letter).unwrap_or(letter));
    }
}
