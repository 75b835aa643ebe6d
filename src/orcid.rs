//! ORCID identifier checks.
//!
//! An ORCID is `NNNN-NNNN-NNNN-NNNC` where `N` is a digit and the check
//! character `C` is a digit or `X` computed with ISO 7064 MOD 11-2.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern of a single ORCID. ASCII digits only.
pub const ORCID_PATTERN: &str = r"[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9X]";

static ORCID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{}$", ORCID_PATTERN)).expect("ORCID pattern is a valid regex")
});

static BRACKETED_ORCID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\[({})\]", ORCID_PATTERN)).expect("ORCID pattern is a valid regex")
});

/// True when `value` has the ORCID shape (does not check the check digit)
pub fn is_well_formed(value: &str) -> bool {
    ORCID_RE.is_match(value.trim())
}

/// Expected check character for the first 15 digits of an ORCID
fn check_character(base_digits: &str) -> Option<char> {
    let mut total: u32 = 0;
    for c in base_digits.chars() {
        total = (total + c.to_digit(10)?) * 2;
    }
    let result = (12 - total % 11) % 11;
    Some(if result == 10 {
        'X'
    } else {
        char::from_digit(result, 10)?
    })
}

/// True when `value` is well formed and its check character is correct
pub fn has_valid_checksum(value: &str) -> bool {
    let value = value.trim();
    if !is_well_formed(value) {
        return false;
    }
    let mut digits: String = value.chars().filter(|c| *c != '-').collect();
    match digits.pop() {
        Some(check) => check_character(&digits) == Some(check),
        None => false,
    }
}

/// ORCIDs written as link labels, `[0000-0002-1825-0097](...)`, in order of
/// appearance.
pub fn extract_bracketed(text: &str) -> Vec<String> {
    BRACKETED_ORCID_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        assert!(is_well_formed("0000-0002-1825-0097"));
        assert!(is_well_formed("0000-0002-1694-233X"));
        assert!(!is_well_formed("0000-0002-1825-009"));
        assert!(!is_well_formed("0000000218250097"));
        assert!(!is_well_formed("https://orcid.org/0000-0002-1825-0097"));
        assert!(!is_well_formed("0000-0002-1825-00\u{0660}7"));
    }

    #[test]
    fn test_checksum() {
        assert!(has_valid_checksum("0000-0002-1825-0097"));
        assert!(has_valid_checksum("0000-0001-5109-3700"));
        assert!(has_valid_checksum("0000-0002-1694-233X"));
        assert!(!has_valid_checksum("0000-0002-1825-0098"));
        assert!(!has_valid_checksum("not an orcid"));
        assert!(!has_valid_checksum("\u{0660}000-0002-1825-0097"));
    }

    #[test]
    fn test_extract_bracketed() {
        let cell = "[0000-0002-1825-0097](https://orcid.org/0000-0002-1825-0097); \
                    [0000-0001-5109-3700](https://orcid.org/0000-0001-5109-3700)";
        assert_eq!(
            extract_bracketed(cell),
            vec!["0000-0002-1825-0097", "0000-0001-5109-3700"]
        );
        assert!(extract_bracketed("NA").is_empty());
    }
}
