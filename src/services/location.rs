//! Locality name validation and canonicalization. The normalized name
//! is the partition key for stored vacancies, so every entry point
//! normalizes before touching storage.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};

const MAX_LOCATION_PARTS: usize = 3;

static LOCATION_RE: OnceLock<Regex> = OnceLock::new();

fn location_re() -> &'static Regex {
    LOCATION_RE.get_or_init(|| {
        Regex::new(r"^[А-Яа-яЁё\s\-]+$").expect("static location pattern")
    })
}

/// Validates a free-text locality name and brings it to the canonical
/// form: each part capitalized, parts joined with `-` when the input
/// was hyphenated, with a space otherwise. Idempotent on valid input.
pub fn normalize_location(location: &str) -> Result<String> {
    let (hyphen, parts) = split_location(location);
    validate_location(location, &parts)?;

    let capitalized: Vec<String> = parts.iter().map(|part| capitalize(part)).collect();
    Ok(capitalized.join(if hyphen { "-" } else { " " }))
}

fn split_location(location: &str) -> (bool, Vec<&str>) {
    if location.contains('-') {
        (true, location.split('-').collect())
    } else {
        (false, location.split_whitespace().collect())
    }
}

fn validate_location(location: &str, parts: &[&str]) -> Result<()> {
    if parts.is_empty() {
        return Err(Error::LocationInvalid {
            location: location.to_string(),
            details: "The location name is empty.".to_string(),
        });
    }

    if parts.len() > MAX_LOCATION_PARTS {
        return Err(Error::LocationInvalid {
            location: location.to_string(),
            details: format!(
                "The location name consists of too many parts. \
                 Number of parts: {}, maximum: {}.",
                parts.len(),
                MAX_LOCATION_PARTS
            ),
        });
    }

    let alphabetic = parts.iter().all(|part| {
        part.chars()
            .all(|symbol| symbol.is_alphabetic() || symbol.is_whitespace())
    });
    if !alphabetic {
        return Err(Error::LocationInvalid {
            location: location.to_string(),
            details: "The location name must not contain numbers.".to_string(),
        });
    }

    if !location_re().is_match(location) {
        return Err(Error::LocationInvalid {
            location: location.to_string(),
            details: "The location name must contain only Russian letters.".to_string(),
        });
    }

    Ok(())
}

// str::capitalize semantics: first letter upper, the rest lower.
fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut result: String = first.to_uppercase().collect();
            result.extend(chars.flat_map(char::to_lowercase));
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_single_word() {
        assert_eq!(normalize_location("москва").unwrap(), "Москва");
        assert_eq!(normalize_location("МОСКВА").unwrap(), "Москва");
    }

    #[test]
    fn hyphen_mode_keeps_hyphens_and_capitalizes_each_part() {
        assert_eq!(
            normalize_location("нижний-новгород").unwrap(),
            "Нижний-Новгород"
        );
        assert_eq!(
            normalize_location("Нижний-Новгород").unwrap(),
            "Нижний-Новгород"
        );
    }

    #[test]
    fn whitespace_mode_joins_with_single_spaces() {
        assert_eq!(
            normalize_location("набережные  челны").unwrap(),
            "Набережные Челны"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["Москва", "Нижний-Новгород", "Набережные Челны"] {
            let once = normalize_location(input).unwrap();
            let twice = normalize_location(&once).unwrap();
            assert_eq!(once, twice);
            assert_eq!(once, input);
        }
    }

    #[test]
    fn rejects_digits() {
        let error = normalize_location("Ижевск1").unwrap_err();
        assert!(matches!(error, Error::LocationInvalid { .. }));
    }

    #[test]
    fn rejects_too_many_parts() {
        let error = normalize_location("а б в г").unwrap_err();
        assert!(matches!(error, Error::LocationInvalid { .. }));
        let error = normalize_location("а-б-в-г").unwrap_err();
        assert!(matches!(error, Error::LocationInvalid { .. }));
    }

    #[test]
    fn rejects_non_cyrillic() {
        let error = normalize_location("Moscow").unwrap_err();
        assert!(matches!(error, Error::LocationInvalid { .. }));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(normalize_location("").is_err());
        assert!(normalize_location("   ").is_err());
    }

    #[test]
    fn three_parts_is_the_limit() {
        assert_eq!(
            normalize_location("ростов-на-дону").unwrap(),
            "Ростов-На-Дону"
        );
    }
}
