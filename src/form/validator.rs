//! Per-field validation rules.
//!
//! Every rule is a pure function of the field, its raw text and the current
//! date. Rules run in order and the first failure is reported.

use super::Field;
use crate::models::PropertyDraft;
use chrono::{Datelike, Local, NaiveDate};
use std::collections::BTreeMap;
use std::str::FromStr;

pub const TITLE_LEN: (usize, usize) = (5, 100);
pub const DESCRIPTION_LEN: (usize, usize) = (20, 2000);
pub const ADDRESS_MIN_LEN: usize = 10;
pub const PRICE_CEILING: f64 = 10_000_000.0;
pub const AREA_CEILING: f64 = 100_000.0;
pub const MIN_BEDROOMS: u32 = 1;
pub const BATHROOMS_RANGE: (f64, f64) = (0.5, 20.0);
pub const EARLIEST_YEAR_BUILT: i32 = 1800;

/// Validate one field against its rules, returning the message of the first
/// failing rule
pub fn validate(field: Field, raw: &str, today: NaiveDate) -> Option<String> {
    let value = raw.trim();

    if field.is_select() {
        return None;
    }
    if value.is_empty() {
        return field.is_required().then(|| required_message(field));
    }

    match field {
        Field::Title => length(value, TITLE_LEN, "Title"),
        Field::Description => length(value, DESCRIPTION_LEN, "Description"),
        Field::Address => (value.chars().count() < ADDRESS_MIN_LEN)
            .then(|| "Please enter a complete address".to_string()),
        Field::Price => match number(value) {
            Some(price) if price >= 0.0 => {
                (price > PRICE_CEILING).then(|| "Price seems too high. Please verify.".to_string())
            }
            _ => Some("Price must be a valid positive number".to_string()),
        },
        Field::Bedrooms => match parse_value::<u32>(value) {
            Some(n) if n >= MIN_BEDROOMS => None,
            _ => Some(format!("Bedrooms must be a whole number of at least {MIN_BEDROOMS}")),
        },
        Field::Bathrooms => match number(value) {
            None => Some("Bathrooms must be a number".to_string()),
            Some(n) if n < BATHROOMS_RANGE.0 || n > BATHROOMS_RANGE.1 => Some(format!(
                "Bathrooms must be between {} and {}",
                BATHROOMS_RANGE.0, BATHROOMS_RANGE.1
            )),
            Some(_) => None,
        },
        Field::Area => match number(value) {
            Some(area) if area >= 0.0 => {
                (area > AREA_CEILING).then(|| "Area seems too large. Please verify.".to_string())
            }
            _ => Some("Area must be a valid positive number".to_string()),
        },
        Field::YearBuilt => {
            let latest = today.year();
            match parse_value::<i32>(value) {
                Some(year) if (EARLIEST_YEAR_BUILT..=latest).contains(&year) => None,
                _ => Some(format!(
                    "Year built must be between {} and {}",
                    EARLIEST_YEAR_BUILT, latest
                )),
            }
        }
        Field::Parking => match parse_value::<u32>(value) {
            Some(_) => None,
            None => Some("Parking spaces must be a whole number of 0 or more".to_string()),
        },
        Field::MonthlyRent => non_negative(value, "Monthly rent"),
        Field::SecurityDeposit => non_negative(value, "Security deposit"),
        Field::AvailableDate => match parse_date(value) {
            None => Some("Please enter a valid date".to_string()),
            Some(date) if date < today => Some("Available date cannot be in the past".to_string()),
            Some(_) => None,
        },
        Field::PropertyType | Field::PetPolicy | Field::LeaseTerms => None,
    }
}

/// [`validate`] against the local calendar date
pub fn validate_now(field: Field, raw: &str) -> Option<String> {
    validate(field, raw, Local::now().date_naive())
}

/// Run every rule over the whole draft, ignoring touched state
pub fn shadow_validate(draft: &PropertyDraft, today: NaiveDate) -> BTreeMap<Field, String> {
    Field::REQUIRED
        .iter()
        .chain(Field::OPTIONAL.iter())
        .filter_map(|&field| validate(field, &draft.value(field), today).map(|msg| (field, msg)))
        .collect()
}

fn required_message(field: Field) -> String {
    format!("{} is required", field.label())
}

fn length(value: &str, (min, max): (usize, usize), label: &str) -> Option<String> {
    let len = value.chars().count();
    if len < min {
        Some(format!("{label} must be at least {min} characters"))
    } else if len > max {
        Some(format!("{label} must be less than {max} characters"))
    } else {
        None
    }
}

fn non_negative(value: &str, label: &str) -> Option<String> {
    match number(value) {
        Some(n) if n >= 0.0 => None,
        _ => Some(format!("{label} must be a valid positive number")),
    }
}

fn number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses into the type the record stores; `PropertyDraft::to_record` uses the
/// same helper, so a value that passes here always converts
pub(crate) fn parse_value<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse::<T>().ok()
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn check(field: Field, raw: &str) -> Option<String> {
        validate(field, raw, today())
    }

    #[test]
    fn test_blank_required_strings() {
        for field in [Field::Title, Field::Description, Field::Address] {
            for raw in ["", "   ", "\t\n"] {
                let msg = check(field, raw).expect("blank value must fail");
                assert!(msg.contains("required"), "{field}: {msg}");
            }
        }
    }

    #[test]
    fn test_title_length_bounds() {
        assert!(check(Field::Title, &"a".repeat(4)).is_some());
        assert!(check(Field::Title, &"a".repeat(5)).is_none());
        assert!(check(Field::Title, &"a".repeat(100)).is_none());
        assert!(check(Field::Title, &"a".repeat(101)).is_some());
        // Surrounding whitespace does not count
        assert!(check(Field::Title, "  abcd  ").is_some());
    }

    #[test]
    fn test_description_and_address() {
        assert!(check(Field::Description, "Too short").is_some());
        assert!(check(Field::Description, "Twenty characters!!!").is_none());
        assert_eq!(
            check(Field::Address, "1 Main"),
            Some("Please enter a complete address".to_string())
        );
        assert!(check(Field::Address, "1 Main Street, Springfield").is_none());
    }

    #[test]
    fn test_bathrooms_bounds() {
        assert!(check(Field::Bathrooms, "0.5").is_none());
        assert!(check(Field::Bathrooms, "0.49").is_some());
        assert!(check(Field::Bathrooms, "20").is_none());
        assert!(check(Field::Bathrooms, "20.01").is_some());
        assert!(check(Field::Bathrooms, "lots").is_some());
    }

    #[test]
    fn test_bedrooms_must_be_whole() {
        assert!(check(Field::Bedrooms, "1").is_none());
        assert!(check(Field::Bedrooms, "0").is_some());
        assert!(check(Field::Bedrooms, "2.5").is_some());
        assert!(check(Field::Bedrooms, "21").is_none());
        assert!(check(Field::Bedrooms, "-0").is_some());
        assert!(check(Field::Bedrooms, "5000000000").is_some());
    }

    #[test]
    fn test_price_and_area_ceilings_block() {
        assert!(check(Field::Price, "0").is_none());
        assert!(check(Field::Price, "10000000").is_none());
        assert_eq!(
            check(Field::Price, "10000001"),
            Some("Price seems too high. Please verify.".to_string())
        );
        assert!(check(Field::Price, "-1").is_some());
        assert!(check(Field::Price, "abc").is_some());
        assert!(check(Field::Price, "NaN").is_some());
        assert!(check(Field::Price, "inf").is_some());

        assert!(check(Field::Area, "100000").is_none());
        assert!(check(Field::Area, "100000.5").is_some());
    }

    #[test]
    fn test_optional_fields_skip_when_blank() {
        for field in Field::OPTIONAL {
            assert_eq!(check(field, ""), None, "{field}");
            assert_eq!(check(field, "  "), None, "{field}");
        }
        assert!(check(Field::YearBuilt, "1700").is_some());
        assert!(check(Field::YearBuilt, "1800").is_none());
        assert!(check(Field::YearBuilt, "2026").is_none());
        assert!(check(Field::YearBuilt, "2027").is_some());
        assert!(check(Field::Parking, "-1").is_some());
        assert!(check(Field::Parking, "0").is_none());
        assert!(check(Field::Parking, "-0").is_some());
        assert!(check(Field::Parking, "5000000000").is_some());
        assert!(check(Field::MonthlyRent, "-5").is_some());
        assert!(check(Field::SecurityDeposit, "1200.50").is_none());
    }

    #[test]
    fn test_available_date_against_today() {
        let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        assert!(check(Field::AvailableDate, &fmt(today() - Duration::days(1))).is_some());
        assert!(check(Field::AvailableDate, &fmt(today())).is_none());
        assert!(check(Field::AvailableDate, &fmt(today() + Duration::days(1))).is_none());
        assert_eq!(
            check(Field::AvailableDate, "16/10/2026"),
            Some("Please enter a valid date".to_string())
        );
    }

    #[test]
    fn test_selects_are_always_valid() {
        for field in [Field::PropertyType, Field::PetPolicy, Field::LeaseTerms] {
            assert_eq!(check(field, ""), None);
            assert_eq!(check(field, "anything"), None);
        }
    }
}
