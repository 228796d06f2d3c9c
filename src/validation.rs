use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FieldErrors;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref GITHUB_RE: Regex = Regex::new(r"^https?://(www\.)?github\.com/.+$").unwrap();
    static ref LINKEDIN_RE: Regex = Regex::new(r"^https?://(www\.)?linkedin\.com/in/.+$").unwrap();
    static ref PROMOTION_RE: Regex = Regex::new(r"^\d{2}\.\d{4}$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_github_url(url: &str) -> bool {
    GITHUB_RE.is_match(url)
}

pub fn is_linkedin_url(url: &str) -> bool {
    LINKEDIN_RE.is_match(url)
}

pub fn is_promotion(promotion: &str) -> bool {
    PROMOTION_RE.is_match(promotion)
}

/// Trims and turns empty strings into `None`.
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn require(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, "is required".into());
    }
}

/// Records an error when `value` is present and fails `check`.
pub fn check_format(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    check: fn(&str) -> bool,
) {
    if let Some(v) = value {
        if !check(v) {
            errors.insert(field, "invalid format".into());
        }
    }
}

/// Reads an integer sent either as a JSON number or a numeric string.
pub fn as_int(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validates an integer field against an inclusive range.
pub fn int_in_range(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&serde_json::Value>,
    range: std::ops::RangeInclusive<i64>,
) -> Option<i16> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        errors.insert(field, "is required".into());
        return None;
    };
    match as_int(value) {
        Some(n) if range.contains(&n) => Some(n as i16),
        _ => {
            errors.insert(
                field,
                format!("must be between {} and {}", range.start(), range.end()),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(is_valid_email("a@x.edu"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("a b@x.edu"));
    }

    #[test]
    fn promotion_is_month_dot_year() {
        assert!(is_promotion("01.2024"));
        assert!(!is_promotion("1.2024"));
        assert!(!is_promotion("01-2024"));
    }

    #[test]
    fn profile_urls() {
        assert!(is_github_url("https://github.com/ada"));
        assert!(is_github_url("http://www.github.com/ada/repo"));
        assert!(!is_github_url("https://gitlab.com/ada"));
        assert!(is_linkedin_url("https://linkedin.com/in/ada"));
        assert!(!is_linkedin_url("https://linkedin.com/company/ada"));
    }

    #[test]
    fn ints_from_numbers_or_strings() {
        assert_eq!(as_int(&serde_json::json!(2)), Some(2));
        assert_eq!(as_int(&serde_json::json!(" 3 ")), Some(3));
        assert_eq!(as_int(&serde_json::json!(2.5)), None);
        assert_eq!(as_int(&serde_json::json!("two")), None);
    }

    #[test]
    fn int_range_errors() {
        let mut errors = FieldErrors::new();
        let five = serde_json::json!(5);
        assert_eq!(int_in_range(&mut errors, "rating", Some(&five), 1..=5), Some(5));
        assert!(errors.is_empty());
        assert_eq!(int_in_range(&mut errors, "rating", Some(&serde_json::json!(6)), 1..=5), None);
        assert_eq!(errors["rating"], "must be between 1 and 5");
        assert_eq!(int_in_range(&mut errors, "module", None, 1..=3), None);
        assert_eq!(errors["module"], "is required");
    }

    #[test]
    fn clean_drops_blank_values() {
        assert_eq!(clean(Some("  Madrid ".into())), Some("Madrid".into()));
        assert_eq!(clean(Some("   ".into())), None);
        assert_eq!(clean(None), None);
    }
}
