use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RosterError, RosterResult};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[\p{L}\p{N}"',][\p{L}\p{N} "',]{0,69}$"#).unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9+_.\-]*@[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?)*$")
        .unwrap()
});
static TELEGRAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@?[A-Za-z0-9_]{5,32}$").unwrap());

fn invalid(field: &'static str, message: &str) -> RosterError {
    RosterError::InvalidField {
        field,
        message: message.to_string(),
    }
}

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &'static str) -> RosterResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(invalid(field, "cannot be blank"))
    } else {
        Ok(trimmed)
    }
}

/// Validates a student name: letters, digits, spaces, quotes and commas,
/// at most 70 characters, no '/'.
pub fn name(value: &str) -> RosterResult<String> {
    let trimmed = non_blank(value, "Name")?;
    if NAME_RE.is_match(&trimmed) {
        Ok(trimmed)
    } else {
        Err(invalid(
            "Name",
            "may contain letters, digits, spaces, quotes and commas, must not contain '/', \
             and must be at most 70 characters long",
        ))
    }
}

pub fn phone(value: &str) -> RosterResult<String> {
    let trimmed = non_blank(value, "Phone")?;
    if PHONE_RE.is_match(&trimmed) {
        Ok(trimmed)
    } else {
        Err(invalid("Phone", "should only contain digits, at least 3 long"))
    }
}

pub fn email(value: &str) -> RosterResult<String> {
    let trimmed = non_blank(value, "Email")?;
    if EMAIL_RE.is_match(&trimmed) {
        Ok(trimmed)
    } else {
        Err(invalid("Email", "should be of the format local-part@domain"))
    }
}

/// Telegram handles are stored with a leading '@'.
pub fn telegram(value: &str) -> RosterResult<String> {
    let trimmed = non_blank(value, "Telegram")?;
    if !TELEGRAM_RE.is_match(&trimmed) {
        return Err(invalid(
            "Telegram",
            "should be 5 to 32 letters, digits or underscores, optionally starting with '@'",
        ));
    }
    if trimmed.starts_with('@') {
        Ok(trimmed)
    } else {
        Ok(format!("@{}", trimmed))
    }
}

/// Validates that an integer lies in `[min, max]`.
pub fn in_range(value: i64, min: u8, max: u8, field: &'static str) -> RosterResult<u8> {
    if value < i64::from(min) || value > i64::from(max) {
        Err(RosterError::InvalidRange {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(value as u8)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  hello  ", "name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   ", "name").is_err());
    }

    #[test]
    fn name_accepts_quotes_and_commas() {
        assert_eq!(name("O'Brien, Jr").unwrap(), "O'Brien, Jr");
    }

    #[test]
    fn name_rejects_slash() {
        assert!(name("Alex/Yeoh").is_err());
    }

    #[test]
    fn name_rejects_over_seventy_chars() {
        assert!(name(&"a".repeat(71)).is_err());
        assert!(name(&"a".repeat(70)).is_ok());
    }

    #[test]
    fn phone_requires_three_digits() {
        assert!(phone("3457").is_ok());
        assert!(phone("12").is_err());
        assert!(phone("12a4").is_err());
    }

    #[test]
    fn email_accepts_university_address() {
        assert!(email("johndoe@u.nus.edu").is_ok());
        assert!(email("johndoe").is_err());
        assert!(email("john doe@u.nus.edu").is_err());
    }

    #[test]
    fn telegram_adds_at_prefix() {
        assert_eq!(telegram("cheru").unwrap(), "@cheru");
        assert_eq!(telegram("@cheru").unwrap(), "@cheru");
    }

    #[test]
    fn telegram_rejects_short_handle() {
        assert!(telegram("@abc").is_err());
    }

    #[test]
    fn in_range_checks_bounds() {
        assert_eq!(in_range(1, 1, 13, "Homework ID").unwrap(), 1);
        assert_eq!(in_range(13, 1, 13, "Homework ID").unwrap(), 13);
        assert!(in_range(0, 1, 13, "Homework ID").is_err());
        assert!(in_range(14, 1, 13, "Homework ID").is_err());
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
        assert_eq!(trim_optional(Some(" hi ")), Some("hi".to_string()));
    }
}
