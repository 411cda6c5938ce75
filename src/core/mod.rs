//! Core business logic - framework-agnostic deal, coupon, account and catalog operations.
//!
//! [`lifecycle`] is pure and synchronous. The other modules are async wrappers
//! over the SeaORM entities that validate input and keep related rows consistent.

pub mod account;
pub mod advertiser;
pub mod category;
pub mod city;
pub mod coupon;
pub mod deal;
pub mod lifecycle;
pub mod subscription;

use crate::errors::{Error, Result};

/// Trims and lowercases an email address, rejecting anything that is not a valid address.
pub(crate) fn normalize_email(email: &str) -> Result<String> {
    let normalized = email.trim().to_lowercase();
    if validator::validate_email(normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(Error::InvalidEmail {
            email: email.to_string(),
        })
    }
}

/// Builds a URL slug: lowercase ASCII letters and digits separated by single dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Rejects blank values and values longer than `max_len` characters. Returns the trimmed value.
pub(crate) fn required_text(field: &str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input(field, "must not be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(Error::invalid_input(
            field,
            format!("must be at most {max_len} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Half Off Sushi!"), "half-off-sushi");
        assert_eq!(slugify("  St. John's -- Spa  "), "st-john-s-spa");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Jane.Doe@Example.COM ").unwrap(),
            "jane.doe@example.com"
        );
        assert!(matches!(
            normalize_email("not-an-email"),
            Err(Error::InvalidEmail { .. })
        ));
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", "  Toronto ", 60).unwrap(), "Toronto");
        assert!(required_text("name", "   ", 60).is_err());
        assert!(required_text("postal_code", "M5V 3L9X", 7).is_err());
    }
}
