//! Internal helpers for input validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every write path enforces the same rules.

use crate::{EngineError, MoneyCents, ResultEngine};

/// Trim a required text field; empty input is a validation error.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Reject zero and negative amounts.
pub(crate) fn ensure_positive(amount: MoneyCents, label: &str) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!("{label} must be > 0")));
    }
    Ok(())
}

/// Lowercases and checks the `local@domain.tld` shape.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = value.trim().to_lowercase();
    let invalid = || EngineError::Validation(format!("invalid email: {email}"));
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && tld.len() >= 2 => Ok(email),
        _ => Err(invalid()),
    }
}

/// Phone numbers are stored as exactly 10 digits.
pub(crate) fn validate_phone(value: &str) -> ResultEngine<String> {
    let phone = value.trim();
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(EngineError::Validation(
            "phone must be exactly 10 digits".to_string(),
        ));
    }
    Ok(phone.to_string())
}

pub(crate) fn validate_password(value: &str) -> ResultEngine<()> {
    if value.chars().count() < 6 {
        return Err(EngineError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

/// Parse `HH:MM` into minutes since midnight.
pub(crate) fn parse_hhmm(value: &str, label: &str) -> ResultEngine<u32> {
    let invalid = || EngineError::Validation(format!("{label} must be HH:MM"));
    let (hh, mm) = value.trim().split_once(':').ok_or_else(invalid)?;
    if hh.len() != 2 || mm.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hh.parse().map_err(|_| invalid())?;
    let minutes: u32 = mm.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Opening hours must parse and open strictly before close.
pub(crate) fn validate_opening_hours(open: &str, close: &str) -> ResultEngine<()> {
    let open_at = parse_hhmm(open, "open_hour")?;
    let close_at = parse_hhmm(close, "close_hour")?;
    if open_at >= close_at {
        return Err(EngineError::Validation(
            "open_hour must be before close_hour".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert_eq!(normalize_email(" Budi@Mail.com ").unwrap(), "budi@mail.com");
        assert!(normalize_email("budi").is_err());
        assert!(normalize_email("@mail.com").is_err());
        assert!(normalize_email("budi@mail").is_err());
        assert!(normalize_email("budi@@mail.com").is_err());
    }

    #[test]
    fn phone_is_ten_digits() {
        assert_eq!(validate_phone("0812345678").unwrap(), "0812345678");
        assert!(validate_phone("081234567").is_err());
        assert!(validate_phone("08123456ab").is_err());
    }

    #[test]
    fn opening_hours() {
        assert!(validate_opening_hours("08:00", "21:30").is_ok());
        assert!(validate_opening_hours("21:00", "08:00").is_err());
        assert!(validate_opening_hours("08:00", "08:00").is_err());
        assert!(validate_opening_hours("8:00", "21:00").is_err());
        assert!(validate_opening_hours("08:00", "24:00").is_err());
    }

    #[test]
    fn amounts_must_be_positive() {
        assert!(ensure_positive(MoneyCents::new(1), "amount").is_ok());
        assert_eq!(
            ensure_positive(MoneyCents::ZERO, "amount").unwrap_err(),
            EngineError::InvalidAmount("amount must be > 0".to_string())
        );
    }
}
