//! Internal helpers for input validation and row conversion.
//!
//! These utilities are **not** part of the public API.

use sea_orm::DbErr;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Unwrap a field the caller must provide.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> ResultEngine<T> {
    value.ok_or_else(|| EngineError::InvalidField(format!("{field} is required")))
}

/// Largest accepted amount. Keeps every sum of stored amounts finite.
pub(crate) const MAX_AMOUNT: f64 = 1e15;

/// Unwrap an amount-like field, rejecting NaN, infinities, negatives and
/// values above [`MAX_AMOUNT`].
pub(crate) fn require_amount(value: Option<f64>, field: &str) -> ResultEngine<f64> {
    let value = require(value, field)?;
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidField(format!(
            "{field} must be a non-negative number"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidField(format!("{field} is too large")));
    }
    Ok(value)
}

/// Unwrap a text field and trim it. Blank strings count as missing.
pub(crate) fn require_text(value: Option<&str>, field: &str) -> ResultEngine<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| EngineError::InvalidField(format!("{field} is required")))
}

/// Parse a UUID read back from storage.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| EngineError::Database(DbErr::Type(format!("invalid {label} id: {value}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_amount_accepts_zero() {
        assert_eq!(require_amount(Some(0.0), "amount"), Ok(0.0));
    }

    #[test]
    fn require_amount_rejects_negative_and_nan() {
        assert_eq!(
            require_amount(Some(-1.0), "amount"),
            Err(EngineError::InvalidField(
                "amount must be a non-negative number".to_string()
            ))
        );
        assert!(require_amount(Some(f64::NAN), "amount").is_err());
        assert!(require_amount(Some(f64::INFINITY), "amount").is_err());
    }

    #[test]
    fn require_amount_caps_magnitude() {
        assert_eq!(require_amount(Some(MAX_AMOUNT), "rent"), Ok(MAX_AMOUNT));
        assert_eq!(
            require_amount(Some(1e308), "rent"),
            Err(EngineError::InvalidField("rent is too large".to_string()))
        );
    }

    #[test]
    fn require_amount_rejects_missing() {
        assert_eq!(
            require_amount(None, "rent"),
            Err(EngineError::InvalidField("rent is required".to_string()))
        );
    }

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text(Some("  Asha "), "personName"), Ok("Asha".to_string()));
        assert!(require_text(Some("   "), "personName").is_err());
        assert!(require_text(None, "personName").is_err());
    }
}
