//! Payload validation for promotions.
//!
//! `validate_and_build` turns an untyped JSON mapping into a well-formed
//! [`Promotion`] or a typed [`ValidationError`]. Fields are checked in
//! declaration order, so the first missing key reported is deterministic.
//! Extra keys (including `id`) are ignored; the returned entity always has
//! `id` unset.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

use super::entity::Promotion;

/// Upper bound for `name` and `promotion_type` labels.
const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload was not a JSON object at all.
    #[error("Invalid promotion: payload must be a JSON object")]
    NotAnObject,
    #[error("Invalid promotion: missing {0}")]
    MissingField(&'static str),
    #[error("Field '{field}' {reason}")]
    TypeMismatch { field: &'static str, reason: String },
    #[error("Invalid dates: start_date must not be after end_date")]
    InvalidDateRange,
}

fn mismatch(field: &'static str, reason: impl Into<String>) -> ValidationError {
    ValidationError::TypeMismatch {
        field,
        reason: reason.into(),
    }
}

/// Build a validated promotion from a transport mapping.
pub fn validate_and_build(data: &Value) -> Result<Promotion, ValidationError> {
    let map = data.as_object().ok_or(ValidationError::NotAnObject)?;

    let name = require_label(map, "name")?;
    let promotion_type = require_label(map, "promotion_type")?;

    let value = require_int(map, "value")?;
    if value < 0 {
        return Err(mismatch("value", "must be >= 0"));
    }

    let product_id = require_int(map, "product_id")?;
    if product_id <= 0 {
        return Err(mismatch("product_id", "must be > 0"));
    }

    let start_date = require_iso_date(map, "start_date")?;
    let end_date = require_iso_date(map, "end_date")?;
    if start_date > end_date {
        return Err(ValidationError::InvalidDateRange);
    }

    Ok(Promotion {
        id: None,
        name,
        promotion_type,
        value,
        product_id,
        start_date,
        end_date,
    })
}

fn require_label(
    map: &Map<String, Value>,
    key: &'static str,
) -> Result<String, ValidationError> {
    let raw = map.get(key).ok_or(ValidationError::MissingField(key))?;
    let text = raw
        .as_str()
        .ok_or_else(|| mismatch(key, "must be a string"))?;
    if text.is_empty() || text.chars().count() > MAX_LABEL_LEN {
        return Err(mismatch(
            key,
            format!("must be 1-{MAX_LABEL_LEN} characters"),
        ));
    }
    Ok(text.to_string())
}

fn require_int(map: &Map<String, Value>, key: &'static str) -> Result<i32, ValidationError> {
    let raw = map.get(key).ok_or(ValidationError::MissingField(key))?;
    // `as_i64` rejects booleans, fractional numbers and strings outright.
    let wide = raw
        .as_i64()
        .ok_or_else(|| mismatch(key, "must be an integer"))?;
    i32::try_from(wide).map_err(|_| mismatch(key, "is out of range"))
}

fn require_iso_date(
    map: &Map<String, Value>,
    key: &'static str,
) -> Result<NaiveDate, ValidationError> {
    let raw = map.get(key).ok_or(ValidationError::MissingField(key))?;
    let text = raw
        .as_str()
        .ok_or_else(|| mismatch(key, "must be an ISO date (YYYY-MM-DD)"))?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| mismatch(key, "must be an ISO date (YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "name": "Black Friday",
            "promotion_type": "PERCENT",
            "value": 25,
            "product_id": 123,
            "start_date": "2025-11-01",
            "end_date": "2025-11-30",
        })
    }

    #[test]
    fn builds_valid_promotion_with_unset_id() {
        let promo = validate_and_build(&valid_payload()).unwrap();
        assert_eq!(promo.id, None);
        assert_eq!(promo.name, "Black Friday");
        assert_eq!(promo.promotion_type, "PERCENT");
        assert_eq!(promo.value, 25);
        assert_eq!(promo.product_id, 123);
        assert_eq!(promo.start_date.to_string(), "2025-11-01");
        assert_eq!(promo.end_date.to_string(), "2025-11-30");
    }

    #[test]
    fn extra_keys_are_ignored() {
        let mut payload = valid_payload();
        payload["id"] = json!(99);
        payload["img_url"] = json!("http://example.com/banner.png");
        let promo = validate_and_build(&payload).unwrap();
        assert_eq!(promo.id, None);
    }

    #[test]
    fn non_object_payload_is_rejected_first() {
        assert_eq!(
            validate_and_build(&json!([1, 2, 3])),
            Err(ValidationError::NotAnObject)
        );
        assert_eq!(
            validate_and_build(&json!("promotion")),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn missing_fields_reported_in_declaration_order() {
        let fields = [
            "name",
            "promotion_type",
            "value",
            "product_id",
            "start_date",
            "end_date",
        ];
        for (i, expected) in fields.iter().enumerate() {
            let mut payload = valid_payload();
            // Remove this field and every later one: the earliest must win.
            for field in &fields[i..] {
                payload.as_object_mut().unwrap().remove(*field);
            }
            assert_eq!(
                validate_and_build(&payload),
                Err(ValidationError::MissingField(expected)),
            );
        }
    }

    #[test]
    fn string_value_is_a_type_mismatch() {
        let mut payload = valid_payload();
        payload["value"] = json!("25");
        let err = validate_and_build(&payload).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { field: "value", .. }
        ));
    }

    #[test]
    fn fractional_value_is_a_type_mismatch() {
        let mut payload = valid_payload();
        payload["value"] = json!(25.5);
        let err = validate_and_build(&payload).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { field: "value", .. }
        ));
    }

    #[test]
    fn negative_value_is_rejected() {
        let mut payload = valid_payload();
        payload["value"] = json!(-1);
        let err = validate_and_build(&payload).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { field: "value", .. }
        ));
    }

    #[test]
    fn non_positive_product_id_is_rejected() {
        for bad in [0, -5] {
            let mut payload = valid_payload();
            payload["product_id"] = json!(bad);
            let err = validate_and_build(&payload).unwrap_err();
            assert!(matches!(
                err,
                ValidationError::TypeMismatch {
                    field: "product_id",
                    ..
                }
            ));
        }
    }

    #[test]
    fn bad_date_strings_are_rejected() {
        for bad in ["2025-13-01", "01-11-2025", "not-a-date", ""] {
            let mut payload = valid_payload();
            payload["start_date"] = json!(bad);
            let err = validate_and_build(&payload).unwrap_err();
            assert!(matches!(
                err,
                ValidationError::TypeMismatch {
                    field: "start_date",
                    ..
                }
            ));
        }
    }

    #[test]
    fn numeric_date_is_a_type_mismatch() {
        let mut payload = valid_payload();
        payload["end_date"] = json!(20251130);
        let err = validate_and_build(&payload).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch {
                field: "end_date",
                ..
            }
        ));
    }

    #[test]
    fn start_after_end_is_rejected() {
        let mut payload = valid_payload();
        payload["start_date"] = json!("2025-12-01");
        assert_eq!(
            validate_and_build(&payload),
            Err(ValidationError::InvalidDateRange)
        );
    }

    #[test]
    fn single_day_window_is_allowed() {
        let mut payload = valid_payload();
        payload["start_date"] = json!("2025-11-30");
        assert!(validate_and_build(&payload).is_ok());
    }

    #[test]
    fn label_length_bounds() {
        let long = "x".repeat(64);
        let max = "x".repeat(63);

        let mut payload = valid_payload();
        payload["name"] = json!(long);
        assert!(validate_and_build(&payload).is_err());

        let mut payload = valid_payload();
        payload["name"] = json!(max);
        assert!(validate_and_build(&payload).is_ok());

        let mut payload = valid_payload();
        payload["promotion_type"] = json!("");
        assert!(validate_and_build(&payload).is_err());
    }
}
