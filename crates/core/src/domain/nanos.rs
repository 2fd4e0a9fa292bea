// Nanosecond -> millisecond conversion for status payload fields

use super::error::InvalidReason;
use serde_json::Value;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Round integer nanoseconds to the nearest millisecond, ties going up.
///
/// Exact for the whole `i64` range (no float detour), so
/// `1_500_000` becomes `2` and `1_499_999` becomes `1`.
pub fn round_nanos(nanos: i64) -> i64 {
    let millis = nanos.div_euclid(NANOS_PER_MILLI);
    if nanos.rem_euclid(NANOS_PER_MILLI) >= NANOS_PER_MILLI / 2 {
        millis + 1
    } else {
        millis
    }
}

/// Float flavour of [`round_nanos`], for averages computed server-side.
///
/// Returns `None` when the result does not fit in `i64` or is not finite.
pub fn round_nanos_f64(nanos: f64) -> Option<i64> {
    if !nanos.is_finite() {
        return None;
    }
    let millis = (nanos / NANOS_PER_MILLI as f64 + 0.5).floor();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if millis >= i64::MAX as f64 || millis < i64::MIN as f64 {
        return None;
    }
    Some(millis as i64)
}

/// Read a non-negative nanosecond field and round it to milliseconds.
///
/// Missing (`null`) fields, strings, booleans and containers are rejected
/// rather than coerced to zero.
pub fn millis_from_field(value: &Value, field: &'static str) -> Result<i64, InvalidReason> {
    match value {
        Value::Null => Err(InvalidReason::MissingField { field }),
        Value::Number(n) => {
            if let Some(nanos) = n.as_i64() {
                if nanos < 0 {
                    return Err(InvalidReason::Negative { field });
                }
                Ok(round_nanos(nanos))
            } else if n.is_u64() {
                // u64 beyond i64::MAX
                Err(InvalidReason::OutOfRange { field })
            } else {
                let nanos = n.as_f64().ok_or(InvalidReason::OutOfRange { field })?;
                if nanos < 0.0 {
                    return Err(InvalidReason::Negative { field });
                }
                round_nanos_f64(nanos).ok_or(InvalidReason::OutOfRange { field })
            }
        }
        other => Err(InvalidReason::NotNumeric {
            field,
            found: json_type_name(other),
        }),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_nanos_to_nearest() {
        assert_eq!(round_nanos(0), 0);
        assert_eq!(round_nanos(499_999), 0);
        assert_eq!(round_nanos(500_000), 1);
        assert_eq!(round_nanos(1_499_999), 1);
        assert_eq!(round_nanos(1_500_000), 2, "1.5ms must round up, not truncate");
        assert_eq!(round_nanos(1_700_000_000_000_000_000), 1_700_000_000_000);
    }

    #[test]
    fn test_round_nanos_negative_ties_go_up() {
        assert_eq!(round_nanos(-1_500_000), -1);
        assert_eq!(round_nanos(-1_500_001), -2);
        assert_eq!(round_nanos(-1), 0);
    }

    #[test]
    fn test_round_nanos_extremes() {
        assert_eq!(round_nanos(i64::MAX), i64::MAX / 1_000_000 + 1);
        assert_eq!(round_nanos(i64::MIN), i64::MIN / 1_000_000 - 1);
    }

    #[test]
    fn test_round_nanos_f64() {
        assert_eq!(round_nanos_f64(1_500_000.0), Some(2));
        assert_eq!(round_nanos_f64(1_499_999.9), Some(1));
        assert_eq!(round_nanos_f64(60_000_000_000.0), Some(60_000));
        assert_eq!(round_nanos_f64(f64::NAN), None);
        assert_eq!(round_nanos_f64(f64::INFINITY), None);
        assert_eq!(round_nanos_f64(1e40), None);
    }

    #[test]
    fn test_field_integer_and_float() {
        assert_eq!(millis_from_field(&json!(2_500_000), "Start"), Ok(3));
        assert_eq!(millis_from_field(&json!(2_400_000.5), "Average"), Ok(2));
    }

    #[test]
    fn test_field_rejects_missing_and_non_numeric() {
        assert_eq!(
            millis_from_field(&Value::Null, "Start"),
            Err(InvalidReason::MissingField { field: "Start" })
        );
        assert_eq!(
            millis_from_field(&json!("1700000000"), "Start"),
            Err(InvalidReason::NotNumeric {
                field: "Start",
                found: "string"
            })
        );
        assert_eq!(
            millis_from_field(&json!(true), "Average"),
            Err(InvalidReason::NotNumeric {
                field: "Average",
                found: "boolean"
            })
        );
    }

    #[test]
    fn test_field_rejects_negative_and_huge() {
        assert_eq!(
            millis_from_field(&json!(-5), "Start"),
            Err(InvalidReason::Negative { field: "Start" })
        );
        assert_eq!(
            millis_from_field(&json!(-0.5), "Average"),
            Err(InvalidReason::Negative { field: "Average" })
        );
        assert_eq!(
            millis_from_field(&json!(u64::MAX), "Start"),
            Err(InvalidReason::OutOfRange { field: "Start" })
        );
    }
}
