//! Arithmetic filters for the template layer.
//!
//! Report and production templates do price and balance arithmetic at
//! render time. These helpers are total: any combination of inputs,
//! including null and non-numeric values, yields a numeric result.
//! Arithmetic runs in fixed-point decimal so financial amounts never
//! pick up binary-float rounding artifacts.

use rust_decimal::Decimal;
use serde_json::Value;

/// Coerces a template value to a decimal.
///
/// Null and empty strings count as zero (a missing form field renders
/// as either). Anything that does not parse as a number yields `None`.
fn coerce(value: &Value) -> Option<Decimal> {
    match value {
        Value::Null => Some(Decimal::ZERO),
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(Decimal::ZERO)
            } else {
                trimmed.parse().ok()
            }
        }
        _ => None,
    }
}

/// Multiplies `value` by `arg`. Non-numeric input or overflow yields zero.
pub fn mul(value: &Value, arg: &Value) -> Decimal {
    match (coerce(value), coerce(arg)) {
        (Some(v), Some(a)) => v.checked_mul(a).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Adds `arg` to `value`. Non-numeric input or overflow yields zero.
pub fn add(value: &Value, arg: &Value) -> Decimal {
    match (coerce(value), coerce(arg)) {
        (Some(v), Some(a)) => v.checked_add(a).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Subtracts `arg` from `value`. Non-numeric input or overflow yields zero.
pub fn sub(value: &Value, arg: &Value) -> Decimal {
    match (coerce(value), coerce(arg)) {
        (Some(v), Some(a)) => v.checked_sub(a).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Divides `value` by `arg`.
///
/// Division by zero yields zero rather than failing; templates render
/// ratios over totals that are legitimately zero early in a period.
/// Overflow yields zero as well.
pub fn div(value: &Value, arg: &Value) -> Decimal {
    match (coerce(value), coerce(arg)) {
        (Some(v), Some(a)) => v.checked_div(a).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Returns the absolute value. Non-numeric input yields zero.
pub fn abs_value(value: &Value) -> Decimal {
    coerce(value).map(|v| v.abs()).unwrap_or(Decimal::ZERO)
}
