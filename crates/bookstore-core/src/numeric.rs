//! Lenient integer coercion and truthiness rules for loosely typed payloads.
//!
//! # Design
//! - Parsing never fails: input without a leading integer becomes [`LooseInt::NotANumber`].
//! - Truthiness is evaluated on the raw JSON value, independently of coercion.

use std::fmt::{self, Display, Formatter};
use std::num::FpCategory;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Integer produced by best-effort parsing; may carry a not-a-number marker.
///
/// Equality follows not-a-number rules: [`LooseInt::NotANumber`] never equals
/// anything, itself included.
#[derive(Debug, Clone, Copy)]
pub enum LooseInt {
    /// A successfully parsed integer.
    Int(i64),
    /// Input did not start with an integer.
    NotANumber,
}

impl LooseInt {
    /// Integer value when one was parsed.
    #[must_use]
    pub const fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::NotANumber => None,
        }
    }

    /// Whether this value is the not-a-number marker.
    #[must_use]
    pub const fn is_nan(self) -> bool {
        matches!(self, Self::NotANumber)
    }
}

impl PartialEq for LooseInt {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left == right,
            _ => false,
        }
    }
}

impl From<i64> for LooseInt {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl Display for LooseInt {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(formatter, "{value}"),
            Self::NotANumber => formatter.write_str("NaN"),
        }
    }
}

impl Serialize for LooseInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::NotANumber => serializer.serialize_none(),
        }
    }
}

/// Parse the leading integer of `text`.
///
/// Leading whitespace and one sign are accepted, a `0x`/`0X` prefix switches to
/// hexadecimal, and parsing stops at the first non-digit (`"1.99"` yields 1).
/// Magnitudes beyond the `i64` range saturate.
#[must_use]
pub fn parse_leading_int(text: &str) -> LooseInt {
    let trimmed = text.trim_start();
    let (negative, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else {
        (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut magnitude: Option<i64> = None;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        let accumulated = magnitude.unwrap_or(0);
        magnitude = Some(
            accumulated
                .saturating_mul(i64::from(radix))
                .saturating_add(i64::from(digit)),
        );
    }

    magnitude.map_or(LooseInt::NotANumber, |value| {
        LooseInt::Int(if negative { value.saturating_neg() } else { value })
    })
}

/// Coerce a raw body field into an integer the way a dynamic runtime would.
///
/// The value is stringified first (numbers as [`number_text`] lays them out,
/// arrays joined by commas, objects as `[object Object]`) and then passed to
/// [`parse_leading_int`]. Absent fields become [`LooseInt::NotANumber`].
#[must_use]
pub fn coerce_int(value: Option<&Value>) -> LooseInt {
    value.map_or(LooseInt::NotANumber, |raw| {
        parse_leading_int(&loose_text(raw))
    })
}

/// Truthiness of a raw body field.
///
/// Absent fields, `null`, `false`, numeric zero and the empty string are falsy;
/// everything else is truthy.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number
            .as_f64()
            .is_some_and(|float| float.classify() != FpCategory::Zero),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Render a number the way a dynamic runtime stringifies a double.
///
/// Magnitudes in `[1e-6, 1e21)` use plain decimal notation (`1e16` renders as
/// `10000000000000000`, `0.000001` as `0.000001`); anything outside that range
/// uses the shortest digits in exponent form with an explicit exponent sign
/// (`1e+21`, `1e-7`).
#[must_use]
pub fn number_text(value: f64) -> String {
    match value.classify() {
        FpCategory::Zero => return "0".to_string(),
        FpCategory::Nan => return "NaN".to_string(),
        FpCategory::Infinite if value.is_sign_negative() => return "-Infinity".to_string(),
        FpCategory::Infinite => return "Infinity".to_string(),
        FpCategory::Normal | FpCategory::Subnormal => {}
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. `1.5e-7`.
    let shortest = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = shortest.split_once('e') else {
        return format!("{sign}{shortest}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{sign}{shortest}");
    };
    let digits = mantissa.replace('.', "");
    let digit_count = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let point = exponent.saturating_add(1);
    let zeros = |count: i32| "0".repeat(usize::try_from(count).unwrap_or(0));

    let body = if (digit_count..=21).contains(&point) {
        format!("{digits}{}", zeros(point - digit_count))
    } else if (1..=21).contains(&point) {
        let split = usize::try_from(point).unwrap_or(0);
        format!("{}.{}", &digits[..split], &digits[split..])
    } else if (-5..=0).contains(&point) {
        format!("0.{}{digits}", zeros(-point))
    } else {
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        format!("{lead}{fraction}e{exponent_sign}{}", exponent.unsigned_abs())
    };
    format!("{sign}{body}")
}

fn loose_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        // Every JSON number is a double to a dynamic runtime.
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| number.to_string(), number_text),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => loose_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
