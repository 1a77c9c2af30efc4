//! Fixed-point values for prices and dimensions.
//!
//! Values arrive either as JSON numbers or as the decimal strings the
//! database emits (`"450000.00"`). They are held as exact decimals; the
//! scale is kept, so output echoes what was stored.

use std::str::FromStr;

use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde::de::{self, Deserializer};
use serde_json::Value;

pub use rust_decimal::Decimal;

/// Parse plain decimal notation. Exponents and garbage are rejected.
pub fn parse(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() || raw.contains(['e', 'E', '_']) {
        return None;
    }
    Decimal::from_str(raw).ok()
}

/// Currency rendering with thousands separators and no cents:
/// `450000.00` becomes `$450,000`. Halves round to even.
pub fn currency(value: &Decimal, symbol: &str) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}{symbol}{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Optional decimal field: a number, a numeric string, or null/blank.
pub(crate) fn opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(parse(&n.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid decimal: {s}"))),
        Some(other) => Err(de::Error::custom(format!("invalid decimal: {other}"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Priced {
        #[serde(deserialize_with = "opt")]
        price: Option<Decimal>,
    }

    fn price(value: Value) -> Option<Decimal> {
        serde_json::from_value::<Priced>(json!({ "price": value })).unwrap().price
    }

    fn d(s: &str) -> Decimal {
        parse(s).unwrap()
    }

    #[test]
    fn keeps_stored_scale() {
        assert_eq!(price(json!("450000.00")).unwrap().to_string(), "450000.00");
        assert_eq!(price(json!(2.5)).unwrap().to_string(), "2.5");
        assert_eq!(price(json!(3)).unwrap().to_string(), "3");
    }

    #[test]
    fn blank_and_null_are_absent() {
        assert!(price(json!(null)).is_none());
        assert!(price(json!("  ")).is_none());
        assert!(serde_json::from_value::<Priced>(json!({})).unwrap().price.is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(serde_json::from_value::<Priced>(json!({"price": "cheap"})).is_err());
        assert!(serde_json::from_value::<Priced>(json!({"price": [1]})).is_err());
    }

    #[test]
    fn exponent_notation_is_rejected() {
        assert!(parse("1e6").is_none());
        assert!(parse("2.5E3").is_none());
        assert!(serde_json::from_value::<Priced>(json!({"price": "1e6"})).is_err());
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(&d("450000.00"), "$"), "$450,000");
        assert_eq!(currency(&d("1234567.49"), "$"), "$1,234,567");
        assert_eq!(currency(&d("999"), "$"), "$999");
        assert_eq!(currency(&d("2.5"), "$"), "$2");
        assert_eq!(currency(&d("3.5"), "$"), "$4");
        assert_eq!(currency(&d("1000"), "A$"), "A$1,000");
        assert_eq!(currency(&d("-1500"), "$"), "-$1,500");
    }

    #[test]
    fn currency_is_exact_for_large_values() {
        assert_eq!(currency(&d("9007199254740993.00"), "$"), "$9,007,199,254,740,993");
        assert_eq!(currency(&d("12345678901234567.49"), "$"), "$12,345,678,901,234,567");
        assert_eq!(currency(&d("12345678901234567.89"), "$"), "$12,345,678,901,234,568");
    }

    #[test]
    fn zero_detection() {
        assert!(d("0.00").is_zero());
        assert!(!d("0.01").is_zero());
    }
}
