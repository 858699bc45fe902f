//! Forgiving deserializers for caller-supplied numeric filter input
//!
//! Form fields and query parameters arrive as strings, numbers or nothing at
//! all. Anything that is not a usable number degrades to "not set".

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use super::date_range::TimeUnit;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Parse a finite number from user text; `None` for anything else.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a positive whole count, defaulting to 1.
pub fn parse_count(text: &str) -> u32 {
    parse_number(text).map(count_from_f64).unwrap_or(1)
}

fn count_from_f64(n: f64) -> u32 {
    let whole = n.trunc();
    if whole >= 1.0 && whole <= u32::MAX as f64 {
        whole as u32
    } else {
        1
    }
}

/// `Option<f64>` field: numbers and numeric strings are kept, the rest is `None`.
pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Number(n)) if n.is_finite() => Some(n),
        Some(Raw::Text(s)) => parse_number(&s),
        _ => None,
    })
}

/// Count field: anything unusable becomes 1.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Number(n)) => count_from_f64(n),
        Some(Raw::Text(s)) => parse_count(&s),
        _ => 1,
    })
}

/// Time unit field: strings map through `TimeUnit::from`, anything else is days.
pub fn time_unit<'de, D>(deserializer: D) -> Result<TimeUnit, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Text(s)) => TimeUnit::from(s),
        _ => TimeUnit::Days,
    })
}

pub fn default_count() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "optional_f64")]
        bound: Option<f64>,
        #[serde(default = "default_count", deserialize_with = "count")]
        n: u32,
        #[serde(default, deserialize_with = "time_unit")]
        unit: TimeUnit,
    }

    fn fields(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_optional_f64_accepts_numbers_and_numeric_text() {
        assert_eq!(fields(r#"{"bound": 2.5}"#).bound, Some(2.5));
        assert_eq!(fields(r#"{"bound": " 3 "}"#).bound, Some(3.0));
    }

    #[test]
    fn test_optional_f64_malformed_is_none() {
        assert_eq!(fields(r#"{"bound": "abc"}"#).bound, None);
        assert_eq!(fields(r#"{"bound": null}"#).bound, None);
        assert_eq!(fields(r#"{"bound": true}"#).bound, None);
        assert_eq!(fields(r#"{}"#).bound, None);
    }

    #[test]
    fn test_count_defaults_to_one() {
        assert_eq!(fields(r#"{}"#).n, 1);
        assert_eq!(fields(r#"{"n": "soon"}"#).n, 1);
        assert_eq!(fields(r#"{"n": 0}"#).n, 1);
        assert_eq!(fields(r#"{"n": -4}"#).n, 1);
        assert_eq!(fields(r#"{"n": null}"#).n, 1);
    }

    #[test]
    fn test_count_parses_numbers_and_text() {
        assert_eq!(fields(r#"{"n": 30}"#).n, 30);
        assert_eq!(fields(r#"{"n": "12"}"#).n, 12);
        assert_eq!(fields(r#"{"n": 2.9}"#).n, 2);
    }

    #[test]
    fn test_time_unit_non_string_is_days() {
        assert_eq!(fields(r#"{}"#).unit, TimeUnit::Days);
        assert_eq!(fields(r#"{"unit": null}"#).unit, TimeUnit::Days);
        assert_eq!(fields(r#"{"unit": 7}"#).unit, TimeUnit::Days);
        assert_eq!(fields(r#"{"unit": ["weeks"]}"#).unit, TimeUnit::Days);
        assert_eq!(fields(r#"{"unit": "weeks"}"#).unit, TimeUnit::Weeks);
        assert_eq!(fields(r#"{"unit": "bogus"}"#).unit, TimeUnit::Days);
    }

    #[test]
    fn test_parse_count_direct() {
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count(""), 1);
    }
}
