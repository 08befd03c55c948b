//! Response decoding helpers.
//!
//! Coincheck's JSON is loosely typed: amounts and rates usually arrive as
//! strings, sometimes as numbers, timestamps come as Unix seconds or RFC 3339
//! text, and some endpoints answer `200 OK` with `{"error": "..."}` in place
//! of the resource.
//!
//! Each resource type therefore decodes in two steps. The body is first
//! parsed into a *wire* struct whose field types mirror the JSON exactly,
//! then [`FromWire::from_wire`] validates and converts it. Numeric and
//! timestamp failures, including values of the wrong JSON type, surface as
//! [`CoincheckError::Format`] naming the field.
//!
//! Some resources also keep the JSON object they were decoded from, for
//! fields this crate does not model.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::CoincheckError;

/// A type that is decoded from a wire staging struct.
pub trait FromWire: Sized {
    /// Staging struct matching the JSON layout.
    type Wire: DeserializeOwned;

    /// Validate and convert the staged fields.
    fn from_wire(wire: Self::Wire) -> Result<Self, CoincheckError>;

    /// Keep the JSON this value was decoded from. Most types discard it.
    fn attach_raw(&mut self, _raw: Value) {}
}

/// Decode a response body into `T`.
///
/// # Example
///
/// ```rust
/// use coincheck_api_client::rest::public::Ticker;
/// use coincheck_api_client::types::decode::decode;
///
/// let body = r#"{"last":100,"bid":99,"ask":101,"high":105,"low":95,"volume":"12.5","timestamp":1609459200}"#;
/// let ticker: Ticker = decode(body).unwrap();
/// assert_eq!(ticker.volume, 12.5);
/// ```
pub fn decode<T: FromWire>(body: &str) -> Result<T, CoincheckError> {
    let raw: Value = serde_json::from_str(body)?;
    decode_value(raw)
}

/// Decode an already parsed JSON value into `T`.
pub fn decode_value<T: FromWire>(raw: Value) -> Result<T, CoincheckError> {
    let wire = T::Wire::deserialize(&raw)?;
    let mut value = T::from_wire(wire)?;
    value.attach_raw(raw);
    Ok(value)
}

/// Decode every element of a JSON list.
pub fn convert_all<T: FromWire>(items: Vec<Value>) -> Result<Vec<T>, CoincheckError> {
    items.into_iter().map(decode_value).collect()
}

fn wrong_type(field: &'static str, value: &Value) -> CoincheckError {
    CoincheckError::Format {
        field,
        value: value.to_string(),
    }
}

/// Fail with an endpoint error if a 200 body carried a non-empty `error`.
pub fn check_embedded_error(error: Option<String>) -> Result<(), CoincheckError> {
    match error {
        Some(message) if !message.is_empty() => Err(CoincheckError::embedded(message)),
        _ => Ok(()),
    }
}

/// Parse a numeric string into a finite `f64`.
pub fn parse_number(field: &'static str, value: &str) -> Result<f64, CoincheckError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoincheckError::Format {
            field,
            value: value.to_string(),
        })
}

/// Convert Unix seconds into a UTC timestamp.
pub fn unix_timestamp(field: &'static str, seconds: i64) -> Result<OffsetDateTime, CoincheckError> {
    OffsetDateTime::from_unix_timestamp(seconds).map_err(|_| CoincheckError::Format {
        field,
        value: seconds.to_string(),
    })
}

/// A number that may arrive as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    /// `12.5`
    Number(f64),
    /// `"12.5"`
    Text(String),
    /// Any other JSON value; always a format error.
    Other(Value),
}

impl WireNumber {
    /// Convert to `f64`, rejecting non-numeric text and other JSON types.
    pub fn to_f64(&self, field: &'static str) -> Result<f64, CoincheckError> {
        match self {
            WireNumber::Number(v) => Ok(*v),
            WireNumber::Text(s) => parse_number(field, s),
            WireNumber::Other(v) => Err(wrong_type(field, v)),
        }
    }
}

/// Convert an optional wire number; `null` and absent stay `None`.
pub fn optional_number(
    field: &'static str,
    value: Option<WireNumber>,
) -> Result<Option<f64>, CoincheckError> {
    value.map(|v| v.to_f64(field)).transpose()
}

/// Convert a required wire number; absence is a format error.
pub fn required_number(
    field: &'static str,
    value: Option<WireNumber>,
) -> Result<f64, CoincheckError> {
    required(field, value)?.to_f64(field)
}

/// Convert an optional wire number, treating absence as zero.
pub fn number_or_zero(
    field: &'static str,
    value: Option<WireNumber>,
) -> Result<f64, CoincheckError> {
    Ok(optional_number(field, value)?.unwrap_or_default())
}

/// Unwrap a field that may only be absent when the body is an error envelope.
pub fn required<T>(field: &'static str, value: Option<T>) -> Result<T, CoincheckError> {
    value.ok_or_else(|| CoincheckError::Format {
        field,
        value: String::new(),
    })
}

/// A timestamp that may arrive as Unix seconds or as RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireTimestamp {
    /// `1609459200`
    Unix(i64),
    /// `"2021-01-01T00:00:00.000Z"`
    Text(String),
    /// Any other JSON value (fractional seconds, booleans, ...); always a
    /// format error.
    Other(Value),
}

impl WireTimestamp {
    /// Convert to a UTC timestamp.
    pub fn to_datetime(&self, field: &'static str) -> Result<OffsetDateTime, CoincheckError> {
        match self {
            WireTimestamp::Unix(seconds) => unix_timestamp(field, *seconds),
            WireTimestamp::Text(text) => match text.trim().parse::<i64>() {
                Ok(seconds) => unix_timestamp(field, seconds),
                Err(_) => OffsetDateTime::parse(text, &Rfc3339).map_err(|_| {
                    CoincheckError::Format {
                        field,
                        value: text.clone(),
                    }
                }),
            },
            WireTimestamp::Other(v) => Err(wrong_type(field, v)),
        }
    }
}

/// Convert an optional wire timestamp; `null` and absent stay `None`.
pub fn optional_datetime(
    field: &'static str,
    value: Option<WireTimestamp>,
) -> Result<Option<OffsetDateTime>, CoincheckError> {
    value.map(|v| v.to_datetime(field)).transpose()
}

/// Convert a required wire timestamp; absence is a format error.
pub fn required_datetime(
    field: &'static str,
    value: Option<WireTimestamp>,
) -> Result<OffsetDateTime, CoincheckError> {
    required(field, value)?.to_datetime(field)
}

/// Format a number the way the exchange expects in request parameters:
/// shortest round-trip decimal, never exponent notation.
pub fn format_number(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("jpy", "1000.50").unwrap(), 1000.5);
        assert_eq!(parse_number("btc", "0.001").unwrap(), 0.001);
        assert_eq!(parse_number("btc", " 7 ").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        for bad in ["abc", "", "NaN", "inf", "1,000"] {
            match parse_number("jpy", bad) {
                Err(CoincheckError::Format { field, value }) => {
                    assert_eq!(field, "jpy");
                    assert_eq!(value, bad);
                }
                other => panic!("expected format error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_wire_number_accepts_both_encodings() {
        let n: WireNumber = serde_json::from_str("60000").unwrap();
        let s: WireNumber = serde_json::from_str(r#""60000.5""#).unwrap();
        assert_eq!(n.to_f64("rate").unwrap(), 60000.0);
        assert_eq!(s.to_f64("rate").unwrap(), 60000.5);
    }

    #[test]
    fn test_wire_timestamp_encodings() {
        let unix: WireTimestamp = serde_json::from_str("1609459200").unwrap();
        let text: WireTimestamp = serde_json::from_str(r#""2021-01-01T00:00:00.000Z""#).unwrap();
        let digits: WireTimestamp = serde_json::from_str(r#""1609459200""#).unwrap();

        let expected = datetime!(2021-01-01 00:00:00 UTC);
        assert_eq!(unix.to_datetime("timestamp").unwrap(), expected);
        assert_eq!(text.to_datetime("created_at").unwrap(), expected);
        assert_eq!(digits.to_datetime("timestamp").unwrap(), expected);

        let bad = WireTimestamp::Text("yesterday".to_string());
        assert!(matches!(
            bad.to_datetime("created_at"),
            Err(CoincheckError::Format { field: "created_at", .. })
        ));
    }

    #[test]
    fn test_wrong_json_types_are_format_errors() {
        let flag: WireNumber = serde_json::from_str("true").unwrap();
        match flag.to_f64("volume") {
            Err(CoincheckError::Format { field, value }) => {
                assert_eq!(field, "volume");
                assert_eq!(value, "true");
            }
            other => panic!("unexpected: {other:?}"),
        }

        let nested: WireNumber = serde_json::from_str(r#"{"v":1}"#).unwrap();
        assert!(matches!(
            nested.to_f64("rate"),
            Err(CoincheckError::Format { field: "rate", .. })
        ));

        let fractional: WireTimestamp = serde_json::from_str("1609459200.5").unwrap();
        match fractional.to_datetime("timestamp") {
            Err(CoincheckError::Format { field, value }) => {
                assert_eq!(field, "timestamp");
                assert_eq!(value, "1609459200.5");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_unix_timestamp_out_of_range() {
        assert!(unix_timestamp("timestamp", i64::MAX).is_err());
    }

    #[test]
    fn test_check_embedded_error() {
        assert!(check_embedded_error(None).is_ok());
        assert!(check_embedded_error(Some(String::new())).is_ok());
        match check_embedded_error(Some("insufficient funds".to_string())) {
            Err(CoincheckError::Endpoint { status, message }) => {
                assert_eq!(status, None);
                assert_eq!(message, "insufficient funds");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(matches!(
            required_number("rate", None),
            Err(CoincheckError::Format { field: "rate", .. })
        ));
        assert_eq!(optional_number("rate", None).unwrap(), None);
        assert_eq!(number_or_zero("btc_debt", None).unwrap(), 0.0);
        assert!(number_or_zero("btc_debt", Some(WireNumber::Text("x".into()))).is_err());
        assert!(required_datetime("created_at", None).is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(0.001), "0.001");
        assert_eq!(format_number(30000.0), "30000");
        assert_eq!(format_number(1.5e-7), "0.00000015");
        assert_eq!(format_number(-1.0), "-1");
    }
}
