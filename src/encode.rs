//! Typed literal encoding - semantic type + raw value to Vertica literal.
//!
//! Pure and stateless: no I/O, no hidden state, so every branch is
//! independently unit-testable. The match over [`SemanticType`] is
//! exhaustive; the compiler turns "new type added" into an obligation here.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::schema::{LiteralValue, SemanticType};

/// Errors raised while encoding a literal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Fatal: the declared type cannot be encoded from this value. Carries
    /// the declared semantic type and its physical classification.
    #[error("can't handle type: {declared}, {physical}")]
    UnsupportedType { declared: String, physical: String },

    /// Fatal: numeric text failed to parse at the declared width.
    #[error("invalid {ty} literal {value:?}: {message}")]
    InvalidNumber {
        ty: SemanticType,
        value: String,
        message: String,
    },

    /// Fatal: calendar date text failed to parse.
    #[error("invalid date literal {value:?}: {message}")]
    InvalidDate { value: String, message: String },

    /// Recoverable, caller-visible: timestamp text is not zone-less
    /// ISO-8601. Carries the declared type and the value's runtime shape.
    #[error("can't handle timestamp format: {declared}, value shape: {shape}")]
    UnsupportedTimestampFormat {
        declared: SemanticType,
        shape: &'static str,
    },
}

/// A literal encoded for the Vertica dialect.
///
/// Either directly-inlined text or a strongly-typed scalar bound into the
/// rendered statement. [`std::fmt::Display`] produces the exact SQL spelling.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedLiteral {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    /// Pre-quoted (or otherwise verbatim) SQL text.
    Text(String),
    Bytes(Vec<u8>),
}

impl std::fmt::Display for EncodedLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodedLiteral::Int8(n) => write!(f, "{}", n),
            EncodedLiteral::Int16(n) => write!(f, "{}", n),
            EncodedLiteral::Int32(n) => write!(f, "{}", n),
            EncodedLiteral::Int64(n) => write!(f, "{}", n),
            // ryu keeps the fraction ("500.0", not "500"), matching the
            // formatting the export engine expects for float literals.
            EncodedLiteral::Float32(x) => f.write_str(ryu::Buffer::new().format(*x)),
            EncodedLiteral::Float64(x) => f.write_str(ryu::Buffer::new().format(*x)),
            EncodedLiteral::Decimal(d) => write!(f, "{}", d),
            EncodedLiteral::Text(s) => f.write_str(s),
            EncodedLiteral::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

/// Encode a raw literal according to its declared semantic type.
pub fn encode(ty: SemanticType, value: &LiteralValue) -> Result<EncodedLiteral, EncodeError> {
    match ty {
        // Vertica has no boolean literal in this context; 0/1 instead.
        SemanticType::Boolean => match value {
            LiteralValue::Bool(b) => Ok(EncodedLiteral::Int32(i32::from(*b))),
            LiteralValue::Text(s) => s
                .parse::<bool>()
                .map(|b| EncodedLiteral::Int32(i32::from(b)))
                .map_err(|_| EncodeError::UnsupportedType {
                    declared: ty.to_string(),
                    physical: ty.physical_class().to_string(),
                }),
        },

        SemanticType::Int8 => parse_number(ty, value, EncodedLiteral::Int8),
        SemanticType::Int16 => parse_number(ty, value, EncodedLiteral::Int16),
        SemanticType::Int32 => parse_number(ty, value, EncodedLiteral::Int32),
        SemanticType::Int64 => parse_number(ty, value, EncodedLiteral::Int64),
        SemanticType::Float32 => parse_number(ty, value, EncodedLiteral::Float32),
        SemanticType::Float64 => parse_number(ty, value, EncodedLiteral::Float64),

        SemanticType::Decimal { .. } => {
            let text = value.as_text();
            Decimal::from_str(&text)
                .map(EncodedLiteral::Decimal)
                .map_err(|e| EncodeError::InvalidNumber {
                    ty,
                    value: text,
                    message: e.to_string(),
                })
        }

        // Calendar date text to exact days since the Unix epoch.
        SemanticType::DateDays => {
            let text = value.as_text();
            let date = NaiveDate::from_str(&text).map_err(|e| EncodeError::InvalidDate {
                value: text.clone(),
                message: e.to_string(),
            })?;
            let days = date.signed_duration_since(NaiveDate::default()).num_days();
            Ok(EncodedLiteral::Int32(days as i32))
        }

        // Zone-less ISO-8601 local date-time, interpreted as UTC. Anything
        // else (offset-bearing, malformed) is a caller-visible error, not a
        // crash.
        SemanticType::TimestampMillis => {
            let text = value.as_text();
            let dt = NaiveDateTime::from_str(&text).map_err(|_| {
                EncodeError::UnsupportedTimestampFormat {
                    declared: ty,
                    shape: value.shape(),
                }
            })?;
            Ok(EncodedLiteral::Int64(dt.and_utc().timestamp_millis()))
        }

        // Raw value inserted verbatim between single quotes. Embedded quote
        // characters are NOT escaped; upstream encoders own that guarantee.
        SemanticType::Varchar => Ok(EncodedLiteral::Text(format!("'{}'", value.as_text()))),

        SemanticType::Varbinary => Ok(EncodedLiteral::Bytes(value.as_text().into_bytes())),
    }
}

fn parse_number<T: FromStr>(
    ty: SemanticType,
    value: &LiteralValue,
    wrap: impl FnOnce(T) -> EncodedLiteral,
) -> Result<EncodedLiteral, EncodeError>
where
    T::Err: std::fmt::Display,
{
    let text = value.as_text();
    text.parse::<T>()
        .map(wrap)
        .map_err(|e| EncodeError::InvalidNumber {
            ty,
            value: text,
            message: e.to_string(),
        })
}
