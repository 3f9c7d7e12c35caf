//! Text -> typed value coercion
//!
//! One parse function per `ScalarKind`, looked up through `COERCION_RULES`.
//! Parsing is locale-free: plain `.` decimal point, no thousands separators.

use crate::types::{FieldValue, ScalarKind};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Cell text that does not parse as the requested kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {value:?} as {expected}")]
pub struct CoercionError {
    pub value: String,
    pub expected: ScalarKind,
}

pub type CoercionFn = fn(&str) -> Result<FieldValue, CoercionError>;

/// Parse function registered for one scalar kind
#[derive(Debug, Clone, Copy)]
pub struct CoercionRule {
    pub kind: ScalarKind,
    pub parse: CoercionFn,
}

/// Indexed by `ScalarKind::index()`
pub static COERCION_RULES: [CoercionRule; 6] = [
    CoercionRule {
        kind: ScalarKind::Text,
        parse: parse_text,
    },
    CoercionRule {
        kind: ScalarKind::Int32,
        parse: parse_int32,
    },
    CoercionRule {
        kind: ScalarKind::Int64,
        parse: parse_int64,
    },
    CoercionRule {
        kind: ScalarKind::Float32,
        parse: parse_float32,
    },
    CoercionRule {
        kind: ScalarKind::Float64,
        parse: parse_float64,
    },
    CoercionRule {
        kind: ScalarKind::Decimal,
        parse: parse_decimal,
    },
];

pub fn rule_for(kind: ScalarKind) -> &'static CoercionRule {
    &COERCION_RULES[kind.index()]
}

/// Convert cell text into a value of `kind`
pub fn coerce(text: &str, kind: ScalarKind) -> Result<FieldValue, CoercionError> {
    (rule_for(kind).parse)(text)
}

fn reject(text: &str, expected: ScalarKind) -> CoercionError {
    CoercionError {
        value: text.to_string(),
        expected,
    }
}

fn parse_text(text: &str) -> Result<FieldValue, CoercionError> {
    Ok(FieldValue::Text(text.to_string()))
}

fn parse_int32(text: &str) -> Result<FieldValue, CoercionError> {
    text.trim()
        .parse::<i32>()
        .map(FieldValue::Int32)
        .map_err(|_| reject(text, ScalarKind::Int32))
}

fn parse_int64(text: &str) -> Result<FieldValue, CoercionError> {
    text.trim()
        .parse::<i64>()
        .map(FieldValue::Int64)
        .map_err(|_| reject(text, ScalarKind::Int64))
}

fn parse_float32(text: &str) -> Result<FieldValue, CoercionError> {
    text.trim()
        .parse::<f32>()
        .map(FieldValue::Float32)
        .map_err(|_| reject(text, ScalarKind::Float32))
}

fn parse_float64(text: &str) -> Result<FieldValue, CoercionError> {
    text.trim()
        .parse::<f64>()
        .map(FieldValue::Float64)
        .map_err(|_| reject(text, ScalarKind::Float64))
}

fn parse_decimal(text: &str) -> Result<FieldValue, CoercionError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(FieldValue::Decimal)
        .map_err(|_| reject(text, ScalarKind::Decimal))
}
