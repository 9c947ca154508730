//! The SDL value model.
//!
//! [`Value`] is the closed set of types an SDL document can carry: every
//! value in a tag's value list or attribute map is one of these thirteen
//! variants. Host values enter the model through `From`/`TryFrom` coercion
//! (narrow integers widen, unsigned 32-bit widens to Int64) and leave it
//! through the `TryFrom<Value>` extraction impls, which fail with
//! [`CoercionError`] on a variant mismatch.
//!
//! `Display` renders the canonical literal form used by the serializer, so
//! `value.to_string()` is always re-parseable SDL.

use crate::error::CoercionError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate, NaiveTime, Offset, Timelike};
use std::fmt;

/// A calendar date, a time of day with millisecond precision, and an
/// optional time-zone designator kept verbatim from the source
/// (an IANA id, a three-letter code, or `GMT±HH(:MM)`).
#[derive(Debug, Clone, PartialEq)]
pub struct DateTime {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub timezone: Option<String>,
}

impl DateTime {
    pub fn new(date: NaiveDate, time: NaiveTime, timezone: Option<String>) -> Self {
        Self {
            date,
            time,
            timezone,
        }
    }
}

/// Any value an SDL document can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    String(String),
    Character(char),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(BigDecimal),
    Binary(Vec<u8>),
    Date(NaiveDate),
    DateTime(DateTime),
    TimeSpan(Duration),
}

impl Value {
    /// Returns `true` if the value is `Null`.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is one of the numeric variants
    /// (Int32, Int64, Float32, Float64 or Decimal).
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Int32(_)
                | Value::Int64(_)
                | Value::Float32(_)
                | Value::Float64(_)
                | Value::Decimal(_)
        )
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an Int32, returns it.
    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is an integer variant, returns it widened to `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(i) => Some(i64::from(*i)),
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float variant, returns it widened to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(f) => Some(f64::from(*f)),
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// A short human-readable name for the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Character(_) => "character",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Decimal(_) => "decimal",
            Value::Binary(_) => "binary",
            Value::Date(_) => "date",
            Value::DateTime(_) => "date-time",
            Value::TimeSpan(_) => "time-span",
        }
    }
}

// == Canonical literal formatting ==

pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\n' => "\\n".to_string(),
        _ => c.to_string(),
    }
}

/// Formats an `f64` so that the literal re-parses as Float64: plain decimal
/// notation always containing a decimal point.
fn format_f64(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

fn format_date(d: &NaiveDate) -> String {
    use chrono::Datelike;
    format!("{}/{:02}/{:02}", d.year(), d.month(), d.day())
}

/// The process-local UTC offset rendered as `GMT±HH:MM`, used when a
/// date-time was stored without a zone designator.
fn local_gmt_offset() -> String {
    let seconds = chrono::Local::now().offset().fix().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    format!("GMT{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

fn format_date_time(dt: &DateTime, out: &mut fmt::Formatter<'_>) -> fmt::Result {
    let millis = dt.time.nanosecond() / 1_000_000;
    write!(
        out,
        "{} {:02}:{:02}",
        format_date(&dt.date),
        dt.time.hour(),
        dt.time.minute()
    )?;
    if dt.time.second() != 0 || millis != 0 {
        write!(out, ":{:02}", dt.time.second())?;
    }
    if millis != 0 {
        write!(out, ".{millis:03}")?;
    }
    match &dt.timezone {
        Some(zone) => write!(out, "-{zone}"),
        None => write!(out, "-{}", local_gmt_offset()),
    }
}

fn format_time_span(span: &Duration, out: &mut fmt::Formatter<'_>) -> fmt::Result {
    let total = span.num_milliseconds();
    if total < 0 {
        write!(out, "-")?;
    }
    let abs = total.unsigned_abs();
    let days = abs / 86_400_000;
    let hours = (abs / 3_600_000) % 24;
    let minutes = (abs / 60_000) % 60;
    let seconds = (abs / 1_000) % 60;
    let millis = abs % 1_000;
    if days != 0 {
        write!(out, "{days}d:")?;
    }
    write!(out, "{hours:02}:{minutes:02}:{seconds:02}")?;
    if millis != 0 {
        write!(out, ".{millis:03}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::Character(c) => write!(f, "'{}'", escape_char(*c)),
            Value::Int32(i) => write!(f, "{i}"),
            Value::Int64(i) => write!(f, "{i}L"),
            Value::Float32(v) => write!(f, "{v}F"),
            Value::Float64(v) => write!(f, "{}", format_f64(*v)),
            Value::Decimal(d) => write!(f, "{d}BD"),
            Value::Binary(bytes) => write!(f, "[{}]", BASE64.encode(bytes)),
            Value::Date(d) => write!(f, "{}", format_date(d)),
            Value::DateTime(dt) => format_date_time(dt, f),
            Value::TimeSpan(span) => format_time_span(span, f),
        }
    }
}

// == Coercion from host types ==

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Character(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int32(i32::from(v))
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int32(i32::from(v))
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Int32(i32::from(v))
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Int32(i32::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int64(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Binary(v.to_vec())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime> for Value {
    fn from(v: DateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::TimeSpan(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl TryFrom<u64> for Value {
    type Error = CoercionError;

    fn try_from(v: u64) -> Result<Self, CoercionError> {
        i64::try_from(v).map(Value::Int64).map_err(|_| {
            CoercionError::new(format!("u64 value {v} does not fit any SDL integer variant"))
        })
    }
}

// == Extraction into host types ==

impl TryFrom<Value> for i32 {
    type Error = CoercionError;

    fn try_from(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Int32(i) => Ok(i),
            other => Err(CoercionError::new(format!(
                "expected int32, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = CoercionError;

    fn try_from(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Int32(i) => Ok(i64::from(i)),
            Value::Int64(i) => Ok(i),
            other => Err(CoercionError::new(format!(
                "expected an integer, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = CoercionError;

    fn try_from(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Float32(f) => Ok(f64::from(f)),
            Value::Float64(f) => Ok(f),
            other => Err(CoercionError::new(format!(
                "expected a float, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = CoercionError;

    fn try_from(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(CoercionError::new(format!(
                "expected boolean, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = CoercionError;

    fn try_from(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(CoercionError::new(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}
