//! Pure literal scanners.
//!
//! Each scanner maps the textual form of one literal family to its typed
//! value, or to an error message. Position information is added by the
//! caller (the tokenizer knows where the literal started; these functions
//! do not).
//!
//! The time scanner produces the [`TimeSpanWithZone`] intermediate rather
//! than a [`Value`](crate::Value): `12:30:00` is lexically the same whether
//! it is a stand-alone time span or the time portion of a date-time, and
//! only the tag assembler can tell which. The intermediate never escapes
//! the crate.

use crate::value::Value;
use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate, NaiveTime};
use std::str::FromStr;

/// Scans a number literal: a run of `-`, `.` and digits followed by an
/// optional suffix (`L`, `F`, `D`, `BD`, case-insensitive).
pub(crate) fn scan_number(text: &str) -> Result<Value, String> {
    let split = text
        .find(|c: char| !(c == '-' || c == '.' || c.is_ascii_digit()))
        .unwrap_or(text.len());
    let (mantissa, suffix) = text.split_at(split);

    if mantissa.is_empty() || mantissa == "-" {
        return Err(format!("malformed number literal '{text}'"));
    }
    let dots = mantissa.matches('.').count();
    if dots > 1 {
        return Err(format!("number '{text}' has more than one decimal point"));
    }
    if mantissa.ends_with('.') {
        return Err(format!("number '{text}' ends with a decimal point"));
    }

    // "-.5" and ".5" are legal forms; give them an explicit zero so every
    // downstream numeric parser accepts them.
    let normalized = if let Some(rest) = mantissa.strip_prefix("-.") {
        format!("-0.{rest}")
    } else if let Some(rest) = mantissa.strip_prefix('.') {
        format!("0.{rest}")
    } else {
        mantissa.to_string()
    };
    let has_dot = dots == 1;

    match suffix.to_ascii_uppercase().as_str() {
        "" if has_dot => normalized
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|_| format!("malformed float literal '{text}'")),
        "" => normalized
            .parse::<i32>()
            .map(Value::Int32)
            .map_err(|_| format!("malformed int literal '{text}'")),
        "L" if has_dot => Err(format!("int64 literal '{text}' cannot have a decimal point")),
        "L" => normalized
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|_| format!("malformed int64 literal '{text}'")),
        "F" => normalized
            .parse::<f32>()
            .map(Value::Float32)
            .map_err(|_| format!("malformed float32 literal '{text}'")),
        "D" => normalized
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|_| format!("malformed float64 literal '{text}'")),
        "BD" => BigDecimal::from_str(&normalized)
            .map(Value::Decimal)
            .map_err(|_| format!("malformed decimal literal '{text}'")),
        other => Err(format!("unrecognized number suffix '{other}' in '{text}'")),
    }
}

fn scan_component(text: &str, what: &str) -> Result<u32, String> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("malformed {what} component '{text}'"));
    }
    text.parse::<u32>()
        .map_err(|_| format!("{what} component '{text}' is out of range"))
}

/// Scans a `YYYY/MM/DD` date. The year may have any number of digits;
/// month and day must form a valid proleptic-Gregorian date.
pub(crate) fn scan_date(text: &str) -> Result<NaiveDate, String> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return Err(format!("malformed date literal '{text}'"));
    }
    let year = i32::try_from(scan_component(parts[0], "year")?)
        .map_err(|_| format!("year component '{}' is out of range", parts[0]))?;
    let month = scan_component(parts[1], "month")?;
    let day = scan_component(parts[2], "day")?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| format!("invalid date '{text}'"))
}

/// The undecided form a time literal takes between the tokenizer and the
/// tag assembler: either a stand-alone time span or the time portion of a
/// date-time. Fields hold magnitudes; `negative` applies to the whole span
/// (sign propagation from the leading field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSpanWithZone {
    pub(crate) negative: bool,
    pub(crate) days: Option<u32>,
    pub(crate) hours: u32,
    pub(crate) minutes: u32,
    pub(crate) seconds: Option<u32>,
    pub(crate) milliseconds: u32,
    pub(crate) timezone: Option<String>,
}

impl TimeSpanWithZone {
    /// Collapses into a signed duration. Callers must have rejected the
    /// zone and the missing-seconds cases first.
    pub(crate) fn to_duration(&self) -> Duration {
        let mut millis = i64::from(self.days.unwrap_or(0)) * 86_400_000
            + i64::from(self.hours) * 3_600_000
            + i64::from(self.minutes) * 60_000
            + i64::from(self.seconds.unwrap_or(0)) * 1_000
            + i64::from(self.milliseconds);
        if self.negative {
            millis = -millis;
        }
        Duration::milliseconds(millis)
    }

    /// Reads the intermediate as a time of day for the date-time case.
    /// `None` if the fields do not form a valid wall-clock time.
    pub(crate) fn time_of_day(&self) -> Option<NaiveTime> {
        if self.negative {
            return None;
        }
        NaiveTime::from_hms_milli_opt(
            self.hours,
            self.minutes,
            self.seconds.unwrap_or(0),
            self.milliseconds,
        )
    }
}

/// Scans fractional seconds: one digit is hundreds of milliseconds, two is
/// tens, three is exact.
fn scan_fraction(frac: &str) -> Result<u32, String> {
    if frac.is_empty() || frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("malformed fractional seconds '.{frac}'"));
    }
    let n: u32 = frac
        .parse()
        .map_err(|_| format!("malformed fractional seconds '.{frac}'"))?;
    Ok(match frac.len() {
        1 => n * 100,
        2 => n * 10,
        _ => n,
    })
}

/// Scans a time literal `(-)(Dd:)HH:MM(:SS)(.fff)(-zone)` into the
/// undecided intermediate form.
///
/// The zone designator begins at the first `-` past the leading sign and is
/// kept verbatim (so `GMT+02:30` and `GMT-05` survive untouched). If the
/// leading field carries a sign, every later field is reinterpreted with
/// that sign.
pub(crate) fn scan_time_span_with_zone(text: &str) -> Result<TimeSpanWithZone, String> {
    let (time_part, timezone) = match text.get(1..).and_then(|rest| rest.find('-')) {
        Some(i) => {
            let zone = &text[i + 2..];
            if zone.is_empty() {
                return Err(format!("malformed time zone in '{text}'"));
            }
            (&text[..i + 1], Some(zone.to_string()))
        }
        None => (text, None),
    };

    let negative = time_part.starts_with('-');
    let unsigned = if negative { &time_part[1..] } else { time_part };
    let segments: Vec<&str> = unsigned.split(':').collect();
    if segments.len() < 2 || segments.len() > 4 {
        return Err(format!("malformed time literal '{text}'"));
    }

    let mut index = 0;
    let days = if segments.len() == 4 {
        let digits = segments[0]
            .strip_suffix('d')
            .ok_or_else(|| format!("the day component of '{text}' must end with 'd'"))?;
        index = 1;
        Some(scan_component(digits, "day")?)
    } else {
        None
    };

    let hours = scan_component(segments[index], "hour")?;
    let minutes = scan_component(segments[index + 1], "minute")?;

    let (seconds, milliseconds) = match segments.get(index + 2) {
        Some(seg) => match seg.split_once('.') {
            Some((sec, frac)) => (Some(scan_component(sec, "second")?), scan_fraction(frac)?),
            None => (Some(scan_component(seg, "second")?), 0),
        },
        None => (None, 0),
    };

    Ok(TimeSpanWithZone {
        negative,
        days,
        hours,
        minutes,
        seconds,
        milliseconds,
        timezone,
    })
}
