//! Duration grammar for flag defaults and values.
//!
//! A duration is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix, such as `300ms`, `1.5h` or `2h45m`.
//! Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`. The bare
//! literal `0` is accepted without a unit. A leading `+` is allowed; a
//! leading `-` is only accepted when the total is zero because
//! [`Duration`] is unsigned.

use std::time::Duration;

use crate::error::DurationError;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Fraction digits beyond this are ignored; they cannot affect nanoseconds.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

fn take_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn take_unit(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Nanoseconds contributed by one `<whole>.<fraction><unit>` component, or
/// `None` on overflow.
fn component_nanos(whole: &str, fraction: &str, scale: u64) -> Option<u64> {
    let whole_value: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole_value.checked_mul(scale)?;
    if !fraction.is_empty() {
        let mut numerator: u128 = 0;
        let mut denominator: u128 = 1;
        for digit in fraction.chars().take(MAX_FRACTION_DIGITS) {
            numerator = numerator * 10 + u128::from(digit.to_digit(10)?);
            denominator *= 10;
        }
        let fractional = numerator.checked_mul(u128::from(scale))?.checked_div(denominator)?;
        nanos = nanos.checked_add(u64::try_from(fractional).ok()?)?;
    }
    Some(nanos)
}

/// Parses duration text such as `1s`, `500ms` or `1h30m`.
///
/// # Errors
///
/// Returns a [`DurationError`] describing the first grammar violation, a
/// negative non-zero total, or an overflow of the 64-bit nanosecond range.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tflag::parse_duration;
///
/// assert_eq!(parse_duration("1m30s")?, Duration::from_secs(90));
/// assert_eq!(parse_duration("1.5ms")?, Duration::from_micros(1_500));
/// # Ok::<(), tflag::DurationError>(())
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Invalid(input.to_owned()));
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = take_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(tail) => take_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(DurationError::Invalid(input.to_owned()));
        }
        let (unit, after_unit) = take_unit(after_number);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_owned()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_owned(),
            input: input.to_owned(),
        })?;
        total = component_nanos(whole, fraction, scale)
            .and_then(|nanos| total.checked_add(nanos))
            .ok_or_else(|| DurationError::Overflow(input.to_owned()))?;
        rest = after_unit;
    }

    if negative && total != 0 {
        return Err(DurationError::Negative(input.to_owned()));
    }
    Ok(Duration::from_nanos(total))
}

/// Appends `value / 10^precision` to `out`, trimming trailing zeros from the
/// fraction.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "splits by fixed non-zero powers of ten"
)]
fn push_fraction(out: &mut String, value: u128, precision: u32) {
    let divisor = 10_u128.pow(precision);
    out.push_str(&(value / divisor).to_string());
    let fraction = value % divisor;
    if fraction != 0 {
        let digits = format!("{fraction:0width$}", width = precision as usize);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
}

/// Renders a duration in the same grammar [`parse_duration`] accepts, using
/// the largest units first (`1h2m3.5s`, `500ms`, `0s`).
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "splits by fixed non-zero unit sizes"
)]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    let mut out = String::new();
    if nanos == 0 {
        out.push_str("0s");
    } else if nanos < u128::from(MICROSECOND) {
        out.push_str(&nanos.to_string());
        out.push_str("ns");
    } else if nanos < u128::from(MILLISECOND) {
        push_fraction(&mut out, nanos, 3);
        out.push_str("µs");
    } else if nanos < u128::from(SECOND) {
        push_fraction(&mut out, nanos, 6);
        out.push_str("ms");
    } else {
        let hours = nanos / u128::from(HOUR);
        let minutes = (nanos % u128::from(HOUR)) / u128::from(MINUTE);
        let seconds = nanos % u128::from(MINUTE);
        if hours > 0 {
            out.push_str(&format!("{hours}h"));
        }
        if hours > 0 || minutes > 0 {
            out.push_str(&format!("{minutes}m"));
        }
        push_fraction(&mut out, seconds, 9);
        out.push('s');
    }
    out
}
