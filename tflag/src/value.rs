//! Lexical parsers shared by default-value decoding, command-line values and
//! sequence elements.
//!
//! Integers are read in base 10 only. Booleans accept the conventional
//! forms `1 t T TRUE true True` and `0 f F FALSE false False`.

use crate::error::ValueError;

/// Parses a boolean flag value.
///
/// # Errors
///
/// Returns [`ValueError::Bool`] when `raw` is not a recognised form.
pub fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(ValueError::Bool(other.to_owned())),
    }
}

/// Parses a base-10 signed integer at 64-bit width.
///
/// # Errors
///
/// Returns [`ValueError::Int`] for malformed or overflowing text.
pub fn parse_i64(raw: &str) -> Result<i64, ValueError> {
    Ok(raw.parse::<i64>()?)
}

/// Parses a base-10 unsigned integer at 64-bit width.
///
/// # Errors
///
/// Returns [`ValueError::Int`] for malformed or overflowing text.
pub fn parse_u64(raw: &str) -> Result<u64, ValueError> {
    Ok(raw.parse::<u64>()?)
}

/// Parses a platform-width signed integer.
///
/// # Errors
///
/// Returns [`ValueError::Int`] for malformed or overflowing text.
pub fn parse_isize(raw: &str) -> Result<isize, ValueError> {
    Ok(raw.parse::<isize>()?)
}

/// Parses a plain unsigned integer, width-checked against 32 bits.
///
/// # Errors
///
/// Returns [`ValueError::Int`] for malformed text or values above
/// `u32::MAX`.
pub fn parse_uint(raw: &str) -> Result<usize, ValueError> {
    let value = raw.parse::<u32>()?;
    narrow(u64::from(value), "usize")
}

/// Parses a platform-width unsigned integer.
///
/// Command-line values for `usize` flags use this; only annotation
/// defaults go through the 32-bit check of [`parse_uint`].
///
/// # Errors
///
/// Returns [`ValueError::Int`] for malformed or overflowing text.
pub fn parse_usize(raw: &str) -> Result<usize, ValueError> {
    Ok(raw.parse::<usize>()?)
}

/// Parses a 64-bit floating point value.
///
/// # Errors
///
/// Returns [`ValueError::Float`] for malformed text.
pub fn parse_f64(raw: &str) -> Result<f64, ValueError> {
    Ok(raw.parse::<f64>()?)
}

/// Converts a wide integer into a narrower one, reporting the target type on
/// overflow.
pub(crate) fn narrow<W, N>(value: W, target: &'static str) -> Result<N, ValueError>
where
    W: Copy + ToString,
    N: TryFrom<W>,
{
    N::try_from(value).map_err(|_| ValueError::OutOfRange {
        value: value.to_string(),
        target,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for the lexical parsers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", true)]
    #[case("t", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case("0", false)]
    #[case("F", false)]
    #[case("false", false)]
    fn parses_boolean_forms(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_bool(raw), Ok(expected));
    }

    #[rstest]
    #[case("yes")]
    #[case("tRuE")]
    #[case("")]
    fn rejects_unknown_boolean_forms(#[case] raw: &str) {
        assert_eq!(parse_bool(raw), Err(ValueError::Bool(raw.to_owned())));
    }

    #[rstest]
    fn uint_is_width_checked_to_32_bits() {
        assert_eq!(parse_uint("4294967295"), Ok(4_294_967_295));
        assert!(matches!(parse_uint("4294967296"), Err(ValueError::Int(_))));
        assert!(matches!(parse_uint("-1"), Err(ValueError::Int(_))));
    }

    #[rstest]
    #[cfg(target_pointer_width = "64")]
    fn usize_uses_the_platform_width() {
        assert_eq!(parse_usize("4294967296"), Ok(4_294_967_296));
        assert!(matches!(parse_usize("-1"), Err(ValueError::Int(_))));
    }

    #[rstest]
    fn signed_parsers_accept_negative_values() {
        assert_eq!(parse_isize("-10"), Ok(-10));
        assert_eq!(parse_i64("-9223372036854775808"), Ok(i64::MIN));
    }

    #[rstest]
    fn narrow_reports_target_type() {
        let err = narrow::<i64, i8>(300, "i8");
        assert_eq!(
            err,
            Err(ValueError::OutOfRange {
                value: "300".into(),
                target: "i8",
            })
        );
    }

    #[rstest]
    fn floats_parse_decimal_text() {
        assert_eq!(parse_f64("22.33"), Ok(22.33));
        assert!(matches!(parse_f64("x"), Err(ValueError::Float(_))));
    }
}
