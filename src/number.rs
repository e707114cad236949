//! Integer literals as the BMFont generators write them
//!
//! Values follow C `strtol` with base 0: leading whitespace, an optional
//! sign, then `0x`/`0X` for hexadecimal, a leading `0` for octal, decimal
//! otherwise. The rest of the text must be consumed.

use std::num::IntErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegerError {
    /// Not a complete integer literal
    Invalid,
    /// A valid literal too large for 64 bits
    Overflow,
}

pub(crate) fn parse_integer(text: &str) -> Result<i64, IntegerError> {
    // isspace() in the C locale
    let text = text.trim_start_matches([' ', '\t', '\n', '\x0b', '\x0c', '\r']);
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    // from_str_radix accepts its own sign, which strtol would not after a prefix
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(IntegerError::Invalid);
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => IntegerError::Overflow,
        _ => IntegerError::Invalid,
    })?;

    if negative {
        0i64.checked_sub_unsigned(magnitude).ok_or(IntegerError::Overflow)
    } else {
        i64::try_from(magnitude).map_err(|_| IntegerError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("8", 8)]
    #[case("-4", -4)]
    #[case("+12", 12)]
    #[case("0x1F", 31)]
    #[case("0XfF", 255)]
    #[case("-0x10", -16)]
    #[case("017", 15)]
    #[case("00", 0)]
    #[case("-9223372036854775808", i64::MIN)]
    #[case("\t8", 8)]
    #[case(" \x0b-0x10", -16)]
    fn test_valid_literals(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(parse_integer(text), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("abc")]
    #[case("12abc")]
    #[case("0x")]
    #[case("08")]
    #[case("--5")]
    #[case("0x-5")]
    #[case("1.5")]
    #[case("\t")]
    #[case("8\t")]
    #[case("- 1")]
    fn test_invalid_literals(#[case] text: &str) {
        assert_eq!(parse_integer(text), Err(IntegerError::Invalid));
    }

    #[rstest]
    #[case("9223372036854775808")]
    #[case("99999999999999999999")]
    #[case("-9223372036854775809")]
    fn test_overflowing_literals(#[case] text: &str) {
        assert_eq!(parse_integer(text), Err(IntegerError::Overflow));
    }
}
