//! Duration literals such as `1h`, `90m`, `1h30m` or `1.5s`.
//!
//! The grammar is a possibly signed sequence of decimal numbers, each with an
//! optional fraction and a mandatory unit suffix. The bare literal `0` needs
//! no unit. Negative values are rejected because [`Duration`] is unsigned.

use std::time::Duration;

/// Nanoseconds per supported unit suffix.
const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 60 * 60 * 1_000_000_000),
];

/// Fraction digits beyond this are truncated; they are below nanosecond
/// resolution for every unit.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parse a duration literal, returning `None` when it is malformed,
/// negative, or does not fit in a `u64` nanosecond count.
pub(crate) fn parse_duration(input: &str) -> Option<Duration> {
    if let Some(negated) = input.strip_prefix('-') {
        return (negated == "0").then_some(Duration::ZERO);
    }
    let unsigned = input.strip_prefix('+').unwrap_or(input);
    if unsigned == "0" {
        return Some(Duration::ZERO);
    }
    if unsigned.is_empty() {
        return None;
    }

    let mut rest = unsigned;
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (nanos, remainder) = parse_component(rest)?;
        total = total.checked_add(nanos)?;
        rest = remainder;
    }
    u64::try_from(total).ok().map(Duration::from_nanos)
}

/// Parse one `<number>[.<fraction>]<unit>` component from the front of `input`.
fn parse_component(input: &str) -> Option<(u128, &str)> {
    let (whole, after_whole) = take_digits(input);
    let (fraction, after_fraction) = after_whole.strip_prefix('.').map_or(
        (None, after_whole),
        |fraction_start| {
            let (digits, after_digits) = take_digits(fraction_start);
            (Some(digits), after_digits)
        },
    );
    if whole.is_empty() && fraction.is_none_or(str::is_empty) {
        return None;
    }

    let unit_len = after_fraction
        .find(|c: char| c.is_ascii_digit() || c == '.')
        .unwrap_or(after_fraction.len());
    let (unit, tail) = after_fraction.split_at(unit_len);
    let scale = UNITS
        .iter()
        .find_map(|(name, factor)| (*name == unit).then_some(*factor))?;

    let mut nanos = parse_whole(whole)?.checked_mul(scale)?;
    if let Some(digits) = fraction {
        nanos = nanos.checked_add(scale_fraction(digits, scale)?)?;
    }
    Some((nanos, tail))
}

fn take_digits(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    input.split_at(end)
}

fn parse_whole(digits: &str) -> Option<u128> {
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

/// Convert the fractional digits of a component into nanoseconds of `scale`.
fn scale_fraction(digits: &str, scale: u128) -> Option<u128> {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for digit in digits.chars().take(MAX_FRACTION_DIGITS) {
        numerator = numerator * 10 + u128::from(digit.to_digit(10).unwrap_or(0));
        denominator *= 10;
    }
    (numerator * scale).checked_div(denominator)
}
