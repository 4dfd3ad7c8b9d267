//! Utilities for reading fractions from text. Two syntaxes are accepted: exact `n/d`, and decimal
//! text like `3.1415`, `-47e-2` or `1,47`, whose separator comes from a [`Locale`].
//!
//! Decimal input is not approximated. It is read as a float, and the float is then turned into the
//! decimal fraction its shortest text spells out: `3.1415` has four fractional digits, so it
//! becomes `31415/10000`, simplified to `6283/2000`.

use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1, multispace0, one_of};
use nom::combinator::{all_consuming, fail, map, opt, recognize};
use nom::error::ParseError;
use nom::sequence::{delimited, preceded, separated_pair, tuple};
use nom::IResult;
use tracing::{debug, trace};

use crate::fract::{BaseInt, FracError, Fraction};
use crate::locale::Locale;

/// Parses `n/d`, allowing whitespace around either integer.
pub fn slash_fraction(input: &str) -> IResult<&str, (BaseInt, BaseInt)> {
    separated_pair(ws(integer), slash, ws(integer))(input)
}

/// Parses an integer with an optional sign, any of the [`minus_sign`] forms included. Fails on
/// values outside [`BaseInt`].
pub fn integer(input: &str) -> IResult<&str, BaseInt> {
    let (o, (sign, digits)) = tuple((opt(sign), digit1))(input)?;

    let mut text = String::with_capacity(digits.len() + 1);
    text.extend(sign);
    text.push_str(digits);
    match text.parse() {
        Ok(n) => Ok((o, n)),
        Err(_) => fail(input),
    }
}

/// Returns a parser for decimal text using `separator` between the whole and fractional digits,
/// with an optional sign and exponent. The output is the same number rewritten the way
/// [`f64::from_str`](std::str::FromStr) reads it: ASCII sign, `.` separator, no empty digit runs.
pub fn decimal<'a>(separator: char) -> impl Fn(&'a str) -> IResult<&'a str, String> {
    move |input: &'a str| -> IResult<&'a str, String> {
        let (o, (sign, whole, fraction, exponent)) = tuple((
            opt(sign),
            digit0,
            opt(preceded(char(separator), digit0)),
            opt(recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))),
        ))(input)?;

        let fraction = fraction.unwrap_or_default();
        if whole.is_empty() && fraction.is_empty() {
            return fail(input);
        }

        let mut text = String::with_capacity(input.len() - o.len() + 1);
        text.extend(sign);
        text.push_str(if whole.is_empty() { "0" } else { whole });
        if !fraction.is_empty() {
            text.push('.');
            text.push_str(fraction);
        }
        text.extend(exponent);

        Ok((o, text))
    }
}

/// Parses a fraction in either syntax. Text with exactly one slash is `n/d`; anything else is
/// decimal. The result is simplified if `simplify` is set.
pub fn parse_fraction(text: &str, simplify: bool, locale: Locale) -> Result<Fraction, FracError> {
    let parse_error = || {
        debug!(text, ?locale, "could not parse fraction");
        FracError::StringParseError(text.to_owned())
    };

    if text.chars().filter(|&c| is_slash(c)).count() == 1 {
        trace!(text, "parsing n/d");
        let (_, (n, d)) = all_consuming(slash_fraction)(text).map_err(|_| parse_error())?;
        return Fraction::from_parts(n, d, simplify);
    }

    let (_, normalized) = all_consuming(ws(decimal(locale.decimal_separator())))(text)
        .map_err(|_| parse_error())?;
    let value: f64 = normalized.parse().map_err(|_| parse_error())?;
    trace!(text, value, "parsing decimal");
    fraction_from_f64(value, simplify, locale)
}

/// Converts a float into the exact fraction of its decimal text.
///
/// Whole numbers become `n/1`. Otherwise the value is rendered in `locale`, the digits after the
/// separator are counted, and the result is `round(value * 10^digits) / 10^digits`. Errors with
/// [`FracError::FloatParseError`] for non-finite values and for more fractional digits than a
/// power of ten in [`BaseInt`] allows, and with [`FracError::Overflow`] for a numerator out of
/// range.
pub fn fraction_from_f64(
    value: f64,
    simplify: bool,
    locale: Locale,
) -> Result<Fraction, FracError> {
    if !value.is_finite() {
        return Err(FracError::FloatParseError(value));
    }
    if value.fract() == 0.0 {
        return whole_number(value).map(Fraction::from_integer);
    }

    let separator = locale.decimal_separator();
    let text = locale.render_f64(value);
    let dp = text
        .find(separator)
        .map(|i| i + separator.len_utf8())
        .ok_or(FracError::FloatParseError(value))?;
    let digits = text[dp..].chars().count();
    let multiple = u32::try_from(digits)
        .ok()
        .and_then(|digits| BaseInt::checked_pow(10, digits))
        .ok_or(FracError::FloatParseError(value))?;
    let numerator = whole_number((value * multiple as f64).round())?;

    trace!(value, %text, digits, multiple, numerator, "decimal to fraction");
    Fraction::from_parts(numerator, multiple, simplify)
}

/// Casts a float with no fractional part, if it is in range.
fn whole_number(value: f64) -> Result<BaseInt, FracError> {
    if (BaseInt::MIN as f64..=BaseInt::MAX as f64).contains(&value) {
        Ok(value as BaseInt)
    } else {
        Err(FracError::Overflow)
    }
}

/// Wraps `inner` so that whitespace on either side is consumed and dropped.
fn ws<'a, F: 'a, O, E: ParseError<&'a str>>(
    inner: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Fn(&'a str) -> IResult<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses a minus sign, in many formats.
pub fn minus_sign(input: &str) -> IResult<&str, char> {
    one_of("-﹣－−")(input)
}

/// Parses a leading sign, writing any minus sign as ASCII `-`.
fn sign(input: &str) -> IResult<&str, char> {
    alt((map(minus_sign, |_| '-'), char('+')))(input)
}

/// Parses a slash, as of a fraction.
pub fn slash(input: &str) -> IResult<&str, char> {
    one_of("/⁄∕")(input)
}

fn is_slash(c: char) -> bool {
    matches!(c, '/' | '⁄' | '∕')
}
