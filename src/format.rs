//! Turning fractions into text. There are three layouts, chosen by a one-letter token: `S` for
//! `numerator/denominator`, `N` for the numerator alone and `D` for the denominator alone.

use std::{fmt::Display, str::FromStr};

use crate::fract::{FracError, Fraction};

/// How to write a [`Fraction`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum FractionFormat {
    /// `numerator/denominator`, token `S`.
    #[default]
    Standard,
    /// Token `N`.
    NumeratorOnly,
    /// Token `D`.
    DenominatorOnly,
}

impl FractionFormat {
    pub const fn token(&self) -> &'static str {
        match self {
            FractionFormat::Standard => "S",
            FractionFormat::NumeratorOnly => "N",
            FractionFormat::DenominatorOnly => "D",
        }
    }
}

impl FromStr for FractionFormat {
    type Err = FracError;

    /// Tokens are case-insensitive, and the empty token means [`FractionFormat::Standard`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "" | "S" => Ok(FractionFormat::Standard),
            "N" => Ok(FractionFormat::NumeratorOnly),
            "D" => Ok(FractionFormat::DenominatorOnly),
            _ => Err(FracError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl Display for FractionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl Fraction {
    /// Writes the fraction as it is stored: no simplification happens here.
    pub fn render(&self, format: FractionFormat) -> String {
        match format {
            FractionFormat::Standard => format!("{}/{}", self.numerator(), self.denominator()),
            FractionFormat::NumeratorOnly => self.numerator().to_string(),
            FractionFormat::DenominatorOnly => self.denominator().to_string(),
        }
    }

    /// Writes the fraction using a format token, `S` if none is given. Errors on an unknown token.
    pub fn format(&self, format: Option<&str>) -> Result<String, FracError> {
        let format = match format {
            Some(token) => token.parse()?,
            None => FractionFormat::Standard,
        };
        Ok(self.render(format))
    }
}

/// Standard layout. Width, fill and alignment are honored.
impl Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.render(FractionFormat::Standard))
    }
}
