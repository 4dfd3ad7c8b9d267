//! A Rational data type: an exact ratio of two fixed-width integers, kept in lowest terms unless
//! the caller asks for the raw form.

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedNeg, CheckedSub, One, Zero};
use std::{
    cmp::Ordering,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};
use thiserror::Error;

use crate::locale::Locale;
use crate::parsing;

/// The base type used for both components. Products are not widened: anything that does not fit
/// is reported as [`FracError::Overflow`].
pub type BaseInt = i32;

/// The unsigned counterpart of [`BaseInt`]. Needed because `gcd(MIN, 0)` has no signed
/// representation.
pub type BaseUInt = u32;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FracError {
    #[error("Denominator cannot be zero")]
    ZeroDenominator,
    #[error("Cannot divide by a fraction with a zero numerator")]
    DivisionByZero,
    #[error("Could not parse {0}")]
    StringParseError(String),
    #[error("Could not convert {0} to an exact fraction")]
    FloatParseError(f64),
    #[error("Format {0} is not supported")]
    UnsupportedFormat(String),
    #[error(
        "Arithmetic overflow: result does not fit in {}",
        std::any::type_name::<BaseInt>()
    )]
    Overflow,
}

/// An exact fraction `numerator / denominator`.
///
/// The denominator is never zero. Constructors simplify by default, giving the canonical form:
/// coprime components and a positive denominator. Arithmetic returns the raw, unreduced result;
/// call [`Fraction::simplify`] when the canonical form matters.
///
/// Equality and hashing are structural: `1/2` and `2/4` only compare equal once both are
/// simplified. Ordering is by value, see [`Fraction::compare`].
///
/// Every operation except [`Fraction::simplify`] returns a new value. `simplify` takes `&mut self`,
/// so a fraction shared between threads has to be behind a lock to be simplified in place.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct Fraction {
    numerator: BaseInt,
    denominator: BaseInt,
}

/// Greatest common divisor of the magnitudes of `numerator` and `denominator`, by Euclid's
/// algorithm: `gcd(0, d) = |d|`, otherwise `gcd(n, d) = gcd(d mod n, n)`.
pub const fn gcd(numerator: BaseInt, denominator: BaseInt) -> BaseUInt {
    let mut p = numerator.unsigned_abs();
    let mut q = denominator.unsigned_abs();
    while p != 0 {
        let r = q % p;
        q = p;
        p = r;
    }

    q
}

impl Fraction {
    pub const ZERO: Fraction = Fraction::from_integer(0);

    pub const ONE: Fraction = Fraction::from_integer(1);

    pub const NEG_ONE: Fraction = Fraction::from_integer(-1);

    /// Creates a fraction from its components, simplifying it if `simplify` is set. Errors if the
    /// denominator is zero.
    pub fn from_parts(
        numerator: BaseInt,
        denominator: BaseInt,
        simplify: bool,
    ) -> Result<Self, FracError> {
        if denominator == 0 {
            return Err(FracError::ZeroDenominator);
        }

        let mut fraction = Self {
            numerator,
            denominator,
        };
        if simplify {
            fraction.simplify()?;
        }
        Ok(fraction)
    }

    /// Creates a simplified fraction. Shorthand for `from_parts(numerator, denominator, true)`.
    pub fn new(numerator: BaseInt, denominator: BaseInt) -> Result<Self, FracError> {
        Self::from_parts(numerator, denominator, true)
    }

    /// Creates `n/1`, which is already canonical.
    pub const fn from_integer(n: BaseInt) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    /// Creates `(a/b) / denominator`, that is `a / (b * denominator)`.
    pub fn from_fraction_over_integer(
        numerator: Fraction,
        denominator: BaseInt,
        simplify: bool,
    ) -> Result<Self, FracError> {
        let denominator = numerator
            .denominator
            .checked_mul(denominator)
            .ok_or(FracError::Overflow)?;
        Self::from_parts(numerator.numerator, denominator, simplify)
    }

    /// Creates the complex fraction `(a/b) / (c/d)` by cross-multiplying into `(a*d) / (b*c)`.
    pub fn from_fraction_over_fraction(
        numerator: Fraction,
        denominator: Fraction,
        simplify: bool,
    ) -> Result<Self, FracError> {
        let n = numerator
            .numerator
            .checked_mul(denominator.denominator)
            .ok_or(FracError::Overflow)?;
        let d = numerator
            .denominator
            .checked_mul(denominator.numerator)
            .ok_or(FracError::Overflow)?;
        Self::from_parts(n, d, simplify)
    }

    /// Reads a float as the exact decimal fraction of its shortest textual form, so `1.47` becomes
    /// `147/100` rather than the binary value actually stored. See [`parsing::fraction_from_f64`].
    pub fn from_f64(value: f64, simplify: bool) -> Result<Self, FracError> {
        parsing::fraction_from_f64(value, simplify, Locale::INVARIANT)
    }

    /// Parses either `n/d` or decimal text, using `locale` for the decimal separator.
    pub fn parse_with_locale(
        text: &str,
        simplify: bool,
        locale: Locale,
    ) -> Result<Self, FracError> {
        parsing::parse_fraction(text, simplify, locale)
    }

    /// Parses either `n/d` or decimal text, using the locale of the environment, as resolved by
    /// [`Locale::current`], at the time of the call.
    pub fn parse(text: &str, simplify: bool) -> Result<Self, FracError> {
        Self::parse_with_locale(text, simplify, Locale::current())
    }

    pub const fn numerator(&self) -> BaseInt {
        self.numerator
    }

    pub const fn denominator(&self) -> BaseInt {
        self.denominator
    }

    /// Reduces the fraction in place to lowest terms with a positive denominator, returning itself
    /// for chaining. Idempotent.
    ///
    /// The only failure is a component that cannot change sign, such as `MIN / -1`; the fraction
    /// is left untouched in that case.
    pub fn simplify(&mut self) -> Result<&mut Self, FracError> {
        // the denominator is never zero, so g >= 1
        let mut g = gcd(self.numerator, self.denominator) as i64;
        if self.denominator < 0 {
            g = -g;
        }

        let numerator = BaseInt::try_from(self.numerator as i64 / g);
        let denominator = BaseInt::try_from(self.denominator as i64 / g);
        match (numerator, denominator) {
            (Ok(n), Ok(d)) => {
                self.numerator = n;
                self.denominator = d;
                Ok(self)
            }
            _ => Err(FracError::Overflow),
        }
    }

    /// Returns the simplified copy of this fraction, leaving `self` as is.
    pub fn simplified(mut self) -> Result<Self, FracError> {
        self.simplify()?;
        Ok(self)
    }

    /// Whether the fraction is already in canonical form.
    pub const fn is_simplified(&self) -> bool {
        self.denominator > 0 && gcd(self.numerator, self.denominator) == 1
    }

    pub fn try_neg(self) -> Result<Self, FracError> {
        let n = self.numerator.checked_neg().ok_or(FracError::Overflow)?;
        Self::from_parts(n, self.denominator, false)
    }

    /// `a/b + c/d = (a*d + c*b) / (b*d)`, unreduced.
    pub fn try_add(self, rhs: Self) -> Result<Self, FracError> {
        let ad = self.numerator.checked_mul(rhs.denominator);
        let cb = rhs.numerator.checked_mul(self.denominator);
        let n = match (ad, cb) {
            (Some(ad), Some(cb)) => ad.checked_add(cb),
            _ => None,
        }
        .ok_or(FracError::Overflow)?;
        let d = self
            .denominator
            .checked_mul(rhs.denominator)
            .ok_or(FracError::Overflow)?;
        Self::from_parts(n, d, false)
    }

    pub fn try_sub(self, rhs: Self) -> Result<Self, FracError> {
        self.try_add(rhs.try_neg()?)
    }

    /// `a/b * c/d = (a*c) / (b*d)`, unreduced.
    pub fn try_mul(self, rhs: Self) -> Result<Self, FracError> {
        let n = self
            .numerator
            .checked_mul(rhs.numerator)
            .ok_or(FracError::Overflow)?;
        let d = self
            .denominator
            .checked_mul(rhs.denominator)
            .ok_or(FracError::Overflow)?;
        Self::from_parts(n, d, false)
    }

    /// `(a/b) / (c/d) = (a*d) / (b*c)`, unreduced. Errors if `c` is zero.
    pub fn try_div(self, rhs: Self) -> Result<Self, FracError> {
        if rhs.numerator == 0 {
            return Err(FracError::DivisionByZero);
        }
        let n = self
            .numerator
            .checked_mul(rhs.denominator)
            .ok_or(FracError::Overflow)?;
        let d = self
            .denominator
            .checked_mul(rhs.numerator)
            .ok_or(FracError::Overflow)?;
        Self::from_parts(n, d, false)
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Like [`Fraction::to_f64`], with a missing fraction read as zero.
    pub fn option_to_f64(fraction: Option<&Fraction>) -> f64 {
        fraction.map_or(0.0, Fraction::to_f64)
    }

    /// Orders two fractions by value without going through floating point.
    ///
    /// Structurally equal fractions are `Equal`. Otherwise the sign of `a*d - b*c` decides, taken
    /// in `i128` and corrected for negative denominators. Different representations of the same
    /// value (`1/2`, `2/4`) are told apart by denominator magnitude, then denominator sign, which
    /// keeps this a total order consistent with `==`.
    ///
    /// So for equal values in different forms, exactly one of `<=` and `>=` holds: the form with
    /// the smaller denominator sorts first, and `24/48 <= 1/2` is false while `1/2 <= 24/48` holds.
    pub fn compare(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }

        let (a, b) = (self.numerator as i128, self.denominator as i128);
        let (c, d) = (other.numerator as i128, other.denominator as i128);
        // a/b - c/d has the sign of (a*d - b*c) * b*d
        let y = (a * d - b * c) * (b.signum() * d.signum());

        y.cmp(&0)
            .then_with(|| {
                self.denominator
                    .unsigned_abs()
                    .cmp(&other.denominator.unsigned_abs())
            })
            .then_with(|| self.denominator.cmp(&other.denominator))
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<BaseInt> for Fraction {
    fn from(n: BaseInt) -> Self {
        Self::from_integer(n)
    }
}

impl From<Fraction> for f64 {
    fn from(value: Fraction) -> Self {
        value.to_f64()
    }
}

impl TryFrom<f64> for Fraction {
    type Error = FracError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value, true)
    }
}

impl FromStr for Fraction {
    type Err = FracError;

    /// Parses with the current locale, simplifying the result.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, true)
    }
}

/// The operators panic where the `try_` methods would return an error, just as the built-in integer
/// operators panic on overflow in debug builds.
fn expect_op(
    result: Result<Fraction, FracError>,
    lhs: Fraction,
    op: &str,
    rhs: &dyn std::fmt::Display,
) -> Fraction {
    match result {
        Ok(f) => f,
        Err(e) => panic!("{} {} {}: {}", lhs, op, rhs, e),
    }
}

impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.try_neg() {
            Ok(f) => f,
            Err(e) => panic!("-({}): {}", self, e),
        }
    }
}

impl Add for Fraction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        expect_op(self.try_add(rhs), self, "+", &rhs)
    }
}

impl Sub for Fraction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        expect_op(self.try_sub(rhs), self, "-", &rhs)
    }
}

impl Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        expect_op(self.try_mul(rhs), self, "*", &rhs)
    }
}

impl Div for Fraction {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        expect_op(self.try_div(rhs), self, "/", &rhs)
    }
}

impl AddAssign for Fraction {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fraction {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fraction {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Fraction {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

/// Mixed arithmetic with a scalar: the scalar is first converted to a fraction by `$conv`.
macro_rules! scalar_ops {
    ($t:ty, $conv:ident) => {
        impl Add<$t> for Fraction {
            type Output = Self;

            fn add(self, rhs: $t) -> Self::Output {
                expect_op($conv(rhs).and_then(|r| self.try_add(r)), self, "+", &rhs)
            }
        }

        impl Sub<$t> for Fraction {
            type Output = Self;

            fn sub(self, rhs: $t) -> Self::Output {
                expect_op($conv(rhs).and_then(|r| self.try_sub(r)), self, "-", &rhs)
            }
        }

        impl Mul<$t> for Fraction {
            type Output = Self;

            fn mul(self, rhs: $t) -> Self::Output {
                expect_op($conv(rhs).and_then(|r| self.try_mul(r)), self, "*", &rhs)
            }
        }

        impl Div<$t> for Fraction {
            type Output = Self;

            fn div(self, rhs: $t) -> Self::Output {
                expect_op($conv(rhs).and_then(|r| self.try_div(r)), self, "/", &rhs)
            }
        }
    };
}

fn int_operand(n: BaseInt) -> Result<Fraction, FracError> {
    Ok(Fraction::from_integer(n))
}

fn float_operand(x: f64) -> Result<Fraction, FracError> {
    Fraction::from_f64(x, true)
}

scalar_ops!(BaseInt, int_operand);
scalar_ops!(f64, float_operand);

impl CheckedAdd for Fraction {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        self.try_add(*v).ok()
    }
}

impl CheckedSub for Fraction {
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        self.try_sub(*v).ok()
    }
}

impl CheckedMul for Fraction {
    fn checked_mul(&self, v: &Self) -> Option<Self> {
        self.try_mul(*v).ok()
    }
}

impl CheckedDiv for Fraction {
    fn checked_div(&self, v: &Self) -> Option<Self> {
        self.try_div(*v).ok()
    }
}

impl CheckedNeg for Fraction {
    fn checked_neg(&self) -> Option<Self> {
        self.try_neg().ok()
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::ZERO
    }

    /// True for any `0/d`, simplified or not.
    fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::ONE
    }
}

// Approximate comparisons are by value, unlike `==`.
impl AbsDiffEq for Fraction {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.to_f64().abs_diff_eq(&other.to_f64(), epsilon)
    }
}

impl RelativeEq for Fraction {
    fn default_max_relative() -> Self::Epsilon {
        f64::EPSILON
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.to_f64()
            .relative_eq(&other.to_f64(), epsilon, max_relative)
    }
}

impl std::fmt::Debug for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frac!({}/{})", self.numerator, self.denominator)
    }
}

/// Builds a simplified [`Fraction`] from a literal, panicking if the denominator is zero:
/// `frac!(3 / 4)`, `frac!(-10 / 8)`, `frac!(5)`.
#[macro_export]
macro_rules! frac {
    ($num:literal / $denom:expr) => {{
        let d = $denom;
        let n = $num;

        match $crate::fract::Fraction::new(n, d) {
            Ok(f) => f,
            Err(e) => panic!("Invalid fraction {}/{}: {}", n, d, e),
        }
    }};
    ($num:expr) => {
        $crate::fract::Fraction::from_integer($num)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn raw(numerator: BaseInt, denominator: BaseInt) -> Fraction {
        Fraction::from_parts(numerator, denominator, false).unwrap()
    }

    fn parts(f: Fraction) -> (BaseInt, BaseInt) {
        (f.numerator(), f.denominator())
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(24, 40), 8);
        assert_eq!(gcd(1, 1), 1);
        assert_eq!(gcd(1, 800), 1);
        assert_eq!(gcd(11, 37), 1);
        assert_eq!(gcd(3, 5), 1);
        assert_eq!(gcd(16, 4), 4);
        assert_eq!(gcd(-3, 9), 3);
        assert_eq!(gcd(9, -3), 3);
        assert_eq!(gcd(3, -9), 3);
        assert_eq!(gcd(-3, -9), 3);
    }

    #[test]
    fn test_gcd_edges() {
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(0, -7), 7);
        assert_eq!(gcd(BaseInt::MIN, 0), 1 << 31);
        assert_eq!(gcd(BaseInt::MIN, BaseInt::MIN), 1 << 31);
        assert_eq!(gcd(BaseInt::MAX, BaseInt::MIN), 1);
    }

    #[test]
    fn test_new_simplifies() {
        assert_eq!(parts(Fraction::new(10, -8).unwrap()), (-5, 4));
        assert_eq!(parts(Fraction::new(3, -6).unwrap()), (-1, 2));
        assert_eq!(parts(Fraction::new(-3, -6).unwrap()), (1, 2));
        assert_eq!(parts(Fraction::new(0, -6).unwrap()), (0, 1));
        for (n, d, rn, rd) in [
            (1, 2, 1, 2),
            (6, 24, 1, 4),
            (10, 35, 2, 7),
            (8, 12, 2, 3),
            (8, 24, 1, 3),
            (3, 12, 1, 4),
            (14, 49, 2, 7),
            (52, 130, 2, 5),
        ] {
            assert_eq!(Fraction::new(n, d).unwrap(), Fraction::new(rn, rd).unwrap());
            assert_eq!(parts(Fraction::new(n, d).unwrap()), (rn, rd));
        }
    }

    #[test]
    fn test_unsimplified_construction() {
        let f = raw(10, -8);
        assert_eq!(parts(f), (10, -8));
        assert!(!f.is_simplified());
        assert!(frac!(-5 / 4).is_simplified());
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Fraction::new(1, 0), Err(FracError::ZeroDenominator));
        assert_eq!(
            Fraction::from_parts(0, 0, false),
            Err(FracError::ZeroDenominator)
        );
        assert_eq!(
            Fraction::from_fraction_over_integer(frac!(1 / 2), 0, true),
            Err(FracError::ZeroDenominator)
        );
        assert_eq!(
            Fraction::from_fraction_over_fraction(frac!(1 / 2), frac!(0), true),
            Err(FracError::ZeroDenominator)
        );
    }

    #[test]
    fn test_compound_construction() {
        let f = Fraction::from_fraction_over_integer(frac!(1 / 7), 5, true).unwrap();
        assert_eq!(parts(f), (1, 35));

        let f = Fraction::from_fraction_over_fraction(frac!(1 / 7), frac!(2 / 3), true).unwrap();
        assert_eq!(parts(f), (3, 14));

        let f = Fraction::from_fraction_over_fraction(frac!(2 / 4), frac!(2 / 3), false).unwrap();
        assert_eq!(parts(f), (3, 4));
        let f = Fraction::from_fraction_over_fraction(raw(2, 4), frac!(2 / 3), false).unwrap();
        assert_eq!(parts(f), (6, 8));
    }

    #[test]
    fn test_from_integer() {
        assert_eq!(parts(Fraction::from_integer(5)), (5, 1));
        assert_eq!(parts(Fraction::from(-5)), (-5, 1));
        assert_eq!(frac!(5), Fraction::from_integer(5));
        assert_eq!(Fraction::default(), Fraction::ZERO);
        assert_eq!(Fraction::NEG_ONE, frac!(-1));
        assert_eq!(-Fraction::ONE, Fraction::NEG_ONE);
        assert_eq!(Fraction::NEG_ONE * Fraction::NEG_ONE, Fraction::ONE);
        assert!(Fraction::NEG_ONE < Fraction::ZERO);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(parts(Fraction::from_f64(0.5, false).unwrap()), (5, 10));
        assert_eq!(parts(Fraction::from_f64(0.5, true).unwrap()), (1, 2));
        assert_eq!(parts(Fraction::from_f64(-3.0, false).unwrap()), (-3, 1));
        assert_eq!(parts(Fraction::try_from(1.47).unwrap()), (147, 100));
        assert_eq!(parts(Fraction::try_from(0.25).unwrap()), (1, 4));
        assert!(matches!(
            Fraction::try_from(f64::NAN),
            Err(FracError::FloatParseError(_))
        ));
    }

    #[test]
    fn test_parse_default_locale() {
        assert_eq!(Locale::default(), Locale::current());

        for text in ["3.1415", "1,47", "-0.5", "314", "-35/4", "2/4", "x"] {
            assert_eq!(
                Fraction::parse(text, true),
                Fraction::parse_with_locale(text, true, Locale::current())
            );
            assert_eq!(
                text.parse::<Fraction>(),
                Fraction::parse_with_locale(text, true, Locale::current())
            );
        }
        assert_eq!(Fraction::parse("2/4", false), Fraction::from_parts(2, 4, false));

        if Locale::current() == Locale::INVARIANT {
            assert_eq!("3.1415".parse::<Fraction>(), Ok(frac!(6283 / 2000)));
        }

        // neither syntax depends on the decimal separator
        assert_eq!("-35/4".parse::<Fraction>(), Ok(frac!(-35 / 4)));
        assert_eq!("314".parse::<Fraction>(), Ok(frac!(314)));
        assert_eq!("3/0".parse::<Fraction>(), Err(FracError::ZeroDenominator));
    }

    #[test]
    fn test_simplify_in_place() {
        let mut f = raw(14, 8);
        let same = f.simplify().unwrap();
        assert_eq!(parts(*same), (7, 4));
        assert_eq!(parts(f), (7, 4));

        let mut f = raw(-6, -4);
        f.simplify().unwrap().simplify().unwrap();
        assert_eq!(parts(f), (3, 2));
    }

    #[test]
    fn test_simplify_overflow() {
        let mut f = raw(BaseInt::MIN, -1);
        assert_eq!(f.simplify().map(|f| *f), Err(FracError::Overflow));
        assert_eq!(parts(f), (BaseInt::MIN, -1));

        assert_eq!(parts(raw(BaseInt::MIN, BaseInt::MIN).simplified().unwrap()), (1, 1));
        assert_eq!(parts(raw(BaseInt::MIN, 2).simplified().unwrap()), (BaseInt::MIN / 2, 1));
        assert_eq!(raw(3, BaseInt::MIN).simplified(), Err(FracError::Overflow));
    }

    #[test]
    fn test_arithmetic() {
        let a = frac!(5 / 4);
        let b = frac!(1 / 2);

        assert_eq!(parts(a + b), (14, 8));
        assert_eq!((a + b).simplified().unwrap(), frac!(14 / 8));
        assert_eq!(parts(a - b), (6, 8));
        assert_eq!(parts(a * b), (5, 8));
        assert_eq!(parts(a / b), (10, 4));
        assert_eq!(parts(-a), (-5, 4));

        assert_eq!(parts(frac!(1 / 2) / frac!(1 / 6)), (6, 2));
        assert_eq!(parts(frac!(1 / 8) / frac!(1 / 4)), (4, 8));
        assert_eq!(parts(frac!(1 / 2) * frac!(2 / 5)), (2, 10));
        assert_eq!(parts(frac!(1 / 3) * frac!(9 / 16)), (9, 48));
        assert_eq!(parts(frac!(2 / 3) * frac!(5)), (10, 3));
    }

    #[test]
    fn test_named_arithmetic_matches_operators() {
        let a = frac!(-7 / 3);
        let b = frac!(2 / 9);
        assert_eq!(a.try_add(b).unwrap(), a + b);
        assert_eq!(a.try_sub(b).unwrap(), a - b);
        assert_eq!(a.try_mul(b).unwrap(), a * b);
        assert_eq!(a.try_div(b).unwrap(), a / b);
        assert_eq!(a.try_neg().unwrap(), -a);
        assert_eq!(a.checked_add(&b), Some(a + b));
        assert_eq!(a.checked_div(&Fraction::ZERO), None);
    }

    #[test]
    fn test_scalar_arithmetic() {
        let a = frac!(5 / 4);
        assert_eq!(parts(a + 0.5), (14, 8));
        assert_eq!(parts(a - 0.5), (6, 8));
        assert_eq!(parts(a * 0.5), (5, 8));
        assert_eq!(parts(a / 0.5), (10, 4));
        assert_eq!(parts(a + 2), (13, 4));
        assert_eq!(parts(a * 3), (15, 4));
    }

    #[test]
    fn test_assign_ops() {
        let mut f = frac!(1 / 2);
        f += frac!(1 / 3);
        assert_eq!(parts(f), (5, 6));
        f *= frac!(6);
        assert_eq!(parts(f), (30, 6));
        f -= frac!(5);
        assert_eq!(parts(f), (0, 6));
        assert!(f.is_zero());
        f /= frac!(2);
        assert_eq!(parts(f), (0, 12));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            frac!(1 / 2).try_div(Fraction::new(0, 5).unwrap()),
            Err(FracError::DivisionByZero)
        );
        assert_eq!(frac!(1 / 2).try_div(raw(0, 5)), Err(FracError::DivisionByZero));
    }

    #[test]
    #[should_panic(expected = "Cannot divide")]
    fn test_division_by_zero_operator() {
        let _ = frac!(1 / 2) / frac!(0 / 5);
    }

    #[test]
    fn test_overflow_boundary() {
        let max = frac!(BaseInt::MAX);
        let min = frac!(BaseInt::MIN);

        assert_eq!(max.try_add(frac!(1)), Err(FracError::Overflow));
        assert_eq!(parts(max.try_add(frac!(-1)).unwrap()), (BaseInt::MAX - 1, 1));
        assert_eq!(min.try_sub(frac!(1)), Err(FracError::Overflow));
        assert_eq!(min.try_neg(), Err(FracError::Overflow));
        assert_eq!(parts(max.try_neg().unwrap()), (-BaseInt::MAX, 1));
        assert_eq!(max.try_mul(frac!(2)), Err(FracError::Overflow));
        assert_eq!(
            frac!(1 / 65536).try_mul(frac!(1 / 65536)),
            Err(FracError::Overflow)
        );
        assert_eq!(
            parts(frac!(1 / 46340).try_mul(frac!(1 / 46340)).unwrap()),
            (1, 46340 * 46340)
        );
        assert_eq!(max.try_div(frac!(1 / 2)), Err(FracError::Overflow));
        // the denominator product overflows even though the sum itself is small
        assert_eq!(
            Fraction::new(1, 65536)
                .unwrap()
                .try_add(Fraction::new(1, 65537).unwrap()),
            Err(FracError::Overflow)
        );
        assert_eq!(
            Fraction::from_fraction_over_integer(frac!(1 / 65536), 65536, true),
            Err(FracError::Overflow)
        );
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn test_overflow_operator_panics() {
        let _ = frac!(BaseInt::MAX) + frac!(1);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(frac!(100 / 863).to_f64(), 0.11587485515643106);
        assert_eq!(f64::from(frac!(1 / 2)), 0.5);
        assert_eq!(raw(1, -4).to_f64(), -0.25);
        assert_eq!(Fraction::option_to_f64(None), 0.0);
        assert_eq!(Fraction::option_to_f64(Some(&frac!(3 / 4))), 0.75);
    }

    #[test]
    fn test_equality_is_structural() {
        assert!(frac!(1 / 2) == frac!(1 / 2));
        assert!(frac!(1 / 2) == frac!(24 / 48));
        assert!(frac!(1 / 5) == frac!(5 / 25));
        assert!(frac!(1 / 3) != frac!(24 / 48));
        assert!(frac!(1 / 6) != frac!(5 / 25));
        assert!(raw(1, 2) != raw(2, 4));
        assert_eq!(frac!(5 / 4) * frac!(1 / 2), frac!(5 / 8));
        assert_ne!(frac!(5 / 4) * frac!(1 / 2), frac!(5 / 12));
    }

    #[test]
    fn test_ordering() {
        assert!(frac!(1 / 2) <= frac!(24 / 48));
        assert!(frac!(1 / 5) <= frac!(5 / 25));
        assert!(frac!(1 / 2) >= frac!(24 / 48));
        assert!(frac!(1 / 200) < frac!(24 / 48));
        assert!(frac!(1 / 500) < frac!(5 / 25));
        assert!(frac!(1 / 2) > frac!(24 / 148));
        assert!(frac!(1 / 5) > frac!(5 / 125));
        assert!(frac!(-1 / 2) < frac!(1 / 3));
        assert!(raw(1, -2) < raw(1, 3));
        assert!(raw(-1, -2) > raw(1, 3));
    }

    #[test]
    fn test_ordering_unreduced() {
        // equal values, different representations: reduced form first
        assert_eq!(raw(1, 2).compare(&raw(2, 4)), Ordering::Less);
        assert_eq!(raw(2, 4).compare(&raw(1, 2)), Ordering::Greater);
        assert!(raw(1, 2) <= raw(24, 48));
        assert!(raw(24, 48) > raw(1, 2));
        assert!(raw(24, 48) >= raw(1, 2));
        assert_eq!(raw(1, -2).compare(&raw(-1, 2)), Ordering::Less);
        assert_eq!(raw(3, 5).compare(&raw(3, 5)), Ordering::Equal);
    }

    #[test]
    fn test_ordering_near_boundary() {
        let big = raw(BaseInt::MAX, BaseInt::MAX - 1);
        let bigger = raw(BaseInt::MAX - 1, BaseInt::MAX - 2);
        assert!(big < bigger);
        assert!(raw(BaseInt::MIN, 1) < raw(BaseInt::MAX, 1));
        assert!(raw(BaseInt::MIN, BaseInt::MIN) > raw(BaseInt::MAX - 1, BaseInt::MAX));

        let mut sorted = vec![frac!(3 / 4), frac!(-1), frac!(1 / 3), raw(2, 6), frac!(0)];
        sorted.sort();
        assert_eq!(
            sorted,
            vec![frac!(-1), frac!(0), frac!(1 / 3), raw(2, 6), frac!(3 / 4)]
        );
    }

    #[test]
    fn test_approx() {
        assert_relative_eq!(raw(1, 2), raw(2, 4));
        assert_relative_eq!(frac!(1 / 3), frac!(333 / 1000), epsilon = 1e-3);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", raw(2, -4)), "frac!(2/-4)");
    }

    prop_compose! {
        fn any_fraction()(
            n in (BaseInt::MIN + 1)..=BaseInt::MAX,
            d in (BaseInt::MIN + 1)..=BaseInt::MAX,
        ) -> Fraction {
            let d = if d == 0 { 1 } else { d };
            raw(n, d)
        }
    }

    prop_compose! {
        fn small_fraction()(n in -10_000..=10_000, d in 1..=10_000) -> Fraction {
            raw(n, d)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]
        #[test]
        fn test_simplify_canonical(f in any_fraction()) {
            let s = f.simplified().unwrap();
            prop_assert_eq!(gcd(s.numerator(), s.denominator()), 1);
            prop_assert!(s.denominator() > 0);
            prop_assert!(s.is_simplified());
            // same value
            prop_assert_eq!(
                s.numerator() as i64 * f.denominator() as i64,
                f.numerator() as i64 * s.denominator() as i64
            );
        }

        #[test]
        fn test_simplify_idempotent(f in any_fraction()) {
            let once = f.simplified().unwrap();
            let twice = once.simplified().unwrap();
            prop_assert_eq!(parts(once), parts(twice));
        }

        #[test]
        fn test_order_is_total(a in any_fraction(), b in any_fraction()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        }

        #[test]
        fn test_order_matches_value(a in small_fraction(), b in small_fraction()) {
            let (x, y) = (a.to_f64(), b.to_f64());
            if (x - y).abs() > 1e-9 {
                prop_assert_eq!(a < b, x < y);
            }
        }

        #[test]
        fn test_arithmetic_matches_floats(a in small_fraction(), b in small_fraction()) {
            let (x, y) = (a.to_f64(), b.to_f64());
            assert_relative_eq!((a + b).to_f64(), x + y, epsilon = 1e-9);
            assert_relative_eq!((a - b).to_f64(), x - y, epsilon = 1e-9);
            assert_relative_eq!((a * b).to_f64(), x * y, epsilon = 1e-9);
            if !b.is_zero() {
                assert_relative_eq!((a / b).to_f64(), x / y, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }
}
