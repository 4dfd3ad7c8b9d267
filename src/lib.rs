//! Exact fractions over fixed-width integers.
//!
//! [`Fraction`] never rounds: `1/3` stays `1/3`. Fractions are built from integer parts, from other
//! fractions, from floats or from text (`"-35/4"`, `"3.1415"`, `"1,47"` in a comma locale), and
//! support arithmetic, ordering without floating point, and three output layouts. Overflow of the
//! underlying integers is an error, never a silent wraparound.

pub mod format;
pub mod fract;
pub mod locale;
pub mod parsing;

pub use format::FractionFormat;
pub use fract::{gcd, BaseInt, FracError, Fraction};
pub use locale::Locale;
