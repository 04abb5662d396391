//! Exact decimal arithmetic for the Phemex numeric encodings.
//!
//! Every price, size, and rate in this crate is a [`PhemexDecimal`]. Values
//! round-trip through their base-10 text form with no precision loss and
//! render in plain fixed-point notation, never scientific, which is what the
//! wire protocol expects.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Exact decimal value used throughout the Phemex protocol.
///
/// Arithmetic between two `PhemexDecimal`s stays in the type. Heterogeneous
/// inputs (text, integers, floats) go through [`PhemexDecimal::coerce`],
/// which routes floats through their canonical text form so binary rounding
/// artifacts never reach the decimal domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhemexDecimal(Decimal);

/// Numeric input kinds accepted by [`PhemexDecimal::coerce`].
#[derive(Debug, Clone)]
pub enum Numeric {
    Text(String),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Text(value.to_string())
    }
}

impl From<String> for Numeric {
    fn from(value: String) -> Self {
        Numeric::Text(value)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(value)
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Numeric::Int(value.into())
    }
}

impl From<u32> for Numeric {
    fn from(value: u32) -> Self {
        Numeric::Int(value.into())
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Numeric::Decimal(value)
    }
}

impl From<PhemexDecimal> for Numeric {
    fn from(value: PhemexDecimal) -> Self {
        Numeric::Decimal(value.0)
    }
}

impl PhemexDecimal {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);

    /// Convert any accepted numeric input into an exact decimal.
    ///
    /// Floats are rendered to text first (`f64`'s shortest round-trip form)
    /// and parsed from there, so `coerce(123.45)` equals `coerce("123.45")`
    /// exactly. Non-finite floats and malformed text fail with
    /// [`Error::InvalidNumber`].
    pub fn coerce(value: impl Into<Numeric>) -> Result<Self> {
        match value.into() {
            Numeric::Text(s) => s.parse(),
            Numeric::Int(i) => Ok(Self(Decimal::from(i))),
            Numeric::Float(f) => {
                if !f.is_finite() {
                    return Err(Error::InvalidNumber {
                        value: f.to_string(),
                        message: "not a finite number".to_string(),
                    });
                }
                f.to_string().parse()
            }
            Numeric::Decimal(d) => Ok(Self(d)),
        }
    }

    /// Fold a sequence into its exact sum, starting from zero. No float
    /// intermediates: `0.1 + 0.2 + 0.3` is exactly `0.6`.
    pub fn sum<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        values.into_iter().fold(Self::ZERO, |acc, v| acc + v)
    }

    /// Plain fixed-point rendering, never scientific notation.
    pub fn to_canonical_string(&self) -> String {
        self.0.to_string()
    }

    /// The underlying `rust_decimal` value.
    pub fn inner(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Strip trailing fractional zeros (`1234.0000` -> `1234`).
    pub fn normalize(&self) -> Self {
        Self(self.0.normalize())
    }

    /// Integer power by repeated multiplication; exact for the small
    /// exponents used in this protocol.
    pub fn powi(&self, exp: u32) -> Self {
        let mut acc = Decimal::ONE;
        for _ in 0..exp {
            acc *= self.0;
        }
        Self(acc)
    }

    /// Floor division.
    pub fn floor_div(&self, other: Self) -> Self {
        Self((self.0 / other.0).floor())
    }

    /// Multiply by `10^exp` without precision loss. This is the scaling
    /// primitive: positive exponents rescale toward the wire encoding,
    /// negative exponents descale toward human values.
    pub fn mul_pow10(&self, exp: i32) -> Self {
        if exp >= 0 {
            Self(self.0 * pow10(exp as u32))
        } else {
            // 10^-k as an exact decimal: 1 with scale k.
            Self(self.0 * Decimal::new(1, exp.unsigned_abs()))
        }
    }
}

fn pow10(exp: u32) -> Decimal {
    Decimal::from_i128_with_scale(10_i128.pow(exp), 0)
}

impl FromStr for PhemexDecimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Decimal::from_str(s)
            .map(Self)
            .map_err(|e| Error::InvalidNumber {
                value: s.to_string(),
                message: e.to_string(),
            })
    }
}

impl From<Decimal> for PhemexDecimal {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<PhemexDecimal> for Decimal {
    fn from(value: PhemexDecimal) -> Self {
        value.0
    }
}

impl From<i64> for PhemexDecimal {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<i32> for PhemexDecimal {
    fn from(value: i32) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<u64> for PhemexDecimal {
    fn from(value: u64) -> Self {
        Self(Decimal::from(value))
    }
}

impl TryFrom<&str> for PhemexDecimal {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<f64> for PhemexDecimal {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::coerce(value)
    }
}

impl fmt::Display for PhemexDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for PhemexDecimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for PhemexDecimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for PhemexDecimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Div for PhemexDecimal {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }
}

impl Rem for PhemexDecimal {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        Self(self.0 % rhs.0)
    }
}

impl Neg for PhemexDecimal {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Serialize for PhemexDecimal {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> Deserialize<'de> for PhemexDecimal {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumericVisitor;

        impl Visitor<'_> for NumericVisitor {
            type Value = PhemexDecimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                v.parse().map_err(de::Error::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(PhemexDecimal::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(PhemexDecimal::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                PhemexDecimal::coerce(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(NumericVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> PhemexDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn coerce_accepts_str_int_float_decimal() {
        let from_str = PhemexDecimal::coerce("123").unwrap();
        let from_int = PhemexDecimal::coerce(123_i64).unwrap();
        let from_float = PhemexDecimal::coerce(123.0).unwrap();
        let from_decimal = PhemexDecimal::coerce(Decimal::from(123)).unwrap();

        assert_eq!(from_str, from_int);
        assert_eq!(from_str, from_float);
        assert_eq!(from_str, from_decimal);
    }

    #[test]
    fn float_goes_through_canonical_text() {
        // The f64 that prints as "123.45" must equal the parsed string, with
        // no binary rounding divergence.
        let from_float = PhemexDecimal::coerce(123.45_f64).unwrap();
        let from_text = dec("123.45");
        assert_eq!(from_float, from_text);
        assert_eq!(from_float.to_canonical_string(), "123.45");
    }

    #[test]
    fn malformed_text_fails_loudly() {
        let err = "not-a-number".parse::<PhemexDecimal>().unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { .. }));
        assert!(PhemexDecimal::coerce(f64::NAN).is_err());
        assert!(PhemexDecimal::coerce(f64::INFINITY).is_err());
    }

    #[test]
    fn text_round_trips_exactly() {
        for s in ["0", "1", "-1", "1234.5678", "0.00000001", "-42.10", "1234.00"] {
            assert_eq!(dec(s).to_canonical_string(), s);
        }
    }

    #[test]
    fn rendering_is_never_scientific() {
        let tiny = dec("0.00000001");
        let huge = dec("100000000000000");
        assert_eq!(tiny.to_canonical_string(), "0.00000001");
        assert_eq!(huge.to_canonical_string(), "100000000000000");
    }

    #[test]
    fn sum_is_exact() {
        let total = PhemexDecimal::sum([dec("0.1"), dec("0.2"), dec("0.3")]);
        assert_eq!(total.to_canonical_string(), "0.6");
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(PhemexDecimal::sum([]), PhemexDecimal::ZERO);
    }

    #[test]
    fn arithmetic_preserves_type_and_value() {
        assert_eq!(dec("1.5") + dec("2.5"), dec("4"));
        assert_eq!(dec("1.5") - dec("2.5"), dec("-1"));
        assert_eq!(dec("1.5") * dec("2"), dec("3"));
        assert_eq!(dec("3") / dec("2"), dec("1.5"));
        assert_eq!(dec("7") % dec("3"), dec("1"));
        assert_eq!(-dec("1.5"), dec("-1.5"));
        assert_eq!(dec("-1.5").abs(), dec("1.5"));
    }

    #[test]
    fn floor_div_and_powi() {
        assert_eq!(dec("7").floor_div(dec("2")), dec("3"));
        assert_eq!(dec("-7").floor_div(dec("2")), dec("-4"));
        assert_eq!(dec("2").powi(10), dec("1024"));
        assert_eq!(dec("1.1").powi(2), dec("1.21"));
        assert_eq!(dec("5").powi(0), dec("1"));
    }

    #[test]
    fn comparisons_are_exact() {
        assert!(dec("0.1") < dec("0.2"));
        assert_eq!(dec("1").max(dec("2")), dec("2"));
        assert_eq!(dec("1.0"), dec("1"));
    }

    #[test]
    fn mul_pow10_is_lossless_both_ways() {
        let wire = dec("12340000");
        let human = wire.mul_pow10(-4);
        assert_eq!(human, dec("1234.0000"));
        assert_eq!(human.normalize().to_canonical_string(), "1234");
        assert_eq!(human.mul_pow10(4).normalize(), wire);
    }

    #[test]
    fn mul_pow10_inverse_law() {
        for v in ["0.00012345", "1234.56", "-9.9", "0"] {
            for k in 0..10_i32 {
                let value = dec(v);
                assert_eq!(value.mul_pow10(k).mul_pow10(-k).normalize(), value.normalize());
            }
        }
    }

    #[test]
    fn serde_string_and_number_inputs() {
        let from_string: PhemexDecimal = serde_json::from_str(r#""12345.67""#).unwrap();
        let from_int: PhemexDecimal = serde_json::from_str("12345").unwrap();
        let from_float: PhemexDecimal = serde_json::from_str("123.45").unwrap();
        assert_eq!(from_string, dec("12345.67"));
        assert_eq!(from_int, dec("12345"));
        assert_eq!(from_float, dec("123.45"));
    }

    #[test]
    fn serde_serializes_as_plain_string() {
        let value = dec("1234.5600");
        assert_eq!(serde_json::to_string(&value).unwrap(), r#""1234.5600""#);
    }
}
