//! Arbitrary-precision numbers, kept as canonical decimal text.
//!
//! Values are written to JSON as bare numbers with every digit intact,
//! and never in scientific notation.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::NumberError;

/// The largest exponent a [`Decimal`] accepts, in either direction.
///
/// Exponents are expanded into digits, so this bounds the length of the
/// text a short number can produce.
pub const MAX_EXPONENT: i32 = 4096;

/// An integer of any size.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Integer(String);

impl Integer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl FromStr for Integer {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = split_sign(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumberError::Integer(s.to_string()));
        }
        Ok(Self(with_sign(negative, trim_leading_zeros(digits))))
    }
}

/// A decimal number of any size and precision.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Decimal(String);

impl Decimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }
}

impl FromStr for Decimal {
    type Err = NumberError;

    /// Parses JSON number syntax, expanding any exponent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NumberError::Decimal(s.to_string());
        let (negative, rest) = split_sign(s);
        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(at) => {
                let exponent = rest[at + 1..].parse::<i32>().map_err(|_| invalid())?;
                if exponent.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
                    return Err(NumberError::ExponentOutOfRange(s.to_string()));
                }
                (&rest[..at], exponent)
            }
            None => (rest, 0),
        };
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let valid = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int.is_empty() || !valid(int) || !valid(frac) || mantissa.ends_with('.') {
            return Err(invalid());
        }

        // Move the decimal point `exponent` places to the right.
        let digits = format!("{int}{frac}");
        let point = int.len() as i64 + exponent as i64;
        let (int, frac) = if point <= 0 {
            let zeros = "0".repeat(point.unsigned_abs() as usize);
            ("0".to_string(), format!("{zeros}{digits}"))
        } else if point as usize >= digits.len() {
            let zeros = "0".repeat(point as usize - digits.len());
            (format!("{digits}{zeros}"), String::new())
        } else {
            let (int, frac) = digits.split_at(point as usize);
            (int.to_string(), frac.to_string())
        };
        // An exponent can leave trailing zeros that weren't written.
        let frac = if exponent == 0 {
            frac.as_str()
        } else {
            frac.trim_end_matches('0')
        };

        let int = trim_leading_zeros(&int);
        let text = if frac.is_empty() {
            int.to_string()
        } else {
            format!("{int}.{frac}")
        };
        let zero = text.bytes().all(|b| b == b'0' || b == b'.');
        Ok(Self(with_sign(negative && !zero, &text)))
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    }
}

fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

fn with_sign(negative: bool, digits: &str) -> String {
    if negative && digits != "0" {
        format!("-{digits}")
    } else {
        digits.to_string()
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Integer {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }

            impl From<$ty> for Decimal {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl TryFrom<f64> for Decimal {
    type Error = NumberError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(NumberError::NonFinite);
        }
        // `Display` for floats never uses an exponent.
        value.to_string().parse()
    }
}

macro_rules! impl_text {
    ($($ty:ident),*) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    use serde::ser::Error as _;
                    let raw = RawValue::from_string(self.0.clone()).map_err(S::Error::custom)?;
                    raw.serialize(serializer)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                /// Accepts a JSON number, or a string that holds one.
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = Box::<RawValue>::deserialize(deserializer)?;
                    let text = raw.get().trim();
                    let text = text
                        .strip_prefix('"')
                        .and_then(|text| text.strip_suffix('"'))
                        .unwrap_or(text);
                    text.parse().map_err(D::Error::custom)
                }
            }
        )*
    };
}

impl_text!(Integer, Decimal);
