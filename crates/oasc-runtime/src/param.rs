use std::fmt::Display;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;

use crate::maybe::Maybe;
use crate::number::{Decimal, Integer};

/// A parameter value, before it's encoded for a serialization style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// No value; the parameter is omitted.
    Absent,
    Scalar(String),
    Sequence(Vec<ParamValue>),
    /// Named values, in the declared order of the type's properties.
    Object(Vec<(String, ParamValue)>),
}

impl ParamValue {
    pub fn scalar(value: impl Display) -> Self {
        Self::Scalar(value.to_string())
    }

    pub fn object<'a>(entries: impl IntoIterator<Item = (&'a str, ParamValue)>) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Converts a value into a [`ParamValue`].
///
/// Generated types that are used as parameters implement this by listing
/// their fields in declared order.
pub trait ToParam {
    fn to_param(&self) -> ParamValue;
}

impl ToParam for ParamValue {
    fn to_param(&self) -> ParamValue {
        self.clone()
    }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> ParamValue {
        (**self).to_param()
    }
}

impl<T: ToParam + ?Sized> ToParam for Box<T> {
    fn to_param(&self) -> ParamValue {
        (**self).to_param()
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl ToParam for $ty {
                #[inline]
                fn to_param(&self) -> ParamValue {
                    ParamValue::scalar(self)
                }
            }
        )*
    };
}

// `Display` for floats never uses scientific notation.
impl_display!(
    i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64, bool, char, str, String,
    Integer, Decimal
);

impl ToParam for NaiveDate {
    fn to_param(&self) -> ParamValue {
        ParamValue::Scalar(self.format("%Y-%m-%d").to_string())
    }
}

/// Keeps the offset of the value, writing UTC as `Z`. Sub-second digits
/// are written in groups of three.
impl ToParam for DateTime<FixedOffset> {
    fn to_param(&self) -> ParamValue {
        ParamValue::Scalar(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl ToParam for DateTime<Utc> {
    fn to_param(&self) -> ParamValue {
        ParamValue::Scalar(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl<T: ToParam> ToParam for Option<T> {
    fn to_param(&self) -> ParamValue {
        match self {
            Some(value) => value.to_param(),
            None => ParamValue::Absent,
        }
    }
}

/// Both absence and `null` omit the parameter.
impl<T: ToParam> ToParam for Maybe<T> {
    fn to_param(&self) -> ParamValue {
        match self {
            Maybe::Value(value) => value.to_param(),
            Maybe::Absent | Maybe::Null => ParamValue::Absent,
        }
    }
}

impl<T: ToParam> ToParam for [T] {
    fn to_param(&self) -> ParamValue {
        ParamValue::Sequence(self.iter().map(ToParam::to_param).collect())
    }
}

impl<T: ToParam> ToParam for Vec<T> {
    fn to_param(&self) -> ParamValue {
        self.as_slice().to_param()
    }
}

impl<T: ToParam, const N: usize> ToParam for [T; N] {
    fn to_param(&self) -> ParamValue {
        self.as_slice().to_param()
    }
}

impl<T: ToParam> ToParam for IndexMap<String, T> {
    fn to_param(&self) -> ParamValue {
        ParamValue::object(self.iter().map(|(key, value)| (key.as_str(), value.to_param())))
    }
}

impl ToParam for serde_json::Value {
    fn to_param(&self) -> ParamValue {
        use serde_json::Value;
        match self {
            Value::Null => ParamValue::Absent,
            Value::Bool(value) => value.to_param(),
            // `Number` writes large and small floats with an exponent.
            Value::Number(value) => match value.as_f64() {
                Some(float) if value.is_f64() => float.to_param(),
                _ => ParamValue::scalar(value),
            },
            Value::String(value) => value.to_param(),
            Value::Array(values) => values.to_param(),
            Value::Object(map) => {
                ParamValue::object(map.iter().map(|(key, value)| (key.as_str(), value.to_param())))
            }
        }
    }
}
