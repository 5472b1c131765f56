use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional field that distinguishes between "not present"
/// and "present, but `null`".
///
/// Fields of this type should be marked with `#[serde(default)]` and
/// `#[serde(skip_serializing_if = "Maybe::is_absent")]`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Maybe<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Maybe<T> {
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    #[inline]
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Absent => Maybe::Absent,
            Self::Null => Maybe::Null,
            Self::Value(value) => Maybe::Value(value),
        }
    }

    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Self::Absent => Maybe::Absent,
            Self::Null => Maybe::Null,
            Self::Value(value) => Maybe::Value(f(value)),
        }
    }

    /// Collapses absence and `null` into `None`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Absent | Self::Null => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl<T> From<T> for Maybe<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    /// Maps `None` to `null`, since an `Option` has no notion of absence.
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Value(value),
            None => Self::Null,
        }
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent | Self::Null => serializer.serialize_none(),
            Self::Value(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor<T>(PhantomData<T>);
        impl<'de, T: Deserialize<'de>> serde::de::Visitor<'de> for Visitor<T> {
            type Value = Maybe<T>;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("`null` or value")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Maybe::Null)
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Maybe::Null)
            }

            fn visit_some<D: Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Self::Value, D::Error> {
                T::deserialize(deserializer).map(Maybe::Value)
            }
        }
        deserializer.deserialize_option(Visitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pet {
        #[serde(default, skip_serializing_if = "Maybe::is_absent")]
        tag: Maybe<String>,
    }

    #[test]
    fn test_three_states() {
        let absent: Pet = serde_json::from_str("{}").unwrap();
        let null: Pet = serde_json::from_str(r#"{"tag": null}"#).unwrap();
        let value: Pet = serde_json::from_str(r#"{"tag": "good"}"#).unwrap();
        assert_eq!(absent.tag, Maybe::Absent);
        assert_eq!(null.tag, Maybe::Null);
        assert_eq!(value.tag, Maybe::Value("good".to_string()));

        assert_eq!(serde_json::to_string(&absent).unwrap(), "{}");
        assert_eq!(serde_json::to_string(&null).unwrap(), r#"{"tag":null}"#);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"tag":"good"}"#);
    }

    #[test]
    fn test_into_option() {
        assert_eq!(Maybe::<i32>::Absent.into_option(), None);
        assert_eq!(Maybe::<i32>::Null.into_option(), None);
        assert_eq!(Maybe::Value(1).into_option(), Some(1));
        assert_eq!(Maybe::<i32>::from(None::<i32>), Maybe::Null);
    }
}
