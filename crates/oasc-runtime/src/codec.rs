//! Serde hooks for fields that need a specific wire encoding.

/// Encodes raw bytes as a JSON array of numbers, like `[7, 255]`,
/// instead of Base64 text.
///
/// Use with `#[serde(with = "...::codec::byte_array")]`; the
/// [`nullable`] and [`maybe`] submodules handle `Option<Vec<u8>>`
/// and `Maybe<Vec<u8>>` fields.
pub mod byte_array {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Vec::<u8>::deserialize(deserializer)
    }

    /// A byte array that may be `null`.
    pub mod nullable {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        use super::ByteArray;

        pub fn serialize<S: Serializer>(
            bytes: &Option<Vec<u8>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            bytes.as_deref().map(ByteArray).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Vec<u8>>, D::Error> {
            Option::<Vec<u8>>::deserialize(deserializer)
        }
    }

    /// A byte array that may be absent or `null`.
    pub mod maybe {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        use super::ByteArray;
        use crate::Maybe;

        pub fn serialize<S: Serializer>(
            bytes: &Maybe<Vec<u8>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            bytes
                .as_ref()
                .map(|bytes| ByteArray(bytes))
                .serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Maybe<Vec<u8>>, D::Error> {
            Maybe::<Vec<u8>>::deserialize(deserializer)
        }
    }

    struct ByteArray<'a>(&'a [u8]);

    impl serde::Serialize for ByteArray<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize(self.0, serializer)
        }
    }
}
