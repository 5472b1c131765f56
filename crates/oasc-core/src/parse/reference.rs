use serde::Deserialize;

/// Either a `$ref` pointer or an inline value.
///
/// The pointer variant is tried first, so an object with a `$ref` key is
/// always a reference, whatever else it declares.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Item(T),
}
