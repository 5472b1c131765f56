use serde::Deserialize;

use super::schema::SchemaOrRef;

/// The media type used for request bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// A media type object. Examples and encodings are ignored.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<SchemaOrRef>,
}

/// Returns `true` for `application/json` and `+json` structured suffixes,
/// ignoring media type parameters.
pub fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == APPLICATION_JSON || essence.ends_with("+json")
}
