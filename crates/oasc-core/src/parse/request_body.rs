use indexmap::IndexMap;
use serde::Deserialize;

use super::media_type::MediaType;
use super::reference::RefOr;

/// A request body object, with its media types in document order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,
    #[serde(default)]
    pub required: bool,
}

pub type RequestBodyOrRef = RefOr<RequestBody>;
