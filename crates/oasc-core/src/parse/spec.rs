use indexmap::IndexMap;
use serde::Deserialize;

use super::components::Components;
use super::operation::PathItem;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,
    pub version: String,
}

/// The root of an OpenAPI 3.x document, limited to what the compiler
/// reads. The shape check in [`super::from_value`] has already made sure
/// the required members are present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,
    #[serde(default)]
    pub info: Info,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}
