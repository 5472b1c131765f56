use serde::Deserialize;

use super::reference::RefOr;
use super::schema::SchemaOrRef;

/// The `in` field of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// A parameter object. Only `schema`-based parameters are read;
/// `content`-based ones deserialize with no schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<SchemaOrRef>,
    pub style: Option<String>,
    pub explode: Option<bool>,
}

pub type ParameterOrRef = RefOr<Parameter>;
