use indexmap::IndexMap;
use serde::Deserialize;

use super::reference::RefOr;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::Null => "null",
        }
    }
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

pub type SchemaOrRef = RefOr<Box<Schema>>;

/// A JSON Schema object, limited to the keywords the model generators read.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<TypeSet>,
    pub format: Option<String>,
    pub description: Option<String>,
    pub nullable: Option<bool>,
    /// `None` when the keyword is missing; `Some` (possibly empty) when declared.
    pub properties: Option<IndexMap<String, SchemaOrRef>>,
    pub required: Vec<String>,
    pub additional_properties: Option<AdditionalProperties>,
    pub items: Option<Box<SchemaOrRef>>,
    pub all_of: Vec<SchemaOrRef>,
    pub one_of: Vec<SchemaOrRef>,
    pub any_of: Vec<SchemaOrRef>,
}

impl Schema {
    /// Returns the single non-null type and whether `null` is also allowed.
    ///
    /// Returns `Err` with every listed type when more than one
    /// non-null type is present.
    pub fn single_type(&self) -> Result<(Option<SchemaType>, bool), Vec<SchemaType>> {
        let nullable = self.nullable.unwrap_or(false);
        match &self.schema_type {
            None => Ok((None, nullable)),
            Some(TypeSet::Single(SchemaType::Null)) => Ok((None, true)),
            Some(TypeSet::Single(ty)) => Ok((Some(*ty), nullable)),
            Some(TypeSet::Multiple(types)) => {
                let has_null = types.contains(&SchemaType::Null);
                let mut non_null = types.iter().filter(|t| **t != SchemaType::Null);
                match (non_null.next(), non_null.next()) {
                    (first, None) => Ok((first.copied(), nullable || has_null)),
                    _ => Err(types.clone()),
                }
            }
        }
    }

    /// Returns `true` if the schema uses `allOf`, `oneOf` or `anyOf`.
    pub fn is_composite(&self) -> bool {
        !self.all_of.is_empty() || !self.one_of.is_empty() || !self.any_of.is_empty()
    }
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}
