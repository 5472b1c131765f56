use indexmap::IndexMap;
use serde::Deserialize;

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::schema::SchemaOrRef;

/// The reusable definitions that `$ref` pointers resolve against.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Components {
    pub schemas: IndexMap<String, SchemaOrRef>,
    pub parameters: IndexMap<String, ParameterOrRef>,
    pub request_bodies: IndexMap<String, RequestBodyOrRef>,
}

impl Components {
    pub fn parameter(&self, ref_path: &str) -> Option<&ParameterOrRef> {
        self.parameters.get(ref_name(ref_path, "parameters")?)
    }

    pub fn request_body(&self, ref_path: &str) -> Option<&RequestBodyOrRef> {
        self.request_bodies.get(ref_name(ref_path, "requestBodies")?)
    }
}

/// Extracts `Name` from `#/components/{section}/Name`.
///
/// Returns `None` for pointers into other sections or other documents.
pub fn ref_name<'a>(ref_path: &'a str, section: &str) -> Option<&'a str> {
    let rest = ref_path.strip_prefix("#/components/")?;
    let (found, name) = rest.split_once('/')?;
    (found == section && !name.is_empty() && !name.contains('/')).then_some(name)
}
