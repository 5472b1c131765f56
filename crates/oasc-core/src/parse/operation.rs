use serde::Deserialize;

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;

/// The HTTP method fields of a path item, in the order OpenAPI lists them.
pub const METHODS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterOrRef>,
    pub request_body: Option<RequestBodyOrRef>,
    pub deprecated: Option<bool>,
}

/// A path item: parameters shared by its operations, and one operation
/// per HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PathItem {
    pub parameters: Vec<ParameterOrRef>,
    get: Option<Operation>,
    put: Option<Operation>,
    post: Option<Operation>,
    delete: Option<Operation>,
    options: Option<Operation>,
    head: Option<Operation>,
    patch: Option<Operation>,
    trace: Option<Operation>,
}

impl PathItem {
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method {
            "get" => self.get.as_ref(),
            "put" => self.put.as_ref(),
            "post" => self.post.as_ref(),
            "delete" => self.delete.as_ref(),
            "options" => self.options.as_ref(),
            "head" => self.head.as_ref(),
            "patch" => self.patch.as_ref(),
            "trace" => self.trace.as_ref(),
            _ => None,
        }
    }

    /// The operations on this path, as `(method, operation)` in [`METHODS`] order.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        METHODS
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_follow_method_order() {
        let item: PathItem = serde_yaml_ng::from_str(
            "delete: {operationId: b}\nget: {operationId: a}\nx-extra: {}\n",
        )
        .unwrap();
        let ids: Vec<(&str, Option<&str>)> = item
            .operations()
            .map(|(method, op)| (method, op.operation_id.as_deref()))
            .collect();
        assert_eq!(ids, [("get", Some("a")), ("delete", Some("b"))]);
    }
}
