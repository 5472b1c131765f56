pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod reference;
pub mod request_body;
pub mod schema;
pub mod spec;

use serde_json::Value;

use crate::error::DocumentError;
use spec::OpenApiSpec;

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, DocumentError> {
    let yaml: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(input).map_err(|e| DocumentError::Syntax(e.to_string()))?;
    // Round-tripping through `serde_json` stringifies non-string mapping keys,
    // like the numeric response codes that YAML documents commonly use.
    let value = serde_json::to_value(yaml).map_err(|e| DocumentError::Syntax(e.to_string()))?;
    from_value(value)
}

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, DocumentError> {
    let value: Value =
        serde_json::from_str(input).map_err(|e| DocumentError::Syntax(e.to_string()))?;
    from_value(value)
}

/// Validate the document's shape, then deserialize it into typed structs.
pub fn from_value(value: Value) -> Result<OpenApiSpec, DocumentError> {
    let diagnostics = shape_diagnostics(&value);
    if !diagnostics.is_empty() {
        return Err(DocumentError::Invalid { diagnostics });
    }
    serde_path_to_error::deserialize(value).map_err(|err| DocumentError::Shape {
        path: err.path().to_string(),
        message: err.inner().to_string(),
    })
}

/// Collects every violation of the input contract, so that callers see
/// all of them at once instead of fixing one per run.
fn shape_diagnostics(value: &Value) -> Vec<String> {
    let mut diagnostics = Vec::new();
    let root = match value {
        Value::Null => return vec!["document is empty or null".to_string()],
        Value::Object(root) => root,
        _ => return vec!["document root must be a mapping".to_string()],
    };

    match root.get("openapi") {
        None | Some(Value::Null) => diagnostics.push("missing required field `openapi`".to_string()),
        Some(Value::String(version)) if !version.starts_with("3.") => {
            diagnostics.push(format!("unsupported OpenAPI version: {version}"));
        }
        Some(Value::String(_)) => {}
        Some(other) => diagnostics.push(format!("`openapi` must be a string, found {other}")),
    }

    match root.get("paths") {
        None | Some(Value::Null) => diagnostics.push("missing required field `paths`".to_string()),
        Some(Value::Object(_)) => {}
        Some(_) => diagnostics.push("`paths` must be a mapping".to_string()),
    }

    match root.get("components") {
        None | Some(Value::Null) => {
            diagnostics.push("missing required field `components.schemas`".to_string())
        }
        Some(Value::Object(components)) => match components.get("schemas") {
            None | Some(Value::Null) => {
                diagnostics.push("missing required field `components.schemas`".to_string())
            }
            Some(Value::Object(_)) => {}
            Some(_) => diagnostics.push("`components.schemas` must be a mapping".to_string()),
        },
        Some(_) => diagnostics.push("`components` must be a mapping".to_string()),
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_document() {
        let err = from_yaml("~").unwrap_err();
        assert_eq!(err.to_string(), "invalid document: document is empty or null");
    }

    #[test]
    fn test_all_diagnostics_are_reported() {
        let err = from_yaml("openapi: '2.0'\ninfo: {title: T, version: '1'}\n").unwrap_err();
        match err {
            DocumentError::Invalid { diagnostics } => {
                assert_eq!(
                    diagnostics,
                    [
                        "unsupported OpenAPI version: 2.0",
                        "missing required field `paths`",
                        "missing required field `components.schemas`",
                    ]
                );
            }
            other => panic!("expected invalid document, got {other:?}"),
        }
    }

    #[test]
    fn test_numeric_yaml_keys() {
        let spec = from_yaml(
            r#"
openapi: 3.0.3
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        200:
          description: ok
components:
  schemas: {}
"#,
        )
        .unwrap();
        assert_eq!(spec.paths.len(), 1);
    }

    #[test]
    fn test_typed_error_has_path() {
        let err = from_json(
            r#"{"openapi": "3.1.0", "paths": {"/a": {"get": {"tags": 5}}}, "components": {"schemas": {}}}"#,
        )
        .unwrap_err();
        match err {
            DocumentError::Shape { path, .. } => assert_eq!(path, "paths./a.get.tags"),
            other => panic!("expected shape error, got {other:?}"),
        }
    }
}
