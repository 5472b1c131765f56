use std::collections::{BTreeMap, BTreeSet, HashMap};

use indexmap::IndexMap;
use log::debug;

use crate::error::ModelError;
use crate::ir::{
    ApiAggregate, Builtin, GroupEntry, HttpMethod, Namespace, OTHER_TAG, Operation, Parameter,
    ParameterLocation, ParameterStyle, Reference, RequestBody, TaggedOperationsGroup,
};
use crate::naming::{field_name, type_name, unique_field_names, unique_type_names};
use crate::parse::media_type::is_json;
use crate::parse::operation::PathItem;
use crate::parse::parameter::{self as parse_parameter, ParameterOrRef};
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::spec::OpenApiSpec;

use super::resolver::Nesting;
use super::schemas::SchemaWalker;

/// The name of the root node.
pub const API_NAME: &str = "Api";

/// Methods that every rendered aggregate has, besides operations and accessors.
pub const API_METHODS: &[&str] = &["new", "base_url"];

/// The name of the request body argument.
const BODY_ARGUMENT: &str = "body";

/// Checks that every operation has an `operationId`, and that no two
/// operations share one.
///
/// Returns the cased method name for each operation id, made unique in
/// document order.
pub fn validate_operation_ids(
    paths: &IndexMap<String, PathItem>,
) -> Result<HashMap<String, String>, ModelError> {
    let mut seen: HashMap<&str, String> = HashMap::new();
    let mut ids = Vec::new();
    for (path, item) in paths {
        for (method, operation) in item.operations() {
            let location = format!("{} {path}", method.to_uppercase());
            let Some(id) = operation.operation_id.as_deref() else {
                return Err(ModelError::MissingOperationId {
                    method: method.to_uppercase(),
                    path: path.clone(),
                });
            };
            if let Some(first) = seen.get(id) {
                return Err(ModelError::DuplicateOperationId {
                    id: id.to_string(),
                    first: first.clone(),
                    second: location,
                });
            }
            seen.insert(id, location);
            ids.push(id);
        }
    }
    let names = unique_field_names(API_METHODS.iter().copied().chain(ids.iter().copied()));
    Ok(ids
        .into_iter()
        .map(str::to_string)
        .zip(names.into_iter().skip(API_METHODS.len()))
        .collect())
}

/// Walks `paths` into operations, then groups them by tag.
pub struct PathWalker<'s, 'a> {
    schemas: &'s mut SchemaWalker<'a>,
    base: Namespace,
    method_names: HashMap<String, String>,
}

impl<'s, 'a> PathWalker<'s, 'a> {
    pub fn new(
        schemas: &'s mut SchemaWalker<'a>,
        base: Namespace,
        method_names: HashMap<String, String>,
    ) -> Self {
        Self {
            schemas,
            base,
            method_names,
        }
    }

    /// Returns every operation in document order.
    pub fn operations(&mut self, spec: &'a OpenApiSpec) -> Result<Vec<Operation>, ModelError> {
        let mut operations = Vec::new();
        for (path, item) in &spec.paths {
            for (field, operation) in item.operations() {
                let (Some(method), Some(id)) =
                    (HttpMethod::from_field(field), operation.operation_id.as_deref())
                else {
                    continue;
                };
                let method_name = self
                    .method_names
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| field_name(id));

                let parent = Reference::new(self.schemas.resolver().models().clone(), type_name(id));
                let nesting = Nesting::under(&parent);

                let mut parameters =
                    self.parameters(&item.parameters, &operation.parameters, &nesting, id)?;
                let mut request_body = match &operation.request_body {
                    Some(body) => self.request_body(body, &nesting, id)?,
                    None => None,
                };

                // Argument names are unique across parameters and the body.
                let wire_names: Vec<&str> = parameters
                    .iter()
                    .map(|p| p.wire_name.as_str())
                    .chain(request_body.as_ref().map(|_| BODY_ARGUMENT))
                    .collect();
                let mut names = unique_field_names(wire_names.iter().copied());
                if let Some(body) = request_body.as_mut() {
                    body.name = names.pop().unwrap_or_else(|| BODY_ARGUMENT.to_string());
                }
                for (parameter, name) in parameters.iter_mut().zip(names) {
                    parameter.name = name;
                }

                let mut tags: BTreeSet<String> = operation.tags.iter().cloned().collect();
                if tags.is_empty() {
                    tags.insert(OTHER_TAG.to_string());
                }

                debug!("operation {id}: {method} {path}");
                operations.push(Operation {
                    tags,
                    id: id.to_string(),
                    method_name,
                    method,
                    path: path.clone(),
                    summary: operation
                        .summary
                        .clone()
                        .or_else(|| operation.description.clone()),
                    deprecated: operation.deprecated.unwrap_or(false),
                    parameters,
                    request_body,
                });
            }
        }
        Ok(operations)
    }

    /// Groups operations by tag, and builds the root aggregate that holds
    /// every operation.
    pub fn group(
        &self,
        operations: Vec<Operation>,
    ) -> (Vec<TaggedOperationsGroup>, ApiAggregate) {
        let mut by_tag: BTreeMap<&str, Vec<&Operation>> = BTreeMap::new();
        for operation in &operations {
            for tag in &operation.tags {
                by_tag.entry(tag).or_default().push(operation);
            }
        }

        // Accessors share the aggregate's method namespace with operations.
        let ids = operations.iter().map(|op| op.id.as_str());
        let names = API_METHODS.iter().copied().chain(ids);
        let accessors = unique_field_names(names.chain(by_tag.keys().copied()));
        let accessors = &accessors[API_METHODS.len() + operations.len()..];

        // Tags that differ only in case or punctuation share a cased name.
        let suffixed: Vec<String> = by_tag.keys().map(|tag| format!("{tag}_api")).collect();
        let names = unique_type_names(&[API_NAME], suffixed.iter().map(String::as_str));

        let mut groups = Vec::with_capacity(by_tag.len());
        let mut entries = Vec::with_capacity(by_tag.len());
        for (((tag, members), accessor), name) in by_tag.into_iter().zip(accessors).zip(names) {
            let group = TaggedOperationsGroup {
                namespace: self.base.clone(),
                name,
                tag: tag.to_string(),
                accessor: accessor.clone(),
                operations: members.into_iter().cloned().collect(),
            };
            debug!("group {} ({} operations)", group.name, group.operations.len());
            entries.push(GroupEntry {
                tag: group.tag.clone(),
                accessor: group.accessor.clone(),
                reference: Reference::new(group.namespace.clone(), group.name.clone()),
            });
            groups.push(group);
        }

        let api = ApiAggregate {
            namespace: self.base.clone(),
            name: API_NAME.to_string(),
            groups: entries,
            operations,
        };
        (groups, api)
    }

    /// Merges path-level and operation-level parameters; an operation
    /// parameter replaces a path parameter with the same name and location.
    fn parameters(
        &mut self,
        shared: &'a [ParameterOrRef],
        own: &'a [ParameterOrRef],
        nesting: &Nesting,
        id: &str,
    ) -> Result<Vec<Parameter>, ModelError> {
        let resolver = self.schemas.resolver();
        let mut merged = IndexMap::new();
        for parameter in shared.iter().chain(own) {
            let parameter = resolver.parameter(parameter, id)?;
            merged.insert((parameter.name.as_str(), parameter.location), parameter);
        }

        let mut parameters = Vec::with_capacity(merged.len());
        for ((wire_name, location), parameter) in merged {
            let context = format!("{id}.parameters.{wire_name}");
            let location = match location {
                parse_parameter::ParameterLocation::Path => ParameterLocation::Path,
                parse_parameter::ParameterLocation::Query => ParameterLocation::Query,
                parse_parameter::ParameterLocation::Header => ParameterLocation::Header,
                parse_parameter::ParameterLocation::Cookie => ParameterLocation::Cookie,
            };
            let style = match parameter.style.as_deref() {
                Some(style) => {
                    ParameterStyle::parse(style).ok_or_else(|| ModelError::UnsupportedStyle {
                        style: style.to_string(),
                        context: context.clone(),
                    })?
                }
                None => ParameterStyle::default_for(location),
            };
            let reference = match &parameter.schema {
                Some(schema) => {
                    let (reference, nullable) =
                        self.schemas.inline(schema, &nesting.part(wire_name), &context)?;
                    if nullable {
                        Builtin::Nullable.of(reference)
                    } else {
                        reference
                    }
                }
                None => {
                    self.schemas
                        .warn(&context, "parameter has no schema; using untyped JSON");
                    Builtin::Json.reference()
                }
            };
            parameters.push(Parameter {
                name: String::new(),
                wire_name: wire_name.to_string(),
                location,
                style,
                explode: parameter.explode.unwrap_or(style.default_explode()),
                required: location == ParameterLocation::Path || parameter.required,
                reference,
            });
        }
        Ok(parameters)
    }

    fn request_body(
        &mut self,
        body: &'a RequestBodyOrRef,
        nesting: &Nesting,
        id: &str,
    ) -> Result<Option<RequestBody>, ModelError> {
        let context = format!("{id}.requestBody");
        let body = self.schemas.resolver().request_body(body, &context)?;
        let Some((content_type, media)) = body.content.iter().find(|(ty, _)| is_json(ty)) else {
            let types: Vec<&str> = body.content.keys().map(String::as_str).collect();
            self.schemas.warn(
                &context,
                format!("no JSON media type in [{}]; skipping body", types.join(", ")),
            );
            return Ok(None);
        };
        let reference = match &media.schema {
            Some(schema) => {
                let (reference, nullable) =
                    self.schemas
                        .inline(schema, &nesting.part(BODY_ARGUMENT), &context)?;
                if nullable {
                    Builtin::Nullable.of(reference)
                } else {
                    reference
                }
            }
            None => Builtin::Json.reference(),
        };
        Ok(Some(RequestBody {
            name: BODY_ARGUMENT.to_string(),
            content_type: content_type.clone(),
            required: body.required,
            reference,
        }))
    }
}
