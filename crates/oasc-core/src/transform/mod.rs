pub mod paths;
pub mod primitives;
pub mod resolver;
pub mod schemas;

use std::collections::{HashMap, HashSet};

use log::info;

use crate::error::ModelError;
use crate::ir::{Capability, Model, ModelNode, Namespace, Reference};
use crate::naming::module_name;
use crate::parse::spec::OpenApiSpec;

pub use paths::{API_METHODS, API_NAME, PathWalker, validate_operation_ids};
pub use resolver::{MODELS_MODULE, Nesting, Resolver};
pub use schemas::SchemaWalker;

/// Options for building a model.
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    /// The namespace that every node is placed under.
    pub base_package: Namespace,
}

/// Builds the model for a document.
///
/// Operation ids are validated before any node is produced. Schema nodes
/// come first, in document order, followed by the tag groups and the
/// root aggregate.
pub fn build_model(spec: &OpenApiSpec, options: &ModelOptions) -> Result<Model, ModelError> {
    // Phase 1: Operation ids
    let method_names = validate_operation_ids(&spec.paths)?;

    // Phase 2: Component schemas
    let models = options.base_package.child(MODELS_MODULE);
    let resolver = Resolver::new(&spec.components, &models);
    let mut schemas = SchemaWalker::new(resolver);
    for (name, schema) in &spec.components.schemas {
        schemas.component(name, schema)?;
    }
    info!("walked {} schemas", spec.components.schemas.len());

    // Phase 3: Operations, groups and the aggregate
    let mut walker = PathWalker::new(&mut schemas, options.base_package.clone(), method_names);
    let operations = walker.operations(spec)?;
    let (groups, api) = walker.group(operations);
    info!(
        "walked {} operations in {} groups",
        api.operations.len(),
        groups.len()
    );

    // Phase 4: Capabilities
    let mut nodes = schemas.nodes;
    let parameter_refs = api
        .operations
        .iter()
        .flat_map(|op| &op.parameters)
        .map(|p| &p.reference);
    mark_parameter_values(&mut nodes, parameter_refs);

    nodes.extend(groups.into_iter().map(ModelNode::Group));
    nodes.push(ModelNode::Api(api));
    check_collisions(&nodes)?;

    Ok(Model {
        base: options.base_package.clone(),
        nodes,
        warnings: schemas.warnings,
    })
}

/// Gives [`Capability::ParameterValue`] to every class that a parameter
/// can contain, following fields and aliases.
fn mark_parameter_values<'r>(
    nodes: &mut [ModelNode],
    roots: impl IntoIterator<Item = &'r Reference>,
) {
    let index: HashMap<Reference, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.reference(), i))
        .collect();

    let mut pending: Vec<Reference> = roots
        .into_iter()
        .flat_map(|r| r.walk())
        .cloned()
        .collect();
    let mut visited = HashSet::new();
    while let Some(reference) = pending.pop() {
        if reference.builtin().is_some() || !visited.insert(reference.clone()) {
            continue;
        }
        let Some(&i) = index.get(&Reference::new(reference.namespace.clone(), reference.name.clone()))
        else {
            continue;
        };
        match &mut nodes[i] {
            ModelNode::Class(class) => {
                class.capabilities.insert(Capability::ParameterValue);
                pending.extend(
                    class
                        .fields
                        .iter()
                        .flat_map(|f| f.reference.walk())
                        .cloned(),
                );
            }
            ModelNode::Alias(alias) => {
                alias.capabilities.insert(Capability::ParameterValue);
                pending.extend(alias.wrapped.walk().into_iter().cloned());
            }
            ModelNode::Group(_) | ModelNode::Api(_) => {}
        }
    }
}

/// Fails if two nodes would be written to the same file.
fn check_collisions(nodes: &[ModelNode]) -> Result<(), ModelError> {
    let mut paths: HashMap<String, String> = HashMap::new();
    for node in nodes {
        let path = node_path(node.namespace(), node.name());
        let described = format!("{} {}", node.kind(), node.reference());
        if let Some(first) = paths.get(&path) {
            return Err(ModelError::NameCollision {
                path,
                first: first.clone(),
                second: described,
            });
        }
        paths.insert(path, described);
    }
    Ok(())
}

/// The target-neutral location of a node: its namespace segments and
/// module name, joined with `/`.
pub fn node_path(namespace: &Namespace, name: &str) -> String {
    let mut segments: Vec<String> = namespace.segments().to_vec();
    segments.push(module_name(name));
    segments.join("/")
}
