use minijinja::{Environment, context};
use oasc_core::ir::{Reference, TaggedOperationsGroup};

use super::api::operation_context;
use crate::type_mapper::{Containment, TypeMapper, node_module, relative_module};

/// Emits a tag group: a borrowed view of the aggregate whose methods
/// delegate to the aggregate's.
pub fn emit_group(
    env: &Environment<'_>,
    group: &TaggedOperationsGroup,
    api: &Reference,
    containment: &Containment,
) -> Result<String, minijinja::Error> {
    let module = node_module(&Reference::new(group.namespace.clone(), group.name.clone()));
    let mapper = TypeMapper::new(&module, containment, None);
    let api_type = format!(
        "{}::{}",
        relative_module(&module, &node_module(api)),
        api.name
    );

    let operations: Vec<minijinja::Value> = group
        .operations
        .iter()
        .map(|op| operation_context(op, &mapper))
        .collect();

    env.get_template("group.rs.j2")?.render(context! {
        name => group.name.clone(),
        tag => group.tag.clone(),
        api => api_type,
        operations => operations,
    })
}
