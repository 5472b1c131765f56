use minijinja::{Environment, context};
use oasc_core::ir::{Capability, ClassAlias, Reference};

use super::class::byte_codec;
use super::doc_lines;
use crate::type_mapper::{Containment, TypeMapper, node_module};

/// Emits a transparent newtype over the wrapped type, with conversions
/// both ways.
pub fn emit_alias(
    env: &Environment<'_>,
    alias: &ClassAlias,
    containment: &Containment,
) -> Result<String, minijinja::Error> {
    let owner = Reference::new(alias.namespace.clone(), alias.name.clone());
    let module = node_module(&owner);
    let mapper = TypeMapper::new(&module, containment, Some(&owner));

    env.get_template("alias.rs.j2")?.render(context! {
        name => alias.name.clone(),
        doc => doc_lines(alias.description.as_deref()),
        wrapped => mapper.rust_type(&alias.wrapped),
        codec => byte_codec(&alias.wrapped),
        parameter_value => alias.capabilities.contains(&Capability::ParameterValue),
    })
}
