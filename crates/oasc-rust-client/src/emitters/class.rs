use minijinja::{Environment, context};
use oasc_core::ir::{Builtin, Capability, ClassDefinition, Reference};

use super::doc_lines;
use crate::type_mapper::{Containment, RUNTIME, TypeMapper, node_module};

/// Emits a struct with one public field per property. Properties keep
/// their wire names through `rename`; optional ones are skipped when
/// absent.
pub fn emit_class(
    env: &Environment<'_>,
    class: &ClassDefinition,
    containment: &Containment,
) -> Result<String, minijinja::Error> {
    let owner = Reference::new(class.namespace.clone(), class.name.clone());
    let module = node_module(&owner);
    let mapper = TypeMapper::new(&module, containment, Some(&owner));

    let fields: Vec<minijinja::Value> = class
        .fields
        .iter()
        .map(|field| {
            context! {
                name => field.name.clone(),
                wire_name => field.wire_name.clone(),
                rust_type => mapper.rust_type(&field.reference),
                serde => serde_attributes(&field.wire_name, &field.reference),
                doc => doc_lines(field.description.as_deref()),
            }
        })
        .collect();

    env.get_template("class.rs.j2")?.render(context! {
        name => class.name.clone(),
        doc => doc_lines(class.description.as_deref()),
        fields => fields,
        parameter_value => class.capabilities.contains(&Capability::ParameterValue),
    })
}

/// The contents of a field's `#[serde(...)]` attribute.
fn serde_attributes(wire_name: &str, reference: &Reference) -> String {
    let mut attributes = vec![format!("rename = {wire_name:?}")];
    if reference.builtin() == Some(Builtin::Optional) {
        attributes.push("default".to_string());
        attributes.push(format!(
            "skip_serializing_if = \"{RUNTIME}::Maybe::is_absent\""
        ));
    }
    if let Some(codec) = byte_codec(reference) {
        attributes.push(format!("with = {codec:?}"));
    }
    attributes.join(", ")
}

/// The `codec::byte_array` module that (de)serializes a bytes value,
/// through at most one nullability wrapper.
pub fn byte_codec(reference: &Reference) -> Option<String> {
    let inner = |reference: &Reference| {
        reference
            .parameters
            .first()
            .is_some_and(|p| p.builtin() == Some(Builtin::Bytes))
    };
    let module = match reference.builtin()? {
        Builtin::Bytes => "byte_array",
        Builtin::Nullable if inner(reference) => "byte_array::nullable",
        Builtin::Optional if inner(reference) => "byte_array::maybe",
        _ => return None,
    };
    Some(format!("{RUNTIME}::codec::{module}"))
}
