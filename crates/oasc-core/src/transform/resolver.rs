use crate::error::ModelError;
use crate::ir::{Namespace, Reference};
use crate::naming::{module_name, type_name};
use crate::parse::components::{Components, ref_name};
use crate::parse::parameter::{Parameter, ParameterOrRef};
use crate::parse::request_body::{RequestBody, RequestBodyOrRef};

/// The name of the namespace under the base package that holds schema nodes.
pub const MODELS_MODULE: &str = "models";

/// Maps `$ref` pointers and inline schemas to stable references.
///
/// Holds a read-only view of the document's components.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    components: &'a Components,
    models: &'a Namespace,
}

impl<'a> Resolver<'a> {
    pub fn new(components: &'a Components, models: &'a Namespace) -> Self {
        Self { components, models }
    }

    pub fn models(&self) -> &'a Namespace {
        self.models
    }

    /// The reference for a component schema, named after its key.
    pub fn component(&self, name: &str) -> Reference {
        Reference::new(self.models.clone(), type_name(name))
    }

    /// Resolves a schema `$ref` to the component it points at.
    pub fn schema_ref(&self, ref_path: &str, context: &str) -> Result<Reference, ModelError> {
        match ref_name(ref_path, "schemas") {
            Some(name) if self.components.schemas.contains_key(name) => Ok(self.component(name)),
            _ => Err(ModelError::UnresolvedRef {
                reference: ref_path.to_string(),
                context: context.to_string(),
            }),
        }
    }

    /// Follows a chain of parameter `$ref`s.
    pub fn parameter(
        &self,
        parameter: &'a ParameterOrRef,
        context: &str,
    ) -> Result<&'a Parameter, ModelError> {
        let mut current = parameter;
        for _ in 0..=self.components.parameters.len() {
            match current {
                ParameterOrRef::Item(parameter) => return Ok(parameter),
                ParameterOrRef::Ref { ref_path } => {
                    current = self.components.parameter(ref_path).ok_or_else(|| {
                        ModelError::UnresolvedRef {
                            reference: ref_path.clone(),
                            context: context.to_string(),
                        }
                    })?;
                }
            }
        }
        Err(cycle(parameter_ref(parameter), context))
    }

    /// Follows a chain of request body `$ref`s.
    pub fn request_body(
        &self,
        body: &'a RequestBodyOrRef,
        context: &str,
    ) -> Result<&'a RequestBody, ModelError> {
        let mut current = body;
        for _ in 0..=self.components.request_bodies.len() {
            match current {
                RequestBodyOrRef::Item(body) => return Ok(body),
                RequestBodyOrRef::Ref { ref_path } => {
                    current = self.components.request_body(ref_path).ok_or_else(|| {
                        ModelError::UnresolvedRef {
                            reference: ref_path.clone(),
                            context: context.to_string(),
                        }
                    })?;
                }
            }
        }
        let ref_path = match body {
            RequestBodyOrRef::Ref { ref_path } => ref_path.as_str(),
            RequestBodyOrRef::Item(_) => "",
        };
        Err(cycle(ref_path, context))
    }
}

/// Names an inline schema after the schema or operation that encloses it.
///
/// The nested type lives in a namespace below its parent, so that two
/// parents with same-named properties never collide.
#[derive(Debug, Clone)]
pub struct Nesting {
    namespace: Namespace,
    stem: String,
}

impl Nesting {
    /// Nesting for the inline schemas of a named parent, like a
    /// component schema or an operation.
    pub fn under(parent: &Reference) -> Self {
        Self {
            namespace: parent.namespace.child(module_name(&parent.name)),
            stem: parent.name.clone(),
        }
    }

    /// Nesting for a property, parameter, or other named part of the parent.
    pub fn part(&self, part: &str) -> Self {
        Self {
            namespace: self.namespace.clone(),
            stem: format!("{}_{}", self.stem, part),
        }
    }

    /// The reference that an inline class at this position gets.
    pub fn reference(&self) -> Reference {
        Reference::new(self.namespace.clone(), type_name(&self.stem))
    }
}

fn parameter_ref(parameter: &ParameterOrRef) -> &str {
    match parameter {
        ParameterOrRef::Ref { ref_path } => ref_path,
        ParameterOrRef::Item(p) => &p.name,
    }
}

fn cycle(reference: &str, context: &str) -> ModelError {
    ModelError::UnresolvedRef {
        reference: format!("{reference} (circular)"),
        context: context.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(yaml: &str) -> Components {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_schema_ref_uses_last_segment() {
        let components = components("schemas:\n  pet-owner: {type: string}\n");
        let models = Namespace::parse("api.models");
        let resolver = Resolver::new(&components, &models);
        let reference = resolver
            .schema_ref("#/components/schemas/pet-owner", "Pet")
            .unwrap();
        assert_eq!(reference, Reference::new(models.clone(), "PetOwner"));
        assert!(resolver.schema_ref("#/components/schemas/Missing", "Pet").is_err());
    }

    #[test]
    fn test_nesting() {
        let parent = Reference::new(Namespace::parse("api.models"), "Pet");
        let owner = Nesting::under(&parent).part("owner");
        assert_eq!(
            owner.reference(),
            Reference::new(Namespace::parse("api.models.pet"), "PetOwner")
        );
        let address = Nesting::under(&owner.reference()).part("address");
        assert_eq!(
            address.reference(),
            Reference::new(Namespace::parse("api.models.pet.pet_owner"), "PetOwnerAddress")
        );
        assert_eq!(
            owner.part("item").reference(),
            Reference::new(Namespace::parse("api.models.pet"), "PetOwnerItem")
        );
    }

    #[test]
    fn test_parameter_cycle() {
        let components = components(
            r##"
schemas: {}
parameters:
  a: {$ref: "#/components/parameters/b"}
  b: {$ref: "#/components/parameters/a"}
"##,
        );
        let models = Namespace::parse("api.models");
        let resolver = Resolver::new(&components, &models);
        let start = ParameterOrRef::Ref {
            ref_path: "#/components/parameters/a".to_string(),
        };
        let err = resolver.parameter(&start, "op").unwrap_err();
        assert!(err.to_string().contains("circular"), "{err}");
    }
}
