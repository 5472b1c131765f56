use std::collections::BTreeSet;

use log::{debug, warn};

use crate::error::ModelError;
use crate::ir::{Builtin, ClassAlias, ClassDefinition, Field, ModelNode, Reference, Warning};
use crate::naming::unique_field_names;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType};

use super::primitives::primitive;
use super::resolver::{Nesting, Resolver};

/// Walks schemas and collects the model nodes they produce.
///
/// Inline object schemas become nested classes as they're found, so the
/// walker is also used for the inline schemas of operation parameters
/// and request bodies.
pub struct SchemaWalker<'a> {
    resolver: Resolver<'a>,
    pub nodes: Vec<ModelNode>,
    pub warnings: Vec<Warning>,
}

impl<'a> SchemaWalker<'a> {
    pub fn new(resolver: Resolver<'a>) -> Self {
        Self {
            resolver,
            nodes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn resolver(&self) -> Resolver<'a> {
        self.resolver
    }

    /// Decides whether a component schema is a class or an alias, and
    /// emits it along with any inline schemas it encloses.
    pub fn component(&mut self, name: &str, schema: &SchemaOrRef) -> Result<(), ModelError> {
        let reference = self.resolver.component(name);
        let context = format!("components.schemas.{name}");
        let node = match schema {
            SchemaOrRef::Ref { ref_path } => ModelNode::Alias(ClassAlias {
                namespace: reference.namespace.clone(),
                name: reference.name.clone(),
                description: None,
                wrapped: self.resolver.schema_ref(ref_path, &context)?,
                capabilities: BTreeSet::new(),
            }),
            SchemaOrRef::Item(schema) if is_class(schema) => {
                ModelNode::Class(self.class(reference, schema, &context)?)
            }
            SchemaOrRef::Item(schema) => {
                let nesting = Nesting::under(&reference);
                let (wrapped, nullable) = self.wrapped(schema, &nesting, &context)?;
                ModelNode::Alias(ClassAlias {
                    namespace: reference.namespace.clone(),
                    name: reference.name.clone(),
                    description: schema.description.clone(),
                    wrapped: if nullable {
                        Builtin::Nullable.of(wrapped)
                    } else {
                        wrapped
                    },
                    capabilities: BTreeSet::new(),
                })
            }
        };
        debug!("{} {}", node.kind(), node.reference());
        self.nodes.push(node);
        Ok(())
    }

    /// Returns the reference for a schema in a property, item, parameter,
    /// or body position, and whether it allows `null`.
    ///
    /// Inline object schemas with `properties` become classes named
    /// after `nesting`.
    pub fn inline(
        &mut self,
        schema: &SchemaOrRef,
        nesting: &Nesting,
        context: &str,
    ) -> Result<(Reference, bool), ModelError> {
        match schema {
            SchemaOrRef::Ref { ref_path } => {
                Ok((self.resolver.schema_ref(ref_path, context)?, false))
            }
            SchemaOrRef::Item(schema) if schema.properties.is_some() && !schema.is_composite() => {
                let nullable = nullability(schema, context)?;
                let class = self.class(nesting.reference(), schema, context)?;
                let reference = Reference::new(class.namespace.clone(), class.name.clone());
                debug!("class {reference}");
                self.nodes.push(ModelNode::Class(class));
                Ok((reference, nullable))
            }
            SchemaOrRef::Item(schema) => self.wrapped(schema, nesting, context),
        }
    }

    fn class(
        &mut self,
        reference: Reference,
        schema: &Schema,
        context: &str,
    ) -> Result<ClassDefinition, ModelError> {
        let nesting = Nesting::under(&reference);
        let properties: Vec<_> = schema.properties.iter().flatten().collect();
        let names = unique_field_names(properties.iter().map(|(wire, _)| wire.as_str()));

        let mut fields = Vec::with_capacity(properties.len());
        for ((wire_name, property), name) in properties.into_iter().zip(names) {
            let context = format!("{context}.properties.{wire_name}");
            let (reference, nullable) =
                self.inline(property, &nesting.part(wire_name), &context)?;
            let required = schema.required.contains(wire_name);
            let reference = match (required, nullable) {
                (true, false) => reference,
                (true, true) => Builtin::Nullable.of(reference),
                (false, _) => Builtin::Optional.of(reference),
            };
            fields.push(Field {
                name,
                wire_name: wire_name.clone(),
                reference,
                description: description(property),
            });
        }

        Ok(ClassDefinition {
            namespace: reference.namespace,
            name: reference.name,
            description: schema.description.clone(),
            fields,
            capabilities: BTreeSet::new(),
        })
    }

    /// Maps a schema that isn't a class: a primitive, array, map, or
    /// unconstrained schema.
    fn wrapped(
        &mut self,
        schema: &Schema,
        nesting: &Nesting,
        context: &str,
    ) -> Result<(Reference, bool), ModelError> {
        if schema.is_composite() {
            self.warn(context, "allOf, oneOf and anyOf aren't supported; using untyped JSON");
            return Ok((Builtin::Json.reference(), schema.nullable.unwrap_or(false)));
        }
        let nullable = nullability(schema, context)?;
        let (ty, _) = schema.single_type().unwrap_or((None, nullable));
        let reference = match ty {
            None => Builtin::Json.reference(),
            Some(SchemaType::Array) => match &schema.items {
                Some(items) => {
                    let (item, item_nullable) =
                        self.inline(items, &nesting.part("item"), &format!("{context}.items"))?;
                    Builtin::List.of(nullable_if(item, item_nullable))
                }
                None => Builtin::List.of(Builtin::Json.reference()),
            },
            Some(SchemaType::Object) => match &schema.additional_properties {
                Some(AdditionalProperties::Schema(values)) => {
                    let context = format!("{context}.additionalProperties");
                    let (value, value_nullable) =
                        self.inline(values, &nesting.part("value"), &context)?;
                    Builtin::Map.of(nullable_if(value, value_nullable))
                }
                _ => Builtin::Map.of(Builtin::Json.reference()),
            },
            Some(ty) => primitive(ty, schema.format.as_deref())
                .ok_or_else(|| ModelError::UnsupportedType {
                    context: context.to_string(),
                    description: match &schema.format {
                        Some(format) => format!("type `{}` with format `{format}`", ty.as_str()),
                        None => format!("type `{}`", ty.as_str()),
                    },
                })?
                .reference(),
        };
        Ok((reference, nullable))
    }

    pub fn warn(&mut self, context: &str, message: impl Into<String>) {
        let warning = Warning {
            context: context.to_string(),
            message: message.into(),
        };
        warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// A top-level schema is a class if it declares `properties`, or if it's
/// an object that doesn't allow extra properties.
fn is_class(schema: &Schema) -> bool {
    if schema.is_composite() {
        return false;
    }
    if schema.properties.is_some() {
        return true;
    }
    matches!(schema.single_type(), Ok((Some(SchemaType::Object), _)))
        && matches!(
            schema.additional_properties,
            None | Some(AdditionalProperties::Bool(false))
        )
}

fn nullability(schema: &Schema, context: &str) -> Result<bool, ModelError> {
    match schema.single_type() {
        Ok((_, nullable)) => Ok(nullable),
        Err(types) => Err(ModelError::UnsupportedType {
            context: context.to_string(),
            description: format!(
                "multiple types [{}]",
                types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
            ),
        }),
    }
}

fn nullable_if(reference: Reference, nullable: bool) -> Reference {
    if nullable {
        Builtin::Nullable.of(reference)
    } else {
        reference
    }
}

fn description(schema: &SchemaOrRef) -> Option<String> {
    match schema {
        SchemaOrRef::Item(schema) => schema.description.clone(),
        SchemaOrRef::Ref { .. } => None,
    }
}
