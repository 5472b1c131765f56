use std::collections::{HashMap, HashSet};

use oasc_core::ir::{Builtin, Model, ModelNode, Reference};
use oasc_core::naming::module_name;

/// The path that generated code uses to name the runtime crate.
pub const RUNTIME: &str = "::oasc_runtime";

/// The module path of the file that defines a node.
pub fn node_module(reference: &Reference) -> Vec<String> {
    let mut path = reference.namespace.segments().to_vec();
    path.push(module_name(&reference.name));
    path
}

/// Returns a path from module `from` to module `to`, like
/// `super::models::pet`, or `self` when they're the same.
pub fn relative_module(from: &[String], to: &[String]) -> String {
    let common = from.iter().zip(to).take_while(|(a, b)| a == b).count();
    let mut segments: Vec<&str> = match from.len() - common {
        0 => vec!["self"],
        ups => vec!["super"; ups],
    };
    segments.extend(to[common..].iter().map(String::as_str));
    segments.join("::")
}

/// Maps references to Rust types, as seen from one module.
pub struct TypeMapper<'a> {
    from: &'a [String],
    containment: &'a Containment,
    owner: Option<&'a Reference>,
}

impl<'a> TypeMapper<'a> {
    /// A mapper for code in module `from`. `owner` is the node whose
    /// fields are being mapped, if any; references that contain it are
    /// boxed.
    pub fn new(
        from: &'a [String],
        containment: &'a Containment,
        owner: Option<&'a Reference>,
    ) -> Self {
        Self {
            from,
            containment,
            owner,
        }
    }

    /// Renders a reference as a Rust type. Generic builtins render their
    /// parameters recursively.
    pub fn rust_type(&self, reference: &Reference) -> String {
        self.render(reference, true)
    }

    fn render(&self, reference: &Reference, direct: bool) -> String {
        let Some(builtin) = reference.builtin() else {
            let path = format!(
                "{}::{}",
                relative_module(self.from, &node_module(reference)),
                reference.name
            );
            return match self.owner {
                Some(owner) if direct && self.containment.contains(reference, owner) => {
                    format!("::std::boxed::Box<{path}>")
                }
                _ => path,
            };
        };
        let param = |direct: bool| {
            reference
                .parameters
                .first()
                .map(|parameter| self.render(parameter, direct))
                .unwrap_or_else(|| format!("{RUNTIME}::serde_json::Value"))
        };
        match builtin {
            Builtin::Integer => format!("{RUNTIME}::Integer"),
            Builtin::Int32 => "i32".to_string(),
            Builtin::Int64 => "i64".to_string(),
            Builtin::Decimal => format!("{RUNTIME}::Decimal"),
            Builtin::Float => "f32".to_string(),
            Builtin::Double => "f64".to_string(),
            Builtin::Text => "::std::string::String".to_string(),
            Builtin::Bytes => "::std::vec::Vec<u8>".to_string(),
            Builtin::Date => format!("{RUNTIME}::chrono::NaiveDate"),
            Builtin::Timestamp => {
                format!("{RUNTIME}::chrono::DateTime<{RUNTIME}::chrono::FixedOffset>")
            }
            Builtin::Boolean => "bool".to_string(),
            Builtin::Json => format!("{RUNTIME}::serde_json::Value"),
            // Collections hold their elements on the heap, so they never
            // need a box.
            Builtin::List => format!("::std::vec::Vec<{}>", param(false)),
            Builtin::Map => format!(
                "{RUNTIME}::indexmap::IndexMap<::std::string::String, {}>",
                param(false)
            ),
            Builtin::Nullable => format!("::std::option::Option<{}>", param(direct)),
            Builtin::Optional => format!("{RUNTIME}::Maybe<{}>", param(direct)),
        }
    }
}

/// Which nodes hold which other nodes inline, without a collection in
/// between. A node that contains itself this way would have infinite
/// size, so the references that close the cycle are boxed.
#[derive(Debug, Default)]
pub struct Containment {
    edges: HashMap<Reference, Vec<Reference>>,
}

impl Containment {
    pub fn new(model: &Model) -> Self {
        let mut edges: HashMap<Reference, Vec<Reference>> = HashMap::new();
        for node in &model.nodes {
            let held: Vec<&Reference> = match node {
                ModelNode::Class(class) => class.fields.iter().map(|f| &f.reference).collect(),
                ModelNode::Alias(alias) => vec![&alias.wrapped],
                ModelNode::Group(_) | ModelNode::Api(_) => continue,
            };
            let mut direct = Vec::new();
            for reference in held {
                collect_direct(reference, &mut direct);
            }
            edges.insert(node.reference(), direct);
        }
        Self { edges }
    }

    /// Returns `true` if `node` holds `target` inline, directly or
    /// through other nodes.
    pub fn contains(&self, node: &Reference, target: &Reference) -> bool {
        let mut pending = vec![node];
        let mut seen = HashSet::new();
        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            if seen.insert(current) {
                pending.extend(self.edges.get(current).into_iter().flatten());
            }
        }
        false
    }
}

fn collect_direct(reference: &Reference, out: &mut Vec<Reference>) {
    match reference.builtin() {
        None => out.push(Reference::new(reference.namespace.clone(), reference.name.clone())),
        Some(Builtin::Nullable | Builtin::Optional) => {
            for parameter in &reference.parameters {
                collect_direct(parameter, out);
            }
        }
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use oasc_core::ir::Namespace;

    use super::*;

    fn path(s: &str) -> Vec<String> {
        Namespace::parse(s).segments().to_vec()
    }

    #[test]
    fn test_relative_module() {
        assert_eq!(
            relative_module(&path("p.api"), &path("p.models.pet")),
            "super::models::pet"
        );
        assert_eq!(
            relative_module(&path("p.models.pet"), &path("p.models.pet.pet_owner")),
            "self::pet_owner"
        );
        assert_eq!(
            relative_module(&path("p.models.pet.pet_owner"), &path("p.models.new_pet")),
            "super::super::new_pet"
        );
    }

    #[test]
    fn test_generic_rendering() {
        let containment = Containment::default();
        let from = path("p.models.pets");
        let mapper = TypeMapper::new(&from, &containment, None);
        let pet = Reference::new(Namespace::parse("p.models"), "Pet");
        assert_eq!(
            mapper.rust_type(&Builtin::Map.of(Builtin::List.of(pet))),
            "::oasc_runtime::indexmap::IndexMap<::std::string::String, ::std::vec::Vec<super::pet::Pet>>"
        );
        assert_eq!(
            mapper.rust_type(&Builtin::Optional.of(Builtin::Nullable.of(Builtin::Date.reference()))),
            "::oasc_runtime::Maybe<::std::option::Option<::oasc_runtime::chrono::NaiveDate>>"
        );
    }
}
