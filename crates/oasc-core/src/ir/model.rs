use std::collections::BTreeSet;
use std::fmt;

use super::reference::{Namespace, Reference};

/// A field of a [`ClassDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The cased and escaped field name.
    pub name: String,
    /// The property name as it appears on the wire.
    pub wire_name: String,
    pub reference: Reference,
    pub description: Option<String>,
}

/// A structural capability that a rendered class must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// The node can be passed as an operation parameter. Classes encode
    /// themselves as an ordered map of their declared fields.
    ParameterValue,
}

/// An object schema, including zero-field objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub namespace: Namespace,
    pub name: String,
    pub description: Option<String>,
    /// Fields in declared property order, with unique names.
    pub fields: Vec<Field>,
    pub capabilities: BTreeSet<Capability>,
}

/// A nominal wrapper for any non-object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAlias {
    pub namespace: Namespace,
    pub name: String,
    pub description: Option<String>,
    pub wrapped: Reference,
    pub capabilities: BTreeSet<Capability>,
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Parses a lowercase path item field name, like `get`.
    pub fn from_field(field: &str) -> Option<Self> {
        Some(match field {
            "get" => HttpMethod::Get,
            "put" => HttpMethod::Put,
            "post" => HttpMethod::Post,
            "delete" => HttpMethod::Delete,
            "options" => HttpMethod::Options,
            "head" => HttpMethod::Head,
            "patch" => HttpMethod::Patch,
            "trace" => HttpMethod::Trace,
            _ => return None,
        })
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter goes in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// An OpenAPI parameter serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterStyle {
    Simple,
    Label,
    Matrix,
    Form,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

impl ParameterStyle {
    pub fn parse(style: &str) -> Option<Self> {
        Some(match style {
            "simple" => ParameterStyle::Simple,
            "label" => ParameterStyle::Label,
            "matrix" => ParameterStyle::Matrix,
            "form" => ParameterStyle::Form,
            "spaceDelimited" => ParameterStyle::SpaceDelimited,
            "pipeDelimited" => ParameterStyle::PipeDelimited,
            "deepObject" => ParameterStyle::DeepObject,
            _ => return None,
        })
    }

    /// The style OpenAPI uses when a parameter doesn't declare one.
    pub fn default_for(location: ParameterLocation) -> Self {
        match location {
            ParameterLocation::Path | ParameterLocation::Header => ParameterStyle::Simple,
            ParameterLocation::Query | ParameterLocation::Cookie => ParameterStyle::Form,
        }
    }

    /// Whether values are exploded when a parameter doesn't say.
    pub fn default_explode(self) -> bool {
        matches!(self, ParameterStyle::Form | ParameterStyle::DeepObject)
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The cased and escaped argument name.
    pub name: String,
    pub wire_name: String,
    pub location: ParameterLocation,
    pub style: ParameterStyle,
    pub explode: bool,
    pub required: bool,
    pub reference: Reference,
}

/// A JSON request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    /// The cased argument name, unique among the operation's parameters.
    pub name: String,
    pub content_type: String,
    pub required: bool,
    pub reference: Reference,
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Tags, never empty: untagged operations get [`OTHER_TAG`].
    pub tags: BTreeSet<String>,
    /// The document-unique `operationId`.
    pub id: String,
    /// The cased and escaped method name.
    pub method_name: String,
    pub method: HttpMethod,
    /// The path template, like `/pets/{petId}`.
    pub path: String,
    pub summary: Option<String>,
    pub deprecated: bool,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
}

/// The tag for operations that don't declare any.
pub const OTHER_TAG: &str = "other";

/// Operations that share a tag, rendered as a namespace of thin wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedOperationsGroup {
    pub namespace: Namespace,
    pub name: String,
    pub tag: String,
    /// The accessor method on the [`ApiAggregate`] that returns this group.
    pub accessor: String,
    pub operations: Vec<Operation>,
}

/// How the [`ApiAggregate`] refers to a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub tag: String,
    pub accessor: String,
    pub reference: Reference,
}

/// The root node. Holds the canonical definition of every operation,
/// and an accessor for every group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiAggregate {
    pub namespace: Namespace,
    pub name: String,
    pub groups: Vec<GroupEntry>,
    pub operations: Vec<Operation>,
}

/// A node of the model, rendered to exactly one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelNode {
    Class(ClassDefinition),
    Alias(ClassAlias),
    Group(TaggedOperationsGroup),
    Api(ApiAggregate),
}

impl ModelNode {
    pub fn namespace(&self) -> &Namespace {
        match self {
            ModelNode::Class(c) => &c.namespace,
            ModelNode::Alias(a) => &a.namespace,
            ModelNode::Group(g) => &g.namespace,
            ModelNode::Api(a) => &a.namespace,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ModelNode::Class(c) => &c.name,
            ModelNode::Alias(a) => &a.name,
            ModelNode::Group(g) => &g.name,
            ModelNode::Api(a) => &a.name,
        }
    }

    pub fn reference(&self) -> Reference {
        Reference::new(self.namespace().clone(), self.name())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelNode::Class(_) => "class",
            ModelNode::Alias(_) => "alias",
            ModelNode::Group(_) => "group",
            ModelNode::Api(_) => "api",
        }
    }
}

/// A non-fatal problem found while building the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub context: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

/// The output of one compile pass.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// The base namespace that every node lives under.
    pub base: Namespace,
    pub nodes: Vec<ModelNode>,
    pub warnings: Vec<Warning>,
}

impl Model {
    pub fn api(&self) -> Option<&ApiAggregate> {
        self.nodes.iter().find_map(|node| match node {
            ModelNode::Api(api) => Some(api),
            _ => None,
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &TaggedOperationsGroup> {
        self.nodes.iter().filter_map(|node| match node {
            ModelNode::Group(group) => Some(group),
            _ => None,
        })
    }

    pub fn find(&self, reference: &Reference) -> Option<&ModelNode> {
        self.nodes
            .iter()
            .find(|node| node.namespace() == &reference.namespace && node.name() == reference.name)
    }
}
