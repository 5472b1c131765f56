use std::fmt;

/// The namespace of [`Builtin`] references.
pub const BUILTIN_NAMESPACE: &str = "builtin";

/// A `::`-separated module path, like `petstore::models`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(Vec<String>);

impl Namespace {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parses a package name written with `.` or `::` separators.
    /// Empty segments are dropped.
    pub fn parse(package: &str) -> Self {
        Self::new(
            package
                .split(['.', ':'])
                .filter(|segment| !segment.is_empty()),
        )
    }

    pub fn builtin() -> Self {
        Self::new([BUILTIN_NAMESPACE])
    }

    /// Returns a namespace nested one level below this one.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("::"))
    }
}

/// A reference to a type: either a generated model node, or a [`Builtin`]
/// in the [`BUILTIN_NAMESPACE`]. Generic types carry their arguments in
/// `parameters`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    pub namespace: Namespace,
    pub name: String,
    pub parameters: Vec<Reference>,
}

impl Reference {
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<Reference>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the builtin this reference names, if any.
    pub fn builtin(&self) -> Option<Builtin> {
        match self.namespace.segments() {
            [ns] if ns == BUILTIN_NAMESPACE => Builtin::from_name(&self.name),
            _ => None,
        }
    }

    /// Returns `self` and every reference nested in its parameters, depth first.
    pub fn walk(&self) -> Vec<&Reference> {
        let mut out = vec![self];
        for parameter in &self.parameters {
            out.extend(parameter.walk());
        }
        out
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.name)?;
        if let Some((first, rest)) = self.parameters.split_first() {
            write!(f, "<{first}")?;
            for parameter in rest {
                write!(f, ", {parameter}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Target-neutral types that the primitive mapping and the
/// optionality rules produce. Renderers map each to a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Arbitrary-precision integer.
    Integer,
    Int32,
    Int64,
    /// Arbitrary-precision decimal.
    Decimal,
    Float,
    Double,
    Text,
    /// A raw byte sequence, encoded on the wire as an array of numbers.
    Bytes,
    Date,
    /// A date-time that keeps its UTC offset.
    Timestamp,
    Boolean,
    /// Any JSON value.
    Json,
    /// `List<T>`.
    List,
    /// `Map<T>`, keyed by strings.
    Map,
    /// `Nullable<T>`: required, but may be `null`.
    Nullable,
    /// `Optional<T>`: may be absent, `null`, or a value.
    Optional,
}

impl Builtin {
    const ALL: [Builtin; 16] = [
        Builtin::Integer,
        Builtin::Int32,
        Builtin::Int64,
        Builtin::Decimal,
        Builtin::Float,
        Builtin::Double,
        Builtin::Text,
        Builtin::Bytes,
        Builtin::Date,
        Builtin::Timestamp,
        Builtin::Boolean,
        Builtin::Json,
        Builtin::List,
        Builtin::Map,
        Builtin::Nullable,
        Builtin::Optional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Integer => "Integer",
            Builtin::Int32 => "Int32",
            Builtin::Int64 => "Int64",
            Builtin::Decimal => "Decimal",
            Builtin::Float => "Float",
            Builtin::Double => "Double",
            Builtin::Text => "Text",
            Builtin::Bytes => "Bytes",
            Builtin::Date => "Date",
            Builtin::Timestamp => "Timestamp",
            Builtin::Boolean => "Boolean",
            Builtin::Json => "Json",
            Builtin::List => "List",
            Builtin::Map => "Map",
            Builtin::Nullable => "Nullable",
            Builtin::Optional => "Optional",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn reference(self) -> Reference {
        Reference::new(Namespace::builtin(), self.name())
    }

    /// Applies a generic builtin to one argument.
    pub fn of(self, parameter: Reference) -> Reference {
        self.reference().with_parameters(vec![parameter])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespace() {
        assert_eq!(Namespace::parse("com.example.api").to_string(), "com::example::api");
        assert_eq!(Namespace::parse("petstore::client").to_string(), "petstore::client");
        assert_eq!(Namespace::parse("a..b").segments(), ["a", "b"]);
    }

    #[test]
    fn test_reference_equality_is_structural() {
        let a = Builtin::List.of(Reference::new(Namespace::parse("p.models"), "Pet"));
        let b = Builtin::List.of(Reference::new(Namespace::parse("p::models"), "Pet"));
        assert_eq!(a, b);
        assert_ne!(a, Builtin::List.of(Builtin::Text.reference()));
    }

    #[test]
    fn test_builtin_roundtrip() {
        for builtin in Builtin::ALL {
            assert_eq!(builtin.reference().builtin(), Some(builtin));
        }
        assert_eq!(Reference::new(Namespace::parse("p"), "Text").builtin(), None);
    }

    #[test]
    fn test_display() {
        let map = Builtin::Map.of(Builtin::List.of(Builtin::Int32.reference()));
        assert_eq!(
            map.to_string(),
            "builtin::Map<builtin::List<builtin::Int32>>"
        );
    }
}
