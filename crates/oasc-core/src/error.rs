use thiserror::Error;

/// The document could not be loaded or violates the input contract.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse document: {0}")]
    Syntax(String),

    #[error("invalid document: {}", diagnostics.join("; "))]
    Invalid { diagnostics: Vec<String> },

    #[error("invalid document at `{path}`: {message}")]
    Shape { path: String, message: String },
}

/// The document is well-formed, but can't be turned into a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("operation `{method} {path}` has no operationId")]
    MissingOperationId { method: String, path: String },

    #[error("operationId `{id}` is used by both `{first}` and `{second}`")]
    DuplicateOperationId {
        id: String,
        first: String,
        second: String,
    },

    #[error("unsupported type in `{context}`: {description}")]
    UnsupportedType {
        context: String,
        description: String,
    },

    #[error("unsupported parameter style `{style}` in `{context}`")]
    UnsupportedStyle { style: String, context: String },

    #[error("unresolved reference `{reference}` in `{context}`")]
    UnresolvedRef { reference: String, context: String },

    #[error("`{first}` and `{second}` would both be written to `{path}`")]
    NameCollision {
        path: String,
        first: String,
        second: String,
    },
}

/// Writing a generated file failed.
#[derive(Debug, Error)]
#[error("failed to write {path}")]
pub struct SinkError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// Any failure of a full compile run.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("rendering failed")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("{count} warning(s) emitted and warnings are not allowed")]
    Warnings { count: usize },

    #[error(transparent)]
    Sink(#[from] SinkError),
}
