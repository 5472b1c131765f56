pub mod config;
pub mod error;
pub mod ir;
pub mod naming;
pub mod parse;
pub mod pipeline;
pub mod sink;
pub mod transform;

pub use pipeline::{CompileOptions, CompileReport, check, compile, render};

/// A generated file with path and content.
///
/// The path is relative to the output directory and uses `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a model.
pub trait CodeGenerator {
    type Error: std::error::Error + Send + Sync + 'static;

    fn generate(&self, model: &ir::Model) -> Result<Vec<GeneratedFile>, Self::Error>;
}
