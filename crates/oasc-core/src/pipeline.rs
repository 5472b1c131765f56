use log::{info, warn};

use crate::error::CompileError;
use crate::ir::{Model, Namespace, Warning};
use crate::parse::spec::OpenApiSpec;
use crate::sink::FileSink;
use crate::transform::{ModelOptions, build_model};
use crate::{CodeGenerator, GeneratedFile};

/// Options for a compile run.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub base_package: Namespace,
    /// Don't fail the run when warnings are emitted.
    pub allow_warnings: bool,
}

/// What a successful compile run produced.
#[derive(Debug, Clone, Default)]
pub struct CompileReport {
    /// Paths of the written files, in write order.
    pub files: Vec<String>,
    pub warnings: Vec<Warning>,
}

/// Builds the model and enforces the warning policy, without rendering.
pub fn check(spec: &OpenApiSpec, options: &CompileOptions) -> Result<Model, CompileError> {
    let model = build_model(
        spec,
        &ModelOptions {
            base_package: options.base_package.clone(),
        },
    )?;
    info!(
        "built model with {} nodes and {} warnings",
        model.nodes.len(),
        model.warnings.len()
    );
    for warning in &model.warnings {
        warn!("{warning}");
    }
    if !model.warnings.is_empty() && !options.allow_warnings {
        return Err(CompileError::Warnings {
            count: model.warnings.len(),
        });
    }
    Ok(model)
}

/// Renders every file in memory, so that nothing is written if building
/// or rendering fails.
pub fn render<G: CodeGenerator>(
    spec: &OpenApiSpec,
    options: &CompileOptions,
    generator: &G,
) -> Result<(Vec<GeneratedFile>, Vec<Warning>), CompileError> {
    let model = check(spec, options)?;
    let files = generator
        .generate(&model)
        .map_err(|e| CompileError::Render(Box::new(e)))?;
    info!("rendered {} files", files.len());
    Ok((files, model.warnings))
}

/// Compiles a document and hands every rendered file to `sink`.
///
/// A sink failure stops the run. Files written before the failure are
/// left in place.
pub fn compile<G: CodeGenerator>(
    spec: &OpenApiSpec,
    options: &CompileOptions,
    generator: &G,
    sink: &mut dyn FileSink,
) -> Result<CompileReport, CompileError> {
    let (files, warnings) = render(spec, options, generator)?;
    let mut written = Vec::with_capacity(files.len());
    for file in &files {
        if let Err(err) = sink.write(file) {
            warn!(
                "stopping after {} of {} files were written",
                written.len(),
                files.len()
            );
            return Err(err.into());
        }
        written.push(file.path.clone());
    }
    info!("wrote {} files", written.len());
    Ok(CompileReport {
        files: written,
        warnings,
    })
}
