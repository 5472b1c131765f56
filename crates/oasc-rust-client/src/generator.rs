use log::debug;
use oasc_core::ir::{Model, ModelNode, Reference};
use oasc_core::{CodeGenerator, GeneratedFile};
use thiserror::Error;

use crate::emitters::{self, HEADER};
use crate::layout::Layout;
use crate::type_mapper::{Containment, node_module};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to load templates: {0}")]
    Templates(#[source] minijinja::Error),

    #[error("failed to render `{path}`: {source}")]
    Render {
        path: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Renders a model as a tree of Rust modules that depend on `oasc-runtime`.
pub struct RustClientGenerator;

impl CodeGenerator for RustClientGenerator {
    type Error = GeneratorError;

    fn generate(&self, model: &Model) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let env = emitters::environment().map_err(GeneratorError::Templates)?;
        let containment = Containment::new(model);
        let layout = Layout::new(model);
        let api = model
            .api()
            .map(|api| Reference::new(api.namespace.clone(), api.name.clone()));

        let mut files = Vec::with_capacity(model.nodes.len());
        for node in &model.nodes {
            let module = node_module(&node.reference());
            let path = Layout::node_file(&module);
            let render = |source: minijinja::Error| GeneratorError::Render {
                path: path.clone(),
                source,
            };

            let body = match node {
                ModelNode::Class(class) => emitters::class::emit_class(&env, class, &containment),
                ModelNode::Alias(alias) => emitters::alias::emit_alias(&env, alias, &containment),
                ModelNode::Group(group) => match &api {
                    Some(api) => emitters::group::emit_group(&env, group, api, &containment),
                    None => continue,
                },
                ModelNode::Api(api) => emitters::api::emit_api(&env, api, &containment),
            }
            .map_err(render)?;

            let mut content = HEADER.to_string();
            if let Some(index) = layout.hosted(&module) {
                content.push('\n');
                content.push_str(&emitters::modules::emit_modules(&env, index).map_err(render)?);
            }
            content.push('\n');
            content.push_str(&body);
            debug!("rendered {path}");
            files.push(GeneratedFile { path, content });
        }

        for (path, index) in layout.index_files() {
            let content = emitters::modules::emit_modules(&env, index).map_err(|source| {
                GeneratorError::Render {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!("rendered {path}");
            files.push(GeneratedFile {
                path,
                content: format!("{HEADER}\n{content}"),
            });
        }

        Ok(files)
    }
}
