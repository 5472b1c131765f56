use minijinja::{Environment, context};

use crate::layout::ModuleIndex;

/// Emits `pub mod` declarations for a directory's child modules, and
/// re-exports the types of its node files.
pub fn emit_modules(env: &Environment<'_>, index: &ModuleIndex) -> Result<String, minijinja::Error> {
    let exports: Vec<minijinja::Value> = index
        .exports
        .iter()
        .map(|(module, name)| context! { module => module, name => name })
        .collect();

    env.get_template("mod.rs.j2")?.render(context! {
        modules => index.modules.iter().collect::<Vec<_>>(),
        exports => exports,
    })
}
