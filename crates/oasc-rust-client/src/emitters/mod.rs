pub mod alias;
pub mod api;
pub mod class;
pub mod group;
pub mod modules;

use minijinja::{AutoEscape, Environment};

/// The first line of every generated file.
pub const HEADER: &str = "// @generated by oasc. Do not edit.\n";

/// Builds the template environment shared by every emitter.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("rust_str", rust_str);
    env.add_template("class.rs.j2", include_str!("../../templates/class.rs.j2"))?;
    env.add_template("alias.rs.j2", include_str!("../../templates/alias.rs.j2"))?;
    env.add_template("group.rs.j2", include_str!("../../templates/group.rs.j2"))?;
    env.add_template("api.rs.j2", include_str!("../../templates/api.rs.j2"))?;
    env.add_template("mod.rs.j2", include_str!("../../templates/mod.rs.j2"))?;
    Ok(env)
}

/// Quotes a value as a Rust string literal.
fn rust_str(value: String) -> String {
    format!("{value:?}")
}

/// Renders a description as `///` doc comment lines.
pub fn doc_lines(description: Option<&str>) -> Vec<String> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Vec::new();
    };
    description
        .lines()
        .map(|line| match line.trim_end() {
            "" => "///".to_string(),
            line => format!("/// {line}"),
        })
        .collect()
}
