use minijinja::{Environment, context};
use oasc_core::ir::{
    ApiAggregate, HttpMethod, Operation, Parameter, ParameterLocation, ParameterStyle, Reference,
};

use super::doc_lines;
use crate::type_mapper::{Containment, RUNTIME, TypeMapper, node_module, relative_module};

/// Emits the root aggregate: the canonical definition of every operation,
/// and an accessor for each tag group.
pub fn emit_api(
    env: &Environment<'_>,
    api: &ApiAggregate,
    containment: &Containment,
) -> Result<String, minijinja::Error> {
    let module = node_module(&Reference::new(api.namespace.clone(), api.name.clone()));
    let mapper = TypeMapper::new(&module, containment, None);

    let groups: Vec<minijinja::Value> = api
        .groups
        .iter()
        .map(|group| {
            let path = relative_module(&module, &node_module(&group.reference));
            context! {
                tag => group.tag.clone(),
                accessor => group.accessor.clone(),
                rust_type => format!("{path}::{}", group.reference.name),
            }
        })
        .collect();

    let operations: Vec<minijinja::Value> = api
        .operations
        .iter()
        .map(|op| operation_context(op, &mapper))
        .collect();

    env.get_template("api.rs.j2")?.render(context! {
        name => api.name.clone(),
        groups => groups,
        operations => operations,
    })
}

/// The template context for one operation method, shared by the
/// aggregate and the groups that delegate to it.
pub fn operation_context(op: &Operation, mapper: &TypeMapper<'_>) -> minijinja::Value {
    let mut args: Vec<minijinja::Value> = op
        .parameters
        .iter()
        .map(|p| {
            let rust_type = mapper.rust_type(&p.reference);
            context! {
                name => p.name.clone(),
                rust_type => if p.required {
                    rust_type
                } else {
                    format!("::std::option::Option<{rust_type}>")
                },
            }
        })
        .collect();

    let body = op.request_body.as_ref().map(|body| {
        let rust_type = mapper.rust_type(&body.reference);
        args.push(context! {
            name => body.name.clone(),
            rust_type => if body.required {
                rust_type
            } else {
                format!("::std::option::Option<{rust_type}>")
            },
        });
        context! {
            name => body.name.clone(),
            content_type => body.content_type.clone(),
            required => body.required,
        }
    });

    let params = |location: ParameterLocation| -> Vec<minijinja::Value> {
        op.parameters
            .iter()
            .filter(|p| p.location == location)
            .map(|p| {
                context! {
                    name => p.name.clone(),
                    wire_name => p.wire_name.clone(),
                    encoder => encoder(p),
                }
            })
            .collect()
    };

    let arg_names: Vec<String> = op
        .parameters
        .iter()
        .map(|p| p.name.clone())
        .chain(op.request_body.iter().map(|b| b.name.clone()))
        .collect();

    context! {
        name => op.method_name.clone(),
        doc => doc_lines(op.summary.as_deref()),
        deprecated => op.deprecated,
        method => method_variant(op.method),
        path => op.path.clone(),
        args => args,
        arg_names => arg_names,
        path_params => params(ParameterLocation::Path),
        query_params => params(ParameterLocation::Query),
        header_params => params(ParameterLocation::Header),
        cookie_params => params(ParameterLocation::Cookie),
        body => body,
    }
}

/// An expression that builds the runtime encoder for a parameter.
fn encoder(parameter: &Parameter) -> String {
    let style = match parameter.style {
        ParameterStyle::Simple => "Simple",
        ParameterStyle::Label => "Label",
        ParameterStyle::Matrix => "Matrix",
        ParameterStyle::Form => "Form",
        ParameterStyle::SpaceDelimited => "SpaceDelimited",
        ParameterStyle::PipeDelimited => "PipeDelimited",
        ParameterStyle::DeepObject => "DeepObject",
    };
    let mut expr = format!(
        "{RUNTIME}::ParamEncoder::new({RUNTIME}::Style::{style}).explode({})",
        parameter.explode
    );
    if parameter.location != ParameterLocation::Header {
        expr.push_str(".percent_encoded()");
    }
    expr
}

fn method_variant(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "Get",
        HttpMethod::Put => "Put",
        HttpMethod::Post => "Post",
        HttpMethod::Delete => "Delete",
        HttpMethod::Options => "Options",
        HttpMethod::Head => "Head",
        HttpMethod::Patch => "Patch",
        HttpMethod::Trace => "Trace",
    }
}
