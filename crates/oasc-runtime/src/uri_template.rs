use std::fmt::{self, Display};

use indexmap::IndexMap;
use log::trace;

use crate::error::TemplateError;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Binding {
    Value(String),
    /// Left behind by [`UriTemplate::unbind`]; renders as an empty string.
    Unbound,
}

/// A URI with `{name}` placeholders.
///
/// Values are inserted as-is, so they should already be encoded with
/// [`ParamEncoder`](crate::ParamEncoder). A template is meant for building
/// one request; it isn't safe to bind and unbind from several threads.
#[derive(Clone, Debug)]
pub struct UriTemplate {
    template: String,
    bindings: IndexMap<String, Binding>,
}

impl UriTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            bindings: IndexMap::new(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Binds a value to a placeholder.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already bound. Call [`unbind`](Self::unbind)
    /// first to replace a value, or use [`try_bind`](Self::try_bind).
    #[track_caller]
    pub fn bind(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        if let Err(err) = self.try_bind(name, value) {
            panic!("{err}");
        }
        self
    }

    /// Binds a value to a placeholder, or fails if `name` is already bound.
    pub fn try_bind(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<&mut Self, TemplateError> {
        match self.bindings.get(name) {
            Some(Binding::Value(_)) => Err(TemplateError::AlreadyBound(name.to_string())),
            _ => {
                let value = value.into();
                trace!("bound `{name}` to `{value}`");
                self.bindings.insert(name.to_string(), Binding::Value(value));
                Ok(self)
            }
        }
    }

    /// Clears a binding, so that the placeholder can be bound again.
    pub fn unbind(&mut self, name: &str) -> &mut Self {
        self.bindings.insert(name.to_string(), Binding::Unbound);
        self
    }

    /// Returns the names of all placeholders, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        parse(&self.template)
            .filter_map(|part| match part {
                Part::Placeholder(name) => Some(name),
                Part::Literal(_) => None,
            })
            .collect()
    }

    /// Returns the placeholders that would render as an empty string.
    pub fn unbound(&self) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !matches!(self.bindings.get(*name), Some(Binding::Value(_))))
            .collect()
    }

    /// Replaces every placeholder with its bound value. Placeholders that
    /// were never bound, or were unbound, become empty strings.
    pub fn to_uri(&self) -> String {
        let mut uri = String::with_capacity(self.template.len());
        for part in parse(&self.template) {
            match part {
                Part::Literal(text) => uri.push_str(text),
                Part::Placeholder(name) => {
                    if let Some(Binding::Value(value)) = self.bindings.get(name) {
                        uri.push_str(value);
                    }
                }
            }
        }
        uri
    }
}

impl Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Splits a template into literals and placeholders. A `{` without a
/// closing `}` is literal text.
fn parse(template: &str) -> impl Iterator<Item = Part<'_>> {
    let mut rest = template;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(open) = rest.find('{') else {
            let literal = rest;
            rest = "";
            return Some(Part::Literal(literal));
        };
        if open > 0 {
            let (literal, tail) = rest.split_at(open);
            rest = tail;
            return Some(Part::Literal(literal));
        }
        match rest[1..].find(['{', '}']) {
            Some(close) if rest.as_bytes()[close + 1] == b'}' => {
                let name = &rest[1..close + 1];
                rest = &rest[close + 2..];
                Some(Part::Placeholder(name))
            }
            // Another `{` comes first, or there's no `}` at all.
            found => {
                let end = found.map_or(rest.len(), |at| at + 1);
                let (literal, tail) = rest.split_at(end);
                rest = tail;
                Some(Part::Literal(literal))
            }
        }
    })
}
