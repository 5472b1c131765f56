//! OpenAPI parameter serialization.
//!
//! [`ParamEncoder`] turns a [`ParamValue`] into the exact text that a
//! serialization style puts on the wire. Path styles (`simple`, `label`,
//! `matrix`) produce the text that replaces a template placeholder; query
//! styles produce one or more `name=value` pairs, joined with `&`.
//!
//! # Examples
//!
//! ```
//! use oasc_runtime::{ParamEncoder, ParamValue, Style, ToParam};
//!
//! # fn main() -> Result<(), oasc_runtime::EncodeError> {
//! let ids = vec![3, 4, 5];
//! let form = ParamEncoder::new(Style::Form);
//! assert_eq!(form.encode("id", &ids)?, "id=3&id=4&id=5");
//! assert_eq!(form.explode(false).encode("id", &ids)?, "id=3,4,5");
//!
//! let filter = ParamValue::object([("color", "red".to_param()), ("size", 10.to_param())]);
//! let deep = ParamEncoder::new(Style::DeepObject);
//! assert_eq!(deep.encode("filter", &filter)?, "filter[color]=red&filter[size]=10");
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::fmt::{self, Display};

use itertools::Itertools;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::EncodeError;
use crate::param::{ParamValue, ToParam};

/// OpenAPI parameter serialization styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Comma-separated values. The default for path and header parameters.
    Simple,
    /// Values prefixed with `.`.
    Label,
    /// `;name=value` pairs.
    Matrix,
    /// `name=value` pairs, repeated (if exploded) or with comma-separated
    /// values (if not). The default for query and cookie parameters.
    Form,
    /// Multiple values separated by spaces.
    SpaceDelimited,
    /// Multiple values separated by pipes.
    PipeDelimited,
    /// Bracket notation for nested structures.
    DeepObject,
}

impl Style {
    /// Whether values are exploded when a parameter doesn't say.
    pub fn default_explode(self) -> bool {
        matches!(self, Style::Form | Style::DeepObject)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Simple => "simple",
            Style::Label => "label",
            Style::Matrix => "matrix",
            Style::Form => "form",
            Style::SpaceDelimited => "spaceDelimited",
            Style::PipeDelimited => "pipeDelimited",
            Style::DeepObject => "deepObject",
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The [component percent-encode set][component], as defined by
/// the WHATWG URL Standard. It gives identical results to JavaScript's
/// `encodeURIComponent()` function.
///
/// [component]: https://url.spec.whatwg.org/#component-percent-encode-set
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'^')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'|')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',');

/// Encodes parameter values for one serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamEncoder {
    style: Style,
    explode: bool,
    percent_encoded: bool,
}

impl ParamEncoder {
    /// Creates an encoder with the style's default `explode` setting,
    /// that leaves text unescaped.
    pub fn new(style: Style) -> Self {
        Self {
            style,
            explode: style.default_explode(),
            percent_encoded: false,
        }
    }

    pub fn explode(mut self, explode: bool) -> Self {
        self.explode = explode;
        self
    }

    /// Percent-encodes every name, key and value with the URI component
    /// set. Style delimiters stay readable, except for the space and pipe
    /// of the delimited styles.
    pub fn percent_encoded(mut self) -> Self {
        self.percent_encoded = true;
        self
    }

    pub fn encode<T: ToParam + ?Sized>(&self, name: &str, value: &T) -> Result<String, EncodeError> {
        self.encode_value(name, &value.to_param())
    }

    /// Encodes a value. Absent values, and empty sequences and objects,
    /// encode to an empty string.
    pub fn encode_value(&self, name: &str, value: &ParamValue) -> Result<String, EncodeError> {
        let n = self.atom(name);
        match value {
            ParamValue::Absent => Ok(String::new()),
            ParamValue::Scalar(value) => Ok(self.scalar(&n, &self.atom(value))),
            ParamValue::Sequence(items) => {
                let items = self.scalars(name, items.iter())?;
                if items.is_empty() {
                    return Ok(String::new());
                }
                self.sequence(name, &n, &items)
            }
            ParamValue::Object(entries) if self.style == Style::DeepObject => {
                let mut pairs = Vec::new();
                self.deep(&n, entries, &mut pairs)?;
                Ok(pairs.join("&"))
            }
            ParamValue::Object(entries) => {
                let present = entries.iter().filter(|(_, value)| !value.is_absent());
                let keys = present.clone().map(|(key, _)| self.atom(key)).collect_vec();
                let values = self.scalars(name, present.map(|(_, value)| value))?;
                if keys.is_empty() {
                    return Ok(String::new());
                }
                Ok(self.object(&n, &keys, &values))
            }
        }
    }

    fn scalar(&self, n: &str, value: &str) -> String {
        match self.style {
            Style::Simple => value.to_string(),
            Style::Label => format!(".{value}"),
            Style::Matrix => format!(";{n}={value}"),
            Style::Form | Style::SpaceDelimited | Style::PipeDelimited | Style::DeepObject => {
                format!("{n}={value}")
            }
        }
    }

    fn sequence(&self, name: &str, n: &str, items: &[Cow<'_, str>]) -> Result<String, EncodeError> {
        let repeated = |prefix: &str, separator: &str| {
            items
                .iter()
                .map(|item| format!("{prefix}{n}={item}"))
                .join(separator)
        };
        Ok(match (self.style, self.explode) {
            (Style::Simple, _) => items.iter().join(","),
            (Style::Label, true) => format!(".{}", items.iter().join(".")),
            (Style::Label, false) => format!(".{}", items.iter().join(",")),
            (Style::Matrix, true) => repeated(";", ""),
            (Style::Matrix, false) => format!(";{n}={}", items.iter().join(",")),
            (Style::Form | Style::SpaceDelimited | Style::PipeDelimited, true) => repeated("", "&"),
            (Style::Form, false) => format!("{n}={}", items.iter().join(",")),
            (Style::SpaceDelimited, false) => format!("{n}={}", items.iter().join(self.delimiter(" "))),
            (Style::PipeDelimited, false) => format!("{n}={}", items.iter().join(self.delimiter("|"))),
            (Style::DeepObject, _) => {
                return Err(EncodeError::Unsupported {
                    name: name.to_string(),
                    style: self.style,
                    reason: "only objects can use this style",
                });
            }
        })
    }

    fn object(&self, n: &str, keys: &[Cow<'_, str>], values: &[Cow<'_, str>]) -> String {
        let pairs = |separator: &str| {
            keys.iter()
                .zip(values)
                .map(|(key, value)| format!("{key}={value}"))
                .join(separator)
        };
        let flat = |separator: &str| {
            keys.iter()
                .zip(values)
                .flat_map(|(key, value)| [key, value])
                .join(separator)
        };
        match (self.style, self.explode) {
            (Style::Simple, true) => pairs(","),
            (Style::Simple, false) => flat(","),
            (Style::Label, true) => format!(".{}", pairs(".")),
            (Style::Label, false) => format!(".{}", flat(",")),
            (Style::Matrix, true) => format!(";{}", pairs(";")),
            (Style::Matrix, false) => format!(";{n}={}", flat(",")),
            (Style::Form | Style::SpaceDelimited | Style::PipeDelimited, true) => pairs("&"),
            (Style::Form, false) => format!("{n}={}", flat(",")),
            (Style::SpaceDelimited, false) => format!("{n}={}", flat(self.delimiter(" "))),
            (Style::PipeDelimited, false) => format!("{n}={}", flat(self.delimiter("|"))),
            // Flat objects only; nested ones go through `deep`.
            (Style::DeepObject, _) => keys
                .iter()
                .zip(values)
                .map(|(key, value)| format!("{n}[{key}]={value}"))
                .join("&"),
        }
    }

    /// Appends `prefix[key]=value` pairs, recursing into nested values.
    fn deep(
        &self,
        prefix: &str,
        entries: &[(String, ParamValue)],
        pairs: &mut Vec<String>,
    ) -> Result<(), EncodeError> {
        for (key, value) in entries {
            let path = format!("{prefix}[{}]", self.atom(key));
            match value {
                ParamValue::Absent => {}
                ParamValue::Scalar(value) => pairs.push(format!("{path}={}", self.atom(value))),
                ParamValue::Sequence(items) => {
                    let indexed = items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| (i.to_string(), item.clone()))
                        .collect_vec();
                    self.deep(&path, &indexed, pairs)?;
                }
                ParamValue::Object(entries) => self.deep(&path, entries, pairs)?,
            }
        }
        Ok(())
    }

    /// Encodes the members of a sequence or object, which must be scalars.
    /// Absent members are skipped.
    fn scalars<'v>(
        &self,
        name: &str,
        values: impl Iterator<Item = &'v ParamValue>,
    ) -> Result<Vec<Cow<'v, str>>, EncodeError> {
        values
            .filter(|value| !value.is_absent())
            .map(|value| match value {
                ParamValue::Scalar(value) => Ok(self.atom(value)),
                _ => Err(EncodeError::Unsupported {
                    name: name.to_string(),
                    style: self.style,
                    reason: "nested values can only use the deepObject style",
                }),
            })
            .collect()
    }

    fn atom<'v>(&self, text: &'v str) -> Cow<'v, str> {
        if self.percent_encoded {
            utf8_percent_encode(text, COMPONENT).into()
        } else {
            text.into()
        }
    }

    fn delimiter(&self, delimiter: &'static str) -> &'static str {
        match (self.percent_encoded, delimiter) {
            (true, " ") => "%20",
            (true, "|") => "%7C",
            _ => delimiter,
        }
    }
}
