use std::fmt::{self, Display};

use log::debug;
use serde::Serialize;

use crate::error::EncodeError;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
            Method::Trace => "TRACE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A query string, assembled from encoded `name=value` parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<String>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an encoded part. Empty parts, from absent values, are skipped.
    pub fn push(&mut self, part: impl Into<String>) -> &mut Self {
        let part = part.into();
        if !part.is_empty() {
            self.0.push(part);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Formats as `?a=1&b=2`, or nothing if there are no parts.
impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, "?{}", self.0.join("&"))
    }
}

/// A fully encoded request, ready to hand to any HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        debug!("{method} {uri}");
        Self {
            method,
            uri,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header. Empty values, from absent parameters, are skipped.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.headers.push((name.to_string(), value));
        }
        self
    }

    /// Adds an encoded `name=value` pair to the `Cookie` header.
    pub fn cookie(mut self, pair: impl Into<String>) -> Self {
        let pair = pair.into();
        if pair.is_empty() {
            return self;
        }
        match self
            .headers
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case("cookie"))
        {
            Some((_, value)) => {
                value.push_str("; ");
                value.push_str(&pair);
            }
            None => self.headers.push(("Cookie".to_string(), pair)),
        }
        self
    }

    /// Serializes `body` as JSON, and sets the `Content-Type` header.
    pub fn json<T: Serialize + ?Sized>(
        mut self,
        content_type: &str,
        body: &T,
    ) -> Result<Self, EncodeError> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self.header("Content-Type", content_type))
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
