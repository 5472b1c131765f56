//! Runtime support for clients generated by `oasc`.
//!
//! Generated operations build a [`Request`] by binding encoded path
//! parameters into a [`UriTemplate`], and appending encoded query,
//! header and cookie parameters. Values are encoded by [`ParamEncoder`]
//! according to the OpenAPI parameter serialization rules.

pub mod codec;
pub mod encoding;
pub mod error;
pub mod maybe;
pub mod number;
pub mod param;
pub mod request;
pub mod uri_template;

pub use encoding::{ParamEncoder, Style};
pub use error::{EncodeError, NumberError, TemplateError};
pub use maybe::Maybe;
pub use number::{Decimal, Integer, MAX_EXPONENT};
pub use param::{ParamValue, ToParam};
pub use request::{Method, Query, Request};
pub use uri_template::UriTemplate;

// Generated code names these through the runtime, so that it only
// needs one dependency.
pub use chrono;
pub use indexmap;
pub use serde;
pub use serde_json;
