//! Renders an oasc model as a typed Rust HTTP client.
//!
//! Generated code depends only on the `oasc-runtime` crate, which
//! re-exports the serde, chrono and indexmap items that models use.

pub mod emitters;
pub mod generator;
pub mod layout;
pub mod type_mapper;

pub use generator::{GeneratorError, RustClientGenerator};
