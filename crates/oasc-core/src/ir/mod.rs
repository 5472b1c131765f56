pub mod model;
pub mod reference;

pub use model::*;
pub use reference::{BUILTIN_NAMESPACE, Builtin, Namespace, Reference};
