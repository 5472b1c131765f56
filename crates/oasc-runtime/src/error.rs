use crate::encoding::Style;

/// A parameter value or request body couldn't be encoded.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("`{style}` style can't encode parameter `{name}`: {reason}")]
    Unsupported {
        name: String,
        style: Style,
        reason: &'static str,
    },
    #[error("malformed JSON body")]
    Json(#[from] serde_json::Error),
}

/// A URI template was used incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template parameter `{0}` is already bound")]
    AlreadyBound(String),
}

/// Text that isn't a valid number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    #[error("`{0}` isn't an integer")]
    Integer(String),
    #[error("`{0}` isn't a decimal number")]
    Decimal(String),
    #[error("exponent of `{0}` is out of range")]
    ExponentOutOfRange(String),
    #[error("non-finite number can't be a decimal")]
    NonFinite,
}
