use crate::form::{Collection, Field};
use thiserror::Error;

/// Errors raised by form operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Please enter a valid image URL")]
    InvalidImageUrl(String),

    #[error("\"{item}\" is not a known {collection} option")]
    UnknownCatalogItem { collection: Collection, item: String },

    #[error("\"{value}\" is not a valid option for {}", .field.label())]
    UnknownOption { field: Field, value: String },

    #[error("{} does not hold a usable value", .0.label())]
    InvalidDraft(Field),
}

/// Errors raised by a property gateway
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The backend answered with a failure; the message is shown as-is
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

/// Errors that prevent an edit session from opening
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Property not found")]
    NotFound(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
