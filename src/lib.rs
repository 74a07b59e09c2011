//! Property edit form core: validation, form state and submission against a
//! property backend.

pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod models;

pub use config::EditorConfig;
pub use error::{FormError, GatewayError, LoadError};
pub use form::{EditSession, Field, FieldEdit, FormState, SubmitOutcome, SubmitPhase};
pub use gateway::{HttpGateway, MemoryGateway, PropertyGateway};
pub use models::{PropertyDraft, PropertyRecord};
