//! Property edit form: field rules, form state and the submission flow.

pub mod field;
pub mod state;
pub mod submit;
pub mod validator;

pub use field::{Collection, Field, FieldEdit};
pub use state::FormState;
pub use submit::{EditSession, SessionView, SubmitOutcome, SubmitPhase};
pub use validator::{validate, validate_now};
