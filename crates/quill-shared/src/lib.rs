//! # Quill Shared
//!
//! Request/response types for the API: the input field sets accepted from
//! clients, the output field sets returned to them, and the validation that
//! sits between. Read-only fields (ids, authors, parent references,
//! timestamps) never appear in a request type.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ErrorResponse, MessageResponse};
pub use validation::FieldErrors;
