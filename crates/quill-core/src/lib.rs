//! # Quill Core
//!
//! The domain layer of the Quill blog API.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod authz;
pub mod domain;
pub mod error;
pub mod ports;

pub use authz::Requester;
pub use error::DomainError;
