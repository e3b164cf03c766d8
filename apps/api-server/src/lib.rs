//! Quill API server library - exposed so integration tests can assemble the
//! app the same way `main` does.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
