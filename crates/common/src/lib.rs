//! Shared building blocks for the course API workspace: logging setup,
//! runtime directory checks and small wire types reused by the server.

pub mod env;
pub mod types;
pub mod utils;
