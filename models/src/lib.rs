//! Domain models for the compile client.
//!
//! This crate contains pure data structures: the current [`Session`], the
//! [`ProblemDetail`] shown when something goes wrong, and the [`SocketTarget`]
//! describing where the compilation backend lives. Models have no business
//! logic; the transition function operating on them lives in `client-core`.

pub mod error;
pub mod session;
pub mod socket_target;

pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use session::{ProblemDetail, Session};
pub use socket_target::SocketTarget;
pub use socket_target::builder::SocketTargetBuilder;

#[cfg(test)]
mod tests;
