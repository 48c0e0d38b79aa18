//! Shared building blocks for the compile client workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): cross-cutting types used by every error enum
//! - **models**: pure session and socket data structures
//! - **client-core**: the session state machine, transport and runtime
//! - **compile-client**: the command line application wiring everything together

pub mod error;

pub use error::error_location::ErrorLocation;
