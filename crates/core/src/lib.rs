//! `stockdesk-core` : shared building blocks.
//!
//! Pure domain primitives: identifiers and the error model.
//! No IO lives here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ItemId, SessionId};
