//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for domain concepts used by the
//! submission pipeline. Value objects validate at construction time so that
//! invalid data cannot be represented once a draft has been accepted.

pub mod email;
pub mod errors;

pub use email::EmailAddress;
pub use errors::ValidationError;
