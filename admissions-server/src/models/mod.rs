//! Domain models with validation at construction
//!
//! Inbound payloads are validated when building these types.
//! Invalid input returns ValidationErrors, not panic.

pub mod admission;
pub mod validation;

pub use admission::AdmissionRecord;
pub use validation::{ValidationDetail, ValidationError, ValidationErrors};
