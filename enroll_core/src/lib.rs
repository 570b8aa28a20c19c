//! Common code for enroll clients: the sign-up schema and the registration
//! API client. Nothing here touches a terminal.

/// Talk to the registration endpoint.
pub mod api;

/// Validate sign-up input before it goes anywhere near the network.
pub mod validate;
pub use validate::{SignUpInput, ValidationResult};
