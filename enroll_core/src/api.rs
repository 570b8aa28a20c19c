/// Things that can go wrong talking to the server.
pub mod error;
pub use error::Error;

/// The registration endpoint.
pub mod register;

/// The HTTP client wrapper.
pub mod client;
pub use client::Client;
