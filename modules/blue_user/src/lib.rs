//! Blue user module: the read-only user resource of the REST API.
//!
//! A user is exported as `id`, `fullName`, `email` (restricted) and a
//! `favorites` link. Which fields a caller sees is decided by a visibility
//! policy; the wire shape comes from one explicit schema shared by every
//! identity source.

// === PUBLIC CONTRACT ===
// Only the contract module should be public for other modules to consume
pub mod contract;
pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod errors;
pub mod module;
pub use module::BlueUser;

// === INTERNAL MODULES ===
// Exposed for integration tests and embedding; not part of the contract.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
