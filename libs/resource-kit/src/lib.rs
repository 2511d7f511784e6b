//! # resource-kit
//!
//! Building blocks for read-only API resources that live inside modules.
//!
//! ## Features
//!
//! - **Explicit export schema**: each resource type declares an ordered table of
//!   exported fields (wire name + visibility rule) instead of relying on reflection
//! - **Field visibility policies**: `(caller, field) -> visible?` is a first-class object
//! - **Capability discovery**: resource types register under a capability tag via inventory
//! - **Problem details**: RFC 9457 error payloads for catalog-driven errors
//! - **Module wiring**: module contexts with typed config and a client hub
//!
//! ## Example
//!
//! ```rust,ignore
//! use resource_kit::export::{Caller, Exported, RestrictedFieldPolicy};
//!
//! let json = serde_json::to_value(Exported::new(&user, &schema, &caller, &RestrictedFieldPolicy::default()))?;
//! ```

pub use anyhow::Result;
pub use async_trait::async_trait;

// Re-export inventory so modules can submit capability entries without a direct dependency.
pub use inventory;

pub mod capability;
pub mod client_hub;
pub mod context;
pub mod contracts;
pub mod export;
pub mod problem;

pub use capability::{CapabilityEntry, CapabilityError, CapabilityRegistry};
pub use client_hub::{ClientHub, ClientHubError};
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};
pub use contracts::Module;
pub use problem::{internal_error, not_found, Problem};
