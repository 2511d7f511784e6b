pub mod error;
pub mod links;
pub mod projection;
pub mod repo;
pub mod schema;
pub mod service;
