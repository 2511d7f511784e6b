pub mod error;
pub mod handlers;
