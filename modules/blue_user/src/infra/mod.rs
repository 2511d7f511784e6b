pub mod directory;
pub mod error;
pub mod storage;

pub use error::SourceError;
