pub mod client;
pub mod error;
pub mod model;

pub use client::BlueUserApi;
pub use error::BlueUserError;
pub use model::{FavoritesRef, UserId, UserResource, BLUE_USER};
