//! External service clients.

pub mod media;

pub use media::{MediaClient, MediaError};
