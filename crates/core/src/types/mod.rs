//! Core types for Stallside.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod tag;

pub use id::*;
pub use phone::{Phone, PhoneError};
pub use tag::{Tag, TagError};
