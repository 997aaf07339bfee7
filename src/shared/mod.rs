//! Shared types

pub mod error;

pub use error::{AzError, Result};
