//! # Nostalgia Common Library
//!
//! Shared code for the nostalgia services including:
//! - Error type and result alias
//! - Bootstrap configuration loading and root folder resolution
//! - The document persistence collaborator (`DocumentStore`)
//! - Database initialisation
//! - Time utilities

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod store;
pub mod time;

pub use error::{Error, Result};
pub use store::{DocumentStore, MemoryDocumentStore};
