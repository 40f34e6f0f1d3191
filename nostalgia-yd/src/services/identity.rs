//! Caller identity resolution
//!
//! The service does not authenticate callers itself. An upstream gateway (or the
//! caller) supplies an opaque identity string; requests without one are
//! rejected before any rate accounting happens.

use axum::http::{HeaderMap, HeaderName};
use nostalgia_common::{Error, Result};
use std::fmt;

use crate::config::IdentityConfig;

/// Opaque, non-empty caller identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// `None` for blank input
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the current caller's identity
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// Reads the identity from a single request header
#[derive(Debug, Clone)]
pub struct HeaderIdentity {
    header: HeaderName,
}

impl HeaderIdentity {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }

    pub fn from_config(config: &IdentityConfig) -> Result<Self> {
        let header = HeaderName::try_from(config.header.as_str())
            .map_err(|e| Error::Config(format!("Invalid identity header '{}': {}", config.header, e)))?;
        Ok(Self::new(header))
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl IdentityProvider for HeaderIdentity {
    fn current_identity(&self, headers: &HeaderMap) -> Option<Identity> {
        // Non-UTF-8 values are treated as absent
        headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .and_then(Identity::new)
    }
}
