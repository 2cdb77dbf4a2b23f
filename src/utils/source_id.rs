//! Source identifier generation.
//!
//! Identifiers are the hex form of a random UUID v4, optionally truncated.
//! A [`SourceIdGenerator`] built with a registry keeps drawing until it finds
//! an identifier the registry has not seen, giving up after
//! [`MAX_SOURCE_ID_ATTEMPTS`] draws.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::repository::DbError;

/// Length of an untruncated identifier.
pub const SOURCE_ID_HEX_LEN: usize = 32;

/// Draws allowed before a registry-checked generator gives up.
pub const MAX_SOURCE_ID_ATTEMPTS: usize = 8;

#[derive(Debug, Error)]
pub enum SourceIdError {
    #[error("Source id length must be positive")]
    InvalidLength,

    #[error("Failed to generate unique source_id after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error("Source id lookup failed: {0}")]
    Lookup(#[from] DbError),
}

/// Something that knows which identifiers are already in use.
#[async_trait]
pub trait SourceIdRegistry: Send + Sync {
    async fn is_taken(&self, candidate: &str) -> Result<bool, DbError>;
}

/// Generate a random identifier of `length` hex chars (32 when `None`).
///
/// Lengths above 32 yield the full identifier.
pub fn generate_source_id(length: Option<usize>) -> Result<String, SourceIdError> {
    let id = Uuid::new_v4().simple().to_string();
    match length {
        None => Ok(id),
        Some(0) => Err(SourceIdError::InvalidLength),
        Some(n) => Ok(id[..n.min(SOURCE_ID_HEX_LEN)].to_string()),
    }
}

/// Generates source identifiers, optionally checked against a registry.
#[derive(Clone, Copy)]
pub struct SourceIdGenerator<'a> {
    registry: Option<&'a dyn SourceIdRegistry>,
    length: Option<usize>,
}

impl Default for SourceIdGenerator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SourceIdGenerator<'a> {
    /// Generator without uniqueness checks.
    pub fn new() -> Self {
        Self {
            registry: None,
            length: None,
        }
    }

    /// Generator that rejects identifiers the registry reports as taken.
    pub fn with_registry(registry: &'a dyn SourceIdRegistry) -> Self {
        Self {
            registry: Some(registry),
            length: None,
        }
    }

    /// Truncate generated identifiers to `length` hex chars.
    pub fn with_length(mut self, length: Option<usize>) -> Self {
        self.length = length;
        self
    }

    /// Produce an identifier.
    ///
    /// Without a registry this is a single draw.
    pub async fn unique_id(&self) -> Result<String, SourceIdError> {
        let Some(registry) = self.registry else {
            return generate_source_id(self.length);
        };

        for _ in 0..MAX_SOURCE_ID_ATTEMPTS {
            let candidate = generate_source_id(self.length)?;
            if !registry.is_taken(&candidate).await? {
                return Ok(candidate);
            }
            tracing::debug!("Source id {} already taken, retrying", candidate);
        }

        Err(SourceIdError::Exhausted {
            attempts: MAX_SOURCE_ID_ATTEMPTS,
        })
    }
}
