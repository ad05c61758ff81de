//! Document identifiers
//!
//! Identifiers are 12 bytes rendered as 24 lowercase hex characters:
//! 4 bytes of big-endian unix seconds, 5 bytes fixed per process, 3 bytes of a
//! wrapping counter. The time prefix keeps `ORDER BY id DESC` newest-first.
//! Within one second, two ids on either side of a counter wrap (`0xffffff` -> 0)
//! sort in reverse creation order.

use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

pub const DOCUMENT_ID_LEN: usize = 24;

static DOCUMENT_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{24}$").expect("document id pattern is valid")
});

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rand::random());

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::random::<u32>()));

/// Deserialization runs the same format check as `parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Allocate a fresh identifier.
    pub fn generate() -> Self {
        let seconds = chrono::Utc::now().timestamp() as u32;
        let count = COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

        DocumentId(hex::encode(bytes))
    }

    /// Accept a client-supplied identifier.
    ///
    /// Malformed input is reported as not-found so that handlers fail before the
    /// store is consulted.
    pub fn parse(candidate: &str) -> Result<Self> {
        Self::try_from(candidate.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self> {
        if is_valid(&value) {
            Ok(DocumentId(value))
        } else {
            Err(AppError::Validation(format!("No post with id: {}", value)))
        }
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn is_valid(candidate: &str) -> bool {
    candidate.len() == DOCUMENT_ID_LEN && DOCUMENT_ID_PATTERN.is_match(candidate)
}
