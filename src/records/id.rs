//! Short alphabetic record identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a freshly generated identifier.
pub const ID_LENGTH: usize = 10;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest multiple of 26 that fits in a byte; bytes at or above it are
/// discarded so every letter is equally likely.
const REJECT_FROM: u8 = 234;

/// Identifier of a user record: uppercase ASCII letters only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Draws a new random identifier of [`ID_LENGTH`] letters.
    ///
    /// Uniqueness is not guaranteed; the store rejects duplicates and the
    /// caller retries.
    pub fn generate() -> Self {
        let mut id = String::with_capacity(ID_LENGTH);
        while id.len() < ID_LENGTH {
            let random = Uuid::new_v4();
            for byte in random.as_bytes() {
                if *byte >= REJECT_FROM {
                    continue;
                }
                id.push(ALPHABET[(*byte % 26) as usize] as char);
                if id.len() == ID_LENGTH {
                    break;
                }
            }
        }
        Self(id)
    }

    /// Accepts an existing identifier if it is well formed.
    pub fn parse(raw: &str) -> Option<Self> {
        is_well_formed(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 1 to [`ID_LENGTH`] uppercase ASCII letters.
pub fn is_well_formed(raw: &str) -> bool {
    !raw.is_empty() && raw.len() <= ID_LENGTH && raw.bytes().all(|b| b.is_ascii_uppercase())
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
