//! Identifier newtypes.
//!
//! Using distinct types prevents accidentally passing a subscriber handle
//! where a session handle is expected.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Characters a generated session id is drawn from.
const SESSION_ID_ALPHABET: &[u8] = b"1234567890abcdef";

/// Length of a generated session id.
pub const SESSION_ID_LEN: usize = 7;

/// Opaque, externally visible handle of a game session.
///
/// Generated ids are short lowercase hex strings so they fit in a URL a
/// player can read aloud. Lookups accept any string; an id that was never
/// issued is simply not found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random id. Uniqueness is the registry's job.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..SESSION_ID_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..SESSION_ID_ALPHABET.len());
                char::from(SESSION_ID_ALPHABET[idx])
            })
            .collect();
        Self(id)
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identity of one live subscriber of a session's event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(pub Uuid);

impl SubscriberId {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubscriberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
