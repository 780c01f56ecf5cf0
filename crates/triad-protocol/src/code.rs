//! Room codes: short names players read to each other.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Characters a room code may contain. Uppercase letters and digits
/// minus the easily confused `I`, `O`, `0` and `1`.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of characters in a room code.
pub const CODE_LEN: usize = 6;

/// A room's shareable code, always stored in canonical uppercase.
///
/// Input is case-insensitive: `"k7pq2m"` and `"K7PQ2M"` parse to the same
/// code. Serializes as the plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Draws a random code. Uniqueness is the registry's job.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LEN)
            .map(|_| {
                CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char
            })
            .collect();
        Self(code)
    }

    /// Canonicalizes user input (trim, uppercase) and validates it.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidRoomCode`] when the input is not
    /// [`CODE_LEN`] characters from [`CODE_ALPHABET`].
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let canonical = input.trim().to_ascii_uppercase();
        let valid = canonical.len() == CODE_LEN
            && canonical.bytes().all(|b| CODE_ALPHABET.contains(&b));
        if valid {
            Ok(Self(canonical))
        } else {
            Err(ProtocolError::InvalidRoomCode(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}
