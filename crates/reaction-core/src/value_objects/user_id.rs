//! User ID - canonical 64-bit user identifier
//!
//! The external representation is `usr` followed by the URL-safe, unpadded
//! base64 encoding of the identifier's 8 little-endian bytes (11 characters).
//! Zero is reserved and never a valid user.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical user identifier stored in reaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UserId(i64);

impl UserId {
    /// Prefix of the external user id form
    pub const PREFIX: &'static str = "usr";

    /// Length of the bare base64 encoding of 8 bytes
    const ENCODED_LEN: usize = 11;

    /// Create a new UserId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the id is zero (unset)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Bare base64 encoding without the `usr` prefix
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.to_le_bytes())
    }

    /// Parse the bare base64 form (no prefix)
    pub fn parse(s: &str) -> Result<Self, UserIdParseError> {
        if s.len() != Self::ENCODED_LEN {
            return Err(UserIdParseError::InvalidLength(s.len()));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|_| UserIdParseError::InvalidEncoding)?;
        let bytes: [u8; 8] = bytes
            .try_into()
            .map_err(|_| UserIdParseError::InvalidEncoding)?;

        let id = i64::from_le_bytes(bytes);
        if id == 0 {
            return Err(UserIdParseError::Zero);
        }
        Ok(Self(id))
    }

    /// Parse the external `usr...` form
    pub fn parse_prefixed(s: &str) -> Result<Self, UserIdParseError> {
        s.strip_prefix(Self::PREFIX)
            .ok_or(UserIdParseError::MissingPrefix)
            .and_then(Self::parse)
    }
}

/// Error when parsing a UserId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdParseError {
    #[error("user id must start with 'usr'")]
    MissingPrefix,

    #[error("invalid user id length: {0}")]
    InvalidLength(usize),

    #[error("invalid user id encoding")]
    InvalidEncoding,

    #[error("zero is not a valid user id")]
    Zero,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.encode())
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse_prefixed(s)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UserId::parse_prefixed(&s).map_err(serde::de::Error::custom)
    }
}
