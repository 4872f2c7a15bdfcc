//! Machine identifier value object
//!
//! A short, stable, filesystem-safe label for one machine/user pair. It names
//! the machine's directory in the shared repository and appears in merge
//! annotations.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters kept from the identity digest
const ID_LEN: usize = 8;

/// Identifier of one machine in the shared repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MachineId(String);

impl MachineId {
    /// Derive the identifier from host name and user identity.
    ///
    /// The same inputs always produce the same id.
    pub fn derive(hostname: &str, user: &str) -> Self {
        let digest = Sha256::digest(format!("{}-{}", hostname, user).as_bytes());
        let hex = format!("{:x}", digest);
        Self(hex[..ID_LEN].to_string())
    }

    /// Validate an identifier read from configuration or a repository.
    pub fn parse(raw: &str) -> Result<Self, InvalidMachineId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidMachineId::Empty);
        }
        if trimmed.starts_with('.') {
            return Err(InvalidMachineId::Hidden(trimmed.to_string()));
        }
        if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
            return Err(InvalidMachineId::PathSeparator(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MachineId {
    type Error = InvalidMachineId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MachineId> for String {
    fn from(id: MachineId) -> Self {
        id.0
    }
}

impl AsRef<str> for MachineId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rejected machine identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMachineId {
    #[error("machine id must not be empty")]
    Empty,
    #[error("machine id '{0}' must not start with '.'")]
    Hidden(String),
    #[error("machine id '{0}' must not contain path separators")]
    PathSeparator(String),
}
