use serde::{Deserialize, Serialize};

/// Capability scopes attached to an access token.
///
/// A token only authorizes the office mutations its scopes name; listing
/// and detail reads need no scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Capability {
    /// Create a new office listing
    OfficeCreate,

    /// Update an existing office listing
    OfficeUpdate,

    /// Delete an office listing
    OfficeDelete,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::OfficeCreate => write!(f, "office.create"),
            Capability::OfficeUpdate => write!(f, "office.update"),
            Capability::OfficeDelete => write!(f, "office.delete"),
        }
    }
}

impl std::str::FromStr for Capability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "office.create" => Ok(Capability::OfficeCreate),
            "office.update" => Ok(Capability::OfficeUpdate),
            "office.delete" => Ok(Capability::OfficeDelete),
            _ => Err(anyhow::anyhow!("Invalid capability scope: {}", s)),
        }
    }
}

impl TryFrom<String> for Capability {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse().map_err(|e: anyhow::Error| e.to_string())
    }
}

impl From<Capability> for String {
    fn from(capability: Capability) -> Self {
        capability.to_string()
    }
}
