//! Tenant and room keys

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::RelayError;

/// Identifier of the owning business entity (practice, salon, organization).
///
/// Clients send it either as a JSON string or as an integer; both normalize
/// to the same trimmed string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Parse a tenant id, rejecting empty values and anything that would
    /// collide with the room key separator or whitespace.
    pub fn parse(raw: &str) -> Result<Self, RelayError> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= 128
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(RelayError::InvalidTenant(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TenantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };
        TenantId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Key of a broadcast room, always of the form `practice-{tenant}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomKey(String);

impl RoomKey {
    const PREFIX: &'static str = "practice-";

    /// Room for a tenant
    pub fn practice(tenant: &TenantId) -> Self {
        Self(format!("{}{}", Self::PREFIX, tenant))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tenant this room is scoped to
    pub fn tenant(&self) -> Option<TenantId> {
        self.0
            .strip_prefix(Self::PREFIX)
            .and_then(|t| TenantId::parse(t).ok())
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
