//! Provider value objects
//!
//! [`ProviderId`] names one of the two concrete backends a task can run on.
//! [`ProviderChoice`] adds the virtual `auto` value, which is only ever a
//! routing input and never an execution target.

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Concrete AI provider (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    /// Deep reasoning, higher cost
    Quality,
    /// Cheap, creative and visual-capable
    Fast,
}

impl ProviderId {
    /// Both concrete providers, quality first.
    pub const ALL: [ProviderId; 2] = [ProviderId::Quality, ProviderId::Fast];

    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Quality => "quality",
            ProviderId::Fast => "fast",
        }
    }

    /// The other concrete provider.
    pub fn other(&self) -> ProviderId {
        match self {
            ProviderId::Quality => ProviderId::Fast,
            ProviderId::Fast => ProviderId::Quality,
        }
    }

    /// Only the fast provider can generate visual assets.
    pub fn supports_visuals(&self) -> bool {
        matches!(self, ProviderId::Fast)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quality" | "qualityprovider" | "quality-provider" => Ok(ProviderId::Quality),
            "fast" | "fastprovider" | "fast-provider" => Ok(ProviderId::Fast),
            "auto" => Err(DomainError::AutoNotExecutable),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A routing input: either a concrete provider or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderChoice {
    /// Let the selector decide
    #[default]
    Auto,
    /// Pin to a concrete provider
    Provider(ProviderId),
}

impl ProviderChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderChoice::Auto => "auto",
            ProviderChoice::Provider(p) => p.as_str(),
        }
    }

    /// The concrete provider, if this choice is not `auto`.
    pub fn concrete(&self) -> Option<ProviderId> {
        match self {
            ProviderChoice::Auto => None,
            ProviderChoice::Provider(p) => Some(*p),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, ProviderChoice::Auto)
    }
}

impl From<ProviderId> for ProviderChoice {
    fn from(provider: ProviderId) -> Self {
        ProviderChoice::Provider(provider)
    }
}

impl std::fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(ProviderChoice::Auto);
        }
        s.parse::<ProviderId>().map(ProviderChoice::Provider)
    }
}

impl Serialize for ProviderChoice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderChoice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
