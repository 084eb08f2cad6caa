//! Vault plan tier definitions.
//!
//! The set of tiers is closed: every lookup against the plan catalog is an
//! exhaustive `match`, so an undeclared tier can never reach the capacity
//! calculator. Strings from the outside world are converted at the boundary
//! with [`PlanTier::from_str`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vault plan tier.
///
/// Determines the seat capacity of a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanTier {
    /// Up to 10 members.
    #[serde(alias = "Solo")]
    Small,

    /// Up to 25 members.
    #[serde(alias = "Portfolio")]
    Medium,

    /// Up to 75 members.
    #[serde(alias = "Institution")]
    Enterprise,
}

/// Raised when a tier name outside the closed set is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid plan tier: {0}")]
pub struct UnknownPlanTier(pub String);

impl PlanTier {
    /// Every tier, in catalog order.
    pub const ALL: [PlanTier; 3] = [PlanTier::Small, PlanTier::Medium, PlanTier::Enterprise];

    /// Canonical tier name, as stored and sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Small => "Small",
            PlanTier::Medium => "Medium",
            PlanTier::Enterprise => "Enterprise",
        }
    }

    /// Exact match on the canonical name only. Stored values use this.
    pub fn from_canonical(name: &str) -> Option<Self> {
        PlanTier::ALL.into_iter().find(|tier| tier.as_str() == name)
    }

    /// Resolves an alternate marketing name to its tier.
    ///
    /// Aliases are accepted on input only and never rendered.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "Solo" => Some(PlanTier::Small),
            "Portfolio" => Some(PlanTier::Medium),
            "Institution" => Some(PlanTier::Enterprise),
            _ => None,
        }
    }
}

impl Default for PlanTier {
    fn default() -> Self {
        PlanTier::Small
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = UnknownPlanTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanTier::from_canonical(s)
            .or_else(|| PlanTier::from_alias(s))
            .ok_or_else(|| UnknownPlanTier(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("Small".parse::<PlanTier>().unwrap(), PlanTier::Small);
        assert_eq!("Medium".parse::<PlanTier>().unwrap(), PlanTier::Medium);
        assert_eq!("Enterprise".parse::<PlanTier>().unwrap(), PlanTier::Enterprise);
    }

    #[test]
    fn parses_marketing_aliases() {
        assert_eq!("Solo".parse::<PlanTier>().unwrap(), PlanTier::Small);
        assert_eq!("Portfolio".parse::<PlanTier>().unwrap(), PlanTier::Medium);
        assert_eq!("Institution".parse::<PlanTier>().unwrap(), PlanTier::Enterprise);
    }

    #[test]
    fn canonical_lookup_ignores_aliases() {
        assert_eq!(PlanTier::from_canonical("Medium"), Some(PlanTier::Medium));
        assert_eq!(PlanTier::from_canonical("Portfolio"), None);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "Gigantic".parse::<PlanTier>().unwrap_err();
        assert_eq!(err, UnknownPlanTier("Gigantic".to_string()));
        assert_eq!(err.to_string(), "Invalid plan tier: Gigantic");
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("small".parse::<PlanTier>().is_err());
        assert!("ENTERPRISE".parse::<PlanTier>().is_err());
    }

    #[test]
    fn default_tier_is_small() {
        assert_eq!(PlanTier::default(), PlanTier::Small);
    }

    #[test]
    fn tier_serializes_as_canonical_name() {
        let json = serde_json::to_string(&PlanTier::Enterprise).unwrap();
        assert_eq!(json, "\"Enterprise\"");
    }

    #[test]
    fn tier_deserializes_from_alias() {
        let tier: PlanTier = serde_json::from_str("\"Portfolio\"").unwrap();
        assert_eq!(tier, PlanTier::Medium);
    }

    #[test]
    fn display_matches_as_str() {
        for tier in PlanTier::ALL {
            assert_eq!(tier.to_string(), tier.as_str());
        }
    }
}
