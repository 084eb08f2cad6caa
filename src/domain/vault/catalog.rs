//! Plan catalog: seat capacity and display metadata per tier.
//!
//! # Tier Configuration
//!
//! | Tier | Seats | Note |
//! |------|-------|------|
//! | Small | 10 | Up to 10 members |
//! | Medium | 25 | Up to 25 members |
//! | Enterprise | 75 | Up to 75 members |

use serde::Serialize;

use super::PlanTier;

/// Display metadata for a tier. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanDisplay {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Maximum number of members a vault on `tier` may hold.
pub fn seats_for_plan(tier: PlanTier) -> u32 {
    match tier {
        PlanTier::Small => 10,
        PlanTier::Medium => 25,
        PlanTier::Enterprise => 75,
    }
}

impl PlanTier {
    /// Seat capacity of this tier.
    pub fn seats(&self) -> u32 {
        seats_for_plan(*self)
    }

    /// Label and note shown on plan and pricing pages.
    pub fn display(&self) -> PlanDisplay {
        match self {
            PlanTier::Small => PlanDisplay {
                label: "Small",
                note: Some("Up to 10 members"),
            },
            PlanTier::Medium => PlanDisplay {
                label: "Medium",
                note: Some("Up to 25 members"),
            },
            PlanTier::Enterprise => PlanDisplay {
                label: "Enterprise",
                note: Some("Up to 75 members"),
            },
        }
    }
}

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub tier: PlanTier,
    pub seats: u32,
    pub display: PlanDisplay,
}

/// Read-only view over every declared tier.
pub struct PlanCatalog;

impl PlanCatalog {
    /// All tiers with their capacity and display metadata, in catalog order.
    pub fn entries() -> impl Iterator<Item = PlanEntry> {
        PlanTier::ALL.into_iter().map(|tier| PlanEntry {
            tier,
            seats: seats_for_plan(tier),
            display: tier.display(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_tier_has_10_seats() {
        assert_eq!(seats_for_plan(PlanTier::Small), 10);
    }

    #[test]
    fn medium_tier_has_25_seats() {
        assert_eq!(seats_for_plan(PlanTier::Medium), 25);
    }

    #[test]
    fn enterprise_tier_has_75_seats() {
        assert_eq!(seats_for_plan(PlanTier::Enterprise), 75);
    }

    #[test]
    fn seats_method_agrees_with_lookup() {
        for tier in PlanTier::ALL {
            assert_eq!(tier.seats(), seats_for_plan(tier));
        }
    }

    #[test]
    fn display_notes_mention_capacity() {
        for tier in PlanTier::ALL {
            let display = tier.display();
            assert_eq!(display.label, tier.as_str());
            let note = display.note.unwrap();
            assert!(note.contains(&tier.seats().to_string()));
        }
    }

    #[test]
    fn catalog_lists_every_tier_in_order() {
        let tiers: Vec<PlanTier> = PlanCatalog::entries().map(|e| e.tier).collect();
        assert_eq!(tiers, PlanTier::ALL.to_vec());
    }

    #[test]
    fn catalog_entry_serializes_display() {
        let entry = PlanCatalog::entries().next().unwrap();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["tier"], "Small");
        assert_eq!(json["seats"], 10);
        assert_eq!(json["display"]["note"], "Up to 10 members");
    }
}
