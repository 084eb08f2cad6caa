//! ListPlansHandler - Query handler for the plan catalog.

use crate::domain::vault::{PlanCatalog, PlanEntry};

#[derive(Debug, Clone, Default)]
pub struct ListPlansQuery;

#[derive(Debug, Clone)]
pub struct ListPlansResult {
    pub plans: Vec<PlanEntry>,
}

/// Lists every tier with its capacity. Public; no caller identity needed.
#[derive(Debug, Clone, Default)]
pub struct ListPlansHandler;

impl ListPlansHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, _query: ListPlansQuery) -> ListPlansResult {
        ListPlansResult {
            plans: PlanCatalog::entries().collect(),
        }
    }
}
