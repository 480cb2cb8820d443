use crate::error::{AppResult, InventoryError};
use crate::import::InventorySource;
use crate::inventory::{self, Candidate, InventoryFilter, StashEntry};
use crate::models::inventory::{ItemGroup, ItemInstance};
use crate::models::types::Identity;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

/// One loaded inventory: the raw stacks and their grouping, built once.
#[derive(Debug)]
pub struct Snapshot {
    pub instances: Vec<ItemInstance>,
    pub groups: Vec<ItemGroup>,
    pub refreshed_at: DateTime<Utc>,
}

/// Filtered groups plus their totals, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct InventoryView {
    pub groups: Vec<ItemGroup>,
    pub total_value: u64,
    pub total_display: String,
}

pub struct InventoryService {
    source: Arc<dyn InventorySource>,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl InventoryService {
    pub fn new(source: Arc<dyn InventorySource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    // ========================================================================
    // SNAPSHOT
    // ========================================================================

    /// Pulls fresh records from the source and regroups them
    pub fn reload(&self) -> AppResult<Arc<Snapshot>> {
        let instances = self.source.load()?;
        Ok(self.refresh(instances))
    }

    /// Groups `instances` and makes them the current snapshot.
    /// Readers holding the previous snapshot keep it until they drop it.
    pub fn refresh(&self, instances: Vec<ItemInstance>) -> Arc<Snapshot> {
        let groups = inventory::group_items(&instances);
        let snapshot = Arc::new(Snapshot {
            instances,
            groups,
            refreshed_at: Utc::now(),
        });

        tracing::info!(
            stacks = snapshot.instances.len(),
            groups = snapshot.groups.len(),
            value = %inventory::format_currency(inventory::total_value(&snapshot.groups)),
            "inventory refreshed"
        );

        *self.current.write() = Some(snapshot.clone());
        snapshot
    }

    pub fn snapshot(&self) -> AppResult<Arc<Snapshot>> {
        self.current.read().clone().ok_or(InventoryError::NoSnapshot)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Filters the cached groups. Never regroups.
    pub fn query(&self, filter: &InventoryFilter) -> AppResult<InventoryView> {
        let snapshot = self.snapshot()?;
        let groups: Vec<ItemGroup> = filter.apply(&snapshot.groups).into_iter().cloned().collect();
        let total_value = inventory::total_value(&groups);

        Ok(InventoryView {
            groups,
            total_value,
            total_display: inventory::format_currency(total_value),
        })
    }

    /// Items only the alts of `main_character` are holding
    pub fn remote_stash(&self, main_character: &str) -> AppResult<Vec<StashEntry>> {
        if main_character.trim().is_empty() {
            return Err(InventoryError::Validation {
                field: "main_character",
                message: "Main character must not be empty".to_string(),
            });
        }

        let snapshot = self.snapshot()?;
        Ok(inventory::remote_stash(&snapshot.instances, main_character))
    }

    /// Cheapest stacks first, at most `limit` of them
    pub fn incinerator_candidates(&self, limit: usize) -> AppResult<Vec<Candidate>> {
        let snapshot = self.snapshot()?;
        let mut candidates = inventory::incinerator_candidates(&snapshot.instances);
        candidates.truncate(limit);
        Ok(candidates)
    }

    /// Every stack of one item across characters and locations
    pub fn find_item(&self, identity: &Identity) -> AppResult<Vec<ItemInstance>> {
        let snapshot = self.snapshot()?;
        Ok(inventory::find_item(&snapshot.instances, identity)
            .into_iter()
            .cloned()
            .collect())
    }
}
