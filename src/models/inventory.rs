use crate::models::types::{Identity, Quality};
use serde::Serialize;

/// One observed stack of an item: a single character, a single storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemInstance {
    /// Catalog id when known, display name otherwise
    pub identity: Identity,

    /// Human readable name (e.g., "Draconium Ore")
    pub display_name: String,

    /// Units in this stack
    pub quantity: u64,

    pub quality: Quality,

    /// Price per unit, in copper
    pub unit_price: u64,

    /// Storage label (e.g., "Bag", "Bank", "Reagent Bank")
    pub location: String,

    /// Free-form category (e.g., "Tradeskill"), passed through as-is
    pub kind: String,

    /// Owning character, when the source knows it
    pub character: Option<String>,
}

impl ItemInstance {
    /// Copper value of the whole stack
    pub fn stack_value(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity)
    }

    /// Check if this stack belongs to the given character
    pub fn is_owned_by(&self, character: &str) -> bool {
        self.character.as_deref() == Some(character)
    }
}

/// All stacks sharing one identity, folded together.
///
/// Descriptive fields come from the first stack seen. Groups are rebuilt on every refresh and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemGroup {
    pub identity: Identity,
    pub display_name: String,
    pub quality: Quality,
    pub kind: String,

    pub total_quantity: u64,

    /// Sum of `unit_price * quantity` over every merged stack, in copper
    pub total_value: u64,

    /// Number of stacks merged into this group
    pub stacks: usize,

    /// Distinct locations, in the order they were first seen
    pub locations: Vec<String>,
}

impl ItemGroup {
    /// Starts an empty group described by `first`. Accumulators are filled by `absorb`.
    pub(crate) fn seed(first: &ItemInstance) -> Self {
        Self {
            identity: first.identity.clone(),
            display_name: first.display_name.clone(),
            quality: first.quality,
            kind: first.kind.clone(),
            total_quantity: 0,
            total_value: 0,
            stacks: 0,
            locations: Vec::new(),
        }
    }

    pub(crate) fn absorb(&mut self, instance: &ItemInstance) {
        self.total_quantity = self.total_quantity.saturating_add(instance.quantity);
        self.total_value = self.total_value.saturating_add(instance.stack_value());
        self.stacks += 1;
        if !self.is_at(&instance.location) {
            self.locations.push(instance.location.clone());
        }
    }

    /// Exact, case-sensitive location membership
    pub fn is_at(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }
}
