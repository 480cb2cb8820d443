use crate::models::inventory::ItemInstance;
use crate::models::types::Identity;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// An item that only alts are holding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StashEntry {
    pub identity: Identity,
    pub display_name: String,
    /// Units held across all other characters
    pub count: u64,
    /// Where the first such stack was seen
    pub character: Option<String>,
    pub location: String,
}

/// A stack together with its copper value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub instance: ItemInstance,
    pub stack_value: u64,
}

impl From<&ItemInstance> for Candidate {
    fn from(instance: &ItemInstance) -> Self {
        Self {
            stack_value: instance.stack_value(),
            instance: instance.clone(),
        }
    }
}

/// Items not present on `main_character` at all, summed over the other characters.
///
/// Stacks with no known owner count as someone else's. The first non-main stack of an item
/// names the character and location shown, even when that stack is empty. Items whose other
/// stacks add up to nothing are left out. Entries come out in first-encounter order.
pub fn remote_stash(instances: &[ItemInstance], main_character: &str) -> Vec<StashEntry> {
    let on_main: HashSet<&Identity> = instances
        .iter()
        .filter(|i| i.is_owned_by(main_character))
        .map(|i| &i.identity)
        .collect();

    let mut index: HashMap<&Identity, usize> = HashMap::new();
    let mut entries: Vec<StashEntry> = Vec::new();

    for instance in instances {
        if on_main.contains(&instance.identity) {
            continue;
        }
        let slot = *index.entry(&instance.identity).or_insert_with(|| {
            entries.push(StashEntry {
                identity: instance.identity.clone(),
                display_name: instance.display_name.clone(),
                count: 0,
                character: instance.character.clone(),
                location: instance.location.clone(),
            });
            entries.len() - 1
        });
        entries[slot].count = entries[slot].count.saturating_add(instance.quantity);
    }

    entries.retain(|e| e.count > 0);
    entries
}

/// Every stack with its copper value, cheapest first
pub fn incinerator_candidates(instances: &[ItemInstance]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = instances.iter().map(Candidate::from).collect();
    candidates.sort_by_key(|c| c.stack_value);
    candidates
}

/// All stacks of one item, in input order
pub fn find_item<'a>(instances: &'a [ItemInstance], identity: &Identity) -> Vec<&'a ItemInstance> {
    instances.iter().filter(|i| &i.identity == identity).collect()
}
