use crate::models::inventory::{ItemGroup, ItemInstance};
use crate::models::types::Identity;
use std::collections::HashMap;

/// Folds raw stacks into one group per identity, most valuable first.
///
/// Groups keep first-encounter order among equal values (the sort is stable), so the output is
/// fully determined by the input order.
pub fn group_items(instances: &[ItemInstance]) -> Vec<ItemGroup> {
    let mut index: HashMap<&Identity, usize> = HashMap::new();
    let mut groups: Vec<ItemGroup> = Vec::new();

    for instance in instances {
        let slot = *index.entry(&instance.identity).or_insert_with(|| {
            groups.push(ItemGroup::seed(instance));
            groups.len() - 1
        });
        groups[slot].absorb(instance);
    }

    groups.sort_by(|a, b| b.total_value.cmp(&a.total_value));

    tracing::debug!(instances = instances.len(), groups = groups.len(), "grouped inventory");
    groups
}
