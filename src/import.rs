use crate::error::AppResult;
use crate::models::inventory::ItemInstance;
use crate::models::types::{Identity, Quality, UNKNOWN_LOCATION};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Item record as the companion app ships it
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Per unit, in copper
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub character: Option<String>,
}

impl RawItem {
    pub fn normalize(self) -> ItemInstance {
        if let Some(q) = self.quality.as_deref().filter(|q| Quality::parse(q).is_none()) {
            tracing::warn!(item = %self.name, quality = q, "unknown quality, treating as Common");
        }

        ItemInstance {
            identity: Identity::resolve(self.id, &self.name),
            quality: Quality::normalize(self.quality.as_deref()),
            unit_price: self.price.unwrap_or(0),
            location: self
                .location
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            kind: self.kind.unwrap_or_default(),
            quantity: self.quantity,
            character: self.character,
            display_name: self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Wrapped {
        #[serde(default)]
        items: Vec<RawItem>,
    },
    Bare(Vec<RawItem>),
}

/// Parses either `{"items": [...]}` or a bare array of item records
pub fn parse_snapshot(json: &str) -> AppResult<Vec<ItemInstance>> {
    let raw = match serde_json::from_str::<Snapshot>(json) {
        Ok(Snapshot::Wrapped { items }) | Ok(Snapshot::Bare(items)) => items,
        // Untagged errors are vague; reparse as the wrapped shape for a useful message
        Err(_) => serde_json::from_str::<WrappedStrict>(json)?.items,
    };
    Ok(raw.into_iter().map(RawItem::normalize).collect())
}

#[derive(Debug, Deserialize)]
struct WrappedStrict {
    #[serde(default)]
    items: Vec<RawItem>,
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> AppResult<Vec<ItemInstance>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)?;
    let items = parse_snapshot(&data)?;
    tracing::info!(path = %path.display(), items = items.len(), "loaded inventory snapshot");
    Ok(items)
}

// DataStore_Containers export: global.Characters[guid].Containers[bag].ids[slot] / counts[slot]

#[derive(Debug, Default, Deserialize)]
struct DataStoreExport {
    #[serde(default)]
    global: DataStoreGlobal,
}

#[derive(Debug, Default, Deserialize)]
struct DataStoreGlobal {
    #[serde(default, rename = "Characters")]
    characters: BTreeMap<String, DataStoreCharacter>,
}

#[derive(Debug, Default, Deserialize)]
struct DataStoreCharacter {
    #[serde(default, rename = "Containers")]
    containers: BTreeMap<String, DataStoreContainer>,
}

#[derive(Debug, Default, Deserialize)]
struct DataStoreContainer {
    #[serde(default)]
    ids: Vec<Option<u64>>,
    #[serde(default)]
    counts: Vec<Option<u64>>,
}

/// Parses a DataStore_Containers export into stacks.
///
/// The character key becomes the owner and the container name the location. Empty slots
/// (missing or zero id) are skipped; a slot without a count holds one item. The export carries
/// no names or prices, so stacks are named after their id and valued at 0. Characters and
/// containers come out sorted by key.
pub fn parse_containers(json: &str) -> AppResult<Vec<ItemInstance>> {
    let export: DataStoreExport = serde_json::from_str(json)?;
    let mut items = Vec::new();

    for (character, data) in &export.global.characters {
        for (container, bag) in &data.containers {
            for (slot, id) in bag.ids.iter().enumerate() {
                let Some(id) = id.filter(|id| *id != 0) else {
                    continue;
                };
                let count = bag.counts.get(slot).copied().flatten().filter(|c| *c != 0).unwrap_or(1);

                items.push(ItemInstance {
                    identity: Identity::ById(id),
                    display_name: format!("Item #{id}"),
                    quantity: count,
                    quality: Quality::Common,
                    unit_price: 0,
                    location: container.clone(),
                    kind: String::new(),
                    character: Some(character.clone()),
                });
            }
        }
    }

    tracing::debug!(
        characters = export.global.characters.len(),
        stacks = items.len(),
        "parsed container export"
    );
    Ok(items)
}

/// Where raw inventory snapshots come from
pub trait InventorySource: Send + Sync {
    fn load(&self) -> AppResult<Vec<ItemInstance>>;
}

/// JSON snapshot on disk, re-read on every load
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventorySource for FileSource {
    fn load(&self) -> AppResult<Vec<ItemInstance>> {
        load_snapshot(&self.path)
    }
}

/// DataStore_Containers JSON export on disk
#[derive(Debug, Clone)]
pub struct DataStoreSource {
    pub path: PathBuf,
}

impl DataStoreSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventorySource for DataStoreSource {
    fn load(&self) -> AppResult<Vec<ItemInstance>> {
        let data = std::fs::read_to_string(&self.path)?;
        let items = parse_containers(&data)?;
        tracing::info!(path = %self.path.display(), items = items.len(), "loaded container export");
        Ok(items)
    }
}

/// Records that were already fetched and parsed by the caller
#[derive(Debug, Default)]
pub struct MemorySource {
    items: RwLock<Vec<ItemInstance>>,
}

impl MemorySource {
    pub fn new(items: Vec<ItemInstance>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Replaces the records handed out by the next load
    pub fn replace(&self, items: Vec<ItemInstance>) {
        *self.items.write() = items;
    }
}

impl InventorySource for MemorySource {
    fn load(&self) -> AppResult<Vec<ItemInstance>> {
        Ok(self.items.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;

    #[test]
    fn parses_wrapped_items() {
        let json = r#"{"items": [
            {"id": 2589, "name": "Linen Cloth", "quantity": 20, "quality": "Common", "type": "Cloth",
             "location": "Bag", "price": 13, "icon": "inv_fabric_linen_01", "character": "Main"}
        ]}"#;
        let items = parse_snapshot(json).unwrap();

        assert_eq!(items.len(), 1);
        let i = &items[0];
        assert_eq!(i.identity, Identity::ById(2589));
        assert_eq!(i.display_name, "Linen Cloth");
        assert_eq!(i.quantity, 20);
        assert_eq!(i.kind, "Cloth");
        assert_eq!(i.unit_price, 13);
        assert_eq!(i.location, "Bag");
        assert_eq!(i.character.as_deref(), Some("Main"));
    }

    #[test]
    fn parses_bare_array() {
        let items = parse_snapshot(r#"[{"name": "Hearthstone", "quantity": 1}]"#).unwrap();
        assert_eq!(items[0].identity, Identity::ByName("Hearthstone".into()));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let items = parse_snapshot(r#"{"items": [{"name": "Rock", "quantity": 3, "quality": "Poor"}]}"#).unwrap();
        let i = &items[0];
        assert_eq!(i.quality, Quality::Common);
        assert_eq!(i.unit_price, 0);
        assert_eq!(i.location, UNKNOWN_LOCATION);
        assert_eq!(i.kind, "");
        assert_eq!(i.character, None);
    }

    #[test]
    fn null_and_empty_location_are_unknown() {
        let items = parse_snapshot(
            r#"[{"name": "A", "quantity": 1, "location": null}, {"name": "B", "quantity": 1, "location": ""}]"#,
        )
        .unwrap();
        assert_eq!(items[0].location, UNKNOWN_LOCATION);
        assert_eq!(items[1].location, UNKNOWN_LOCATION);
    }

    #[test]
    fn missing_items_field_is_empty() {
        assert!(parse_snapshot(r#"{"status": "ok"}"#).unwrap().is_empty());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = parse_snapshot(r#"{"items": [{"name": "Bad", "quantity": -1}]}"#).unwrap_err();
        assert!(matches!(err, InventoryError::Json(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(parse_snapshot("not json"), Err(InventoryError::Json(_))));
    }

    #[test]
    fn containers_skip_empty_slots_and_default_counts() {
        let json = r#"{"global": {"Characters": {
            "Default.Realm.Main": {"Containers": {
                "Bag0": {"ids": [2589, null, 0, 2770, 6948], "counts": [20, null, 5, null, 0]}
            }},
            "Default.Realm.Alt": {"Containers": {
                "Bank": {"ids": [2589], "counts": []},
                "Bag1": {"ids": []}
            }}
        }}}"#;
        let items = parse_containers(json).unwrap();

        let seen: Vec<(&str, &str, u64, u64)> = items
            .iter()
            .map(|i| {
                let id = match i.identity {
                    Identity::ById(id) => id,
                    Identity::ByName(_) => 0,
                };
                (i.character.as_deref().unwrap(), i.location.as_str(), id, i.quantity)
            })
            .collect();
        assert_eq!(
            seen,
            vec![
                ("Default.Realm.Alt", "Bank", 2589, 1),
                ("Default.Realm.Main", "Bag0", 2589, 20),
                ("Default.Realm.Main", "Bag0", 2770, 1),
                ("Default.Realm.Main", "Bag0", 6948, 1),
            ]
        );
        assert_eq!(items[0].display_name, "Item #2589");
        assert_eq!(items[0].unit_price, 0);
    }

    #[test]
    fn containers_group_across_characters() {
        let json = r#"{"global": {"Characters": {
            "Main": {"Containers": {"Bag0": {"ids": [101], "counts": [5]}}},
            "Alt1": {"Containers": {"Bank": {"ids": [101, 102], "counts": [10, 20]}}}
        }}}"#;
        let groups = crate::inventory::group_items(&parse_containers(json).unwrap());
        let flask = groups.iter().find(|g| g.identity == Identity::ById(101)).unwrap();
        assert_eq!(flask.total_quantity, 15);
        assert_eq!(flask.stacks, 2);
    }

    #[test]
    fn containers_without_characters_are_empty() {
        assert!(parse_containers("{}").unwrap().is_empty());
        assert!(parse_containers(r#"{"global": {}}"#).unwrap().is_empty());
        assert!(matches!(parse_containers("[1, 2]"), Err(InventoryError::Json(_))));
    }
}
