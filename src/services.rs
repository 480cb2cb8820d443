mod inventory;

pub use inventory::{InventoryService, InventoryView, Snapshot};
