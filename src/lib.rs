pub mod config;
pub mod error;
pub mod import;
pub mod inventory;
pub mod models;
pub mod render;
pub mod services;

// Convenient re-exports (so call sites can do `deeppockets::group_items`, etc.)
pub use error::{AppResult, InventoryError};
pub use inventory::{InventoryFilter, filter_groups, format_currency, group_items, total_value};
pub use models::inventory::{ItemGroup, ItemInstance};
pub use models::types::{Identity, LocationFilter, Quality, QualityFilter};
pub use services::InventoryService;
