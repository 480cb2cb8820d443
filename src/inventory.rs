//! Pure inventory transforms: stacks in, grouped/filtered/valued views out.
//!
//! Nothing in here does I/O or keeps state. Grouping is the expensive step and is meant to run
//! once per snapshot; filtering and totals run per query over the grouped result.

pub mod currency;
pub mod filter;
pub mod group;
pub mod stash;

pub use currency::{Coins, format_currency, total_value};
pub use filter::{InventoryFilter, filter_groups};
pub use group::group_items;
pub use stash::{Candidate, StashEntry, find_item, incinerator_candidates, remote_stash};
