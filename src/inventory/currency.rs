use crate::models::inventory::ItemGroup;
use std::borrow::Borrow;

pub const COPPER_PER_SILVER: u64 = 100;
pub const COPPER_PER_GOLD: u64 = 10_000;

/// Copper amount split into denominations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coins {
    pub gold: u64,
    pub silver: u64,
    pub copper: u64,
}

impl Coins {
    pub fn from_copper(copper: u64) -> Self {
        Self {
            gold: copper / COPPER_PER_GOLD,
            silver: (copper % COPPER_PER_GOLD) / COPPER_PER_SILVER,
            copper: copper % COPPER_PER_SILVER,
        }
    }
}

/// Sum of group values. Works over owned groups as well as filtered references.
pub fn total_value<I, G>(groups: I) -> u64
where
    I: IntoIterator<Item = G>,
    G: Borrow<ItemGroup>,
{
    groups
        .into_iter()
        .fold(0u64, |sum, g| sum.saturating_add(g.borrow().total_value))
}

/// Renders copper as `"12g 34s"`.
///
/// Copper below one silver is not shown. An amount that is only copper therefore renders as an
/// empty string, while exactly zero renders as `"0g"`.
pub fn format_currency(copper: u64) -> String {
    if copper == 0 {
        return "0g".to_string();
    }

    let coins = Coins::from_copper(copper);
    let mut parts = Vec::with_capacity(2);
    if coins.gold > 0 {
        parts.push(format!("{}g", coins.gold));
    }
    if coins.silver > 0 {
        parts.push(format!("{}s", coins.silver));
    }
    parts.join(" ")
}
