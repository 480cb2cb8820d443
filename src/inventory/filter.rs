use crate::models::inventory::ItemGroup;
use crate::models::types::{LocationFilter, QualityFilter};

/// Location tags the dashboards offer, in normalized form.
///
/// A label that mentions a longer tag belongs to that tag: "Reagent Bank" is not "Bank".
const KNOWN_LOCATION_TAGS: &[&str] = &["bag", "bank", "reagent bank"];

/// The three filter inputs of an inventory view. All default to "show everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    pub location: LocationFilter,
    pub quality: QualityFilter,
    pub search: String,
}

impl InventoryFilter {
    pub fn new(location: LocationFilter, quality: QualityFilter, search: impl Into<String>) -> Self {
        Self {
            location,
            quality,
            search: search.into(),
        }
    }

    pub fn matches(&self, group: &ItemGroup) -> bool {
        matches_search(group, &self.search)
            && matches_quality(group, &self.quality)
            && matches_location(group, &self.location)
    }

    /// Keeps the groups that pass every predicate, in their original order
    pub fn apply<'a>(&self, groups: &'a [ItemGroup]) -> Vec<&'a ItemGroup> {
        let out: Vec<&ItemGroup> = groups.iter().filter(|g| self.matches(g)).collect();
        tracing::debug!(total = groups.len(), kept = out.len(), filter = ?self, "filtered inventory");
        out
    }
}

/// Search, quality and location filtering over already grouped items.
pub fn filter_groups<'a>(
    groups: &'a [ItemGroup],
    location: &LocationFilter,
    quality: &QualityFilter,
    search: &str,
) -> Vec<&'a ItemGroup> {
    groups
        .iter()
        .filter(|g| matches_search(g, search) && matches_quality(g, quality) && matches_location(g, location))
        .collect()
}

fn matches_search(group: &ItemGroup, search: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    group.display_name.to_lowercase().contains(&search.to_lowercase())
}

fn matches_quality(group: &ItemGroup, quality: &QualityFilter) -> bool {
    match quality {
        QualityFilter::All => true,
        QualityFilter::Only(q) => group.quality == *q,
    }
}

/// A group passes when it is present in the location at all, even if it also sits elsewhere.
fn matches_location(group: &ItemGroup, location: &LocationFilter) -> bool {
    match location {
        LocationFilter::All => true,
        LocationFilter::Tag(tag) => group.locations.iter().any(|label| label_has_tag(label, tag)),
    }
}

fn label_has_tag(label: &str, tag: &str) -> bool {
    let label = label.to_lowercase();
    if !label.contains(tag) {
        return false;
    }
    if !KNOWN_LOCATION_TAGS.contains(&tag) {
        return true;
    }

    // "reagent bank" contains "bank"; such labels are claimed by the more specific tag
    !KNOWN_LOCATION_TAGS
        .iter()
        .any(|known| *known != tag && known.contains(tag) && label.contains(known))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::fixtures::{stack, with_quality};
    use crate::inventory::group_items;
    use crate::models::types::Quality;

    fn groups() -> Vec<ItemGroup> {
        group_items(&[
            stack(Some(1), "Iron Ore", 10, 50, "Bag"),
            stack(Some(1), "Iron Ore", 5, 50, "Reagent Bank"),
            with_quality(stack(Some(2), "Bloodstone", 1, 9000, "Bank"), Quality::Epic),
            with_quality(stack(Some(3), "Storm Silver Ore", 40, 20, "Warband Reagent Bank"), Quality::Uncommon),
            stack(None, "Hearthstone", 1, 0, "Bag"),
            stack(Some(4), "Linen Cloth", 200, 1, "Bank Tab 2"),
        ])
    }

    fn names(groups: &[&ItemGroup]) -> Vec<String> {
        groups.iter().map(|g| g.display_name.clone()).collect()
    }

    #[test]
    fn all_sentinels_return_everything_unchanged() {
        let groups = groups();
        let out = filter_groups(&groups, &LocationFilter::parse("ALL"), &QualityFilter::All, "");
        let expected: Vec<&ItemGroup> = groups.iter().collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let groups = groups();
        let out = filter_groups(&groups, &LocationFilter::All, &QualityFilter::All, "ORE");
        assert_eq!(names(&out), vec!["Storm Silver Ore", "Iron Ore"]);
    }

    #[test]
    fn whitespace_search_passes_everything() {
        let groups = groups();
        let out = filter_groups(&groups, &LocationFilter::All, &QualityFilter::All, "   ");
        assert_eq!(out.len(), groups.len());
    }

    #[test]
    fn quality_excludes_even_when_name_matches() {
        let groups = groups();
        let out = filter_groups(&groups, &LocationFilter::All, &QualityFilter::Only(Quality::Epic), "ore");
        assert!(out.is_empty());
    }

    #[test]
    fn quality_exact_match() {
        let groups = groups();
        let out = filter_groups(&groups, &LocationFilter::All, &QualityFilter::Only(Quality::Epic), "");
        assert_eq!(names(&out), vec!["Bloodstone"]);
    }

    #[test]
    fn location_group_split_across_places_shows_for_each() {
        let groups = groups();
        let bag = filter_groups(&groups, &LocationFilter::parse("BAG"), &QualityFilter::All, "iron");
        let reagent = filter_groups(&groups, &LocationFilter::parse("REAGENT_BANK"), &QualityFilter::All, "iron");
        assert_eq!(names(&bag), vec!["Iron Ore"]);
        assert_eq!(names(&reagent), vec!["Iron Ore"]);
    }

    #[test]
    fn bank_does_not_match_reagent_bank() {
        let groups = group_items(&[
            stack(Some(1), "Iron Ore", 10, 50, "Bag"),
            stack(Some(1), "Iron Ore", 5, 50, "Reagent Bank"),
        ]);
        let out = filter_groups(&groups, &LocationFilter::parse("BANK"), &QualityFilter::All, "");
        assert!(out.is_empty());
    }

    #[test]
    fn bank_matches_labels_containing_bank() {
        let groups = groups();
        let out = filter_groups(&groups, &LocationFilter::parse("BANK"), &QualityFilter::All, "");
        assert_eq!(names(&out), vec!["Bloodstone", "Linen Cloth"]);
    }

    #[test]
    fn reagent_bank_matches_containing_labels() {
        let groups = groups();
        let out = filter_groups(&groups, &LocationFilter::parse("REAGENT_BANK"), &QualityFilter::All, "");
        assert_eq!(names(&out), vec!["Storm Silver Ore", "Iron Ore"]);
    }

    #[test]
    fn custom_location_token_uses_plain_containment() {
        let groups = groups();
        let out = filter_groups(&groups, &LocationFilter::parse("WARBAND"), &QualityFilter::All, "");
        assert_eq!(names(&out), vec!["Storm Silver Ore"]);
    }

    #[test]
    fn partial_tokens_use_plain_containment() {
        let groups = group_items(&[
            stack(Some(1), "Ore", 10, 40, "Bag"),
            stack(Some(3), "Dreamfoil", 4, 125, "Reagent Bank"),
            stack(Some(5), "Runecloth", 2, 10, "Bank"),
        ]);

        let reagent = filter_groups(&groups, &LocationFilter::parse("REAGENT"), &QualityFilter::All, "");
        assert_eq!(names(&reagent), vec!["Dreamfoil"]);

        let ba = filter_groups(&groups, &LocationFilter::parse("BA"), &QualityFilter::All, "");
        assert_eq!(names(&ba), vec!["Dreamfoil", "Ore", "Runecloth"]);

        let ban = filter_groups(&groups, &LocationFilter::parse("BAN"), &QualityFilter::All, "");
        assert_eq!(names(&ban), vec!["Dreamfoil", "Runecloth"]);

        // Known tags still keep to their own labels
        let bank = filter_groups(&groups, &LocationFilter::parse("BANK"), &QualityFilter::All, "");
        assert_eq!(names(&bank), vec!["Runecloth"]);
    }

    #[test]
    fn output_is_a_subsequence_of_input() {
        let groups = groups();
        let filters = [
            InventoryFilter::new(LocationFilter::parse("BAG"), QualityFilter::All, ""),
            InventoryFilter::new(LocationFilter::All, QualityFilter::Only(Quality::Common), "o"),
            InventoryFilter::new(LocationFilter::parse("BANK"), QualityFilter::All, "e"),
        ];

        for filter in filters {
            let out = filter.apply(&groups);
            let mut cursor = 0;
            for kept in out {
                let pos = groups[cursor..]
                    .iter()
                    .position(|g| std::ptr::eq(g, kept))
                    .expect("kept group must come later in the input");
                cursor += pos + 1;
            }
        }
    }

    #[test]
    fn struct_and_free_function_agree() {
        let groups = groups();
        let filter = InventoryFilter::new(LocationFilter::parse("BAG"), QualityFilter::All, "stone");
        assert_eq!(
            filter.apply(&groups),
            filter_groups(&groups, &filter.location, &filter.quality, &filter.search)
        );
        assert_eq!(names(&filter.apply(&groups)), vec!["Hearthstone"]);
    }
}
