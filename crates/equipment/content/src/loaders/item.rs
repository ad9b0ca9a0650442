//! Item list loader.
//!
//! Items come from the game backend as JSON. The list is loaded tolerantly:
//! an entry that does not deserialize is logged and skipped so one bad item
//! never hides the rest of the inventory.

use std::path::Path;

use equipment_core::Item;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Accepted top-level shapes: a bare array or `{ "items": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemListJson {
    Bare(Vec<serde_json::Value>),
    Wrapped { items: Vec<serde_json::Value> },
}

/// Loader for item lists from JSON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load items from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file containing the item list
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse items from JSON text.
    ///
    /// Fails only when the document itself is not an item list.
    pub fn parse(content: &str) -> LoadResult<Vec<Item>> {
        let list: ItemListJson = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item list JSON: {}", e))?;
        let entries = match list {
            ItemListJson::Bare(entries) | ItemListJson::Wrapped { items: entries } => entries,
        };

        let total = entries.len();
        let items: Vec<Item> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Item>(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed item");
                    None
                }
            })
            .collect();

        tracing::debug!(loaded = items.len(), skipped = total - items.len(), "loaded items");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equipment_core::{
        ArmorSubtype, AttributeSnapshot, EffectError, ItemType, RequirementError, Requirements,
        check_requirements,
    };

    #[test]
    fn parses_both_requirement_shapes() {
        let items = ItemLoader::parse(
            r#"[
                {"id": "a", "name": "Sage Staff", "type": "weapon",
                 "requirements": [{"attribute": "intelligence", "minValue": 10}]},
                {"id": "b", "name": "Iron Helm", "type": "armor", "armorSubtype": "head",
                 "requirements": {"strength": 12}}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert!(matches!(items[0].requirements, Requirements::List(_)));
        assert!(matches!(items[1].requirements, Requirements::Map(_)));
        assert_eq!(items[1].armor_subtype, Some(ArmorSubtype::Head));
    }

    #[test]
    fn unknown_type_and_string_values_are_accepted() {
        let items = ItemLoader::parse(
            r#"{"items": [
                {"id": "c", "name": "Jade Ring", "type": "trinket",
                 "effects": [{"effectClass": "statBoost", "target": "luck", "value": "\"3\""}]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(items[0].item_type, ItemType::Unknown);
        assert_eq!(items[0].effects[0].value.as_ref().unwrap().coerce(), Ok(3.0));
    }

    #[test]
    fn odd_effect_value_keeps_the_item() {
        let items = ItemLoader::parse(
            r#"[
                {"id": "d", "name": "Wind Boots", "type": "armor", "effects": [
                    {"effectClass": "statBoost", "target": "strength", "value": 5},
                    {"effectClass": "statBoost", "target": "agility", "value": true},
                    {"effectClass": "statBoost", "target": "vitality", "value": [1, 2]}
                ]}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        let values: Vec<_> = items[0]
            .effects
            .iter()
            .map(|effect| effect.value.as_ref().unwrap().coerce())
            .collect();
        assert_eq!(values[0], Ok(5.0));
        assert_eq!(
            values[1],
            Err(EffectError::UnparseableValue {
                raw: "true".to_string()
            })
        );
        assert!(values[2].is_err());
    }

    #[test]
    fn quoted_minimums_load_in_both_shapes() {
        let items = ItemLoader::parse(
            r#"[
                {"id": "e", "name": "Sage Staff", "type": "weapon",
                 "requirements": [{"attribute": "intelligence", "minValue": "10"}]},
                {"id": "f", "name": "Iron Helm", "type": "armor",
                 "requirements": {"strength": "12", "agility": false}}
            ]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);

        let snapshot = AttributeSnapshot::new()
            .with_attribute("intelligence", 9.0)
            .with_attribute("strength", 12.0);

        let staff = check_requirements(&items[0], &snapshot);
        assert_eq!(staff.failed[0].required, 10.0);

        let helm = check_requirements(&items[1], &snapshot);
        assert!(helm.can_equip);
        assert_eq!(helm.skipped.len(), 1);
        assert!(matches!(
            helm.skipped[0].error,
            RequirementError::InvalidMinimum { .. }
        ));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let items = ItemLoader::parse(
            r#"[
                {"id": "ok", "name": "Sword", "type": "weapon"},
                {"id": 42, "name": ["not", "a", "name"]},
                "garbage"
            ]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "ok");
    }

    #[test]
    fn non_list_document_is_an_error() {
        assert!(ItemLoader::parse(r#"{"weapons": []}"#).is_err());
        assert!(ItemLoader::parse("not json").is_err());
    }
}
