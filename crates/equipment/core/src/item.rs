//! Equippable items and slot-category resolution.

use core::fmt;

use crate::bonus::EffectDescriptor;
use crate::requirements::{RequirementDescriptor, Requirements};

/// Declared item type. Anything unrecognised becomes [`ItemType::Unknown`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ItemType {
    Weapon,
    Armor,
    Accessory,
    Artifact,
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// Armor piece placement.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ArmorSubtype {
    Head,
    Body,
    Legs,
    Hands,
}

/// Resolved slot category of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ItemCategory {
    Weapon,
    Armor(ArmorSubtype),
    Accessory,
    Artifact,
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCategory::Weapon => f.write_str("weapon"),
            ItemCategory::Armor(subtype) => write!(f, "{subtype} armor"),
            ItemCategory::Accessory => f.write_str("accessory"),
            ItemCategory::Artifact => f.write_str("artifact"),
        }
    }
}

/// An equippable item.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Item {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub item_type: ItemType,
    pub armor_subtype: Option<ArmorSubtype>,
    pub set_id: Option<String>,
    pub equipped: bool,
    pub effects: Vec<EffectDescriptor>,
    pub requirements: Requirements,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            item_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_armor_subtype(mut self, subtype: ArmorSubtype) -> Self {
        self.armor_subtype = Some(subtype);
        self
    }

    #[must_use]
    pub fn with_set(mut self, set_id: impl Into<String>) -> Self {
        self.set_id = Some(set_id.into());
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectDescriptor) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, attribute: &str, min_value: f64) -> Self {
        let mut list = self.requirements.normalized();
        list.push(RequirementDescriptor::new(attribute, min_value));
        self.requirements = Requirements::List(list);
        self
    }

    /// Resolves the slot category.
    ///
    /// Armor without a subtype tag is placed by naming keywords (body if none
    /// match). Unknown types are inferred from the name; `None` means the
    /// item cannot be placed anywhere.
    pub fn category(&self) -> Option<ItemCategory> {
        let item_type = match self.item_type {
            ItemType::Unknown => infer_item_type(&self.name)?,
            known => known,
        };

        Some(match item_type {
            ItemType::Weapon => ItemCategory::Weapon,
            ItemType::Accessory => ItemCategory::Accessory,
            ItemType::Artifact => ItemCategory::Artifact,
            ItemType::Armor | ItemType::Unknown => ItemCategory::Armor(
                self.armor_subtype
                    .unwrap_or_else(|| infer_armor_subtype(&self.name)),
            ),
        })
    }
}

const HEAD_KEYWORDS: &[&str] = &[
    "helm", "helmet", "hat", "crown", "hood", "circlet", "headband", "mask", "diadem",
];
const BODY_KEYWORDS: &[&str] = &[
    "robe", "chest", "chestplate", "breastplate", "vest", "cuirass", "tunic", "garb", "chainmail",
    "hauberk", "jerkin", "coat",
];
const HAND_KEYWORDS: &[&str] = &[
    "glove", "gauntlet", "bracer", "hand", "handwrap", "wrap", "mitt", "mitten",
];
const LEG_KEYWORDS: &[&str] = &[
    "boot", "greave", "leg", "legging", "pants", "trouser", "shoe", "sandal", "skirt",
];

const ACCESSORY_KEYWORDS: &[&str] = &[
    "ring", "amulet", "necklace", "pendant", "bracelet", "earring", "talisman", "charm", "belt",
];
const ARTIFACT_KEYWORDS: &[&str] = &[
    "artifact", "orb", "mirror", "cauldron", "seal", "bell", "pagoda", "token", "relic", "banner",
    "gourd",
];
const WEAPON_KEYWORDS: &[&str] = &[
    "sword", "blade", "saber", "sabre", "spear", "staff", "bow", "dagger", "axe", "fan", "whip",
    "hammer", "glaive", "halberd", "mace", "katana",
];

/// True when a whole word of `name` is a keyword or its plural.
fn name_matches(name: &str, keywords: &[&str]) -> bool {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .any(|word| {
            keywords.iter().any(|keyword| {
                let plural = word
                    .strip_prefix(keyword)
                    .is_some_and(|rest| rest == "s" || rest == "es");
                word == *keyword || plural
            })
        })
}

/// Infers an armor subtype from naming keywords, checking head, body, hands
/// and legs in that order. Falls back to body.
pub fn infer_armor_subtype(name: &str) -> ArmorSubtype {
    [
        (HEAD_KEYWORDS, ArmorSubtype::Head),
        (BODY_KEYWORDS, ArmorSubtype::Body),
        (HAND_KEYWORDS, ArmorSubtype::Hands),
        (LEG_KEYWORDS, ArmorSubtype::Legs),
    ]
    .into_iter()
    .find(|(keywords, _)| name_matches(name, keywords))
    .map_or(ArmorSubtype::Body, |(_, subtype)| subtype)
}

/// Infers an item type from its name. Returns `None` when no keyword matches.
pub fn infer_item_type(name: &str) -> Option<ItemType> {
    let armor_keywords = [HEAD_KEYWORDS, BODY_KEYWORDS, HAND_KEYWORDS, LEG_KEYWORDS];

    if name_matches(name, ACCESSORY_KEYWORDS) {
        Some(ItemType::Accessory)
    } else if name_matches(name, ARTIFACT_KEYWORDS) {
        Some(ItemType::Artifact)
    } else if name_matches(name, WEAPON_KEYWORDS) {
        Some(ItemType::Weapon)
    } else if armor_keywords.iter().any(|keywords| name_matches(name, keywords)) {
        Some(ItemType::Armor)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_subtype_from_keywords() {
        assert_eq!(infer_armor_subtype("Iron Helmet"), ArmorSubtype::Head);
        assert_eq!(infer_armor_subtype("Gauntlets of Dawn"), ArmorSubtype::Hands);
        assert_eq!(infer_armor_subtype("Cloud-Step Boots"), ArmorSubtype::Legs);
        assert_eq!(infer_armor_subtype("Azure Robe"), ArmorSubtype::Body);
        assert_eq!(infer_armor_subtype("Mysterious Thing"), ArmorSubtype::Body);
    }

    #[test]
    fn tagged_subtype_wins_over_keywords() {
        let item = Item::new("x", "Iron Helmet", ItemType::Armor).with_armor_subtype(ArmorSubtype::Legs);
        assert_eq!(item.category(), Some(ItemCategory::Armor(ArmorSubtype::Legs)));
    }

    #[test]
    fn unknown_type_is_inferred_from_name() {
        let ring = Item::new("r", "Jade Ring", ItemType::Unknown);
        assert_eq!(ring.category(), Some(ItemCategory::Accessory));

        let gloves = Item::new("g", "Silk Gloves", ItemType::Unknown);
        assert_eq!(gloves.category(), Some(ItemCategory::Armor(ArmorSubtype::Hands)));

        let sword = Item::new("s", "Frostbite Sword", ItemType::Unknown);
        assert_eq!(sword.category(), Some(ItemCategory::Weapon));

        let mystery = Item::new("m", "Strange Pebble", ItemType::Unknown);
        assert_eq!(mystery.category(), None);
    }

    #[test]
    fn keywords_match_whole_words_and_plurals() {
        assert_eq!(infer_item_type("Bracelet of Wind"), Some(ItemType::Accessory));
        assert_eq!(infer_item_type("Swordsman's Bracers"), Some(ItemType::Armor));
        assert_eq!(infer_item_type("Thornbush"), None);
        assert_eq!(infer_item_type("Hatred"), None);
        assert_eq!(infer_item_type("Wolf Fang"), None);
        assert_eq!(infer_item_type("Dragon Belly"), None);
        assert_eq!(infer_armor_subtype("Iron Greaves"), ArmorSubtype::Legs);
        assert_eq!(infer_armor_subtype("Silk Leggings"), ArmorSubtype::Legs);
    }

    #[test]
    fn name_words_that_start_with_keywords_do_not_pick_a_slot() {
        let robe = Item::new("r", "Legendary Dragon Robe", ItemType::Armor);
        assert_eq!(robe.category(), Some(ItemCategory::Armor(ArmorSubtype::Body)));

        let chest = Item::new("c", "Handsome Chestplate", ItemType::Armor);
        assert_eq!(chest.category(), Some(ItemCategory::Armor(ArmorSubtype::Body)));

        let hatred = Item::new("h", "Mantle of Hatred", ItemType::Armor);
        assert_eq!(hatred.category(), Some(ItemCategory::Armor(ArmorSubtype::Body)));
    }

    #[test]
    fn body_keywords_win_over_hand_and_leg_keywords() {
        assert_eq!(infer_armor_subtype("Tunic of the Open Hand"), ArmorSubtype::Body);
        assert_eq!(infer_armor_subtype("Long-Leg Robe"), ArmorSubtype::Body);
    }

    #[test]
    fn with_requirement_appends_to_list() {
        let item = Item::new("s", "Sword", ItemType::Weapon)
            .with_requirement("strength", 10.0)
            .with_requirement("level", 5.0);
        assert_eq!(item.requirements.normalized().len(), 2);
    }
}
