//! Attribute-name canonicalization.
//!
//! Content data has used several names for the same attribute over time
//! (`intelligence` and `intellect`, `dexterity` and `agility`, ...). All name
//! resolution goes through [`ALIAS_TABLE`], matched case-insensitively and
//! ignoring `_`, `-` and spaces.

use crate::bonus::Attribute;
use crate::bonus::kind::normalize_key;

/// What a requirement or snapshot key refers to once canonicalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalAttribute {
    Attribute(Attribute),
    /// Character level.
    Level,
    /// Cultivation stage, compared by ordinal.
    Stage,
}

impl CanonicalAttribute {
    /// Canonical display name (`"intellect"`, `"level"`, `"stage"`).
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalAttribute::Attribute(attribute) => attribute.into(),
            CanonicalAttribute::Level => "level",
            CanonicalAttribute::Stage => "stage",
        }
    }
}

/// Every accepted spelling, mapped to the attribute it means.
pub const ALIAS_TABLE: &[(&str, CanonicalAttribute)] = &[
    ("strength", CanonicalAttribute::Attribute(Attribute::Strength)),
    ("agility", CanonicalAttribute::Attribute(Attribute::Agility)),
    ("dexterity", CanonicalAttribute::Attribute(Attribute::Agility)),
    ("vitality", CanonicalAttribute::Attribute(Attribute::Vitality)),
    ("health", CanonicalAttribute::Attribute(Attribute::Vitality)),
    ("intellect", CanonicalAttribute::Attribute(Attribute::Intellect)),
    ("intelligence", CanonicalAttribute::Attribute(Attribute::Intellect)),
    ("perception", CanonicalAttribute::Attribute(Attribute::Perception)),
    ("spirit", CanonicalAttribute::Attribute(Attribute::Perception)),
    ("luck", CanonicalAttribute::Attribute(Attribute::Luck)),
    ("level", CanonicalAttribute::Level),
    ("stage", CanonicalAttribute::Stage),
    ("cultivationStage", CanonicalAttribute::Stage),
    ("realm", CanonicalAttribute::Stage),
];

/// Resolves any accepted spelling to its canonical attribute.
pub fn canonicalize(name: &str) -> Option<CanonicalAttribute> {
    let key = normalize_key(name);
    if key.is_empty() {
        return None;
    }

    ALIAS_TABLE
        .iter()
        .find(|(alias, _)| normalize_key(alias) == key)
        .map(|(_, canonical)| *canonical)
}

impl Attribute {
    /// Resolves an attribute name or one of its historical aliases.
    pub fn from_alias(name: &str) -> Option<Attribute> {
        match canonicalize(name)? {
            CanonicalAttribute::Attribute(attribute) => Some(attribute),
            CanonicalAttribute::Level | CanonicalAttribute::Stage => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonym_pairs_resolve_to_the_same_attribute() {
        let pairs = [
            ("intelligence", "intellect"),
            ("dexterity", "agility"),
            ("spirit", "perception"),
            ("health", "vitality"),
        ];
        for (alias, canonical) in pairs {
            assert_eq!(canonicalize(alias), canonicalize(canonical), "{alias}");
            assert!(canonicalize(alias).is_some());
        }
    }

    #[test]
    fn resolution_is_case_insensitive() {
        assert_eq!(
            canonicalize("INTELLIGENCE"),
            Some(CanonicalAttribute::Attribute(Attribute::Intellect))
        );
        assert_eq!(canonicalize("Cultivation_Stage"), Some(CanonicalAttribute::Stage));
        assert_eq!(canonicalize("charisma"), None);
        assert_eq!(canonicalize("  "), None);
    }

    #[test]
    fn every_attribute_has_its_own_name_in_the_table() {
        use strum::IntoEnumIterator;

        for attribute in Attribute::iter() {
            assert_eq!(Attribute::from_alias(attribute.as_ref()), Some(attribute));
        }
        assert_eq!(Attribute::from_alias("level"), None);
    }
}
