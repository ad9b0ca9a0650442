//! Bonus vocabulary: the closed set of numeric stat kinds and bonus sources.
//!
//! Every enum here derives `strum` string conversions with camelCase names,
//! which is also the spelling used by effect descriptors coming from content
//! data (`"critChance"`, `"energyMax"`, ...).

use core::fmt;
use core::str::FromStr;

use strum::IntoEnumIterator;

/// Primary character attributes.
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
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Attribute {
    Strength,
    Agility,
    Vitality,
    Intellect,
    Perception,
    Luck,
}

/// Combat statistics.
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
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum CombatStat {
    PhysicalDamage,
    MagicDamage,
    PhysicalDefense,
    MagicDefense,
    CritChance,
    CritDamage,
    DodgeChance,
    /// Flat bonus to maximum health.
    MaxHealth,
    /// Flat bonus to movement/action speed.
    Speed,
}

/// Cultivation statistics.
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
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum CultivationStat {
    EnergyMax,
    EnergyRegen,
    ComprehensionRate,
    BreakthroughChance,
}

/// The six canonical elements.
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
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Light,
    Dark,
}

/// Economy and utility statistics.
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
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum UtilityStat {
    /// Shop price reduction in percent. Never stacks; the best discount wins.
    MerchantDiscount,
    ItemFind,
}

/// A numeric bonus kind. Used as the aggregation key.
///
/// Displayed and parsed as `group.name`, e.g. `combat.critChance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum StatKind {
    Attribute(Attribute),
    Combat(CombatStat),
    Cultivation(CultivationStat),
    Elemental(Element),
    Utility(UtilityStat),
}

impl StatKind {
    /// Group prefix used in the `group.name` representation.
    pub const fn group(&self) -> &'static str {
        match self {
            StatKind::Attribute(_) => "attribute",
            StatKind::Combat(_) => "combat",
            StatKind::Cultivation(_) => "cultivation",
            StatKind::Elemental(_) => "elemental",
            StatKind::Utility(_) => "utility",
        }
    }

    /// Name of the stat within its group.
    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Attribute(a) => a.into(),
            StatKind::Combat(c) => c.into(),
            StatKind::Cultivation(c) => c.into(),
            StatKind::Elemental(e) => e.into(),
            StatKind::Utility(u) => u.into(),
        }
    }

    /// Iterates every numeric kind in key order.
    pub fn all() -> impl Iterator<Item = StatKind> {
        Attribute::iter()
            .map(StatKind::Attribute)
            .chain(CombatStat::iter().map(StatKind::Combat))
            .chain(CultivationStat::iter().map(StatKind::Cultivation))
            .chain(Element::iter().map(StatKind::Elemental))
            .chain(UtilityStat::iter().map(StatKind::Utility))
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group(), self.name())
    }
}

/// Error returned when a `group.name` string names no stat kind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown stat kind `{0}`")]
pub struct ParseStatKindError(pub String);

impl FromStr for StatKind {
    type Err = ParseStatKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseStatKindError(s.to_string());
        let (group, name) = s.split_once('.').ok_or_else(err)?;

        let kind = match normalize_key(group).as_str() {
            "attribute" => lookup::<Attribute>(name, &[]).map(StatKind::Attribute),
            "combat" => lookup::<CombatStat>(name, &[]).map(StatKind::Combat),
            "cultivation" => lookup::<CultivationStat>(name, &[]).map(StatKind::Cultivation),
            "elemental" => lookup::<Element>(name, &[]).map(StatKind::Elemental),
            "utility" => lookup::<UtilityStat>(name, &[]).map(StatKind::Utility),
            _ => None,
        };
        kind.ok_or_else(err)
    }
}

impl TryFrom<String> for StatKind {
    type Error = ParseStatKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatKind> for String {
    fn from(kind: StatKind) -> Self {
        kind.to_string()
    }
}

impl From<Attribute> for StatKind {
    fn from(attribute: Attribute) -> Self {
        StatKind::Attribute(attribute)
    }
}

impl From<CombatStat> for StatKind {
    fn from(stat: CombatStat) -> Self {
        StatKind::Combat(stat)
    }
}

impl From<CultivationStat> for StatKind {
    fn from(stat: CultivationStat) -> Self {
        StatKind::Cultivation(stat)
    }
}

impl From<Element> for StatKind {
    fn from(element: Element) -> Self {
        StatKind::Elemental(element)
    }
}

impl From<UtilityStat> for StatKind {
    fn from(stat: UtilityStat) -> Self {
        StatKind::Utility(stat)
    }
}

/// Where a bonus record came from.
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
pub enum BonusSource {
    Equipment,
    Technique,
    StatusEffect,
    SpiritCompanion,
    CultivationStage,
    CultivationLevel,
    SetBonus,
}

/// Lowercases and strips `_`, `-` and whitespace so that `crit_chance`,
/// `Crit Chance` and `critChance` compare equal.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Finds an enum variant by its strum name or by one of the given aliases,
/// ignoring case and separators.
pub(crate) fn lookup<T>(name: &str, aliases: &[(&str, T)]) -> Option<T>
where
    T: IntoEnumIterator + AsRef<str> + Copy,
{
    let key = normalize_key(name);
    if key.is_empty() {
        return None;
    }

    T::iter()
        .find(|variant| normalize_key(variant.as_ref()) == key)
        .or_else(|| {
            aliases
                .iter()
                .find(|(alias, _)| normalize_key(alias) == key)
                .map(|(_, variant)| *variant)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_kind_round_trips_through_string() {
        for kind in StatKind::all() {
            let text = kind.to_string();
            assert_eq!(text.parse::<StatKind>(), Ok(kind), "{text}");
        }
    }

    #[test]
    fn stat_kind_parse_is_lenient_about_case_and_separators() {
        assert_eq!(
            "Combat.crit_chance".parse::<StatKind>(),
            Ok(StatKind::Combat(CombatStat::CritChance))
        );
        assert!("combat".parse::<StatKind>().is_err());
        assert!("combat.teleport".parse::<StatKind>().is_err());
    }

    #[test]
    fn lookup_matches_names_and_aliases() {
        let aliases = [("hp", CombatStat::MaxHealth)];
        assert_eq!(
            lookup::<CombatStat>("Dodge Chance", &aliases),
            Some(CombatStat::DodgeChance)
        );
        assert_eq!(lookup::<CombatStat>("HP", &aliases), Some(CombatStat::MaxHealth));
        assert_eq!(lookup::<CombatStat>("", &aliases), None);
    }

    #[test]
    fn all_kinds_are_unique_and_sorted() {
        let kinds: Vec<_> = StatKind::all().collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(kinds, sorted);
    }
}
