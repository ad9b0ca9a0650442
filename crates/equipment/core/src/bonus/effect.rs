//! Raw effect descriptors as delivered by content data and the backend.
//!
//! Descriptors are stringly typed at the boundary. Values may arrive as
//! numbers or as numeric-looking strings (sometimes with extra quotes), so
//! they are modelled as [`EffectValue`] and converted with the total
//! [`EffectValue::coerce`] function.

use core::fmt;

use crate::error::{EngineError, ErrorSeverity};

/// Class of an effect descriptor (`effectClass` in content data).
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
pub enum EffectClass {
    StatBoost,
    CombatBoost,
    CultivationBoost,
    ElementalBoost,
    UtilityBoost,
    Special,
    /// Any class this engine does not understand.
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// A numeric value as it arrives from content data.
///
/// Deserialization never fails on a well-formed document: booleans, nulls,
/// lists and maps become [`EffectValue::Unsupported`] so that only the entry
/// carrying them is skipped later.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum EffectValue {
    Number(f64),
    Text(String),
    /// A value of a shape that can never be numeric, described for diagnostics.
    Unsupported(String),
}

impl EffectValue {
    /// Converts the raw value into a finite number.
    ///
    /// Strings are trimmed and stripped of surrounding `"`/`'` quotes. A
    /// leading `+` and a trailing `%` are accepted.
    pub fn coerce(&self) -> Result<f64, EffectError> {
        let value = match self {
            EffectValue::Number(number) => *number,
            EffectValue::Text(raw) => parse_numeric_text(raw)?,
            EffectValue::Unsupported(raw) => {
                return Err(EffectError::UnparseableValue { raw: raw.clone() });
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EffectError::NonFiniteValue { value })
        }
    }
}

fn parse_numeric_text(raw: &str) -> Result<f64, EffectError> {
    let text = raw.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    let text = text.strip_suffix('%').map(str::trim_end).unwrap_or(text);

    text.parse::<f64>()
        .map_err(|_| EffectError::UnparseableValue {
            raw: raw.to_string(),
        })
}

impl fmt::Display for EffectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectValue::Number(number) => write!(f, "{number}"),
            EffectValue::Text(text) | EffectValue::Unsupported(text) => f.write_str(text),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EffectValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EffectValueVisitor)
    }
}

#[cfg(feature = "serde")]
struct EffectValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for EffectValueVisitor {
    type Value = EffectValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<EffectValue, E> {
        Ok(EffectValue::Number(value))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<EffectValue, E> {
        Ok(EffectValue::Number(value as f64))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<EffectValue, E> {
        Ok(EffectValue::Number(value as f64))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<EffectValue, E> {
        Ok(EffectValue::Text(value.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<EffectValue, E> {
        Ok(EffectValue::Text(value))
    }

    fn visit_bool<E: serde::de::Error>(self, value: bool) -> Result<EffectValue, E> {
        Ok(EffectValue::Unsupported(value.to_string()))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<EffectValue, E> {
        Ok(EffectValue::Unsupported("null".to_string()))
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<EffectValue, E> {
        self.visit_unit()
    }

    fn visit_some<D: serde::Deserializer<'de>>(self, inner: D) -> Result<EffectValue, D::Error> {
        inner.deserialize_any(self)
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<EffectValue, A::Error> {
        while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
        Ok(EffectValue::Unsupported("a list".to_string()))
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, mut map: A) -> Result<EffectValue, A::Error> {
        while map
            .next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?
            .is_some()
        {}
        Ok(EffectValue::Unsupported("a map".to_string()))
    }
}

impl From<f64> for EffectValue {
    fn from(value: f64) -> Self {
        EffectValue::Number(value)
    }
}

impl From<i32> for EffectValue {
    fn from(value: i32) -> Self {
        EffectValue::Number(f64::from(value))
    }
}

impl From<&str> for EffectValue {
    fn from(value: &str) -> Self {
        EffectValue::Text(value.to_string())
    }
}

impl From<String> for EffectValue {
    fn from(value: String) -> Self {
        EffectValue::Text(value)
    }
}

/// One raw effect attached to an item, technique, status effect or set tier.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EffectDescriptor {
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect_class: EffectClass,

    #[cfg_attr(feature = "serde", serde(default))]
    pub target: String,

    /// Required for `elementalBoost`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<EffectValue>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl EffectDescriptor {
    fn boost(class: EffectClass, target: &str, value: impl Into<EffectValue>) -> Self {
        Self {
            effect_class: class,
            target: target.to_string(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// `statBoost` on an attribute (aliases accepted).
    pub fn stat(target: &str, value: impl Into<EffectValue>) -> Self {
        Self::boost(EffectClass::StatBoost, target, value)
    }

    pub fn combat(target: &str, value: impl Into<EffectValue>) -> Self {
        Self::boost(EffectClass::CombatBoost, target, value)
    }

    pub fn cultivation(target: &str, value: impl Into<EffectValue>) -> Self {
        Self::boost(EffectClass::CultivationBoost, target, value)
    }

    pub fn utility(target: &str, value: impl Into<EffectValue>) -> Self {
        Self::boost(EffectClass::UtilityBoost, target, value)
    }

    pub fn elemental(element: &str, value: impl Into<EffectValue>) -> Self {
        Self {
            element: Some(element.to_string()),
            ..Self::boost(EffectClass::ElementalBoost, "resistance", value)
        }
    }

    pub fn special(id: Option<&str>, name: &str, description: &str) -> Self {
        Self {
            effect_class: EffectClass::Special,
            id: id.map(str::to_string),
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            ..Self::default()
        }
    }

    /// Returns a copy with the value multiplied by `factor`.
    ///
    /// Values that cannot be coerced are left untouched so that extraction
    /// reports them.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        if let Some(Ok(value)) = self.value.as_ref().map(EffectValue::coerce) {
            scaled.value = Some(EffectValue::Number(value * factor));
        }
        scaled
    }
}

/// Why a single effect descriptor was skipped.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectError {
    #[error("unknown effect class")]
    UnknownEffectClass,

    #[error("effect has no value")]
    MissingValue,

    #[error("value `{raw}` is not a number")]
    UnparseableValue { raw: String },

    #[error("value {value} is not finite")]
    NonFiniteValue { value: f64 },

    #[error("unknown target `{target}` for {class}")]
    UnknownTarget { class: EffectClass, target: String },

    #[error("elemental effect has no element")]
    MissingElement,

    #[error("unknown element `{element}`")]
    UnknownElement { element: String },
}

impl EngineError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use EffectError::*;
        match self {
            UnknownEffectClass => "EFFECT_UNKNOWN_CLASS",
            MissingValue => "EFFECT_MISSING_VALUE",
            UnparseableValue { .. } => "EFFECT_UNPARSEABLE_VALUE",
            NonFiniteValue { .. } => "EFFECT_NON_FINITE_VALUE",
            UnknownTarget { .. } => "EFFECT_UNKNOWN_TARGET",
            MissingElement => "EFFECT_MISSING_ELEMENT",
            UnknownElement { .. } => "EFFECT_UNKNOWN_ELEMENT",
        }
    }
}
