use crate::bonus::AggregationRules;
use crate::stats::StatFormulas;

/// Tunable engine parameters.
///
/// Missing fields in configuration files fall back to the defaults below.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Coefficients of the derived-stat formulas.
    pub formulas: StatFormulas,
    /// Per-kind aggregation strategy overrides.
    pub aggregation: AggregationRules,
}

impl EngineConfig {
    pub const fn new() -> Self {
        Self {
            formulas: StatFormulas::DEFAULT,
            aggregation: AggregationRules::new(),
        }
    }

    #[must_use]
    pub fn with_formulas(mut self, formulas: StatFormulas) -> Self {
        self.formulas = formulas;
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: AggregationRules) -> Self {
        self.aggregation = aggregation;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
