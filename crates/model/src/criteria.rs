use serde::{Deserialize, Serialize};

/// One filter dimension: either unrestricted or pinned to a single value.
///
/// Replaces the string sentinels ("Todos"/None) of the widget layer with an
/// exhaustive type, so the no-op case is impossible to misspell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    All,
    One(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::One(wanted) => wanted == value,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::All
    }
}

/// Inclusive year restriction on `period`.
///
/// Both bounds must be present for the range to apply; a partial pair of
/// bounds collapses to `Unbounded`. That asymmetry is inherited behavior
/// the rest of the pipeline relies on, not an accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearRange {
    Unbounded,
    Between(i32, i32),
}

impl YearRange {
    /// Builds a range from optional bounds, swapping a reversed pair so the
    /// `min <= max` invariant holds by construction.
    pub fn from_bounds(min: Option<i32>, max: Option<i32>) -> Self {
        match (min, max) {
            (Some(lo), Some(hi)) if lo <= hi => Self::Between(lo, hi),
            (Some(lo), Some(hi)) => Self::Between(hi, lo),
            _ => Self::Unbounded,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Between(lo, hi) => (*lo..=*hi).contains(&year),
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::Unbounded
    }
}

/// Conjunction of optional predicates over the emissions table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: Selection,
    pub pollutant: Selection,
    pub region: Selection,
    pub years: YearRange,
}
