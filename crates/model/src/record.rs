use serde::{Deserialize, Serialize};

/// One historical emission measurement: a facility, a pollutant, a year.
///
/// `region_norm` is always resolved through the canonical region table;
/// unmapped spellings pass through trimmed. `quantity_tonnes` is never NaN:
/// the source query drops null quantities before they reach this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    pub period: i32,
    pub region_raw: String,
    pub region_norm: String,
    pub facility_id: String,
    pub facility_name: String,
    pub category: String,
    pub pollutant: String,
    pub quantity_tonnes: f64,
}

/// One administrative region polygon from the boundary dataset.
///
/// The geometry is opaque planar data handed through to the presentation
/// boundary; this crate never inspects coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGeometry {
    pub region_raw: String,
    pub region_norm: String,
    pub geometry: serde_json::Value,
}

/// A facility's summed contribution within one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityTotal {
    pub facility_id: String,
    pub facility_name: String,
    pub quantity: f64,
}

/// A grouped sum plus its ranked contributors.
///
/// `top_facilities` holds at most ten entries, descending by quantity;
/// ties keep the order in which facilities first appear in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedGroup {
    pub key: String,
    pub total: f64,
    pub top_facilities: Vec<FacilityTotal>,
}
