//! # RETC Query
//!
//! Filtering, aggregation, ranking and payload shaping for the four
//! dashboard views.
//!
//! ```text
//! Arc<Vec<EmissionRecord>>
//!     │
//!     ├──> filter_records(criteria)        conjunctive, typed predicates
//!     │
//!     ├──> aggregate_by(region | rubro)    grouped sums + Top-10 facilities
//!     ├──> pivot_region_year               dense region×year grid
//!     │
//!     └──> views
//!          ├─> BarsView        (two ranked horizontal bar charts)
//!          ├─> HeatmapView     (totals + cell text + hover text matrices)
//!          ├─> ChoroplethView  (totals joined onto boundary polygons)
//!          └─> FilterOptions   (distinct values for widget population)
//! ```
//!
//! Everything here is pure and synchronous; an empty record set is a valid
//! input at every step and yields empty (never missing) payloads.

mod aggregate;
mod filter;
mod format;
mod views;

pub use aggregate::{aggregate_by, pivot_region_year, top_facilities, PivotTable, TOP_FACILITIES};
pub use filter::filter_records;
pub use format::{
    facility_label, format_quantity, format_quantity_label, heatmap_hover, top_facilities_html,
    NO_DATA,
};
pub use views::{
    bars_by_category, bars_by_region, choropleth, filter_options, heatmap, BarRow, BarsView,
    ChoroplethRegion, ChoroplethView, FilterOptions, HeatmapView,
};
