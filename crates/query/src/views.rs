use crate::aggregate::{aggregate_by, pivot_region_year, rank_facilities, TOP_FACILITIES};
use crate::format::{format_quantity, heatmap_hover, top_facilities_html};
use retc_model::{AggregatedGroup, EmissionRecord, RegionGeometry};
use serde::Serialize;
use std::collections::HashMap;

/// One horizontal-bar row: group key, summed tonnage, prebuilt Top-10
/// hover block. Rows arrive ascending by total (largest-at-top once the
/// chart lays bars out horizontally).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRow {
    pub key: String,
    pub total: f64,
    pub top_facilities_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarsView {
    pub rows: Vec<BarRow>,
}

pub fn bars_by_region(records: &[EmissionRecord]) -> BarsView {
    bars(aggregate_by(records, |r| &r.region_norm))
}

pub fn bars_by_category(records: &[EmissionRecord]) -> BarsView {
    bars(aggregate_by(records, |r| &r.category))
}

fn bars(groups: Vec<AggregatedGroup>) -> BarsView {
    let rows = groups
        .into_iter()
        .map(|group| BarRow {
            top_facilities_html: top_facilities_html(&group.top_facilities),
            key: group.key,
            total: group.total,
        })
        .collect();
    BarsView { rows }
}

/// Dense heatmap payload: parallel matrices of totals, in-cell text and
/// hover text, indexed `[region][year]` with both axes sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapView {
    pub regions: Vec<String>,
    pub years: Vec<i32>,
    pub totals: Vec<Vec<f64>>,
    pub cell_text: Vec<Vec<String>>,
    pub hover_text: Vec<Vec<String>>,
}

pub fn heatmap(records: &[EmissionRecord]) -> HeatmapView {
    let pivot = pivot_region_year(records);

    // One bucket of record refs per populated (region, year) cell.
    let mut cells: HashMap<(&str, i32), Vec<&EmissionRecord>> = HashMap::new();
    for record in records {
        cells
            .entry((record.region_norm.as_str(), record.period))
            .or_default()
            .push(record);
    }

    let mut cell_text = Vec::with_capacity(pivot.row_keys.len());
    let mut hover_text = Vec::with_capacity(pivot.row_keys.len());
    for (row, region) in pivot.row_keys.iter().enumerate() {
        let mut text_row = Vec::with_capacity(pivot.col_keys.len());
        let mut hover_row = Vec::with_capacity(pivot.col_keys.len());
        for (col, &year) in pivot.col_keys.iter().enumerate() {
            let total = pivot.totals[row][col];
            let ranked = match cells.get(&(region.as_str(), year)) {
                Some(members) => rank_facilities(members.iter().copied(), TOP_FACILITIES),
                None => Vec::new(),
            };
            text_row.push(format_quantity(total));
            hover_row.push(heatmap_hover(region, year, total, &ranked));
        }
        cell_text.push(text_row);
        hover_text.push(hover_row);
    }

    HeatmapView {
        regions: pivot.row_keys,
        years: pivot.col_keys,
        totals: pivot.totals,
        cell_text,
        hover_text,
    }
}

/// One choropleth feature: boundary polygon plus the emission total joined
/// by uppercased canonical region name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethRegion {
    pub region: String,
    pub region_raw: String,
    pub join_key: String,
    pub total: f64,
    pub geometry: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethView {
    pub regions: Vec<ChoroplethRegion>,
}

/// Left-joins filtered emission totals onto the boundary set. Boundary
/// regions with no matching emissions carry 0.0 so the map still colors
/// them; emission regions with no polygon are dropped (nothing to draw).
pub fn choropleth(records: &[EmissionRecord], boundaries: &[RegionGeometry]) -> ChoroplethView {
    let totals: HashMap<String, f64> = aggregate_by(records, |r| &r.region_norm)
        .into_iter()
        .map(|group| (group.key.to_uppercase(), group.total))
        .collect();

    let regions = boundaries
        .iter()
        .map(|boundary| {
            let join_key = boundary.region_norm.to_uppercase();
            let total = totals.get(&join_key).copied().unwrap_or(0.0);
            ChoroplethRegion {
                region: boundary.region_norm.clone(),
                region_raw: boundary.region_raw.clone(),
                join_key,
                total,
                geometry: boundary.geometry.clone(),
            }
        })
        .collect();

    ChoroplethView { regions }
}

/// Distinct values for widget population, sorted ascending, plus the span
/// of years actually present in the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub pollutants: Vec<String>,
    pub regions: Vec<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

pub fn filter_options(records: &[EmissionRecord]) -> FilterOptions {
    FilterOptions {
        categories: distinct(records, |r| &r.category),
        pollutants: distinct(records, |r| &r.pollutant),
        regions: distinct(records, |r| &r.region_norm),
        year_min: records.iter().map(|r| r.period).min(),
        year_max: records.iter().map(|r| r.period).max(),
    }
}

fn distinct<F>(records: &[EmissionRecord], field: F) -> Vec<String>
where
    F: Fn(&EmissionRecord) -> &str,
{
    let mut values: Vec<String> = records.iter().map(|r| field(r).to_string()).collect();
    values.sort();
    values.dedup();
    values
}
