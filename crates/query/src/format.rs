use retc_model::FacilityTotal;

/// Marker emitted wherever a region×year cell has no contributing records.
pub const NO_DATA: &str = "Sin datos";

/// Compact tonnage rendering used for heatmap cell text and hover totals:
/// `2.3M`, `15k`, `999`. The k and unit cases truncate toward zero.
pub fn format_quantity(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1e6)
    } else if value >= 1_000.0 {
        format!("{}k", (value / 1e3) as i64)
    } else {
        format!("{}", value as i64)
    }
}

/// Two-decimal megatonne form used only inside Top-10 facility labels.
/// Deliberately distinct from [`format_quantity`]; do not merge the two.
pub fn format_quantity_label(value: f64) -> String {
    format!("{:.2} M", value / 1e6)
}

pub fn facility_label(facility: &FacilityTotal) -> String {
    format!(
        "{} – {} ({})",
        facility.facility_id,
        facility.facility_name,
        format_quantity_label(facility.quantity)
    )
}

/// Joined label block for a ranked facility list; an empty ranking renders
/// as the explicit no-data marker rather than an empty string.
pub fn top_facilities_html(entries: &[FacilityTotal]) -> String {
    if entries.is_empty() {
        return NO_DATA.to_string();
    }
    entries
        .iter()
        .map(facility_label)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Hover block for one heatmap cell. The only place a zero-record group
/// materializes: the dense grid forces every region×year pair to render.
pub fn heatmap_hover(region: &str, year: i32, total: f64, entries: &[FacilityTotal]) -> String {
    format!(
        "<b>Región:</b> {region}<br>\
         <b>Año:</b> {year}<br>\
         <b>Emisiones:</b> {} Ton<br><br>\
         <b>Top 10 Establecimientos:</b><br>{}",
        format_quantity(total),
        top_facilities_html(entries)
    )
}
