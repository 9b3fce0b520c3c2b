use retc_model::{AggregatedGroup, EmissionRecord, FacilityTotal};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Per-group facility rankings are truncated to this many entries.
pub const TOP_FACILITIES: usize = 10;

/// Grouped sums with per-group Top-10 facilities, ascending by total so a
/// horizontal bar chart renders largest-at-top.
///
/// Groups with no matching records never appear (this is a projection, not
/// a dense grid). All sorting is stable on the quantity alone; ties keep
/// the order in which keys first appear in the input.
pub fn aggregate_by<F>(records: &[EmissionRecord], key_fn: F) -> Vec<AggregatedGroup>
where
    F: Fn(&EmissionRecord) -> &str,
{
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<&EmissionRecord>> = HashMap::new();
    for record in records {
        let key = key_fn(record);
        if !buckets.contains_key(key) {
            order.push(key.to_string());
        }
        buckets.entry(key.to_string()).or_default().push(record);
    }

    let mut groups: Vec<AggregatedGroup> = order
        .into_iter()
        .map(|key| {
            let members = &buckets[&key];
            AggregatedGroup {
                total: members.iter().map(|r| r.quantity_tonnes).sum(),
                top_facilities: rank_facilities(members.iter().copied(), TOP_FACILITIES),
                key,
            }
        })
        .collect();

    groups.sort_by(|a, b| a.total.partial_cmp(&b.total).unwrap_or(Ordering::Equal));
    groups
}

/// Facilities of one group, summed over `(facility_id, facility_name)`,
/// descending by summed quantity, truncated to `n`.
pub fn top_facilities(records: &[EmissionRecord], n: usize) -> Vec<FacilityTotal> {
    rank_facilities(records.iter(), n)
}

pub(crate) fn rank_facilities<'a, I>(records: I, n: usize) -> Vec<FacilityTotal>
where
    I: IntoIterator<Item = &'a EmissionRecord>,
{
    let mut totals: Vec<FacilityTotal> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    for record in records {
        let key = (record.facility_id.clone(), record.facility_name.clone());
        match index.get(&key) {
            Some(&slot) => totals[slot].quantity += record.quantity_tonnes,
            None => {
                index.insert(key, totals.len());
                totals.push(FacilityTotal {
                    facility_id: record.facility_id.clone(),
                    facility_name: record.facility_name.clone(),
                    quantity: record.quantity_tonnes,
                });
            }
        }
    }

    totals.sort_by(|a, b| b.quantity.partial_cmp(&a.quantity).unwrap_or(Ordering::Equal));
    totals.truncate(n);
    totals
}

/// Dense region-by-year grid for the heatmap. Axes sort ascending; missing
/// combinations hold 0.0 so every cell renders, none go absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub row_keys: Vec<String>,
    pub col_keys: Vec<i32>,
    pub totals: Vec<Vec<f64>>,
}

pub fn pivot_region_year(records: &[EmissionRecord]) -> PivotTable {
    let mut row_keys: Vec<String> = records.iter().map(|r| r.region_norm.clone()).collect();
    row_keys.sort();
    row_keys.dedup();

    let mut col_keys: Vec<i32> = records.iter().map(|r| r.period).collect();
    col_keys.sort_unstable();
    col_keys.dedup();

    let row_index: HashMap<&str, usize> = row_keys
        .iter()
        .enumerate()
        .map(|(slot, key)| (key.as_str(), slot))
        .collect();
    let col_index: HashMap<i32, usize> = col_keys
        .iter()
        .enumerate()
        .map(|(slot, &key)| (key, slot))
        .collect();

    let mut totals = vec![vec![0.0; col_keys.len()]; row_keys.len()];
    for record in records {
        let row = row_index[record.region_norm.as_str()];
        let col = col_index[&record.period];
        totals[row][col] += record.quantity_tonnes;
    }

    PivotTable {
        row_keys,
        col_keys,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(region: &str, period: i32, facility: (&str, &str), quantity: f64) -> EmissionRecord {
        EmissionRecord {
            period,
            region_raw: region.to_string(),
            region_norm: region.to_string(),
            facility_id: facility.0.to_string(),
            facility_name: facility.1.to_string(),
            category: "Minería".to_string(),
            pollutant: "SO2".to_string(),
            quantity_tonnes: quantity,
        }
    }

    #[test]
    fn groups_sum_and_sort_ascending() {
        let records = vec![
            record("Tarapacá", 2020, ("A", "Alfa"), 500.0),
            record("Biobío", 2020, ("B", "Beta"), 100.0),
            record("Tarapacá", 2021, ("A", "Alfa"), 300.0),
        ];
        let groups = aggregate_by(&records, |r| &r.region_norm);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Biobío");
        assert_eq!(groups[0].total, 100.0);
        assert_eq!(groups[1].key, "Tarapacá");
        assert_eq!(groups[1].total, 800.0);
    }

    #[test]
    fn total_is_conserved_across_grouping() {
        let records = vec![
            record("Tarapacá", 2020, ("A", "Alfa"), 500.0),
            record("Biobío", 2020, ("B", "Beta"), 100.0),
            record("Maule", 2021, ("C", "Gamma"), 250.5),
            record("Tarapacá", 2021, ("A", "Alfa"), 300.0),
        ];
        let input_total: f64 = records.iter().map(|r| r.quantity_tonnes).sum();
        let grouped_total: f64 = aggregate_by(&records, |r| &r.region_norm)
            .iter()
            .map(|g| g.total)
            .sum();
        assert_eq!(grouped_total, input_total);
    }

    #[test]
    fn group_ties_keep_first_appearance_order() {
        let records = vec![
            record("Maule", 2020, ("A", "Alfa"), 100.0),
            record("Biobío", 2020, ("B", "Beta"), 100.0),
        ];
        let groups = aggregate_by(&records, |r| &r.region_norm);
        assert_eq!(groups[0].key, "Maule");
        assert_eq!(groups[1].key, "Biobío");
    }

    #[test]
    fn empty_input_yields_an_empty_sequence() {
        assert_eq!(aggregate_by(&[], |r| &r.region_norm), Vec::new());
    }

    #[test]
    fn facilities_are_summed_before_ranking() {
        let records = vec![
            record("Tarapacá", 2020, ("A", "Alfa"), 200.0),
            record("Tarapacá", 2020, ("B", "Beta"), 350.0),
            record("Tarapacá", 2021, ("A", "Alfa"), 200.0),
        ];
        let ranked = top_facilities(&records, 10);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].facility_id, "A");
        assert_eq!(ranked[0].quantity, 400.0);
        assert_eq!(ranked[1].facility_id, "B");
        assert_eq!(ranked[1].quantity, 350.0);
    }

    #[test]
    fn ranking_truncates_and_never_increases() {
        let records: Vec<EmissionRecord> = (0..15)
            .map(|i| {
                record(
                    "Tarapacá",
                    2020,
                    (format!("F{i}").as_str(), "Planta"),
                    f64::from(i * 10),
                )
            })
            .collect();
        let ranked = top_facilities(&records, 10);

        assert_eq!(ranked.len(), 10);
        for pair in ranked.windows(2) {
            assert!(pair[0].quantity >= pair[1].quantity);
        }
        assert_eq!(ranked[0].quantity, 140.0);
    }

    #[test]
    fn facility_ties_keep_first_appearance_order() {
        let records = vec![
            record("Tarapacá", 2020, ("Z", "Zeta"), 100.0),
            record("Tarapacá", 2020, ("A", "Alfa"), 100.0),
        ];
        let ranked = top_facilities(&records, 10);
        assert_eq!(ranked[0].facility_id, "Z");
        assert_eq!(ranked[1].facility_id, "A");
    }

    #[test]
    fn pivot_fills_missing_cells_with_zero() {
        let records = vec![
            record("Tarapacá", 2020, ("A", "Alfa"), 500.0),
            record("Biobío", 2021, ("B", "Beta"), 100.0),
        ];
        let pivot = pivot_region_year(&records);

        assert_eq!(pivot.row_keys, vec!["Biobío", "Tarapacá"]);
        assert_eq!(pivot.col_keys, vec![2020, 2021]);
        assert_eq!(pivot.totals, vec![vec![0.0, 100.0], vec![500.0, 0.0]]);
    }

    #[test]
    fn pivot_of_empty_input_is_empty() {
        let pivot = pivot_region_year(&[]);
        assert!(pivot.row_keys.is_empty());
        assert!(pivot.col_keys.is_empty());
        assert!(pivot.totals.is_empty());
    }
}
