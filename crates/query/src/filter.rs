use retc_model::{EmissionRecord, FilterCriteria};

/// Applies the criteria as a conjunction of independent predicates.
///
/// `Selection::All` and `YearRange::Unbounded` dimensions are no-ops, so
/// all-default criteria return the input unchanged. Record order is
/// preserved and an empty result is a valid state, not an error.
pub fn filter_records(records: &[EmissionRecord], criteria: &FilterCriteria) -> Vec<EmissionRecord> {
    records
        .iter()
        .filter(|record| {
            criteria.category.matches(&record.category)
                && criteria.pollutant.matches(&record.pollutant)
                && criteria.region.matches(&record.region_norm)
                && criteria.years.contains(record.period)
        })
        .cloned()
        .collect()
}
