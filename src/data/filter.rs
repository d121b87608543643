use std::collections::{BTreeMap, BTreeSet};

use super::model::{CategoricalField, StudentDataset, StudentRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which category values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column → set of selected values.
/// A column absent from the map is unconstrained; a present column with an
/// empty set matches nothing.
pub type FilterState = BTreeMap<CategoricalField, BTreeSet<String>>;

/// Initialise a [`FilterState`] over the sidebar columns with every value
/// selected (i.e., show everything).
pub fn init_filter_state(dataset: &StudentDataset) -> FilterState {
    CategoricalField::FILTERABLE
        .iter()
        .map(|&field| {
            let all = dataset.unique_values.get(&field).cloned().unwrap_or_default();
            (field, all)
        })
        .collect()
}

/// Whether a single record passes every active column filter.
pub fn matches(record: &StudentRecord, filters: &FilterState) -> bool {
    filters
        .iter()
        .all(|(field, selected)| selected.contains(record.category(*field)))
}

/// Return indices of records that pass all active filters, in file order.
pub fn filtered_indices(dataset: &StudentDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, filters))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::student;

    fn dataset() -> StudentDataset {
        StudentDataset::from_records(vec![
            student("female", "group A", "high school", "standard", "none", [50, 60, 70]),
            student("male", "group B", "high school", "standard", "completed", [80, 70, 60]),
            student("female", "group B", "some college", "free/reduced", "completed", [90, 95, 92]),
            student("male", "group A", "master's degree", "standard", "none", [40, 45, 50]),
        ])
    }

    #[test]
    fn default_state_shows_everything() {
        let ds = dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filters.len(), 3);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3]);
    }

    #[test]
    fn filters_combine_as_conjunction() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert(
            CategoricalField::Gender,
            BTreeSet::from(["female".to_string()]),
        );
        filters.insert(
            CategoricalField::TestPreparation,
            BTreeSet::from(["completed".to_string()]),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![2]);

        for (i, rec) in ds.records.iter().enumerate() {
            let expected = rec.gender == "female" && rec.test_preparation == "completed";
            assert_eq!(matches(rec, &filters), expected, "row {i}");
        }
    }

    #[test]
    fn empty_selection_hides_all_rows() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert(CategoricalField::RaceEthnicity, BTreeSet::new());
        assert!(filtered_indices(&ds, &filters).is_empty());
    }
}
