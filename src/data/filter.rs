use std::collections::BTreeSet;

use super::model::{Column, Dataset, FieldValue, Record};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per filter column
// ---------------------------------------------------------------------------

/// The four columns the user can filter on, in sidebar order.
pub const FILTER_COLUMNS: [Column; 4] = [
    Column::Year,
    Column::Seniority,
    Column::ContractType,
    Column::CompanySize,
];

/// Per-column selection state for the four filter columns.
/// An empty set selects nothing; there is no implicit "select all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<FieldValue>,
    pub seniorities: BTreeSet<FieldValue>,
    pub contract_types: BTreeSet<FieldValue>,
    pub company_sizes: BTreeSet<FieldValue>,
}

impl FilterSelection {
    /// Every observed value selected, i.e. show everything.
    pub fn all(dataset: &Dataset) -> Self {
        let mut selection = FilterSelection::default();
        for column in FILTER_COLUMNS {
            if let Some(set) = selection.values_mut(column) {
                *set = dataset.unique_values(column);
            }
        }
        selection
    }

    /// The selected set for a filter column; `None` for non-filter columns.
    pub fn values(&self, column: Column) -> Option<&BTreeSet<FieldValue>> {
        match column {
            Column::Year => Some(&self.years),
            Column::Seniority => Some(&self.seniorities),
            Column::ContractType => Some(&self.contract_types),
            Column::CompanySize => Some(&self.company_sizes),
            _ => None,
        }
    }

    pub fn values_mut(&mut self, column: Column) -> Option<&mut BTreeSet<FieldValue>> {
        match column {
            Column::Year => Some(&mut self.years),
            Column::Seniority => Some(&mut self.seniorities),
            Column::ContractType => Some(&mut self.contract_types),
            Column::CompanySize => Some(&mut self.company_sizes),
            _ => None,
        }
    }

    /// A record passes when each of its four filter fields is selected.
    pub fn matches(&self, record: &Record) -> bool {
        FILTER_COLUMNS.iter().all(|&column| {
            self.values(column)
                .is_some_and(|selected| selected.contains(&record.value(column)))
        })
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the records passing the current selection
// ---------------------------------------------------------------------------

/// A subsequence of a [`Dataset`], stored as record indices in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Records of the view, in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    /// Salaries of the view, in dataset order.
    pub fn salaries(&self) -> impl Iterator<Item = f64> + '_ {
        self.records().map(|r| r.salary_usd)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Narrow the view to the records satisfying `predicate`.
    pub fn restrict(&self, predicate: impl Fn(&Record) -> bool) -> FilteredView<'a> {
        let dataset = self.dataset;
        FilteredView {
            dataset,
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| predicate(&dataset.records[i]))
                .collect(),
        }
    }
}

/// Return the view of records that pass all four filter columns.
pub fn apply_filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}
