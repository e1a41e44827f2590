use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::filter::{FilterSelection, FILTER_COLUMNS};
use crate::data::model::{Column, Dataset, FieldValue};
use crate::data::report::{AnalysisConfig, DashboardReport};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, immutable for the lifetime of the window.
    pub dataset: Dataset,

    /// Selectable values per filter column, in sidebar order.
    pub domains: Vec<(Column, BTreeSet<FieldValue>)>,

    /// Current filter selections.
    pub selection: FilterSelection,

    /// Aggregates for the current selection (rebuilt on every change).
    pub report: DashboardReport,

    pub analysis: AnalysisConfig,

    /// Stable colours for the work-arrangement share chart.
    pub remote_colors: ColorMap,
}

impl AppState {
    /// Ingest the loaded dataset with every filter value selected.
    pub fn new(dataset: Dataset, analysis: AnalysisConfig) -> Self {
        let domains = FILTER_COLUMNS
            .iter()
            .map(|&col| (col, dataset.unique_values(col)))
            .collect();
        let selection = FilterSelection::all(&dataset);
        let report = DashboardReport::build(&dataset, &selection, &analysis);
        let remote_colors = ColorMap::new(
            dataset
                .unique_values(Column::RemoteType)
                .iter()
                .map(|v| v.to_string()),
        );

        Self {
            dataset,
            domains,
            selection,
            report,
            analysis,
            remote_colors,
        }
    }

    /// Recompute the report after a filter change.
    pub fn refresh(&mut self) {
        self.report = DashboardReport::build(&self.dataset, &self.selection, &self.analysis);
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: Column, value: &FieldValue) {
        let Some(selected) = self.selection.values_mut(column) else {
            return;
        };
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refresh();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: Column) {
        let Some((_, all)) = self.domains.iter().find(|(col, _)| *col == column) else {
            return;
        };
        let all = all.clone();
        if let Some(selected) = self.selection.values_mut(column) {
            *selected = all;
        }
        self.refresh();
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: Column) {
        let Some(selected) = self.selection.values_mut(column) else {
            return;
        };
        selected.clear();
        self.refresh();
    }

    pub fn is_selected(&self, column: Column, value: &FieldValue) -> bool {
        self.selection
            .values(column)
            .is_some_and(|selected| selected.contains(value))
    }
}
