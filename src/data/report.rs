use std::collections::BTreeMap;

use super::aggregate::{
    count_by, mean_salary_by_country, salary_histogram, summary_metrics, top_n_mean_by, Histogram,
    SummaryMetrics,
};
use super::filter::{apply_filter, FilterSelection};
use super::model::{Column, Dataset};

/// Role whose salaries are broken down by country of residence.
pub const COUNTRY_VIEW_ROLE: &str = "Data Scientist";

/// Tunables of the aggregate views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub top_roles: usize,
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_roles: 10,
            histogram_bins: 30,
        }
    }
}

/// Everything the dashboard renders for one filter selection.
///
/// Built from scratch on every selection change; holds no reference to the
/// dataset, only the indices of the visible records.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub visible_indices: Vec<usize>,
    pub metrics: SummaryMetrics,
    pub top_roles: Vec<(String, f64)>,
    pub histogram: Histogram,
    pub remote_counts: Vec<(String, usize)>,
    pub country_salaries: BTreeMap<String, f64>,
}

impl DashboardReport {
    pub fn build(dataset: &Dataset, selection: &FilterSelection, config: &AnalysisConfig) -> Self {
        let view = apply_filter(dataset, selection);
        log::debug!("Report rebuilt: {} of {} records visible", view.len(), dataset.len());

        DashboardReport {
            metrics: summary_metrics(&view),
            top_roles: top_n_mean_by(&view, Column::RoleTitle, config.top_roles),
            histogram: salary_histogram(&view, config.histogram_bins),
            remote_counts: count_by(&view, Column::RemoteType),
            country_salaries: mean_salary_by_country(&view, COUNTRY_VIEW_ROLE),
            visible_indices: view.indices().to_vec(),
        }
    }

    /// Whether nothing matched the selection.
    pub fn is_empty(&self) -> bool {
        self.visible_indices.is_empty()
    }
}
