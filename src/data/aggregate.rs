use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::{Column, FieldValue};

/// Shown in place of the most common role when nothing matches the filters.
pub const NO_ROLE: &str = "—";

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// The four headline numbers above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub count: usize,
    pub most_common_role: String,
}

impl SummaryMetrics {
    /// Values reported for an empty view.
    pub fn empty() -> Self {
        SummaryMetrics {
            mean_salary: 0.0,
            max_salary: 0.0,
            count: 0,
            most_common_role: NO_ROLE.to_string(),
        }
    }
}

/// Mean, max, count and most frequent role of the view.
///
/// Role ties resolve to the lexicographically smallest title.
pub fn summary_metrics(view: &FilteredView<'_>) -> SummaryMetrics {
    if view.is_empty() {
        return SummaryMetrics::empty();
    }

    let count = view.len();
    let total: f64 = view.salaries().sum();
    let max_salary = view.salaries().fold(f64::NEG_INFINITY, f64::max);

    let mut role_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in view.records() {
        *role_counts.entry(r.role_title.as_str()).or_default() += 1;
    }
    // BTreeMap iterates in title order, so a strict `>` keeps the first tie.
    let mut most_common: Option<(&str, usize)> = None;
    for (role, n) in role_counts {
        if most_common.map_or(true, |(_, best)| n > best) {
            most_common = Some((role, n));
        }
    }

    SummaryMetrics {
        mean_salary: total / count as f64,
        max_salary,
        count,
        most_common_role: most_common
            .map(|(role, _)| role.to_string())
            .unwrap_or_else(|| NO_ROLE.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

fn salary_sums_by(view: &FilteredView<'_>, group: Column) -> BTreeMap<FieldValue, (f64, usize)> {
    let mut sums: BTreeMap<FieldValue, (f64, usize)> = BTreeMap::new();
    for r in view.records() {
        let entry = sums.entry(r.value(group)).or_insert((0.0, 0));
        entry.0 += r.salary_usd;
        entry.1 += 1;
    }
    sums
}

/// The `n` groups with the highest mean salary, ordered ascending by mean so
/// the largest comes last (top of a horizontal bar chart).
pub fn top_n_mean_by(view: &FilteredView<'_>, group: Column, n: usize) -> Vec<(String, f64)> {
    let mut means: Vec<(String, f64)> = salary_sums_by(view, group)
        .into_iter()
        .map(|(key, (sum, count))| (key.to_string(), sum / count as f64))
        .collect();

    means.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    means.truncate(n);
    means.reverse();
    means
}

/// Mean salary per residence country over the records of one role.
pub fn mean_salary_by_country(view: &FilteredView<'_>, role: &str) -> BTreeMap<String, f64> {
    let subset = view.restrict(|r| r.role_title == role);
    salary_sums_by(&subset, Column::ResidenceCountry)
        .into_iter()
        .map(|(code, (sum, count))| (code.to_string(), sum / count as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Category proportions
// ---------------------------------------------------------------------------

/// Record count per distinct value of `column`, most frequent first.
pub fn count_by(view: &FilteredView<'_>, column: Column) -> Vec<(String, usize)> {
    let mut counts: HashMap<FieldValue, usize> = HashMap::new();
    for r in view.records() {
        *counts.entry(r.value(column)).or_default() += 1;
    }
    let mut counts: Vec<(FieldValue, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
        .into_iter()
        .map(|(value, n)| (value.to_string(), n))
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width salary buckets over the `[min, max]` range of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bucket_width(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        (self.max - self.min) / self.counts.len() as f64
    }

    /// `counts.len() + 1` bucket edges; the last edge is exactly `max`.
    pub fn edges(&self) -> Vec<f64> {
        if self.counts.is_empty() {
            return Vec::new();
        }
        let width = self.bucket_width();
        let n = self.counts.len();
        (0..=n)
            .map(|i| if i == n { self.max } else { self.min + i as f64 * width })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin the view's salaries into `bins` equal-width buckets. The last bucket
/// is closed on the right so `max` is counted. An empty view (or `bins == 0`)
/// yields a histogram without buckets.
pub fn salary_histogram(view: &FilteredView<'_>, bins: usize) -> Histogram {
    if view.is_empty() || bins == 0 {
        return Histogram {
            min: 0.0,
            max: 0.0,
            counts: Vec::new(),
        };
    }

    let min = view.salaries().fold(f64::INFINITY, f64::min);
    let max = view.salaries().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for salary in view.salaries() {
        let bucket = if width > 0.0 {
            (((salary - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[bucket] += 1;
    }

    Histogram { min, max, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filter, FilterSelection};
    use crate::data::model::tests::{record, two_record_dataset};
    use crate::data::model::Dataset;

    fn salaries_dataset(rows: &[(&str, &str, &str, f64)]) -> Dataset {
        Dataset::from_records(
            rows.iter()
                .map(|&(role, remote, country, salary)| {
                    record(2024, "senior", "full_time", "medium", role, remote, country, salary)
                })
                .collect(),
        )
    }

    #[test]
    fn scenario_all_selected_metrics() {
        let ds = two_record_dataset();
        let view = apply_filter(&ds, &FilterSelection::all(&ds));
        let m = summary_metrics(&view);
        assert_eq!(m.count, 2);
        assert_eq!(m.mean_salary, 105_000.0);
        assert_eq!(m.max_salary, 150_000.0);
    }

    #[test]
    fn scenario_senior_only_mode() {
        let ds = two_record_dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.seniorities = [FieldValue::from("senior")].into_iter().collect();
        let m = summary_metrics(&apply_filter(&ds, &selection));
        assert_eq!(m.count, 1);
        assert_eq!(m.most_common_role, "Data Scientist");
    }

    #[test]
    fn scenario_no_years_selected() {
        let ds = two_record_dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.years.clear();
        let view = apply_filter(&ds, &selection);

        assert_eq!(summary_metrics(&view), SummaryMetrics::empty());
        assert_eq!(summary_metrics(&view).most_common_role, "—");
        assert!(top_n_mean_by(&view, Column::RoleTitle, 10).is_empty());
        assert!(salary_histogram(&view, 30).is_empty());
        assert!(count_by(&view, Column::RemoteType).is_empty());
        assert!(mean_salary_by_country(&view, "Data Scientist").is_empty());
    }

    #[test]
    fn mode_ties_pick_smallest_title() {
        let ds = salaries_dataset(&[
            ("ML Engineer", "remote", "USA", 1.0),
            ("Data Analyst", "remote", "USA", 1.0),
            ("ML Engineer", "remote", "USA", 1.0),
            ("Data Analyst", "remote", "USA", 1.0),
            ("Analytics Engineer", "remote", "USA", 1.0),
        ]);
        let view = apply_filter(&ds, &FilterSelection::all(&ds));
        assert_eq!(summary_metrics(&view).most_common_role, "Data Analyst");
    }

    #[test]
    fn top_n_is_bounded_and_ascending() {
        let rows: Vec<(String, f64)> = (0..15)
            .map(|i| (format!("Role {i:02}"), 10_000.0 * (i + 1) as f64))
            .collect();
        let ds = Dataset::from_records(
            rows.iter()
                .map(|(role, salary)| record(2024, "mid", "full_time", "small", role, "remote", "USA", *salary))
                .collect(),
        );
        let view = apply_filter(&ds, &FilterSelection::all(&ds));
        let top = top_n_mean_by(&view, Column::RoleTitle, 10);

        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(top.first().unwrap().0, "Role 05");
        assert_eq!(top.last().unwrap(), &("Role 14".to_string(), 150_000.0));
    }

    #[test]
    fn top_n_averages_each_group() {
        let ds = salaries_dataset(&[
            ("Data Scientist", "remote", "USA", 100.0),
            ("Data Scientist", "remote", "USA", 200.0),
            ("Data Analyst", "remote", "USA", 120.0),
        ]);
        let view = apply_filter(&ds, &FilterSelection::all(&ds));
        let top = top_n_mean_by(&view, Column::RoleTitle, 10);
        assert_eq!(
            top,
            vec![("Data Analyst".to_string(), 120.0), ("Data Scientist".to_string(), 150.0)]
        );
    }

    #[test]
    fn histogram_spans_filtered_range() {
        let ds = salaries_dataset(&[
            ("A", "remote", "USA", 10_000.0),
            ("A", "remote", "USA", 25_000.0),
            ("A", "remote", "USA", 40_000.0),
            ("A", "remote", "USA", 40_000.0),
            ("A", "remote", "USA", 1_000_000.0),
        ]);
        let mut selection = FilterSelection::all(&ds);
        let full = salary_histogram(&apply_filter(&ds, &selection), 30);
        assert_eq!(full.counts.len(), 30);
        assert_eq!(full.total(), 5);
        assert_eq!(full.min, 10_000.0);
        assert_eq!(full.max, 1_000_000.0);

        let edges = full.edges();
        assert_eq!(edges.len(), 31);
        assert_eq!(edges[0], 10_000.0);
        assert_eq!(edges[30], 1_000_000.0);
        assert_eq!(full.counts[29], 1);

        // Narrowing the filter recomputes the range from the view only.
        let ds_small = salaries_dataset(&[("A", "remote", "USA", 10_000.0), ("A", "remote", "USA", 40_000.0)]);
        selection = FilterSelection::all(&ds_small);
        let narrow = salary_histogram(&apply_filter(&ds_small, &selection), 30);
        assert_eq!((narrow.min, narrow.max), (10_000.0, 40_000.0));
        assert_eq!(narrow.counts[0], 1);
        assert_eq!(narrow.counts[29], 1);
        assert_eq!(narrow.total(), 2);
    }

    #[test]
    fn histogram_of_identical_values_uses_first_bucket() {
        let ds = salaries_dataset(&[("A", "remote", "USA", 5.0), ("B", "remote", "USA", 5.0)]);
        let h = salary_histogram(&apply_filter(&ds, &FilterSelection::all(&ds)), 30);
        assert_eq!(h.counts[0], 2);
        assert_eq!(h.total(), 2);
        assert_eq!(h.bucket_width(), 0.0);
    }

    #[test]
    fn proportions_sum_to_view_size() {
        let ds = salaries_dataset(&[
            ("A", "remote", "USA", 1.0),
            ("A", "onsite", "USA", 1.0),
            ("A", "remote", "USA", 1.0),
            ("A", "hybrid", "USA", 1.0),
            ("A", "onsite", "USA", 1.0),
            ("A", "remote", "USA", 1.0),
        ]);
        let view = apply_filter(&ds, &FilterSelection::all(&ds));
        let counts = count_by(&view, Column::RemoteType);
        assert_eq!(
            counts,
            vec![
                ("remote".to_string(), 3),
                ("onsite".to_string(), 2),
                ("hybrid".to_string(), 1)
            ]
        );
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), view.len());
    }

    #[test]
    fn country_means_only_use_the_fixed_role() {
        let ds = salaries_dataset(&[
            ("Data Scientist", "remote", "USA", 100.0),
            ("Data Scientist", "remote", "USA", 300.0),
            ("Data Scientist", "remote", "BRA", 50.0),
            ("Data Analyst", "remote", "DEU", 999.0),
        ]);
        let view = apply_filter(&ds, &FilterSelection::all(&ds));
        let by_country = mean_salary_by_country(&view, "Data Scientist");
        assert_eq!(by_country.len(), 2);
        assert_eq!(by_country["USA"], 200.0);
        assert_eq!(by_country["BRA"], 50.0);
        assert!(!by_country.contains_key("DEU"));
    }
}
