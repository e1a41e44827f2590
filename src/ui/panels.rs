use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{format_count, format_usd};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multi-select per filter column.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let domains = state.domains.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (col, all_values) in &domains {
                let col = *col;
                let n_selected = state.selection.values(col).map_or(0, |s| s.len());
                let header_text = format!("{}  ({n_selected}/{})", col.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.header())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        for val in all_values {
                            let mut checked = state.is_selected(col, val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("📊 Data Salary Dashboard");
        ui.separator();
        ui.label(format!(
            "{} records loaded, {} visible",
            format_count(state.dataset.len()),
            format_count(state.report.visible_indices.len())
        ));
        if state.report.is_empty() {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(230, 160, 40), "No records match the filters");
        }
    });
}

// ---------------------------------------------------------------------------
// Metrics row
// ---------------------------------------------------------------------------

/// The four headline metrics side by side.
pub fn metrics_row(ui: &mut Ui, state: &AppState) {
    let m = &state.report.metrics;
    let metrics = [
        ("Average salary", format_usd(m.mean_salary)),
        ("Highest salary", format_usd(m.max_salary)),
        ("Total records", format_count(m.count)),
        ("Most common role", m.most_common_role.clone()),
    ];

    ui.columns(metrics.len(), |cols: &mut [Ui]| {
        for (ui, (label, value)) in cols.iter_mut().zip(metrics) {
            ui.label(RichText::new(label).weak());
            ui.label(RichText::new(value).size(26.0).strong());
        }
    });
}
