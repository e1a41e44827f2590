use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("🎲 Data Salary Dashboard");
    ui.label(
        "Explore salaries in data-related jobs over recent years. \
         Use the filters on the left to refine the analysis.",
    );
    ui.add_space(8.0);

    ui.strong("General metrics (annual salary in USD)");
    panels::metrics_row(ui, state);
    ui.separator();

    ui.strong("Charts");
    ui.columns(2, |cols: &mut [Ui]| {
        charts::top_roles(&mut cols[0], state);
        charts::salary_distribution(&mut cols[1], state);
    });
    ui.add_space(8.0);
    ui.columns(2, |cols: &mut [Ui]| {
        charts::remote_share(&mut cols[0], state);
        charts::country_salaries(&mut cols[1], state);
    });
    ui.separator();

    ui.strong("Detailed data");
    table::detail_table(ui, state);
}
