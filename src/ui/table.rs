use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{Column, FieldValue};
use crate::state::AppState;
use crate::ui::format_usd;

const ROW_HEIGHT: f32 = 20.0;

fn cell_text(value: FieldValue) -> String {
    match value {
        FieldValue::Float(salary) => format_usd(salary),
        other => other.to_string(),
    }
}

/// Every record passing the current filters, one column per record field.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let rows = &state.report.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(TableColumn::auto().at_least(70.0), Column::ALL.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(360.0)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for col in Column::ALL {
                header.col(|ui| {
                    ui.strong(col.label());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let record = &state.dataset.records[rows[row.index()]];
                for col in Column::ALL {
                    row.col(|ui| {
                        ui.label(cell_text(record.value(col)));
                    });
                }
            });
        });
}
