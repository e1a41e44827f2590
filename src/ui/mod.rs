pub mod charts;
pub mod panels;
pub mod table;

use eframe::egui::{Color32, Ui};

/// Shown in place of a chart when the filters leave no records.
pub fn no_data_warning(ui: &mut Ui, chart: &str) {
    ui.colored_label(
        Color32::from_rgb(230, 160, 40),
        format!("⚠ No data to show in the {chart} chart."),
    );
}

/// `$105,000`: whole dollars with thousands separators.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-${}", group_thousands(rounded.unsigned_abs()))
    } else {
        format!("${}", group_thousands(rounded as u64))
    }
}

/// `12,345`
pub fn format_count(n: usize) -> String {
    group_thousands(n as u64)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
