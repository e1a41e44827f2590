use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Stroke, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::{normalize, red_yellow_green};
use crate::data::report::COUNTRY_VIEW_ROLE;
use crate::state::AppState;
use crate::ui::{format_usd, no_data_warning};

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong().size(16.0));
}

/// Fixed-size plot without pan or zoom.
fn static_plot(plot: Plot) -> Plot {
    plot.height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

// ---------------------------------------------------------------------------
// Top roles by average salary (horizontal bars)
// ---------------------------------------------------------------------------

/// Horizontal bars, highest average at the top.
pub fn top_roles(ui: &mut Ui, state: &AppState) {
    let title = format!("Top {} roles by average salary", state.analysis.top_roles);
    chart_title(ui, &title);

    let top = &state.report.top_roles;
    if top.is_empty() {
        no_data_warning(ui, "roles");
        return;
    }

    // `top` is ascending, so the last entry lands on the highest row.
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(i, (role, mean))| Bar::new(i as f64, *mean).name(role).width(0.7))
        .collect();
    let chart = BarChart::new(bars)
        .color(BAR_COLOR)
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
            format!("{}\n{}", bar.name, format_usd(bar.value))
        }));

    static_plot(Plot::new("top_roles"))
        .show_axes([true, false])
        .x_axis_label("Average annual salary (USD)")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            for (i, (role, _)) in top.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(0.0, i as f64), format!(" {role}"))
                        .color(Color32::WHITE)
                        .anchor(Align2::LEFT_CENTER),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Salary distribution (histogram)
// ---------------------------------------------------------------------------

pub fn salary_distribution(ui: &mut Ui, state: &AppState) {
    chart_title(ui, "Annual salary distribution");

    let histogram = &state.report.histogram;
    if histogram.is_empty() {
        no_data_warning(ui, "distribution");
        return;
    }

    let edges = histogram.edges();
    // Zero-width buckets (all salaries equal) still need a visible bar.
    let width = if histogram.bucket_width() > 0.0 {
        histogram.bucket_width()
    } else {
        histogram.max.abs().max(1.0) * 0.05
    };
    let bars: Vec<Bar> = histogram
        .counts
        .iter()
        .zip(edges.windows(2))
        .map(|(&count, edge)| {
            Bar::new((edge[0] + edge[1]) / 2.0, count as f64)
                .width(width)
                .name(format!("{} – {}", format_usd(edge[0]), format_usd(edge[1])))
        })
        .collect();
    let chart = BarChart::new(bars)
        .color(BAR_COLOR)
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
            format!("{}\n{} records", bar.name, bar.value)
        }));

    ui.label(
        RichText::new(format!(
            "{} records in {} buckets",
            histogram.total(),
            histogram.counts.len()
        ))
        .weak(),
    );
    static_plot(Plot::new("salary_histogram"))
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Work arrangement share (donut)
// ---------------------------------------------------------------------------

pub fn remote_share(ui: &mut Ui, state: &AppState) {
    chart_title(ui, "Work arrangement share");

    let counts = &state.report.remote_counts;
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        no_data_warning(ui, "work arrangement");
        return;
    }

    let size = egui::vec2(ui.available_width(), CHART_HEIGHT - 30.0);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let outer = 0.45 * rect.width().min(rect.height());
    let inner = outer * 0.5;

    let point = |radius: f32, angle: f32| -> Pos2 {
        center + radius * egui::vec2(angle.cos(), angle.sin())
    };

    // Start at 12 o'clock, clockwise on screen.
    let mut start = -TAU / 4.0;
    for (label, n) in counts {
        let fraction = *n as f32 / total as f32;
        let sweep = fraction * TAU;
        let color = state.remote_colors.color_for(label);

        let steps = ((sweep / TAU) * 120.0).ceil().max(1.0) as usize;
        for s in 0..steps {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            painter.add(egui::Shape::convex_polygon(
                vec![point(outer, a0), point(outer, a1), point(inner, a1), point(inner, a0)],
                color,
                Stroke::NONE,
            ));
        }

        let mid = start + sweep / 2.0;
        painter.text(
            point((outer + inner) / 2.0, mid),
            Align2::CENTER_CENTER,
            format!("{label}\n{:.1}%", fraction * 100.0),
            FontId::proportional(12.0),
            Color32::WHITE,
        );
        start += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, n) in counts {
            let color = state.remote_colors.color_for(label);
            ui.label(RichText::new("■").color(color));
            ui.label(format!("{label} ({n})"));
        }
    });
}

// ---------------------------------------------------------------------------
// Average salary by country for one role (choropleth-style)
// ---------------------------------------------------------------------------

/// One bar per country, shaded on a red-yellow-green scale by its average.
pub fn country_salaries(ui: &mut Ui, state: &AppState) {
    chart_title(ui, &format!("Average {COUNTRY_VIEW_ROLE} salary by country"));

    let by_country = &state.report.country_salaries;
    if by_country.is_empty() {
        no_data_warning(ui, "countries");
        return;
    }

    let min = by_country.values().copied().fold(f64::INFINITY, f64::min);
    let max = by_country.values().copied().fold(f64::NEG_INFINITY, f64::max);

    let bars: Vec<Bar> = by_country
        .iter()
        .enumerate()
        .map(|(i, (code, mean))| {
            Bar::new(i as f64, *mean)
                .name(code)
                .width(0.8)
                .fill(red_yellow_green(normalize(*mean, min, max)))
        })
        .collect();
    let chart = BarChart::new(bars).element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
        format!("{}\n{}", bar.name, format_usd(bar.value))
    }));

    static_plot(Plot::new("country_salaries"))
        .show_axes([false, true])
        .y_axis_label("Average salary (USD)")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            for (i, (code, mean)) in by_country.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, *mean), code.as_str()).anchor(Align2::CENTER_BOTTOM),
                );
            }
        });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("■").color(red_yellow_green(0.0)));
        ui.label(format_usd(min));
        ui.label(RichText::new("■").color(red_yellow_green(0.5)));
        ui.label(RichText::new("■").color(red_yellow_green(1.0)));
        ui.label(format_usd(max));
    });
}
