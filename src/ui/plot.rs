use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::{build_bar_series, build_line_series};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bar chart (indicator by category)
// ---------------------------------------------------------------------------

/// Render the bar chart of the selected indicator over the filtered rows.
///
/// One bar per row: bars sharing a category share a colour and a legend
/// entry, but rows are never merged into per-category aggregates. Bars with
/// a null value are skipped by the renderer only.
pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    let (Some(table), Some(group), Some(indicator)) =
        (&state.filtered, &state.group_by, &state.indicator)
    else {
        return;
    };

    let series = match build_bar_series(table, group, indicator) {
        Ok(series) => series,
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Error: {e}"));
            return;
        }
    };

    // One BarChart per category so the legend lists each category once.
    // Bar x positions stay the row index, keeping one bar per row.
    let mut category_order: Vec<String> = Vec::new();
    let mut bars_by_category: BTreeMap<String, Vec<Bar>> = BTreeMap::new();
    for (row, point) in series.iter().enumerate() {
        let Some(value) = point.value else {
            continue;
        };
        if !category_order.contains(&point.category) {
            category_order.push(point.category.clone());
        }
        bars_by_category
            .entry(point.category.clone())
            .or_default()
            .push(Bar::new(row as f64, value).width(0.7));
    }

    Plot::new("bar_chart")
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label(group)
        .y_axis_label(indicator)
        .show(ui, |plot_ui| {
            for category in &category_order {
                let bars = bars_by_category.remove(category).unwrap_or_default();
                let color = state
                    .group_colors
                    .as_ref()
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::LIGHT_BLUE);
                plot_ui.bar_chart(BarChart::new(bars).name(category).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Trend chart (indicator over time)
// ---------------------------------------------------------------------------

/// Render the trend chart of the selected indicator over the time column,
/// one line per series key (the filter column when present), with markers.
///
/// The pipeline emits rows as-is; time cells without a numeric rendering
/// cannot be placed on the axis and are skipped here.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    let (Some(table), Some(indicator)) = (&state.filtered, &state.trend_indicator) else {
        return;
    };

    let series = match build_line_series(
        table,
        &state.config.time_column,
        indicator,
        state.series_column(),
    ) {
        Ok(series) => series,
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Error: {e}"));
            return;
        }
    };

    let mut series_order: Vec<Option<String>> = Vec::new();
    let mut points_by_series: BTreeMap<Option<String>, Vec<[f64; 2]>> = BTreeMap::new();
    for point in &series {
        let (Some(x), Some(y)) = (point.time.as_f64(), point.value) else {
            continue;
        };
        if !series_order.contains(&point.series) {
            series_order.push(point.series.clone());
        }
        points_by_series
            .entry(point.series.clone())
            .or_default()
            .push([x, y]);
    }

    Plot::new("trend_plot")
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label(&state.config.time_column)
        .y_axis_label(indicator)
        .show(ui, |plot_ui| {
            for key in &series_order {
                let pts = points_by_series.remove(key).unwrap_or_default();
                let color = key
                    .as_deref()
                    .and_then(|k| state.series_colors.as_ref().map(|cm| cm.color_for(k)))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let name = key.clone().unwrap_or_else(|| indicator.clone());

                let line_points: PlotPoints = pts.clone().into();
                plot_ui.line(Line::new(line_points).name(&name).color(color).width(1.5));

                let marker_points: PlotPoints = pts.into();
                plot_ui.points(
                    Points::new(marker_points)
                        .name(&name)
                        .color(color)
                        .radius(2.5),
                );
            }
        });
}
