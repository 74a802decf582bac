use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as GridColumn, TableBuilder};

use crate::data::aggregate;
use crate::data::error::DataResult;
use crate::data::filter::FilterValue;
use crate::data::model::Table;
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Left side panel – filter and chart-axis widgets
// ---------------------------------------------------------------------------

/// Render the left panel: the categorical filter plus the column selectors
/// feeding the charts. Only classified columns are ever offered, so the
/// pipeline's column errors cannot be triggered from here.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    if state.base.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            filter_selector(ui, state);
            indicator_selectors(ui, state);
        });
}

fn filter_selector(ui: &mut Ui, state: &mut AppState) {
    if state.filter_choices.is_empty() {
        return;
    }
    ui.strong(format!("Select {}", state.config.filter_column));

    let choices = state.filter_choices.clone();
    egui::ComboBox::from_id_salt("filter_value")
        .selected_text(state.filter_value.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            let all_selected = state.filter_value == FilterValue::All;
            if ui.selectable_label(all_selected, "All").clicked() {
                state.set_filter_value(FilterValue::All);
            }
            for value in &choices {
                let selected =
                    matches!(&state.filter_value, FilterValue::Value(v) if v == value);
                if ui.selectable_label(selected, value).clicked() {
                    state.set_filter_value(FilterValue::Value(value.clone()));
                }
            }
        });
    ui.separator();
}

fn indicator_selectors(ui: &mut Ui, state: &mut AppState) {
    let numeric = state.classification.numeric.clone();
    let categorical = state.classification.categorical.clone();

    if !numeric.is_empty() && !categorical.is_empty() {
        ui.strong("Select Indicator");
        let current = state.indicator.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("indicator")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &numeric {
                    if ui.selectable_label(current == *col, col).clicked() {
                        state.indicator = Some(col.clone());
                    }
                }
            });

        ui.strong("Group By");
        let current = state.group_by.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("group_by")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &categorical {
                    if ui.selectable_label(current == *col, col).clicked() {
                        state.set_group_by(col.clone());
                    }
                }
            });
        ui.separator();
    }

    if state.has_time_column() && !numeric.is_empty() {
        ui.strong("Select Indicator for Trend");
        let current = state.trend_indicator.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("trend_indicator")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &numeric {
                    if ui.selectable_label(current == *col, col).clicked() {
                        state.trend_indicator = Some(col.clone());
                    }
                }
            });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(base), Some(filtered)) = (&state.base, &state.filtered) {
            ui.label(format!(
                "{} records loaded, {} after filter",
                base.row_count(),
                filtered.row_count()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_raw, "Show Raw Data")
            .clicked()
        {
            state.show_raw = !state.show_raw;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – metrics, charts, raw data
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.base.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a survey file to explore it  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            kpi_row(ui, state);
            ui.separator();

            ui.heading("Visualizations");
            plot::bar_chart(ui, state);

            if state.has_time_column() && state.trend_indicator.is_some() {
                ui.separator();
                ui.heading("Trend Over Time");
                plot::trend_plot(ui, state);
            }

            if state.show_raw {
                ui.separator();
                if let Some(table) = &state.filtered {
                    raw_data_grid(ui, table);
                }
            }
        });
}

/// The three summary metrics over the filtered table, computed like the
/// rest of the dashboard from the first numeric column.
fn kpi_row(ui: &mut Ui, state: &AppState) {
    let Some(filtered) = &state.filtered else {
        return;
    };
    let Some(metric_col) = state.classification.numeric.first() else {
        return;
    };

    ui.heading("Key Indicators");
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Records", aggregate::count(filtered).to_string());
        metric(
            &mut cols[1],
            "Average Value",
            format_stat(aggregate::mean(filtered, metric_col)),
        );
        metric(
            &mut cols[2],
            "Maximum Value",
            format_stat(aggregate::max(filtered, metric_col)),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).strong().size(22.0));
    });
}

/// A statistic over an empty column shows a placeholder instead of failing.
fn format_stat(result: DataResult<f64>) -> String {
    match result {
        Ok(v) => format!("{v:.2}"),
        Err(_) => "n/a".to_string(),
    }
}

/// The filtered table as a scrollable grid.
fn raw_data_grid(ui: &mut Ui, table: &Table) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(GridColumn::auto().resizable(true), table.columns.len())
        .header(20.0, |mut header| {
            for col in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(col.name.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.row_count(), |mut row| {
                let i = row.index();
                for col in &table.columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(col.values[i].to_string());
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
