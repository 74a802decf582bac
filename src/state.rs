use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::classify::{classify, ColumnClassification};
use crate::data::filter::{distinct_values, filter_by_column, FilterValue};
use crate::data::loader::TableStore;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every interaction runs one synchronous classify → filter → aggregate pass
/// over the cached base table; the aggregate step happens in the chart
/// renderers, the first two are cached here.
pub struct AppState {
    /// Dashboard configuration (filter and time column names, data path).
    pub config: DashboardConfig,

    /// Backing store of the base table (None until a file is chosen).
    pub store: Option<TableStore>,

    /// The loaded base table, shared and never mutated.
    pub base: Option<Arc<Table>>,

    /// Categorical / numeric column sets of the base table.
    pub classification: ColumnClassification,

    /// Distinct values of the filter column ("All" is prepended by the UI).
    pub filter_choices: Vec<String>,

    /// Current filter selection.
    pub filter_value: FilterValue,

    /// Row-filtered derived table (recomputed on every filter change).
    pub filtered: Option<Table>,

    /// Numeric column charted in the bar chart.
    pub indicator: Option<String>,

    /// Categorical column keying bar colours.
    pub group_by: Option<String>,

    /// Numeric column charted in the trend chart.
    pub trend_indicator: Option<String>,

    /// Colours for the group-by categories.
    pub group_colors: Option<ColorMap>,

    /// Colours for the trend series (keyed by the filter column).
    pub series_colors: Option<ColorMap>,

    /// Whether the raw-data grid is shown.
    pub show_raw: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state, loading the configured dataset if any.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState {
            config,
            store: None,
            base: None,
            classification: ColumnClassification::default(),
            filter_choices: Vec::new(),
            filter_value: FilterValue::All,
            filtered: None,
            indicator: None,
            group_by: None,
            trend_indicator: None,
            group_colors: None,
            series_colors: None,
            show_raw: false,
            status_message: None,
        };
        if let Some(path) = state.config.data_path.clone() {
            state.open_path(&path);
        }
        state
    }

    /// Point the dashboard at a new backing file and load it.
    pub fn open_path(&mut self, path: &Path) {
        let store = TableStore::new(path);
        match store.load() {
            Ok(table) => {
                log::info!(
                    "loaded {} rows, columns {:?} from {}",
                    table.row_count(),
                    table.column_names(),
                    path.display()
                );
                self.store = Some(store);
                self.set_table(table);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded base table, initialise selections and colours.
    pub fn set_table(&mut self, table: Arc<Table>) {
        self.classification = classify(&table);

        self.filter_choices = if table.has_column(&self.config.filter_column) {
            distinct_values(&table, &self.config.filter_column).unwrap_or_default()
        } else {
            Vec::new()
        };
        self.filter_value = FilterValue::All;

        // Defaults mirror the widget option order: first numeric column as
        // the indicator, first categorical column as the grouping.
        self.indicator = self.classification.numeric.first().cloned();
        self.trend_indicator = self.indicator.clone();
        self.group_by = self.classification.categorical.first().cloned();

        self.series_colors = (!self.filter_choices.is_empty())
            .then(|| ColorMap::new(&self.config.filter_column, &self.filter_choices));

        self.base = Some(table);
        self.rebuild_group_colors();
        self.status_message = None;
        self.refilter();
    }

    /// Rebuild the bar-chart colour map from the current `group_by` column.
    /// Colours key off the base table so they stay stable under filtering.
    pub fn rebuild_group_colors(&mut self) {
        self.group_colors = match (&self.base, &self.group_by) {
            (Some(base), Some(col)) => distinct_values(base, col)
                .ok()
                .map(|values| ColorMap::new(col, &values)),
            _ => None,
        };
    }

    /// Recompute the derived table after a filter change.
    pub fn refilter(&mut self) {
        let Some(base) = &self.base else {
            self.filtered = None;
            return;
        };
        if !base.has_column(&self.config.filter_column) {
            // No filter column in this dataset: the derived table is the
            // base table itself.
            self.filtered = Some((**base).clone());
            return;
        }
        match filter_by_column(base, &self.config.filter_column, &self.filter_value) {
            Ok(table) => self.filtered = Some(table),
            Err(e) => {
                log::error!("filter failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_filter_value(&mut self, value: FilterValue) {
        self.filter_value = value;
        self.refilter();
    }

    pub fn set_group_by(&mut self, column: String) {
        self.group_by = Some(column);
        self.rebuild_group_colors();
    }

    /// The trend chart's series column: the filter column when the table
    /// has it, otherwise the unkeyed form.
    pub fn series_column(&self) -> Option<&str> {
        let base = self.base.as_deref()?;
        base.has_column(&self.config.filter_column)
            .then_some(self.config.filter_column.as_str())
    }

    /// Whether the trend chart's precondition holds for the loaded table.
    pub fn has_time_column(&self) -> bool {
        self.base
            .as_deref()
            .is_some_and(|t| t.has_column(&self.config.time_column))
    }
}
