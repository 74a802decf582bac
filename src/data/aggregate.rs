use super::classify::classify;
use super::error::{DataError, DataResult};
use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// One bar of the bar chart: the row's category label and its numeric value
/// (`None` when the numeric cell is null; the renderer skips the bar but the
/// point itself is kept).
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub category: String,
    pub value: Option<f64>,
}

/// One point of the trend chart: the row's time cell, its numeric value and
/// the optional series key it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub time: CellValue,
    pub value: Option<f64>,
    pub series: Option<String>,
}

/// Build the (category, value) pairs for a bar chart: exactly one point per
/// row of `table`, in row order.
///
/// Duplicate categories are NOT merged into a per-category sum or mean; the
/// chart groups rows by color only. Both columns must belong to the table's
/// respective classification sets.
pub fn build_bar_series(
    table: &Table,
    categorical_column: &str,
    numeric_column: &str,
) -> DataResult<Vec<BarPoint>> {
    let classification = classify(table);
    if !classification
        .categorical
        .iter()
        .any(|c| c == categorical_column)
    {
        return Err(DataError::InvalidAggregation {
            column: categorical_column.to_string(),
            expected: "categorical",
        });
    }
    if !classification.numeric.iter().any(|c| c == numeric_column) {
        return Err(DataError::InvalidAggregation {
            column: numeric_column.to_string(),
            expected: "numeric",
        });
    }

    // Both lookups are infallible after the classification check.
    let categories = &table.column(categorical_column).unwrap().values;
    let values = &table.column(numeric_column).unwrap().values;

    Ok(categories
        .iter()
        .zip(values.iter())
        .map(|(cat, val)| BarPoint {
            category: cat.to_string(),
            value: val.as_f64(),
        })
        .collect())
}

/// Build the (time, value, series) triples for a line chart: one triple per
/// row of `table`, in row order. No resampling or sorting by time happens
/// here; temporal ordering is the renderer's concern.
///
/// `time_column` may have any type (ordinal axis); `numeric_column` must be
/// numeric. A `series_column` that is absent from the table degrades
/// silently to the unkeyed form.
pub fn build_line_series(
    table: &Table,
    time_column: &str,
    numeric_column: &str,
    series_column: Option<&str>,
) -> DataResult<Vec<LinePoint>> {
    let times = &table
        .column(time_column)
        .ok_or_else(|| DataError::ColumnNotFound(time_column.to_string()))?
        .values;

    let classification = classify(table);
    if !classification.numeric.iter().any(|c| c == numeric_column) {
        return Err(DataError::InvalidAggregation {
            column: numeric_column.to_string(),
            expected: "numeric",
        });
    }
    let values = &table.column(numeric_column).unwrap().values;

    let series = series_column.and_then(|name| table.column(name));

    Ok(times
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(row, (time, val))| LinePoint {
            time: time.clone(),
            value: val.as_f64(),
            series: series.map(|col| col.values[row].to_string()),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Number of rows in the (possibly filtered) table.
pub fn count(table: &Table) -> usize {
    table.row_count()
}

/// Mean of the non-null values of `column`, rounded to 2 decimals.
pub fn mean(table: &Table, column: &str) -> DataResult<f64> {
    let values = numeric_values(table, column)?;
    let sum: f64 = values.iter().sum();
    Ok(round2(sum / values.len() as f64))
}

/// Maximum of the non-null values of `column`, rounded to 2 decimals.
pub fn max(table: &Table, column: &str) -> DataResult<f64> {
    let values = numeric_values(table, column)?;
    Ok(round2(values.into_iter().fold(f64::NEG_INFINITY, f64::max)))
}

fn numeric_values(table: &Table, column: &str) -> DataResult<Vec<f64>> {
    let col = table
        .column(column)
        .ok_or_else(|| DataError::ColumnNotFound(column.to_string()))?;
    let values: Vec<f64> = col.values.iter().filter_map(CellValue::as_f64).collect();
    if values.is_empty() {
        return Err(DataError::EmptyColumn(column.to_string()));
    }
    Ok(values)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter_by_column, FilterValue};
    use crate::data::model::{Column, ColumnType};

    /// The worked example: three survey rows over two states.
    fn example_table() -> Table {
        Table::new(vec![
            Column {
                name: "State".into(),
                ty: ColumnType::Text,
                values: vec![
                    CellValue::Str("A".into()),
                    CellValue::Str("B".into()),
                    CellValue::Str("A".into()),
                ],
            },
            Column {
                name: "Year".into(),
                ty: ColumnType::Integer,
                values: vec![
                    CellValue::Int(2015),
                    CellValue::Int(2016),
                    CellValue::Int(2017),
                ],
            },
            Column {
                name: "X".into(),
                ty: ColumnType::Integer,
                values: vec![
                    CellValue::Int(10),
                    CellValue::Int(20),
                    CellValue::Int(30),
                ],
            },
        ])
    }

    #[test]
    fn bar_series_is_one_point_per_row() {
        let t = example_table();
        let series = build_bar_series(&t, "State", "X").unwrap();
        assert_eq!(series.len(), t.row_count());
        assert_eq!(series[0].category, "A");
        assert_eq!(series[0].value, Some(10.0));
        assert_eq!(series[2].category, "A");
        assert_eq!(series[2].value, Some(30.0));
    }

    #[test]
    fn bar_series_does_not_merge_duplicate_categories() {
        let t = example_table();
        let filtered = filter_by_column(&t, "State", &FilterValue::Value("A".into())).unwrap();
        let series = build_bar_series(&filtered, "State", "X").unwrap();
        assert_eq!(
            series,
            vec![
                BarPoint {
                    category: "A".into(),
                    value: Some(10.0)
                },
                BarPoint {
                    category: "A".into(),
                    value: Some(30.0)
                },
            ]
        );
    }

    #[test]
    fn bar_series_rejects_misclassified_columns() {
        let t = example_table();
        // numeric where categorical expected
        let err = build_bar_series(&t, "X", "Year").unwrap_err();
        assert!(matches!(err, DataError::InvalidAggregation { .. }));
        // categorical where numeric expected
        let err = build_bar_series(&t, "State", "State").unwrap_err();
        assert!(matches!(err, DataError::InvalidAggregation { .. }));
        // unknown column
        let err = build_bar_series(&t, "District", "X").unwrap_err();
        assert!(matches!(err, DataError::InvalidAggregation { .. }));
    }

    #[test]
    fn bar_series_on_empty_table_is_empty() {
        let t = example_table();
        let empty = t.take_rows(&[]);
        assert!(build_bar_series(&empty, "State", "X").unwrap().is_empty());
    }

    #[test]
    fn bar_series_keeps_null_values_as_points() {
        let mut t = example_table();
        t.columns[2].values[1] = CellValue::Null;
        let series = build_bar_series(&t, "State", "X").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[1].value, None);
    }

    #[test]
    fn line_series_emits_one_triple_per_row() {
        let t = example_table();
        let series = build_line_series(&t, "Year", "X", Some("State")).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].time, CellValue::Int(2015));
        assert_eq!(series[0].value, Some(10.0));
        assert_eq!(series[0].series.as_deref(), Some("A"));
        assert_eq!(series[1].series.as_deref(), Some("B"));
    }

    #[test]
    fn line_series_degrades_without_series_column() {
        let t = example_table();
        let keyed = build_line_series(&t, "Year", "X", Some("District")).unwrap();
        let unkeyed = build_line_series(&t, "Year", "X", None).unwrap();
        assert_eq!(keyed, unkeyed);
        assert!(keyed.iter().all(|p| p.series.is_none()));
    }

    #[test]
    fn line_series_requires_existing_time_column() {
        let t = example_table();
        let err = build_line_series(&t, "Month", "X", None).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(_)));
    }

    #[test]
    fn line_series_time_axis_may_be_any_type() {
        let t = example_table();
        // A text column works as the ordinal axis.
        let series = build_line_series(&t, "State", "X", None).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].time, CellValue::Str("A".into()));
    }

    #[test]
    fn statistics_match_worked_example() {
        let t = example_table();
        assert_eq!(count(&t), 3);

        let filtered = filter_by_column(&t, "State", &FilterValue::Value("A".into())).unwrap();
        assert_eq!(mean(&filtered, "X").unwrap(), 20.0);
        assert_eq!(max(&filtered, "X").unwrap(), 30.0);
    }

    #[test]
    fn statistics_round_to_two_decimals() {
        let t = Table::new(vec![Column {
            name: "rate".into(),
            ty: ColumnType::Real,
            values: vec![
                CellValue::Float(1.0),
                CellValue::Float(2.0),
                CellValue::Float(2.005),
            ],
        }]);
        assert_eq!(mean(&t, "rate").unwrap(), 1.67);
        assert_eq!(max(&t, "rate").unwrap(), 2.01);
    }

    #[test]
    fn single_row_statistics_equal_the_row() {
        let t = example_table();
        let single = t.take_rows(&[1]);
        assert_eq!(mean(&single, "X").unwrap(), 20.0);
        assert_eq!(max(&single, "X").unwrap(), 20.0);
    }

    #[test]
    fn statistics_skip_null_values() {
        let t = Table::new(vec![Column {
            name: "X".into(),
            ty: ColumnType::Integer,
            values: vec![CellValue::Int(10), CellValue::Null, CellValue::Int(30)],
        }]);
        assert_eq!(mean(&t, "X").unwrap(), 20.0);
        assert_eq!(max(&t, "X").unwrap(), 30.0);
    }

    #[test]
    fn empty_column_statistic_is_recoverable_error() {
        let t = Table::new(vec![Column {
            name: "X".into(),
            ty: ColumnType::Integer,
            values: vec![CellValue::Null, CellValue::Null],
        }]);
        assert!(matches!(
            mean(&t, "X").unwrap_err(),
            DataError::EmptyColumn(_)
        ));
        assert!(matches!(
            max(&t, "X").unwrap_err(),
            DataError::EmptyColumn(_)
        ));
        assert!(matches!(
            mean(&t, "missing").unwrap_err(),
            DataError::ColumnNotFound(_)
        ));
    }
}
