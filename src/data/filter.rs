use std::fmt;

use super::error::{DataError, DataResult};
use super::model::Table;

// ---------------------------------------------------------------------------
// Filter selection: one categorical column, one value or "All"
// ---------------------------------------------------------------------------

/// The current filter selection for the configured filter column.
/// `All` is the no-filter sentinel; `Value` matches rows whose cell in the
/// filter column displays as the given string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterValue {
    #[default]
    All,
    Value(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::All => write!(f, "All"),
            FilterValue::Value(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return a derived table containing the rows of `table` that match
/// `selection` on `column`, in original row order, all columns retained.
///
/// `FilterValue::All` yields a table equal to the input. Null cells never
/// match a concrete value. Unknown columns are a caller bug and error out
/// rather than silently passing everything through.
pub fn filter_by_column(
    table: &Table,
    column: &str,
    selection: &FilterValue,
) -> DataResult<Table> {
    let col = table
        .column(column)
        .ok_or_else(|| DataError::ColumnNotFound(column.to_string()))?;

    let value = match selection {
        FilterValue::All => return Ok(table.clone()),
        FilterValue::Value(v) => v,
    };

    let indices: Vec<usize> = col
        .values
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_null() && cell.to_string() == *value)
        .map(|(i, _)| i)
        .collect();

    Ok(table.take_rows(&indices))
}

/// The sorted, deduplicated, non-null values of `column`, used to populate
/// the filter widget. The "All" entry is prepended by the caller.
pub fn distinct_values(table: &Table, column: &str) -> DataResult<Vec<String>> {
    let col = table
        .column(column)
        .ok_or_else(|| DataError::ColumnNotFound(column.to_string()))?;

    let mut values: Vec<String> = col
        .values
        .iter()
        .filter(|cell| !cell.is_null())
        .map(|cell| cell.to_string())
        .collect();
    values.sort();
    values.dedup();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column, ColumnType};

    fn survey_table() -> Table {
        Table::new(vec![
            Column {
                name: "State".into(),
                ty: ColumnType::Text,
                values: vec![
                    CellValue::Str("Kerala".into()),
                    CellValue::Str("Assam".into()),
                    CellValue::Null,
                    CellValue::Str("Kerala".into()),
                ],
            },
            Column {
                name: "Year".into(),
                ty: ColumnType::Integer,
                values: vec![
                    CellValue::Int(2015),
                    CellValue::Int(2016),
                    CellValue::Int(2017),
                    CellValue::Int(2018),
                ],
            },
        ])
    }

    #[test]
    fn all_is_the_identity() {
        let t = survey_table();
        let out = filter_by_column(&t, "State", &FilterValue::All).unwrap();
        assert_eq!(out.row_count(), t.row_count());
        assert_eq!(out.column_names(), t.column_names());
        assert_eq!(
            out.column("Year").unwrap().values,
            t.column("Year").unwrap().values
        );
    }

    #[test]
    fn value_filter_keeps_matching_rows_in_order() {
        let t = survey_table();
        let out =
            filter_by_column(&t, "State", &FilterValue::Value("Kerala".into())).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(
            out.column("Year").unwrap().values,
            vec![CellValue::Int(2015), CellValue::Int(2018)]
        );
        for cell in &out.column("State").unwrap().values {
            assert_eq!(cell.to_string(), "Kerala");
        }
    }

    #[test]
    fn null_cells_never_match() {
        let t = survey_table();
        // The empty string is the display form of Null, but null rows are
        // excluded before comparison.
        let out = filter_by_column(&t, "State", &FilterValue::Value(String::new())).unwrap();
        assert_eq!(out.row_count(), 0);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let t = survey_table();
        let err = filter_by_column(&t, "District", &FilterValue::All).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(_)));
        let err = distinct_values(&t, "District").unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(_)));
    }

    #[test]
    fn distinct_values_sorted_deduped_non_null() {
        let t = survey_table();
        let vals = distinct_values(&t, "State").unwrap();
        assert_eq!(vals, vec!["Assam".to_string(), "Kerala".to_string()]);
    }

    #[test]
    fn distinct_values_render_non_text_columns() {
        let t = survey_table();
        let vals = distinct_values(&t, "Year").unwrap();
        assert_eq!(vals, vec!["2015", "2016", "2017", "2018"]);
    }

    #[test]
    fn filter_value_labels() {
        assert_eq!(FilterValue::All.to_string(), "All");
        assert_eq!(FilterValue::Value("Goa".into()).to_string(), "Goa");
        assert_eq!(FilterValue::default(), FilterValue::All);
    }
}
