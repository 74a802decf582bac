use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// The column's [`ColumnType`] fixes which variant its cells may carry
/// (plus `Null` for missing entries).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Str(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for charting and statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// ColumnType – the declared scalar type of a column
// ---------------------------------------------------------------------------

/// The uniform declared type of a column, fixed once at load time.
/// Classification operates over this tag, never over individual cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    Boolean,
    /// Column with no usable values at all.
    Null,
}

// ---------------------------------------------------------------------------
// Column / Table – the loaded dataset
// ---------------------------------------------------------------------------

/// One named column: a declared type and its cells in row order.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub values: Vec<CellValue>,
}

/// An ordered sequence of named columns of equal length.
///
/// The base table is built once by the loader and never mutated; filtering
/// produces new derived `Table`s via [`Table::take_rows`].
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Table { columns }
    }

    /// Number of rows (the common length of all columns).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Capability query used by the presentation layer to decide which
    /// widgets to offer (e.g. the trend chart when a time column exists).
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Build a derived table containing the given rows, in the given order,
    /// with all columns retained. Indices must be in bounds.
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|col| Column {
                name: col.name.clone(),
                ty: col.ty,
                values: indices.iter().map(|&i| col.values[i].clone()).collect(),
            })
            .collect();
        Table { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
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
    fn row_count_is_common_column_length() {
        let t = sample_table();
        assert_eq!(t.row_count(), 3);
        assert!(!t.is_empty());
        assert_eq!(Table::default().row_count(), 0);
    }

    #[test]
    fn has_column_answers_capability_queries() {
        let t = sample_table();
        assert!(t.has_column("State"));
        assert!(t.has_column("X"));
        assert!(!t.has_column("Year"));
    }

    #[test]
    fn take_rows_preserves_order_and_columns() {
        let t = sample_table();
        let derived = t.take_rows(&[0, 2]);
        assert_eq!(derived.row_count(), 2);
        assert_eq!(derived.column_names(), t.column_names());
        assert_eq!(
            derived.column("X").unwrap().values,
            vec![CellValue::Int(10), CellValue::Int(30)]
        );
        // original untouched
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn cell_display_and_as_f64() {
        assert_eq!(CellValue::Str("Kerala".into()).to_string(), "Kerala");
        assert_eq!(CellValue::Int(2015).to_string(), "2015");
        assert_eq!(CellValue::Float(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Null.to_string(), "");

        assert_eq!(CellValue::Int(7).as_f64(), Some(7.0));
        assert_eq!(CellValue::Float(0.25).as_f64(), Some(0.25));
        assert_eq!(CellValue::Str("7".into()).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }
}
