use super::model::{ColumnType, Table};

// ---------------------------------------------------------------------------
// Column classification: categorical vs. numeric
// ---------------------------------------------------------------------------

/// Partition of a table's column names by declared type, in original
/// column order within each set. Boolean and all-null columns belong to
/// neither set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    pub categorical: Vec<String>,
    pub numeric: Vec<String>,
}

/// Classify every column of `table` by its declared type.
///
/// Pure and deterministic: text columns are categorical, integer and real
/// columns are numeric. An empty set on either side is valid and callers
/// degrade accordingly (no numeric columns means no metrics and no charts).
pub fn classify(table: &Table) -> ColumnClassification {
    let mut classification = ColumnClassification::default();
    for col in &table.columns {
        match col.ty {
            ColumnType::Text => classification.categorical.push(col.name.clone()),
            ColumnType::Integer | ColumnType::Real => {
                classification.numeric.push(col.name.clone());
            }
            ColumnType::Boolean | ColumnType::Null => {}
        }
    }
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    fn col(name: &str, ty: ColumnType) -> Column {
        Column {
            name: name.into(),
            ty,
            values: vec![CellValue::Null],
        }
    }

    #[test]
    fn partitions_by_declared_type() {
        let table = Table::new(vec![
            col("State", ColumnType::Text),
            col("Year", ColumnType::Integer),
            col("rate", ColumnType::Real),
            col("urban", ColumnType::Boolean),
            col("blank", ColumnType::Null),
            col("District", ColumnType::Text),
        ]);
        let c = classify(&table);
        assert_eq!(c.categorical, vec!["State", "District"]);
        assert_eq!(c.numeric, vec!["Year", "rate"]);
    }

    #[test]
    fn every_column_lands_in_at_most_one_set() {
        let table = Table::new(vec![
            col("a", ColumnType::Text),
            col("b", ColumnType::Real),
            col("c", ColumnType::Boolean),
        ]);
        let c = classify(&table);
        for name in table.column_names() {
            let in_cat = c.categorical.contains(&name);
            let in_num = c.numeric.contains(&name);
            assert!(!(in_cat && in_num), "{name} classified twice");
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let table = Table::new(vec![
            col("State", ColumnType::Text),
            col("Year", ColumnType::Integer),
        ]);
        assert_eq!(classify(&table), classify(&table));
    }

    #[test]
    fn empty_sets_are_valid() {
        let all_bool = Table::new(vec![col("flag", ColumnType::Boolean)]);
        let c = classify(&all_bool);
        assert!(c.categorical.is_empty());
        assert!(c.numeric.is_empty());

        assert_eq!(classify(&Table::default()), ColumnClassification::default());
    }
}
