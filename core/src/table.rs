//! Tabular view of a record sequence.
//!
//! Columns are the union of all record keys in first-seen order. A record
//! that lacks a column gets `null` in that cell.

use std::collections::HashMap;

use serde_json::Value;

use crate::types::Record;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn from_records(records: &[Record]) -> Self {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut columns = Vec::new();
        for key in records.iter().flat_map(|record| record.keys()) {
            if !positions.contains_key(key.as_str()) {
                positions.insert(key.as_str(), columns.len());
                columns.push(key.clone());
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                let mut row = vec![Value::Null; columns.len()];
                for (key, value) in record {
                    row[positions[key.as_str()]] = value.clone();
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Turn rows back into records. Every record carries every column;
    /// cells that were missing come back as `null`.
    pub fn into_records(self) -> Vec<Record> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn uniform_records_map_to_rows_and_columns() {
        let table = Table::from_records(&[
            record(json!({"id": 1, "name": "a"})),
            record(json!({"id": 2, "name": "b"})),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["id", "name"]);
        assert_eq!(table.rows()[0], vec![json!(1), json!("a")]);
        assert_eq!(table.rows()[1], vec![json!(2), json!("b")]);
    }

    #[test]
    fn columns_follow_first_seen_order() {
        let table = Table::from_records(&[
            record(json!({"name": "a", "id": 1})),
            record(json!({"id": 2, "owner": {"id": 7}, "name": "b"})),
        ]);

        assert_eq!(table.columns(), ["name", "id", "owner"]);
        assert_eq!(table.get(0, "owner"), Some(&Value::Null));
        assert_eq!(table.get(1, "owner"), Some(&json!({"id": 7})));
    }

    #[test]
    fn column_iterates_cells() {
        let table = Table::from_records(&[
            record(json!({"id": 1})),
            record(json!({"id": 2})),
            record(json!({"id": 3})),
        ]);

        let ids: Vec<_> = table.column("id").unwrap().cloned().collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = Table::from_records(&[]);
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn into_records_fills_missing_with_null() {
        let table = Table::from_records(&[
            record(json!({"id": 1, "name": "a"})),
            record(json!({"id": 2})),
        ]);

        let records = table.into_records();
        assert_eq!(records[1], record(json!({"id": 2, "name": null})));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let table = Table::from_records(&[record(json!({"id": 1}))]);
        assert!(table.get(5, "id").is_none());
    }
}
