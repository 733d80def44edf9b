use crate::stmt::Value;

use std::{collections::VecDeque, sync::Arc};

/// The buffered result of a read.
#[derive(Debug, Default, Clone)]
pub struct Rows {
    columns: Arc<[String]>,
    rows: VecDeque<Vec<Value>>,
    row_count: Option<u64>,
}

/// One row, with access by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Rows {
    /// `row_count` is set when the backend reported how many rows matched.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>, row_count: Option<u64>) -> Rows {
        Rows {
            columns: columns.into(),
            rows: rows.into(),
            row_count,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The row count reported by the backend, if any.
    pub fn row_count(&self) -> Option<u64> {
        self.row_count
    }
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let values = self.rows.pop_front()?;
        Some(Row {
            columns: self.columns.clone(),
            values,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows.len(), Some(self.rows.len()))
    }
}

impl Row {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns
            .iter()
            .cloned()
            .zip(self.values)
            .collect::<Vec<_>>()
            .into_iter()
    }
}
