//! Positional rows of JSON cells.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StaffError, StaffResult};

/// A named table of rows; each row is a list of cells.
///
/// Cells may be strings, numbers or null. Rows may be shorter than the
/// widest row; missing cells read as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates a table from rows.
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Indices of rows that contain at least one non-blank cell.
    pub fn data_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|c| !is_blank(c)))
            .map(|(i, _)| i)
    }

    fn cell(&self, row: usize, column: usize) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&Value::Null)
    }

    /// Non-empty string cell (numbers are rendered as text).
    pub fn cell_str(&self, name: &'static str, row: usize, column: usize) -> StaffResult<String> {
        self.cell_opt_str(row, column)
            .ok_or_else(|| invalid(name, row, column, "expected a non-empty value"))
    }

    /// String cell, `None` when null or blank.
    pub fn cell_opt_str(&self, row: usize, column: usize) -> Option<String> {
        match self.cell(row, column) {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Integer cell. Accepts integral numbers and numeric strings.
    pub fn cell_int(&self, name: &'static str, row: usize, column: usize) -> StaffResult<i64> {
        match self.cell(row, column) {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .ok_or_else(|| invalid(name, row, column, format!("expected an integer, got {}", n))),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| invalid(name, row, column, format!("expected an integer, got '{}'", s))),
            other => Err(invalid(name, row, column, format!("expected an integer, got {}", other))),
        }
    }

    /// Float cell. Accepts numbers and numeric strings.
    pub fn cell_f64(&self, name: &'static str, row: usize, column: usize) -> StaffResult<f64> {
        match self.cell(row, column) {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| invalid(name, row, column, format!("expected a number, got {}", n))),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| invalid(name, row, column, format!("expected a number, got '{}'", s))),
            other => Err(invalid(name, row, column, format!("expected a number, got {}", other))),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn invalid(table: &'static str, row: usize, column: usize, message: impl Into<String>) -> StaffError {
    StaffError::InvalidCell {
        table,
        row,
        column,
        message: message.into(),
    }
}
