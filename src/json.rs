//! Building tables from JSON documents.
//!
//! Requires the `json` feature.
//!
//! Two document shapes are accepted:
//!
//! - an object of arrays, read as an ordered column mapping (keys become the
//!   header row, arrays are transposed into data rows);
//! - an array of arrays, read as raw rows.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tabmark::Table;
//!
//! let doc = serde_json::json!({"x": [1, 2], "y": ["a"]});
//! let table = Table::from_json(&doc)?;
//! assert!(table.has_header());
//! ```

use serde_json::Value as Json;

use crate::error::{Result, TableError};
use crate::table::{Table, TableBuilder};
use crate::value::Value;

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        match json {
            Json::Null => Value::Empty,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .unwrap_or_else(|| Value::Str(n.to_string())),
            Json::String(s) => Value::Str(s.clone()),
            nested => Value::Str(nested.to_string()),
        }
    }
}

impl Table {
    /// Build a table from an object of arrays or an array of arrays.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] for other document shapes, and the
    /// usual construction errors otherwise.
    pub fn from_json(doc: &Json) -> Result<Self> {
        match doc {
            Json::Object(map) => {
                let mut columns = Vec::with_capacity(map.len());
                for (key, column) in map {
                    let Json::Array(items) = column else {
                        return Err(TableError::validation(format!(
                            "column '{key}' is not an array"
                        )));
                    };
                    columns.push((key.as_str(), items.iter().map(Value::from)));
                }
                TableBuilder::from_mapping(columns).build()
            }
            Json::Array(rows) => {
                let mut builder = Table::builder();
                for (i, row) in rows.iter().enumerate() {
                    let Json::Array(items) = row else {
                        return Err(TableError::validation(format!("row {i} is not an array")));
                    };
                    builder = builder.row(items.iter().map(Value::from).collect::<Vec<_>>());
                }
                builder.build()
            }
            other => Err(TableError::validation(format!(
                "expected an object or array, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Markup;
    use serde_json::json;

    #[test]
    fn test_object_of_arrays_keeps_key_order() {
        let doc = json!({"zeta": [1, 2], "alpha": [3]});
        let table = Table::from_json(&doc).unwrap();
        assert!(table.has_header());
        assert_eq!(table.cell(0, 0).unwrap().value(), &Value::from("zeta"));
        assert_eq!(table.cell(0, 1).unwrap().value(), &Value::from("alpha"));
        assert!(table.cell(2, 1).unwrap().value().is_empty_fill());
    }

    #[test]
    fn test_array_of_arrays() {
        let doc = json!([[1, 2.5, "x"], [true, null]]);
        let table = Table::from_json(&doc).unwrap();
        assert!(!table.has_header());
        assert_eq!(
            table.to_html().unwrap(),
            "<table>\n<tr><td>1</td><td>2.5</td><td>x</td></tr>\n<tr><td>True</td><td></td><td></td></tr>\n</table>"
        );
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(Table::from_json(&json!(3)).is_err());
        assert!(Table::from_json(&json!({"a": 1})).is_err());
        assert!(Table::from_json(&json!([1, 2])).is_err());
    }
}
