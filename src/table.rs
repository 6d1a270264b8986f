use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error;

// A single table cell. Variant order matters for deserialization: integral
// JSON numbers must land on Int before Float gets a chance to claim them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    // Hashable stand-in for grouping, since f64 itself is not Eq.
    pub fn key(&self) -> ScalarKey {
        match self {
            Scalar::Null => ScalarKey::Null,
            Scalar::Bool(b) => ScalarKey::Bool(*b),
            Scalar::Int(v) => ScalarKey::Int(*v),
            Scalar::Float(v) => ScalarKey::Float(OrderedFloat(*v)),
            Scalar::Text(s) => ScalarKey::Text(s.clone()),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ScalarKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum TableError {
    #[error("not a valid split-layout JSON document: {0}")]
    Json(String),
    #[error("index length {index} does not match row count {rows}")]
    IndexMismatch { index: usize, rows: usize },
    #[error("row {row} has {width} values for {columns} columns")]
    RaggedRow {
        row: usize,
        width: usize,
        columns: usize,
    },
}

// Rectangular table with named columns and a row index. The shape invariants
// (index.len() == rows.len(), every row as wide as columns) hold for every
// constructed value, including ones decoded from the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    index: Vec<Scalar>,
    rows: Vec<Vec<Scalar>>,
}

// Wire shape of the transport string, matching the (columns, index, data)
// layout the frontend exchanges with the server.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SplitLayout {
    columns: Vec<String>,
    index: Vec<Scalar>,
    data: Vec<Vec<Scalar>>,
}

#[derive(Serialize)]
struct SplitLayoutRef<'a> {
    columns: &'a [String],
    index: &'a [Scalar],
    data: &'a [Vec<Scalar>],
}

impl Table {
    pub fn new(
        columns: Vec<String>,
        index: Vec<Scalar>,
        rows: Vec<Vec<Scalar>>,
    ) -> Result<Self, TableError> {
        if index.len() != rows.len() {
            return Err(TableError::IndexMismatch {
                index: index.len(),
                rows: rows.len(),
            });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    row: i,
                    width: row.len(),
                    columns: columns.len(),
                });
            }
        }
        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    // Builds a table with a fresh integer index.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Scalar>>) -> Result<Self, TableError> {
        let index = (0..rows.len() as i64).map(Scalar::Int).collect();
        Self::new(columns, index, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> &[Scalar] {
        &self.index
    }

    pub fn rows(&self) -> &[Vec<Scalar>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Scalar>> {
        self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn to_transport(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SplitLayoutRef {
            columns: self.columns(),
            index: self.index(),
            data: self.rows(),
        })
    }

    pub fn from_transport(text: &str) -> Result<Self, TableError> {
        let raw: SplitLayout =
            serde_json::from_str(text).map_err(|e| TableError::Json(e.to_string()))?;
        Self::new(raw.columns, raw.index, raw.data)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        Table::from_rows(
            vec!["team".to_string(), "wins".to_string(), "epa".to_string()],
            vec![
                vec![
                    Scalar::Text("KC".to_string()),
                    Scalar::Int(11),
                    Scalar::Float(0.18),
                ],
                vec![Scalar::Text("DET".to_string()), Scalar::Int(12), Scalar::Null],
                vec![
                    Scalar::Text("CHI".to_string()),
                    Scalar::Int(7),
                    Scalar::Float(-0.02),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn round_trip() {
        let table = sample();
        let encoded = table.to_transport().unwrap();
        let decoded = Table::from_transport(&encoded).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn transport_layout() {
        let table = Table::from_rows(
            vec!["a".to_string()],
            vec![vec![Scalar::Int(1)], vec![Scalar::Float(2.5)]],
        )
        .unwrap();
        assert_eq!(
            table.to_transport().unwrap(),
            r#"{"columns":["a"],"index":[0,1],"data":[[1],[2.5]]}"#
        );
    }

    #[test]
    fn decode_mixed_scalars() {
        let table = Table::from_transport(
            r#"{"columns":["a","b"],"index":[0,1],"data":[[1,"x"],[2.5,null]]}"#,
        )
        .unwrap();
        assert_eq!(table.rows()[0], vec![Scalar::Int(1), Scalar::Text("x".to_string())]);
        assert_eq!(table.rows()[1], vec![Scalar::Float(2.5), Scalar::Null]);
        assert_eq!(table.index(), &[Scalar::Int(0), Scalar::Int(1)]);
    }

    #[test]
    fn decode_bool_cells() {
        let table =
            Table::from_transport(r#"{"columns":["flag"],"index":[0],"data":[[true]]}"#).unwrap();
        assert_eq!(table.rows()[0], vec![Scalar::Bool(true)]);
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            Table::from_transport("not a payload"),
            Err(TableError::Json(_))
        ));
    }

    #[test]
    fn rejects_index_mismatch() {
        let result =
            Table::from_transport(r#"{"columns":["a"],"index":[0,1],"data":[[1]]}"#);
        assert_eq!(
            result,
            Err(TableError::IndexMismatch { index: 2, rows: 1 })
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = Table::from_transport(
            r#"{"columns":["a","b"],"index":[0,1],"data":[[1,2],[3]]}"#,
        );
        assert_eq!(
            result,
            Err(TableError::RaggedRow {
                row: 1,
                width: 1,
                columns: 2
            })
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = Table::from_transport(
            r#"{"columns":["a"],"index":[0],"data":[[1]],"name":"extra"}"#,
        );
        assert!(matches!(result, Err(TableError::Json(_))));
    }

    #[test]
    fn column_lookup() {
        let table = sample();
        assert_eq!(table.column_index("wins"), Some(1));
        assert_eq!(table.column_index("losses"), None);
    }
}
