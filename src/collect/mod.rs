// src/collect/mod.rs
//! Collectors: run the fetch loop against one upstream service and shape the
//! rows for the next stage. Facts are persisted; districts stay in memory for
//! the join.

pub mod districts;
pub mod facts;

pub use districts::{ DistrictCollector, DistrictTable };
pub use facts::{ FactOutcome, StoreFactCollector };

use crate::core::sanitize::json_cell;
use crate::fetch::Record;
use crate::store::DataSet;

/// Flatten upstream rows into a table. Columns appear in first-seen order;
/// a key missing from a row reads as an empty cell.
pub fn records_to_dataset(records: &[Record]) -> DataSet {
    let mut ds = DataSet::default();
    for rec in records {
        for key in rec.keys() {
            if !ds.headers.iter().any(|h| h == key) {
                ds.headers.push(key.clone());
            }
        }
    }
    ds.rows = records
        .iter()
        .map(|rec| {
            ds.headers
                .iter()
                .map(|h| rec.get(h).map(json_cell).unwrap_or_default())
                .collect()
        })
        .collect();
    ds
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn headers_union_in_first_seen_order() {
        let ds = records_to_dataset(&[
            rec(json!({"B": 1, "A": "x"})),
            rec(json!({"A": "y", "C": 2.0})),
        ]);
        assert_eq!(ds.headers, vec!["B", "A", "C"]);
        assert_eq!(ds.rows[0], vec!["1", "x", ""]);
        assert_eq!(ds.rows[1], vec!["", "y", "2"]);
    }
}
