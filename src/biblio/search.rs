//! Field/value criteria matching over JSON-shaped records.
//!
//! A record matches when ALL criteria hold. String comparison is
//! case-insensitive; everything else is exact equality. A record that lacks a
//! constrained field never matches (the filter fails closed).

use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

/// A single `field = value` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub field: String,
    pub value: Value,
}

impl Criterion {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub fn matches(record: &Record, criteria: &[Criterion]) -> bool {
    criteria.iter().all(|c| match record.get(&c.field) {
        Some(actual) => values_equal(actual, &c.value),
        None => false,
    })
}

/// Filter `records`, preserving input order. An empty criteria set matches
/// everything.
pub fn filter_records(records: Vec<Record>, criteria: &[Criterion]) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| matches(r, criteria))
        .collect()
}

fn values_equal(actual: &Value, wanted: &Value) -> bool {
    match (actual, wanted) {
        (Value::String(a), Value::String(w)) => a.eq_ignore_ascii_case(w),
        _ => actual == wanted,
    }
}
