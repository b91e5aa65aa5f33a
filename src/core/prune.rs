//! Removal of empty substructures
//!
//! Rows carry every column the query selects, mostly null. A substructure
//! whose fields all came back empty is dropped rather than emitted as `{}`.
//! Required fields are never pruned; they serialize as `null` instead.

use crate::domain::resource::{Identifier, MeasureValue, MilkingSample};
use serde_json::Value;

/// Null, `[]` and `{}` count as empty; empty strings and zero do not
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Drops an empty column value
pub fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !is_empty_value(v))
}

/// A substructure that disappears when none of its fields are set
pub trait Prune: Sized {
    fn is_empty(&self) -> bool;

    fn pruned(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl Prune for Identifier {
    fn is_empty(&self) -> bool {
        self.id.is_none() && self.scheme.is_none()
    }
}

impl Prune for MeasureValue {
    fn is_empty(&self) -> bool {
        self.unit_code.is_none() && self.value.is_none()
    }
}

impl Prune for MilkingSample {
    fn is_empty(&self) -> bool {
        self.bottle_identifier_type.is_none()
            && self.rack_number.is_none()
            && self.bottle_position.is_none()
            && self.bottle_identifier.is_none()
            && self.valid_sample_filling_indicator.is_none()
            && self.operator.is_none()
    }
}
