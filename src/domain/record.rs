//! Flat path-keyed database rows
//!
//! A [`FlatRecord`] is one row returned by a farm store, with columns named by
//! dot-separated paths (`quartermilkings.LF.quartermilkingweight.value`).
//! Instead of concatenating those paths ad hoc, callers address columns through
//! [`RecordKey`], an enumeration of every path shape the ADE queries produce.

use super::codes::{MilkCharacteristic, MilkingRemark, Quarter};
use super::errors::AdeError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Column names of the non-repeated scalar fields
pub mod fields {
    pub const TOTAL_ITEMS: &str = "totalitems";

    pub const META_SOURCE: &str = "meta.source";
    pub const META_SOURCE_ID: &str = "meta.sourceid";
    pub const META_IS_DELETED: &str = "meta.isdeleted";
    pub const META_MODIFIED: &str = "meta.modified";
    pub const META_CREATED: &str = "meta.created";
    pub const META_CREATOR: &str = "meta.creator";
    pub const META_VALID_FROM: &str = "meta.validfrom";
    pub const META_VALID_TO: &str = "meta.validto";

    pub const ID: &str = "id";
    pub const EVENT_DATE_TIME: &str = "eventdatetime";
    pub const TRAIT_LABEL_ID: &str = "traitlabel.id";
    pub const TRAIT_LABEL_SCHEME: &str = "traitlabel.scheme";
    pub const RESPONSIBLE: &str = "responsible";
    pub const CONTEMPORARY_GROUP: &str = "contemporarygroup";
    pub const REMARK: &str = "remark";
    pub const ANIMAL_ID: &str = "animal.id";
    pub const ANIMAL_SCHEME: &str = "animal.scheme";
    pub const MILKING_STARTING_DATE_TIME: &str = "milkingstartingdatetime";
    pub const MILKING_TYPE: &str = "milkingtype";
    pub const MILKING_COMPLETE: &str = "milkingcomplete";
    pub const MILKING_PARLOUR_UNIT: &str = "milkingparlourunit";
    pub const MILKING_BOX_NUMBER: &str = "milkingboxnumber";
    pub const MILKING_DEVICE_ID: &str = "milkingdeviceid";
    pub const MEASURE_DEVICE_ID: &str = "measuredeviceid";
    pub const MILKING_SHIFT_LOCAL_START_DATE: &str = "milkingshiftlocalstartdate";
    pub const MILKING_SHIFT_NUMBER: &str = "milkingshiftnumber";

    pub const ANIMAL_IDENTIFIER_ID: &str = "animal.identifier.id";
    pub const ANIMAL_IDENTIFIER_SCHEME: &str = "animal.identifier.scheme";
    pub const ANIMAL_SPECIE: &str = "animal.specie";
    pub const ANIMAL_GENDER: &str = "animal.gender";
    pub const ANIMAL_NAME: &str = "animal.name";
    pub const ANIMAL_BREED_ID: &str = "animal.breed.id";
    pub const ANIMAL_BREED_SCHEME: &str = "animal.breed.scheme";
    pub const ANIMAL_BIRTH_DATE: &str = "animal.birthdate";
}

/// Where a repeated substructure lives: on the visit itself or on one quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Visit,
    Quarter(Quarter),
}

/// Measured quantities encoded as `{prefix}.unitcode` / `{prefix}.value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    MilkingDuration,
    MilkingVisitDuration,
    MilkWeight,
    QuarterDuration(Quarter),
    QuarterWeight(Quarter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurePart {
    UnitCode,
    Value,
}

/// Milking robot coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Fields of a milk sample (icarMilkingSampleType)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleField {
    BottleIdentifierType,
    RackNumber,
    BottlePosition,
    BottleIdentifier,
    ValidSampleFillingIndicator,
    Operator,
}

impl SampleField {
    fn segment(&self) -> &'static str {
        match self {
            SampleField::BottleIdentifierType => "bottleidentifiertype",
            SampleField::RackNumber => "racknumber",
            SampleField::BottlePosition => "bottleposition",
            SampleField::BottleIdentifier => "bottleidentifier",
            SampleField::ValidSampleFillingIndicator => "validsamplefillingindicator",
            SampleField::Operator => "operator",
        }
    }
}

/// Fields of one milk characteristic measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicField {
    Value,
    Unit,
    MeasuringDevice,
}

impl CharacteristicField {
    fn segment(&self) -> &'static str {
        match self {
            CharacteristicField::Value => "value",
            CharacteristicField::Unit => "unit",
            CharacteristicField::MeasuringDevice => "measuringdevice",
        }
    }
}

/// A typed column address within a [`FlatRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    /// A non-repeated column, see [`fields`]
    Scalar(&'static str),
    Measure(Measure, MeasurePart),
    Position(Quarter, Axis),
    Sample(Scope, SampleField),
    Characteristic(Scope, MilkCharacteristic, CharacteristicField),
    Remark(MilkingRemark),
}

impl RecordKey {
    /// The column name this key resolves to
    pub fn path(&self) -> String {
        match self {
            RecordKey::Scalar(name) => (*name).to_string(),
            RecordKey::Measure(measure, part) => {
                let prefix = match measure {
                    Measure::MilkingDuration => "milkingduration".to_string(),
                    Measure::MilkingVisitDuration => "milkingvisitduration".to_string(),
                    Measure::MilkWeight => "milkingmilkweight".to_string(),
                    Measure::QuarterDuration(q) => {
                        format!("quartermilkings.{q}.quartermilkingduration")
                    }
                    Measure::QuarterWeight(q) => format!("quartermilkings.{q}.quartermilkingweight"),
                };
                let part = match part {
                    MeasurePart::UnitCode => "unitcode",
                    MeasurePart::Value => "value",
                };
                format!("{prefix}.{part}")
            }
            RecordKey::Position(q, axis) => {
                let axis = match axis {
                    Axis::X => "xposition",
                    Axis::Y => "yposition",
                    Axis::Z => "zposition",
                };
                format!("quartermilkings.{q}.{axis}")
            }
            RecordKey::Sample(Scope::Visit, field) => {
                format!("animalmilkingsample.{}", field.segment())
            }
            RecordKey::Sample(Scope::Quarter(q), field) => {
                format!("quartermilkings.{q}.icarquartermilkingsample.{}", field.segment())
            }
            RecordKey::Characteristic(Scope::Visit, code, field) => {
                format!("milkcharacteristics.characteristic.{code}.{}", field.segment())
            }
            RecordKey::Characteristic(Scope::Quarter(q), code, field) => format!(
                "quartermilkings.{q}.icarquartercharacteristics.{code}.{}",
                field.segment()
            ),
            RecordKey::Remark(remark) => format!("milkingremarks.{}", remark.key()),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One database row keyed by column path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord(Map<String, Value>);

impl FlatRecord {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self(columns)
    }

    /// Converts a JSON row object into a record
    ///
    /// # Errors
    ///
    /// Returns `AdeError::Serialization` if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(columns) => Ok(Self(columns)),
            other => Err(AdeError::Serialization(format!(
                "Expected a row object, got: {other}"
            ))),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// Whether the column exists, even if its value is null
    pub fn contains(&self, key: &RecordKey) -> bool {
        self.0.contains_key(&key.path())
    }

    /// The column value, treating null as absent
    pub fn value(&self, key: &RecordKey) -> Option<Value> {
        self.0.get(&key.path()).filter(|v| !v.is_null()).cloned()
    }

    /// Shorthand for [`FlatRecord::value`] on a scalar column
    pub fn scalar(&self, column: &'static str) -> Option<Value> {
        self.value(&RecordKey::Scalar(column))
    }

    /// Whether the column holds exactly the string `"true"`
    ///
    /// Booleans and other spellings do not count; the stores encode flags as
    /// text and only this literal is treated as set.
    pub fn is_literal_true(&self, key: &RecordKey) -> bool {
        matches!(self.0.get(&key.path()), Some(Value::String(s)) if s == "true")
    }

    /// The total item count every row of a paged query carries
    pub fn total_items(&self) -> Option<u64> {
        match self.0.get(fields::TOTAL_ITEMS)? {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> FlatRecord {
        FlatRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_key_paths() {
        assert_eq!(
            RecordKey::Measure(Measure::QuarterWeight(Quarter::LeftFront), MeasurePart::Value).path(),
            "quartermilkings.LF.quartermilkingweight.value"
        );
        assert_eq!(
            RecordKey::Measure(Measure::MilkingVisitDuration, MeasurePart::UnitCode).path(),
            "milkingvisitduration.unitcode"
        );
        assert_eq!(
            RecordKey::Characteristic(
                Scope::Visit,
                MilkCharacteristic::Scc,
                CharacteristicField::Value
            )
            .path(),
            "milkcharacteristics.characteristic.SCC.value"
        );
        assert_eq!(
            RecordKey::Characteristic(
                Scope::Quarter(Quarter::RightRear),
                MilkCharacteristic::AvgCond,
                CharacteristicField::MeasuringDevice
            )
            .path(),
            "quartermilkings.RR.icarquartercharacteristics.AVGCOND.measuringdevice"
        );
        assert_eq!(
            RecordKey::Sample(Scope::Quarter(Quarter::LeftRear), SampleField::RackNumber).path(),
            "quartermilkings.LR.icarquartermilkingsample.racknumber"
        );
        assert_eq!(
            RecordKey::Sample(Scope::Visit, SampleField::Operator).path(),
            "animalmilkingsample.operator"
        );
        assert_eq!(
            RecordKey::Position(Quarter::RightFront, Axis::Z).path(),
            "quartermilkings.RF.zposition"
        );
        assert_eq!(
            RecordKey::Remark(MilkingRemark::TeatSeparated).path(),
            "milkingremarks.teatseparated"
        );
    }

    #[test]
    fn test_contains_counts_null_columns() {
        let r = record(json!({ "id": null }));
        assert!(r.contains(&RecordKey::Scalar(fields::ID)));
        assert_eq!(r.scalar(fields::ID), None);
    }

    #[test]
    fn test_literal_true_only() {
        let r = record(json!({
            "milkingremarks.animalsick": "true",
            "milkingremarks.teatseparated": true,
            "milkingremarks.samplingfailed": "TRUE",
        }));
        assert!(r.is_literal_true(&RecordKey::Remark(MilkingRemark::AnimalSick)));
        assert!(!r.is_literal_true(&RecordKey::Remark(MilkingRemark::TeatSeparated)));
        assert!(!r.is_literal_true(&RecordKey::Remark(MilkingRemark::SamplingFailed)));
        assert!(!r.is_literal_true(&RecordKey::Remark(MilkingRemark::MilkedSeparately)));
    }

    #[test]
    fn test_total_items_number_or_string() {
        assert_eq!(record(json!({ "totalitems": 95 })).total_items(), Some(95));
        assert_eq!(record(json!({ "totalitems": "42" })).total_items(), Some(42));
        assert_eq!(record(json!({})).total_items(), None);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(FlatRecord::from_value(json!([1, 2])).is_err());
    }
}
