//! ICAR ADE resource types
//!
//! Serialization follows the exchange schema's "omit absent fields" rule:
//! optional fields are skipped when `None` or empty, while required fields are
//! always written, as `null` when the source row lacks them, so that schema
//! validation downstream reports the gap instead of it disappearing here.

use super::codes::{MilkCharacteristic, MilkingRemark, Quarter};
use super::errors::AdeError;
use super::result::Result;
use serde::Serialize;
use serde_json::Value;

pub const MILKING_VISIT_RESOURCE_TYPE: &str = "icarMilkingVisitEventResource";
pub const ANIMAL_RESOURCE_TYPE: &str = "icarAnimalCoreResource";

/// UN/CEFACT code for kilogram; milk weights are always reported in it
pub const KILOGRAM_UNIT_CODE: &str = "KGM";

/// Resource provenance (icarMetaDataType)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<Value>,
    /// Required
    pub modified: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<Value>,
}

/// Optional `{id, scheme}` identifier such as a trait label or breed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Identifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<Value>,
}

/// Required `{id, scheme}` reference, written even when its parts are missing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceRef {
    pub id: Option<Value>,
    pub scheme: Option<Value>,
}

/// The location the resource was requested for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: String,
    pub scheme: String,
}

/// A `{unitCode, value}` measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<Value>,
    /// Required
    pub value: Option<Value>,
}

impl MeasureValue {
    /// A weight in kilograms
    pub fn kilograms(value: Option<Value>) -> Self {
        Self {
            unit_code: Some(Value::from(KILOGRAM_UNIT_CODE)),
            value,
        }
    }
}

/// Sample bottle details (icarMilkingSampleType)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilkingSample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottle_identifier_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottle_position: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottle_identifier: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_sample_filling_indicator: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Value>,
}

/// One milk characteristic measurement (icarMilkCharacteristicsType)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilkCharacteristicEntry {
    pub characteristic: MilkCharacteristic,
    pub value: Option<Value>,
    pub unit: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measuring_device: Option<Value>,
}

/// Per-quarter milking result (icarQuarterMilkingType)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterMilking {
    pub icar_quarter_id: Quarter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xposition: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yposition: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zposition: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter_milking_duration: Option<MeasureValue>,
    pub quarter_milking_weight: MeasureValue,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icar_quarter_milking_sample: Vec<MilkingSample>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icar_quarter_characteristics: Vec<MilkCharacteristicEntry>,
}

/// A milking visit event (icarMilkingVisitEventResource)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilkingVisit {
    pub resource_type: &'static str,
    pub meta: Meta,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date_time: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trait_label: Option<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contemporary_group: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<Value>,
    pub animal: ResourceRef,
    pub milking_starting_date_time: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milking_duration: Option<MeasureValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milking_visit_duration: Option<MeasureValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milking_type: Option<Value>,
    pub milking_milk_weight: MeasureValue,
    pub milking_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milking_parlour_unit: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milking_box_number: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milking_device_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_device_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milking_shift_local_start_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milking_shift_number: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quarter_milkings: Vec<QuarterMilking>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub animal_milking_sample: Vec<MilkingSample>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub milk_characteristics: Vec<MilkCharacteristicEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub milking_remarks: Vec<MilkingRemark>,
}

impl MilkingVisit {
    /// Dotted paths of required fields the source row did not provide
    pub fn missing_required_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        push_if_none(&mut missing, "meta.modified", &self.meta.modified);
        push_if_none(&mut missing, "animal.id", &self.animal.id);
        push_if_none(&mut missing, "animal.scheme", &self.animal.scheme);
        push_if_none(
            &mut missing,
            "milkingStartingDateTime",
            &self.milking_starting_date_time,
        );
        push_if_none(
            &mut missing,
            "milkingMilkWeight.value",
            &self.milking_milk_weight.value,
        );
        for quarter in &self.quarter_milkings {
            if quarter.quarter_milking_weight.value.is_none() {
                missing.push(format!(
                    "quarterMilkings.{}.quarterMilkingWeight.value",
                    quarter.icar_quarter_id
                ));
            }
        }
        missing
    }

    /// Fails on the first missing required field
    pub fn ensure_complete(&self) -> Result<()> {
        first_missing(self.missing_required_fields())
    }
}

/// Core animal details (icarAnimalCoreResource)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub resource_type: &'static str,
    pub meta: Meta,
    pub location: Location,
    pub identifier: ResourceRef,
    pub specie: Option<Value>,
    pub gender: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_breed: Option<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
}

impl Animal {
    /// Dotted paths of required fields the source row did not provide
    pub fn missing_required_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        push_if_none(&mut missing, "meta.modified", &self.meta.modified);
        push_if_none(&mut missing, "identifier.id", &self.identifier.id);
        push_if_none(&mut missing, "identifier.scheme", &self.identifier.scheme);
        push_if_none(&mut missing, "specie", &self.specie);
        push_if_none(&mut missing, "gender", &self.gender);
        missing
    }

    /// Fails on the first missing required field
    pub fn ensure_complete(&self) -> Result<()> {
        first_missing(self.missing_required_fields())
    }
}

fn push_if_none(missing: &mut Vec<String>, path: &str, value: &Option<Value>) {
    if value.is_none() {
        missing.push(path.to_string());
    }
}

fn first_missing(missing: Vec<String>) -> Result<()> {
    match missing.into_iter().next() {
        Some(path) => Err(AdeError::MissingRequiredField(path)),
        None => Ok(()),
    }
}
