//! Resource assembly
//!
//! Combines the scalar columns of a row with the decoded substructures into a
//! complete ADE resource for the requested location.

use crate::core::decode;
use crate::core::prune::{present, Prune};
use crate::domain::codes::UnitTable;
use crate::domain::ids::LocationKey;
use crate::domain::record::{fields, FlatRecord, Measure, RecordKey, Scope};
use crate::domain::resource::{
    Animal, Identifier, Location, Meta, MilkingVisit, ResourceRef, ANIMAL_RESOURCE_TYPE,
    MILKING_VISIT_RESOURCE_TYPE,
};
use serde_json::Value;

/// Per-request inputs that do not come from the row
#[derive(Debug, Clone, Copy)]
pub struct AssemblyContext<'a> {
    pub location: &'a LocationKey,
    /// `meta.source` for rows that do not carry one
    pub source: &'a str,
    pub units: &'a UnitTable,
}

impl AssemblyContext<'_> {
    fn location(&self) -> Location {
        Location {
            id: self.location.id.to_string(),
            scheme: self.location.scheme.to_string(),
        }
    }
}

fn scalar(record: &FlatRecord, column: &'static str) -> Option<Value> {
    present(record.scalar(column))
}

/// Builds `meta`; `modified` is written even when absent
pub fn meta(record: &FlatRecord, default_source: &str) -> Meta {
    Meta {
        source: Some(
            scalar(record, fields::META_SOURCE).unwrap_or_else(|| Value::from(default_source)),
        ),
        source_id: scalar(record, fields::META_SOURCE_ID),
        is_deleted: scalar(record, fields::META_IS_DELETED),
        modified: scalar(record, fields::META_MODIFIED),
        created: scalar(record, fields::META_CREATED),
        creator: scalar(record, fields::META_CREATOR),
        valid_from: scalar(record, fields::META_VALID_FROM),
        valid_to: scalar(record, fields::META_VALID_TO),
    }
}

pub fn trait_label(record: &FlatRecord) -> Option<Identifier> {
    Identifier {
        id: scalar(record, fields::TRAIT_LABEL_ID),
        scheme: scalar(record, fields::TRAIT_LABEL_SCHEME),
    }
    .pruned()
}

/// Assembles one milking visit event from a `get-milking-visits` row
pub fn milking_visit(record: &FlatRecord, ctx: &AssemblyContext<'_>) -> MilkingVisit {
    MilkingVisit {
        resource_type: MILKING_VISIT_RESOURCE_TYPE,
        meta: meta(record, ctx.source),
        location: ctx.location(),
        id: scalar(record, fields::ID),
        event_date_time: scalar(record, fields::EVENT_DATE_TIME),
        trait_label: trait_label(record),
        responsible: scalar(record, fields::RESPONSIBLE),
        contemporary_group: scalar(record, fields::CONTEMPORARY_GROUP),
        remark: scalar(record, fields::REMARK),
        animal: ResourceRef {
            id: scalar(record, fields::ANIMAL_ID),
            scheme: scalar(record, fields::ANIMAL_SCHEME),
        },
        milking_starting_date_time: scalar(record, fields::MILKING_STARTING_DATE_TIME),
        milking_duration: decode::measure(record, Measure::MilkingDuration),
        milking_visit_duration: decode::measure(record, Measure::MilkingVisitDuration),
        milking_type: scalar(record, fields::MILKING_TYPE),
        milking_milk_weight: decode::weight(record, Measure::MilkWeight),
        milking_complete: record.is_literal_true(&RecordKey::Scalar(fields::MILKING_COMPLETE)),
        milking_parlour_unit: scalar(record, fields::MILKING_PARLOUR_UNIT),
        milking_box_number: scalar(record, fields::MILKING_BOX_NUMBER),
        milking_device_id: scalar(record, fields::MILKING_DEVICE_ID),
        measure_device_id: scalar(record, fields::MEASURE_DEVICE_ID),
        milking_shift_local_start_date: scalar(record, fields::MILKING_SHIFT_LOCAL_START_DATE),
        milking_shift_number: scalar(record, fields::MILKING_SHIFT_NUMBER),
        quarter_milkings: decode::quarter_milkings(record, ctx.units),
        animal_milking_sample: decode::samples(record, Scope::Visit),
        milk_characteristics: decode::characteristics(record, Scope::Visit, ctx.units),
        milking_remarks: decode::remarks(record),
    }
}

/// Assembles one animal from a `get-animals` row
pub fn animal(record: &FlatRecord, ctx: &AssemblyContext<'_>) -> Animal {
    Animal {
        resource_type: ANIMAL_RESOURCE_TYPE,
        meta: meta(record, ctx.source),
        location: ctx.location(),
        identifier: ResourceRef {
            id: scalar(record, fields::ANIMAL_IDENTIFIER_ID),
            scheme: scalar(record, fields::ANIMAL_IDENTIFIER_SCHEME),
        },
        specie: scalar(record, fields::ANIMAL_SPECIE),
        gender: scalar(record, fields::ANIMAL_GENDER),
        birth_date: scalar(record, fields::ANIMAL_BIRTH_DATE),
        primary_breed: Identifier {
            id: scalar(record, fields::ANIMAL_BREED_ID),
            scheme: scalar(record, fields::ANIMAL_BREED_SCHEME),
        }
        .pruned(),
        name: scalar(record, fields::ANIMAL_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location() -> LocationKey {
        LocationKey::parse("be.herd", "farm-1").unwrap()
    }

    fn record(value: Value) -> FlatRecord {
        FlatRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_meta_source_precedence() {
        let with_source = record(json!({ "meta.source": "robot.vms", "meta.modified": "m" }));
        assert_eq!(meta(&with_source, "db.local").source, Some(json!("robot.vms")));

        let without = record(json!({ "meta.modified": "m" }));
        assert_eq!(meta(&without, "db.local").source, Some(json!("db.local")));
    }

    #[test]
    fn test_trait_label_pruned() {
        assert_eq!(trait_label(&record(json!({ "traitlabel.id": null }))), None);
        assert_eq!(
            trait_label(&record(json!({ "traitlabel.scheme": "icar" }))),
            Some(Identifier {
                id: None,
                scheme: Some(json!("icar")),
            })
        );
    }

    #[test]
    fn test_milking_visit_scalars() {
        let loc = location();
        let units = UnitTable::default();
        let ctx = AssemblyContext {
            location: &loc,
            source: "db.local",
            units: &units,
        };
        let r = record(json!({
            "meta.modified": "2023-05-01T10:00:00Z",
            "id": "mv-1",
            "animal.id": "BE500",
            "animal.scheme": "eu",
            "milkingstartingdatetime": "2023-05-01T09:55:00Z",
            "milkingmilkweight.value": 12.4,
            "milkingcomplete": "true",
            "milkingtype": null,
            "remark": "",
        }));
        let visit = milking_visit(&r, &ctx);

        assert_eq!(visit.resource_type, MILKING_VISIT_RESOURCE_TYPE);
        assert!(visit.milking_complete);
        assert_eq!(visit.milking_type, None);
        assert_eq!(visit.remark, Some(json!("")));
        assert_eq!(visit.location.scheme, "be.herd");
        assert!(visit.missing_required_fields().is_empty());
    }

    #[test]
    fn test_milking_complete_defaults_false() {
        let loc = location();
        let units = UnitTable::default();
        let ctx = AssemblyContext {
            location: &loc,
            source: "db.local",
            units: &units,
        };
        let visit = milking_visit(&record(json!({ "milkingcomplete": true })), &ctx);
        assert!(!visit.milking_complete);
        assert!(visit.milking_remarks.is_empty());
    }

    #[test]
    fn test_animal_serialization_keeps_required_nulls() {
        let loc = location();
        let units = UnitTable::default();
        let ctx = AssemblyContext {
            location: &loc,
            source: "db.local",
            units: &units,
        };
        let r = record(json!({
            "animal.identifier.id": "BE500",
            "animal.identifier.scheme": "eu",
            "animal.specie": "Cattle",
            "animal.breed.id": null,
            "animal.name": "Bella",
        }));
        let a = animal(&r, &ctx);
        let json = serde_json::to_value(&a).unwrap();

        assert_eq!(json["resourceType"], "icarAnimalCoreResource");
        assert_eq!(json["gender"], Value::Null);
        assert!(json.as_object().unwrap().contains_key("gender"));
        assert!(json.get("primaryBreed").is_none());
        assert!(json.get("birthDate").is_none());
        assert_eq!(json["name"], "Bella");
        assert_eq!(
            a.missing_required_fields(),
            vec!["meta.modified".to_string(), "gender".to_string()]
        );
    }
}
