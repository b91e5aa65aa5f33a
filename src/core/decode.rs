//! Flat record decoding
//!
//! Rebuilds the repeated ADE substructures of a milking visit from a flat row.
//! Repetition is recovered by walking the fixed ICAR code sets and probing
//! for each code's gate column:
//!
//! - a quarter exists iff its weight value column exists
//! - a characteristic exists iff its value column exists
//! - a remark is set iff its column holds the literal `"true"`
//!
//! Gates test column existence, so a selected-but-null column still produces
//! an entry (with a `null` required value).

use crate::core::prune::{present, Prune};
use crate::domain::codes::{MilkCharacteristic, MilkingRemark, Quarter, UnitTable};
use crate::domain::record::{
    Axis, CharacteristicField, FlatRecord, Measure, MeasurePart, RecordKey, SampleField, Scope,
};
use crate::domain::resource::{MeasureValue, MilkCharacteristicEntry, MilkingSample, QuarterMilking};
use serde_json::Value;

fn field(record: &FlatRecord, key: RecordKey) -> Option<Value> {
    present(record.value(&key))
}

/// Decodes a `{unitCode, value}` measure, `None` when both are absent
pub fn measure(record: &FlatRecord, measure: Measure) -> Option<MeasureValue> {
    MeasureValue {
        unit_code: field(record, RecordKey::Measure(measure, MeasurePart::UnitCode)),
        value: field(record, RecordKey::Measure(measure, MeasurePart::Value)),
    }
    .pruned()
}

/// Decodes a milk weight, always in kilograms
pub fn weight(record: &FlatRecord, measure: Measure) -> MeasureValue {
    MeasureValue::kilograms(field(record, RecordKey::Measure(measure, MeasurePart::Value)))
}

/// Decodes the sample of one scope
///
/// Rows carry at most one sample per scope, so the result has 0 or 1 entries.
pub fn samples(record: &FlatRecord, scope: Scope) -> Vec<MilkingSample> {
    let get = |f: SampleField| field(record, RecordKey::Sample(scope, f));
    MilkingSample {
        bottle_identifier_type: get(SampleField::BottleIdentifierType),
        rack_number: get(SampleField::RackNumber),
        bottle_position: get(SampleField::BottlePosition),
        bottle_identifier: get(SampleField::BottleIdentifier),
        valid_sample_filling_indicator: get(SampleField::ValidSampleFillingIndicator),
        operator: get(SampleField::Operator),
    }
    .pruned()
    .into_iter()
    .collect()
}

/// Decodes the milk characteristics of one scope in ICAR code order
///
/// The unit comes from the row when it has one, otherwise from `units`.
pub fn characteristics(
    record: &FlatRecord,
    scope: Scope,
    units: &UnitTable,
) -> Vec<MilkCharacteristicEntry> {
    MilkCharacteristic::ALL
        .into_iter()
        .filter(|&code| {
            record.contains(&RecordKey::Characteristic(scope, code, CharacteristicField::Value))
        })
        .map(|code| {
            let get = |f: CharacteristicField| field(record, RecordKey::Characteristic(scope, code, f));
            MilkCharacteristicEntry {
                characteristic: code,
                value: get(CharacteristicField::Value),
                unit: get(CharacteristicField::Unit)
                    .unwrap_or_else(|| Value::from(units.unit_for(code))),
                measuring_device: get(CharacteristicField::MeasuringDevice),
            }
        })
        .collect()
}

/// Decodes the quarters present in the row, in LF, RF, LR, RR order
pub fn quarter_milkings(record: &FlatRecord, units: &UnitTable) -> Vec<QuarterMilking> {
    Quarter::ALL
        .into_iter()
        .filter(|&q| {
            record.contains(&RecordKey::Measure(
                Measure::QuarterWeight(q),
                MeasurePart::Value,
            ))
        })
        .map(|q| quarter_milking(record, q, units))
        .collect()
}

fn quarter_milking(record: &FlatRecord, quarter: Quarter, units: &UnitTable) -> QuarterMilking {
    let scope = Scope::Quarter(quarter);
    let position = |axis: Axis| field(record, RecordKey::Position(quarter, axis));
    QuarterMilking {
        icar_quarter_id: quarter,
        xposition: position(Axis::X),
        yposition: position(Axis::Y),
        zposition: position(Axis::Z),
        quarter_milking_duration: measure(record, Measure::QuarterDuration(quarter)),
        quarter_milking_weight: weight(record, Measure::QuarterWeight(quarter)),
        icar_quarter_milking_sample: samples(record, scope),
        icar_quarter_characteristics: characteristics(record, scope, units),
    }
}

/// Decodes the remark flags set to the literal `"true"`
pub fn remarks(record: &FlatRecord) -> Vec<MilkingRemark> {
    MilkingRemark::ALL
        .into_iter()
        .filter(|&remark| record.is_literal_true(&RecordKey::Remark(remark)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use test_case::test_case;

    fn record(value: Value) -> FlatRecord {
        FlatRecord::from_value(value).unwrap()
    }

    #[test_case(Scope::Visit, "milkcharacteristics.characteristic" ; "visit")]
    #[test_case(Scope::Quarter(Quarter::LeftFront), "quartermilkings.LF.icarquartercharacteristics" ; "left front")]
    #[test_case(Scope::Quarter(Quarter::RightFront), "quartermilkings.RF.icarquartercharacteristics" ; "right front")]
    #[test_case(Scope::Quarter(Quarter::LeftRear), "quartermilkings.LR.icarquartercharacteristics" ; "left rear")]
    #[test_case(Scope::Quarter(Quarter::RightRear), "quartermilkings.RR.icarquartercharacteristics" ; "right rear")]
    fn test_every_characteristic_in_scope(scope: Scope, prefix: &str) {
        let units = UnitTable::default();
        let other = match scope {
            Scope::Visit => Scope::Quarter(Quarter::LeftFront),
            Scope::Quarter(_) => Scope::Visit,
        };

        for code in MilkCharacteristic::ALL {
            let mut r = FlatRecord::new(Map::new());
            r.insert(format!("{prefix}.{}.value", code.code()), 1.5);

            let entries = characteristics(&r, scope, &units);
            assert_eq!(entries.len(), 1, "{code}");
            assert_eq!(entries[0].characteristic, code);
            assert_eq!(entries[0].value, Some(json!(1.5)));
            assert_eq!(entries[0].unit, Value::from(code.default_unit()));
            assert!(characteristics(&r, other, &units).is_empty(), "{code}");
        }

        assert!(characteristics(&FlatRecord::new(Map::new()), scope, &units).is_empty());
    }

    #[test]
    fn test_quarter_gate_is_weight_value_key() {
        let r = record(json!({
            "quartermilkings.LF.quartermilkingweight.value": 3.2,
            "quartermilkings.RR.quartermilkingweight.value": null,
            "quartermilkings.RF.xposition": 10,
        }));
        let quarters = quarter_milkings(&r, &UnitTable::default());
        let ids: Vec<Quarter> = quarters.iter().map(|q| q.icar_quarter_id).collect();
        assert_eq!(ids, vec![Quarter::LeftFront, Quarter::RightRear]);
        assert_eq!(quarters[0].quarter_milking_weight, MeasureValue::kilograms(Some(json!(3.2))));
        assert_eq!(quarters[1].quarter_milking_weight.value, None);
    }

    #[test]
    fn test_quarter_substructure() {
        let r = record(json!({
            "quartermilkings.LR.quartermilkingweight.value": 2.5,
            "quartermilkings.LR.xposition": 1,
            "quartermilkings.LR.zposition": 3,
            "quartermilkings.LR.quartermilkingduration.unitcode": "SEC",
            "quartermilkings.LR.quartermilkingduration.value": 240,
            "quartermilkings.LR.icarquartermilkingsample.bottleidentifier": "B-77",
            "quartermilkings.LR.icarquartercharacteristics.AVGCOND.value": 5.1,
        }));
        let quarters = quarter_milkings(&r, &UnitTable::default());
        assert_eq!(quarters.len(), 1);
        let lr = &quarters[0];
        assert_eq!(lr.xposition, Some(json!(1)));
        assert_eq!(lr.yposition, None);
        assert_eq!(
            lr.quarter_milking_duration,
            Some(MeasureValue {
                unit_code: Some(json!("SEC")),
                value: Some(json!(240)),
            })
        );
        assert_eq!(lr.icar_quarter_milking_sample.len(), 1);
        assert_eq!(lr.icar_quarter_characteristics[0].unit, json!("mS/cm"));
    }

    #[test]
    fn test_characteristic_unit_fallback() {
        let r = record(json!({
            "milkcharacteristics.characteristic.FAT.value": 4.1,
            "milkcharacteristics.characteristic.SCC.value": 120,
            "milkcharacteristics.characteristic.SCC.unit": "cells/ml",
            "milkcharacteristics.characteristic.UREA.value": 250,
            "milkcharacteristics.characteristic.UREA.unit": null,
            "milkcharacteristics.characteristic.PROTEIN.unit": "%",
        }));
        let entries = characteristics(&r, Scope::Visit, &UnitTable::default());
        let summary: Vec<(MilkCharacteristic, Value)> = entries
            .iter()
            .map(|e| (e.characteristic, e.unit.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (MilkCharacteristic::Scc, json!("cells/ml")),
                (MilkCharacteristic::Fat, json!("%")),
                (MilkCharacteristic::Urea, json!("mg/l")),
            ]
        );
    }

    #[test]
    fn test_characteristic_scope_isolation() {
        let r = record(json!({
            "quartermilkings.LF.icarquartercharacteristics.BLOOD.value": 0,
        }));
        assert!(characteristics(&r, Scope::Visit, &UnitTable::default()).is_empty());
        let lf = characteristics(&r, Scope::Quarter(Quarter::LeftFront), &UnitTable::default());
        assert_eq!(lf.len(), 1);
        assert_eq!(lf[0].value, Some(json!(0)));
        assert_eq!(lf[0].unit, json!(""));
    }

    #[test]
    fn test_sample_cardinality() {
        let empty = record(json!({ "animalmilkingsample.racknumber": null }));
        assert!(samples(&empty, Scope::Visit).is_empty());

        let one = record(json!({
            "animalmilkingsample.racknumber": 4,
            "animalmilkingsample.operator": "",
        }));
        let found = samples(&one, Scope::Visit);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].operator, Some(json!("")));
    }

    #[test]
    fn test_duration_absent_when_both_parts_missing() {
        let r = record(json!({ "milkingduration.value": null }));
        assert_eq!(measure(&r, Measure::MilkingDuration), None);

        let r = record(json!({ "milkingvisitduration.unitcode": "MIN" }));
        let visit = measure(&r, Measure::MilkingVisitDuration).unwrap();
        assert_eq!(visit.value, None);
    }

    #[test]
    fn test_remarks_literal_true() {
        let r = record(json!({
            "milkingremarks.animalsick": "true",
            "milkingremarks.milkingincomplete": "false",
            "milkingremarks.samplingfailed": "true",
            "milkingremarks.teatseparated": true,
        }));
        assert_eq!(
            remarks(&r),
            vec![MilkingRemark::AnimalSick, MilkingRemark::SamplingFailed]
        );
    }
}
