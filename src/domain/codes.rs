//! Fixed ICAR code enumerations
//!
//! The flat row encoding has no repetition markers, so every repeated ADE
//! substructure is recovered by walking one of these bounded code sets and
//! probing the record for the matching key.

use super::errors::AdeError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Udder quarter of a dairy cow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    #[serde(rename = "LF")]
    LeftFront,
    #[serde(rename = "RF")]
    RightFront,
    #[serde(rename = "LR")]
    LeftRear,
    #[serde(rename = "RR")]
    RightRear,
}

impl Quarter {
    /// All quarters in ICAR order
    pub const ALL: [Quarter; 4] = [
        Quarter::LeftFront,
        Quarter::RightFront,
        Quarter::LeftRear,
        Quarter::RightRear,
    ];

    /// The ICAR quarter code, also used as the record path segment
    pub fn code(&self) -> &'static str {
        match self {
            Quarter::LeftFront => "LF",
            Quarter::RightFront => "RF",
            Quarter::LeftRear => "LR",
            Quarter::RightRear => "RR",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Milk characteristic codes (icarMilkCharacteristicCodeType)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MilkCharacteristic {
    Scc,
    Fat,
    Protein,
    Lac,
    Urea,
    Blood,
    Acetone,
    Bhb,
    Ldh,
    Pro,
    AvgCond,
    MaxCond,
    AvgFlwr,
    MaxFlwr,
    Weight,
    Pag,
}

impl MilkCharacteristic {
    /// All characteristic codes in ICAR order
    pub const ALL: [MilkCharacteristic; 16] = [
        MilkCharacteristic::Scc,
        MilkCharacteristic::Fat,
        MilkCharacteristic::Protein,
        MilkCharacteristic::Lac,
        MilkCharacteristic::Urea,
        MilkCharacteristic::Blood,
        MilkCharacteristic::Acetone,
        MilkCharacteristic::Bhb,
        MilkCharacteristic::Ldh,
        MilkCharacteristic::Pro,
        MilkCharacteristic::AvgCond,
        MilkCharacteristic::MaxCond,
        MilkCharacteristic::AvgFlwr,
        MilkCharacteristic::MaxFlwr,
        MilkCharacteristic::Weight,
        MilkCharacteristic::Pag,
    ];

    /// The ICAR code, also used as the record path segment
    pub fn code(&self) -> &'static str {
        match self {
            MilkCharacteristic::Scc => "SCC",
            MilkCharacteristic::Fat => "FAT",
            MilkCharacteristic::Protein => "PROTEIN",
            MilkCharacteristic::Lac => "LAC",
            MilkCharacteristic::Urea => "UREA",
            MilkCharacteristic::Blood => "BLOOD",
            MilkCharacteristic::Acetone => "ACETONE",
            MilkCharacteristic::Bhb => "BHB",
            MilkCharacteristic::Ldh => "LDH",
            MilkCharacteristic::Pro => "PRO",
            MilkCharacteristic::AvgCond => "AVGCOND",
            MilkCharacteristic::MaxCond => "MAXCOND",
            MilkCharacteristic::AvgFlwr => "AVGFLWR",
            MilkCharacteristic::MaxFlwr => "MAXFLWR",
            MilkCharacteristic::Weight => "WEIGHT",
            MilkCharacteristic::Pag => "PAG",
        }
    }

    /// Unit ICAR documents for the characteristic when a source gives none
    pub fn default_unit(&self) -> &'static str {
        match self {
            MilkCharacteristic::Scc => "x1000 cells/ml",
            MilkCharacteristic::Fat | MilkCharacteristic::Protein | MilkCharacteristic::Lac => "%",
            MilkCharacteristic::Urea => "mg/l",
            MilkCharacteristic::Blood => "",
            MilkCharacteristic::Acetone
            | MilkCharacteristic::Bhb
            | MilkCharacteristic::Pro
            | MilkCharacteristic::Pag => "mmol/l",
            MilkCharacteristic::Ldh => "IU/l",
            MilkCharacteristic::AvgCond | MilkCharacteristic::MaxCond => "mS/cm",
            MilkCharacteristic::AvgFlwr | MilkCharacteristic::MaxFlwr => "Kg/min",
            MilkCharacteristic::Weight => "Kg",
        }
    }
}

impl fmt::Display for MilkCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MilkCharacteristic {
    type Err = AdeError;

    fn from_str(s: &str) -> Result<Self> {
        MilkCharacteristic::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| AdeError::Configuration(format!("Unknown milk characteristic code: {s}")))
    }
}

/// Milking remark flags (icarMilkingRemarksType)
///
/// Serializes as the ICAR label; the record key is the lowercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilkingRemark {
    AnimalSick,
    MilkingIncomplete,
    TeatSeparated,
    MilkedSeparately,
    SamplingFailed,
}

impl MilkingRemark {
    pub const ALL: [MilkingRemark; 5] = [
        MilkingRemark::AnimalSick,
        MilkingRemark::MilkingIncomplete,
        MilkingRemark::TeatSeparated,
        MilkingRemark::MilkedSeparately,
        MilkingRemark::SamplingFailed,
    ];

    /// Record path segment under `milkingremarks.`
    pub fn key(&self) -> &'static str {
        match self {
            MilkingRemark::AnimalSick => "animalsick",
            MilkingRemark::MilkingIncomplete => "milkingincomplete",
            MilkingRemark::TeatSeparated => "teatseparated",
            MilkingRemark::MilkedSeparately => "milkedseparately",
            MilkingRemark::SamplingFailed => "samplingfailed",
        }
    }

    /// Canonical ICAR label
    pub fn label(&self) -> &'static str {
        match self {
            MilkingRemark::AnimalSick => "AnimalSick",
            MilkingRemark::MilkingIncomplete => "MilkingIncomplete",
            MilkingRemark::TeatSeparated => "TeatSeparated",
            MilkingRemark::MilkedSeparately => "MilkedSeparately",
            MilkingRemark::SamplingFailed => "SamplingFailed",
        }
    }
}

/// Default unit per milk characteristic
///
/// Built once at startup from the ICAR defaults plus any per-deployment
/// overrides, then only read.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: HashMap<MilkCharacteristic, String>,
}

impl UnitTable {
    /// Applies `code -> unit` overrides on top of the ICAR defaults
    ///
    /// # Errors
    ///
    /// Returns `AdeError::Configuration` for an unknown characteristic code.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self> {
        let mut table = Self::default();
        for (code, unit) in overrides {
            let characteristic = MilkCharacteristic::from_str(code)?;
            table.units.insert(characteristic, unit.clone());
        }
        Ok(table)
    }

    /// The fallback unit for a characteristic
    pub fn unit_for(&self, characteristic: MilkCharacteristic) -> &str {
        self.units
            .get(&characteristic)
            .map(String::as_str)
            .unwrap_or_else(|| characteristic.default_unit())
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            units: MilkCharacteristic::ALL
                .into_iter()
                .map(|c| (c, c.default_unit().to_string()))
                .collect(),
        }
    }
}
