//! Domain models and types for ADE Bridge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`LocationScheme`], [`LocationId`], [`OperationId`])
//! - **ICAR code tables** ([`Quarter`], [`MilkCharacteristic`], [`MilkingRemark`], [`UnitTable`])
//! - **Flat rows** ([`FlatRecord`] addressed by [`RecordKey`])
//! - **ADE resources** ([`MilkingVisit`], [`Animal`] and their parts)
//! - **Error types** ([`AdeError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use ade_bridge::domain::{FlatRecord, Quarter, RecordKey};
//! use ade_bridge::domain::record::{Measure, MeasurePart};
//!
//! let mut record = FlatRecord::default();
//! record.insert("quartermilkings.LF.quartermilkingweight.value", 6.1);
//!
//! let key = RecordKey::Measure(Measure::QuarterWeight(Quarter::LeftFront), MeasurePart::Value);
//! assert!(record.contains(&key));
//! ```

pub mod codes;
pub mod errors;
pub mod ids;
pub mod record;
pub mod resource;
pub mod result;

// Re-export commonly used types for convenience
pub use codes::{MilkCharacteristic, MilkingRemark, Quarter, UnitTable};
pub use errors::AdeError;
pub use ids::{LocationId, LocationKey, LocationScheme, OperationId};
pub use record::{FlatRecord, RecordKey, Scope};
pub use resource::{Animal, MilkingVisit};
pub use result::Result;
