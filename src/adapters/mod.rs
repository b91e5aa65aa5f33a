//! External system integrations for ADE Bridge.
//!
//! - [`source`] - where farm-store rows come from
//!
//! # Design Pattern
//!
//! Adapters isolate external systems behind traits so the core can be tested
//! with in-memory implementations. The exchange service depends only on
//! [`source::RecordSource`]; a database-backed source implements the same
//! trait as the bundled [`source::JsonRowsSource`].

pub mod source;
