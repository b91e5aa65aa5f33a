//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers the exchange API routes on. Each type
//! rejects blank input so an empty path segment can never match a location.

use super::errors::AdeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Location scheme identifier
///
/// The reverse-DNS scheme that issues location identifiers (e.g. `be.herd`).
///
/// # Examples
///
/// ```
/// use ade_bridge::domain::ids::LocationScheme;
/// use std::str::FromStr;
///
/// let scheme = LocationScheme::from_str("be.herd").unwrap();
/// assert_eq!(scheme.as_str(), "be.herd");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationScheme(String);

impl LocationScheme {
    /// Creates a new LocationScheme from a string
    pub fn new(scheme: impl Into<String>) -> Result<Self, String> {
        let scheme = scheme.into();
        if scheme.trim().is_empty() {
            return Err("Location scheme cannot be empty".to_string());
        }
        Ok(Self(scheme))
    }

    /// Returns the scheme as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocationScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Location identifier
///
/// The identifier of one farm/holding within a [`LocationScheme`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(String);

impl LocationId {
    /// Creates a new LocationId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Location ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the location ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A (scheme, id) pair addressing one location in the directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationKey {
    pub scheme: LocationScheme,
    pub id: LocationId,
}

impl LocationKey {
    /// Builds a key from raw path parameters
    ///
    /// # Errors
    ///
    /// Returns `AdeError::Validation` if either part is blank.
    pub fn parse(scheme: &str, id: &str) -> crate::domain::Result<Self> {
        Ok(Self {
            scheme: LocationScheme::new(scheme).map_err(AdeError::Validation)?,
            id: LocationId::new(id).map_err(AdeError::Validation)?,
        })
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scheme, self.id)
    }
}

/// Exchange API operations backed by a SQL template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationId {
    /// `get-milking-visits`
    GetMilkingVisits,
    /// `get-animals`
    GetAnimals,
}

impl OperationId {
    /// All operations, in declaration order
    pub const ALL: [OperationId; 2] = [OperationId::GetMilkingVisits, OperationId::GetAnimals];

    /// The operation key used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationId::GetMilkingVisits => "get-milking-visits",
            OperationId::GetAnimals => "get-animals",
        }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationId {
    type Err = AdeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationId::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| AdeError::UnsupportedOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_scheme_valid() {
        let scheme = LocationScheme::new("be.herd").unwrap();
        assert_eq!(scheme.to_string(), "be.herd");
    }

    #[test]
    fn test_location_id_empty() {
        assert!(LocationId::new("").is_err());
        assert!(LocationId::new("   ").is_err());
    }

    #[test]
    fn test_location_key_parse() {
        let key = LocationKey::parse("be.herd", "farm-1").unwrap();
        assert_eq!(key.to_string(), "be.herd/farm-1");

        let err = LocationKey::parse("", "farm-1").unwrap_err();
        assert!(matches!(err, AdeError::Validation(_)));
    }

    #[test]
    fn test_operation_id_round_trip() {
        for op in OperationId::ALL {
            assert_eq!(OperationId::from_str(op.as_str()).unwrap(), op);
        }
        assert!(matches!(
            OperationId::from_str("get-feed-intakes"),
            Err(AdeError::UnsupportedOperation(_))
        ));
    }
}
