//! Strongly-typed ID wrappers for groups and expenses
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a full UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Check whether a user-supplied reference names this ID
            ///
            /// Accepts the full UUID, the prefixed short form, or the bare
            /// 8-character short hex.
            pub fn matches(&self, reference: &str) -> bool {
                let reference = reference.trim();
                let full = self.0.to_string();
                if reference == full {
                    return true;
                }
                let short = reference.strip_prefix($display_prefix).unwrap_or(reference);
                short.len() == 8 && full.starts_with(short)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(GroupId, "grp-");
define_id!(ExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_id_creation() {
        let id = GroupId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_matches_short_and_full() {
        let id = GroupId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(id.matches("grp-550e8400"));
        assert!(id.matches("550e8400"));
        assert!(!id.matches("grp-550e84"));
        assert!(!id.matches("Ski Trip"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let id: ExpenseId = "exp-550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(
            id.as_uuid().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_id_serialization() {
        let id = GroupId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: GroupId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
