//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! zero-padded agenda times) so that once a value reaches the domain layer it
//! can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided identifier is not a number.
    #[error("id is not a number: {0}")]
    MalformedId(String),
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided time is not a zero-padded 24h `HH:MM` value.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                let value = trimmed
                    .parse::<i32>()
                    .map_err(|_| TypeConstraintError::MalformedId(trimmed.to_string()))?;
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(EmployeeId, "Unique identifier for an employee (advisor or administrator).");
id_newtype!(ClientId, "Unique identifier for a client record.");
id_newtype!(PlanId, "Unique identifier for a persisted weekly plan.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    EmployeeName,
    "Employee display name wrapper enforcing non-empty values."
);

non_empty_string_newtype!(
    ClientName,
    "Client display name wrapper enforcing non-empty values."
);

non_empty_string_newtype!(
    SupervisorNote,
    "Supervisor remark attached to a plan, trimmed and non-empty."
);

/// Time of day of an agenda slot, stored as zero-padded 24h `HH:MM`.
///
/// Because the representation is fixed-width, the derived lexicographic
/// ordering is also chronological.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct AgendaTime(String);

impl AgendaTime {
    /// Validates an `HH:MM` string. Single-digit hours (`9:00`) and seconds
    /// are rejected.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let bytes = trimmed.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(index, byte)| index == 2 || byte.is_ascii_digit())
            && NaiveTime::parse_from_str(trimmed, "%H:%M").is_ok();
        if !well_formed {
            return Err(TypeConstraintError::InvalidTime(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the `HH:MM` representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The time as a [`NaiveTime`].
    pub fn to_naive_time(&self) -> NaiveTime {
        // Format is checked in `new`, the fallback never triggers.
        NaiveTime::parse_from_str(&self.0, "%H:%M").unwrap_or(NaiveTime::MIN)
    }
}

impl Display for AgendaTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AgendaTime {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AgendaTime {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgendaTime> for String {
    fn from(value: AgendaTime) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(EmployeeId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ClientId::new(-4), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(PlanId::new(9).map(PlanId::get), Ok(9));
    }

    #[test]
    fn ids_parse_from_form_strings() {
        assert_eq!(" 12 ".parse::<ClientId>().map(ClientId::get), Ok(12));
        assert_eq!("".parse::<ClientId>(), Err(TypeConstraintError::EmptyString));
        assert!(matches!(
            "abc".parse::<ClientId>(),
            Err(TypeConstraintError::MalformedId(_))
        ));
    }

    #[test]
    fn ids_deserialize_through_validation() {
        assert!(serde_json::from_str::<PlanId>("0").is_err());
        let id: PlanId = serde_json::from_str("7").unwrap();
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn agenda_time_requires_zero_padded_hours() {
        assert!(AgendaTime::new("09:00").is_ok());
        assert!(AgendaTime::new("23:59").is_ok());
        assert!(AgendaTime::new("9:00").is_err());
        assert!(AgendaTime::new("24:00").is_err());
        assert!(AgendaTime::new("12:60").is_err());
        assert!(AgendaTime::new("09:00:00").is_err());
        assert!(AgendaTime::new("").is_err());
        assert!(AgendaTime::new("09: 5").is_err());
        assert!(AgendaTime::new("0a:15").is_err());
        assert!(AgendaTime::new("0 :30").is_err());
        assert!(AgendaTime::new("+9:00").is_err());
    }

    #[test]
    fn agenda_time_orders_chronologically() {
        let morning = AgendaTime::new("08:30").unwrap();
        let afternoon = AgendaTime::new("15:05").unwrap();
        assert!(morning < afternoon);
        assert_eq!(
            afternoon.to_naive_time(),
            NaiveTime::from_hms_opt(15, 5, 0).unwrap()
        );
    }

    #[test]
    fn names_are_trimmed() {
        let name = ClientName::new("  Acme SAC ").unwrap();
        assert_eq!(name.as_str(), "Acme SAC");
        assert_eq!(EmployeeName::new("   "), Err(TypeConstraintError::EmptyString));
    }
}
