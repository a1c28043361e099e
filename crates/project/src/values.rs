//! Validated string value objects of the project domain.
//!
//! All of them are immutable, constructed only through `of`, and re-validated
//! when deserialized so a persisted payload can never smuggle in an invalid
//! value.

use serde::{Deserialize, Serialize};

use sprintboard_core::{DomainError, DomainResult, ValueObject};

macro_rules! string_value_object {
    ($(#[$meta:meta])* $name:ident, max_length = $max:expr) => {
        string_value_object!($(#[$meta])* $name);

        impl $name {
            pub const MAX_LENGTH: usize = $max;
        }
    };
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ValueObject for $name {}

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::of(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value_object!(
    /// Name of a project.
    ProjectName,
    max_length = 80
);

impl ProjectName {
    pub fn of(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("ProjectName cannot be empty"));
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "ProjectName cannot be longer than {} characters",
                Self::MAX_LENGTH
            )));
        }
        Ok(Self(value))
    }
}

string_value_object!(
    /// Name of a sprint.
    SprintName,
    max_length = 30
);

impl SprintName {
    pub fn of(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("SprintName cannot be empty"));
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "SprintName cannot be longer than {} characters",
                Self::MAX_LENGTH
            )));
        }
        Ok(Self(value))
    }
}

string_value_object!(
    /// What a sprint sets out to achieve.
    SprintGoal
);

impl SprintGoal {
    pub fn of(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("SprintGoal cannot be empty"));
        }
        Ok(Self(value))
    }
}
