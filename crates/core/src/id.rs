//! Strongly-typed identifiers used across the domain.
//!
//! Every identifier is a validated uuid newtype with value equality and a
//! stable, round-trippable string form. Aggregate ids additionally carry a
//! display prefix (e.g. `Project-<uuid>`); `of` accepts both the prefixed
//! and the raw form.

/// Define a uuid-backed identifier newtype.
///
/// Two forms:
///
/// ```ignore
/// uuid_identifier!(ProjectId, prefix = "Project");
/// uuid_identifier!(SprintId);
/// ```
///
/// Uses UUIDv7 (time-ordered) for `generate`. Prefer passing ids explicitly
/// in tests for determinism.
#[macro_export]
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, prefix = $prefix:literal) => {
        $crate::uuid_identifier!(@struct $(#[$meta])* $name);
        $crate::uuid_identifier!(@common $name);

        impl $name {
            /// Display prefix, stripped back off by [`Self::of`].
            pub const PREFIX: &'static str = $prefix;

            /// Parse from the raw or prefixed string form.
            pub fn of(value: &str) -> $crate::DomainResult<Self> {
                let raw = value
                    .strip_prefix(concat!($prefix, "-"))
                    .unwrap_or(value);
                ::uuid::Uuid::parse_str(raw).map(Self).map_err(|e| {
                    $crate::DomainError::invalid_id(format!(
                        "{}: {}",
                        stringify!($name),
                        e
                    ))
                })
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
    ($(#[$meta:meta])* $name:ident) => {
        $crate::uuid_identifier!(@struct $(#[$meta])* $name);
        $crate::uuid_identifier!(@common $name);

        impl $name {
            /// Parse from the string form.
            pub fn of(value: &str) -> $crate::DomainResult<Self> {
                ::uuid::Uuid::parse_str(value).map(Self).map_err(|e| {
                    $crate::DomainError::invalid_id(format!(
                        "{}: {}",
                        stringify!($name),
                        e
                    ))
                })
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }
    };
    (@struct $(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);
    };
    (@common $name:ident) => {
        impl $name {
            /// Create a fresh random identifier.
            pub fn generate() -> Self {
                Self(::uuid::Uuid::now_v7())
            }

            pub fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(value: ::uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::of(s)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::DomainError;

    crate::uuid_identifier!(OrderId, prefix = "Order");
    crate::uuid_identifier!(LineId);

    #[test]
    fn prefixed_id_round_trips_through_display() {
        let id = OrderId::generate();
        let s = id.to_string();
        assert!(s.starts_with("Order-"));
        assert_eq!(OrderId::of(&s).unwrap(), id);
    }

    #[test]
    fn prefixed_id_accepts_raw_uuid() {
        let id = OrderId::generate();
        assert_eq!(OrderId::of(&id.as_uuid().to_string()).unwrap(), id);
    }

    #[test]
    fn plain_id_round_trips_through_display() {
        let id = LineId::generate();
        assert_eq!(LineId::of(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn malformed_input_is_rejected() {
        match OrderId::of("not-a-uuid") {
            Err(DomainError::InvalidId(msg)) => assert!(msg.contains("OrderId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn equality_is_on_the_underlying_uuid() {
        let uuid = uuid::Uuid::now_v7();
        assert_eq!(OrderId::from_uuid(uuid), OrderId::from_uuid(uuid));
        assert_ne!(OrderId::generate(), OrderId::generate());
    }
}
