//! Integer identifiers for persisted entities.
//!
//! Each entity gets its own newtype so a hospital id can never be passed where
//! a patient id is expected. Values mirror the serial primary keys assigned by
//! the store.

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw store identifier.
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Raw identifier as stored.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a registered user.
    UserId
}

define_entity_id! {
    /// Identifier of a patient record.
    PatientId
}

define_entity_id! {
    /// Identifier of a hospital.
    HospitalId
}

define_entity_id! {
    /// Identifier of a department.
    DepartmentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialise_as_bare_integers() {
        let value = serde_json::to_value(HospitalId::new(7)).expect("serialise id");
        assert_eq!(value, serde_json::json!(7));
    }

    #[test]
    fn ids_display_raw_value() {
        assert_eq!(PatientId::new(42).to_string(), "42");
    }
}
