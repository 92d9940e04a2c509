//! `define_port_error!`: declares a `thiserror` enum for a port together with
//! one snake_case constructor per variant. Constructor parameters take
//! `impl Into<FieldType>`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::EntityKind;

    define_port_error! {
        pub enum SampleError {
            Offline => "store offline",
            Failed { message: String } => "failed: {message}",
            Conflict { kind: EntityKind } => "conflicting {kind}",
            Retry { message: String, attempts: u32 } => "{message} after {attempts} attempts",
        }
    }

    #[test]
    fn unit_variants_get_snake_case_constructors() {
        assert_eq!(SampleError::offline(), SampleError::Offline);
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(SampleError::failed("boom").to_string(), "failed: boom");
    }

    #[test]
    fn typed_fields_are_passed_through() {
        let err = SampleError::conflict(EntityKind::Department);
        assert_eq!(err.to_string(), "conflicting department");
        assert_eq!(
            SampleError::retry("timed out", 3_u32).to_string(),
            "timed out after 3 attempts"
        );
    }
}
