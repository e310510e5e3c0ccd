//! Helper macro for declaring port error enums.
//!
//! Every variant carries named fields and gets a snake_case constructor that
//! accepts `impl Into<T>` for each field, so adapters can write
//! `PokemonSourceError::transport(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Example error used to exercise the macro.
        pub enum ExamplePortError {
            /// Single string field.
            Unreachable { message: String } => "unreachable: {message}",
            /// Mixed field types.
            Status { status: u16, message: String } => "status {status}: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::unreachable("connection refused");
        assert_eq!(err.to_string(), "unreachable: connection refused");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExamplePortError::status(503_u16, "maintenance");
        assert_eq!(err.to_string(), "status 503: maintenance");
        assert_eq!(
            err,
            ExamplePortError::Status {
                status: 503,
                message: "maintenance".to_owned()
            }
        );
    }
}
