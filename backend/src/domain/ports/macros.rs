//! `define_port_error!` expands a message-per-variant table into a
//! `thiserror` enum plus snake-case constructors taking `impl Into<_>`.

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
    define_port_error! {
        pub enum GarageLedgerError {
            Offline { message: String } => "ledger offline: {message}",
            Missing { order: i64 } => "order {order} missing from ledger",
            Rejected { message: String, attempts: u8 } => "rejected after {attempts}: {message}",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(GarageLedgerError::offline("socket").to_string(), "ledger offline: socket");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        assert_eq!(
            GarageLedgerError::missing(12_i64),
            GarageLedgerError::Missing { order: 12 }
        );
    }

    #[test]
    fn mixed_fields_format_in_order() {
        let err = GarageLedgerError::rejected("vin mismatch", 3_u8);
        assert_eq!(err.to_string(), "rejected after 3: vin mismatch");
    }
}
