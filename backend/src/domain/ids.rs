//! Opaque identifiers for station entities.
//!
//! Identifiers are positive 64-bit integers assigned by storage. They are
//! distinct types so a car id can never be passed where an order id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FieldViolation, Rule};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a storage-assigned identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Parse a client-supplied identifier for `field`.
            pub fn parse(field: &'static str, raw: &str) -> Result<Self, FieldViolation> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(FieldViolation::new(
                        field,
                        Rule::Empty,
                        format!("{field} must not be empty"),
                    ));
                }
                match trimmed.parse::<i64>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    Ok(_) => Err(FieldViolation::new(
                        field,
                        Rule::OutOfRange,
                        format!("{field} must be a positive identifier"),
                    )),
                    Err(_) => Err(FieldViolation::new(
                        field,
                        Rule::NotANumber,
                        format!("{field} must be numeric"),
                    )),
                }
            }

            /// Raw integer value for adapters.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Registered customer account.
    UserId
);
define_id!(
    /// Car owned by a customer.
    CarId
);
define_id!(
    /// Service order placed by a customer.
    OrderId
);
define_id!(
    /// Message within an order thread; assigned in insertion order.
    MessageId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case(" 7 ", 7)]
    fn parse_accepts_positive_integers(#[case] raw: &str, #[case] expected: i64) {
        let id = OrderId::parse("orderId", raw).expect("valid id");
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case("", Rule::Empty)]
    #[case("abc", Rule::NotANumber)]
    #[case("0", Rule::OutOfRange)]
    #[case("-3", Rule::OutOfRange)]
    fn parse_rejects_bad_input(#[case] raw: &str, #[case] rule: Rule) {
        let err = CarId::parse("carId", raw).expect_err("invalid id");
        assert_eq!(err.field(), "carId");
        assert_eq!(err.rule(), rule);
    }

    #[rstest]
    fn serialises_as_bare_number() {
        let value = serde_json::to_value(MessageId::new(9)).expect("serialise id");
        assert_eq!(value, serde_json::json!(9));
    }
}
