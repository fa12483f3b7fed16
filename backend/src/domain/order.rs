//! Service orders and their status lifecycle.
//!
//! Orders start `Open`. Only staff move them forward:
//!
//! ```text
//! Open ──► Confirmed ──► Closed
//!   └────────────────────►┘
//! ```
//!
//! `Closed` is terminal. Customers may write into the thread of any order that
//! is not closed.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::validation::required_text;
use super::{CarId, FieldViolation, OrderId, Rule, UserId};

const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Order status. The derived ordering groups active orders before closed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted from the customer, awaiting staff review.
    Open,
    /// Scheduled by staff.
    Confirmed,
    /// Finished; the thread is read-only for the customer.
    Closed,
}

/// Error raised when a status change is not permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("order cannot move from {from} to {to}")]
pub struct IllegalTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    /// Storage code: 1 open, 2 confirmed, 3 closed.
    pub const fn code(self) -> i16 {
        match self {
            Self::Open => 1,
            Self::Confirmed => 2,
            Self::Closed => 3,
        }
    }

    /// Decode a storage code.
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Open),
            2 => Some(Self::Confirmed),
            3 => Some(Self::Closed),
            _ => None,
        }
    }

    /// Whether the order is in the active listing group.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Validate a staff-driven status change.
    ///
    /// # Examples
    /// ```
    /// use service_station::domain::OrderStatus;
    ///
    /// assert_eq!(OrderStatus::Open.transition_to(OrderStatus::Confirmed), Ok(OrderStatus::Confirmed));
    /// assert!(OrderStatus::Closed.transition_to(OrderStatus::Open).is_err());
    /// ```
    pub fn transition_to(self, next: Self) -> Result<Self, IllegalTransition> {
        match (self, next) {
            (Self::Open, Self::Confirmed | Self::Closed) | (Self::Confirmed, Self::Closed) => {
                Ok(next)
            }
            _ => Err(IllegalTransition {
                from: self,
                to: next,
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Confirmed => "confirmed",
            Self::Closed => "closed",
        })
    }
}

/// Inclusive range of years accepted for service dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    min: i32,
    max: i32,
}

impl YearBounds {
    /// Build bounds, returning `None` when `min > max`.
    pub const fn new(min: i32, max: i32) -> Option<Self> {
        if min > max {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// Earliest accepted year.
    pub const fn min(self) -> i32 {
        self.min
    }

    /// Latest accepted year.
    pub const fn max(self) -> i32 {
        self.max
    }

    const fn contains(self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 2018,
            max: 2100,
        }
    }
}

/// Day on which the car is booked in.
///
/// Renders as zero-padded `MM-DD-YYYY`.
///
/// # Examples
/// ```
/// use service_station::domain::{ServiceDate, YearBounds};
///
/// let date = ServiceDate::parse("7", "3", "2024", YearBounds::default()).expect("valid date");
/// assert_eq!(date.to_string(), "03-07-2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServiceDate(NaiveDate);

fn parse_component(field: &'static str, raw: &str) -> Result<i64, FieldViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new(
            field,
            Rule::Empty,
            format!("{field} must not be empty"),
        ));
    }
    trimmed
        .parse()
        .map_err(|_| FieldViolation::new(field, Rule::NotANumber, format!("{field} must be numeric")))
}

fn ranged<T: TryFrom<i64>>(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<T, FieldViolation> {
    let out_of_range =
        || FieldViolation::new(field, Rule::OutOfRange, format!("{field} must be between {min} and {max}"));
    if value < min || value > max {
        return Err(out_of_range());
    }
    T::try_from(value).map_err(|_| out_of_range())
}

impl ServiceDate {
    /// Validate day, month, then year against `bounds`.
    pub fn parse(
        day: &str,
        month: &str,
        year: &str,
        bounds: YearBounds,
    ) -> Result<Self, FieldViolation> {
        let day: u32 = ranged("day", parse_component("day", day)?, 1, 31)?;
        let month: u32 = ranged("month", parse_component("month", month)?, 1, 12)?;
        let year: i32 = ranged(
            "year",
            parse_component("year", year)?,
            i64::from(bounds.min()),
            i64::from(bounds.max()),
        )?;
        Self::from_parts(day, month, year, bounds)
    }

    /// Validate numeric components.
    pub fn from_parts(
        day: u32,
        month: u32,
        year: i32,
        bounds: YearBounds,
    ) -> Result<Self, FieldViolation> {
        if !(1..=31).contains(&day) {
            return Err(FieldViolation::new(
                "day",
                Rule::OutOfRange,
                "day must be between 1 and 31",
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(FieldViolation::new(
                "month",
                Rule::OutOfRange,
                "month must be between 1 and 12",
            ));
        }
        if !bounds.contains(year) {
            return Err(FieldViolation::new(
                "year",
                Rule::OutOfRange,
                format!("year must be between {} and {}", bounds.min(), bounds.max()),
            ));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                FieldViolation::new("day", Rule::InvalidDate, "day does not exist in that month")
            })
    }

    pub(crate) const fn from_stored(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Calendar date for adapters.
    pub const fn as_naive_date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ServiceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%m-%d-%Y"))
    }
}

impl Serialize for ServiceDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Monetary amount in minor units (cents).
///
/// # Examples
/// ```
/// use service_station::domain::Cost;
///
/// assert_eq!(Cost::parse("150").expect("valid").to_string(), "150.00");
/// assert_eq!(Cost::parse("19.9").expect("valid").cents(), 1990);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cost(i64);

impl Cost {
    /// Parse a non-negative decimal with at most two fractional digits.
    pub fn parse(raw: &str) -> Result<Self, FieldViolation> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldViolation::new(
                "cost",
                Rule::Empty,
                "cost must not be empty",
            ));
        }
        let malformed = || {
            FieldViolation::new(
                "cost",
                Rule::NotANumber,
                "cost must be a non-negative amount with at most two decimals",
            )
        };
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) || fraction.len() > 2
        {
            return Err(malformed());
        }
        let whole: i64 = whole.parse().map_err(|_| malformed())?;
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| malformed())? * 10,
            _ => fraction.parse().map_err(|_| malformed())?,
        };
        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Self)
            .ok_or_else(|| FieldViolation::new("cost", Rule::OutOfRange, "cost is too large"))
    }

    /// Wrap a non-negative amount in cents.
    pub const fn from_cents(cents: i64) -> Option<Self> {
        if cents < 0 { None } else { Some(Self(cents)) }
    }

    /// Amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0.div_euclid(100), self.0.rem_euclid(100))
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Free-text description of the requested work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderDescription(String);

impl OrderDescription {
    /// Non-empty, bounded description.
    pub fn new(raw: &str) -> Result<Self, FieldViolation> {
        required_text("description", raw, DESCRIPTION_MAX_CHARS).map(Self)
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for OrderDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw order fields as supplied by a client.
#[derive(Debug, Clone, Copy)]
pub struct OrderDraftParts<'a> {
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
    pub car_id: &'a str,
    pub description: &'a str,
    pub cost: &'a str,
}

/// Validated request to create an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub service_date: ServiceDate,
    pub car_id: CarId,
    pub description: OrderDescription,
    pub cost: Cost,
}

impl OrderDraft {
    /// Validate in order: date, car id, description, cost.
    pub fn try_from_parts(
        parts: OrderDraftParts<'_>,
        bounds: YearBounds,
    ) -> Result<Self, FieldViolation> {
        Ok(Self {
            service_date: ServiceDate::parse(parts.day, parts.month, parts.year, bounds)?,
            car_id: CarId::parse("carId", parts.car_id)?,
            description: OrderDescription::new(parts.description)?,
            cost: Cost::parse(parts.cost)?,
        })
    }
}

/// Stored service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub owner_id: UserId,
    pub car_id: CarId,
    pub status: OrderStatus,
    pub service_date: ServiceDate,
    pub cost: Cost,
    pub description: OrderDescription,
    pub has_unread_message: bool,
}

impl Order {
    /// Customers may write while the order is not closed.
    pub const fn can_customer_append_message(&self) -> bool {
        self.status.is_active()
    }
}

/// Which half of a customer's order list to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderListing {
    /// Open and confirmed orders.
    #[default]
    Active,
    /// Closed orders.
    Closed,
}

impl OrderListing {
    /// Map the client's `closed` flag.
    pub const fn from_closed_flag(closed: bool) -> Self {
        if closed { Self::Closed } else { Self::Active }
    }

    /// Statuses included in this listing.
    pub const fn statuses(self) -> &'static [OrderStatus] {
        match self {
            Self::Active => &[OrderStatus::Open, OrderStatus::Confirmed],
            Self::Closed => &[OrderStatus::Closed],
        }
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
