//! Customer cars.

use serde::Serialize;

use super::validation::required_text;
use super::{CarId, FieldViolation, Rule, UserId};

/// Exact number of characters in a vehicle identification number.
pub const VIN_CHARS: usize = 17;
const BRAND_MAX_CHARS: usize = 50;
const MODEL_MAX_CHARS: usize = 20;
const EARLIEST_MODEL_YEAR: i32 = 1886;
const LATEST_MODEL_YEAR: i32 = 9999;

/// Vehicle identification number.
///
/// # Examples
/// ```
/// use service_station::domain::Vin;
///
/// assert!(Vin::new("1HGCM82633A004352").is_ok());
/// assert!(Vin::new("1HGCM82633A00435").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vin(String);

impl Vin {
    /// Accept exactly seventeen characters after trimming.
    pub fn new(raw: &str) -> Result<Self, FieldViolation> {
        let trimmed = raw.trim();
        if trimmed.chars().count() != VIN_CHARS {
            return Err(FieldViolation::new(
                "vin",
                Rule::WrongLength,
                format!("vin must be exactly {VIN_CHARS} characters"),
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Vin {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Manufacturer name, e.g. `Toyota`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CarBrand(String);

impl CarBrand {
    /// Non-empty, at most fifty characters.
    pub fn new(raw: &str) -> Result<Self, FieldViolation> {
        required_text("brand", raw, BRAND_MAX_CHARS).map(Self)
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CarBrand {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Model name, e.g. `Corolla`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CarModel(String);

impl CarModel {
    /// Non-empty, at most twenty characters.
    pub fn new(raw: &str) -> Result<Self, FieldViolation> {
        required_text("model", raw, MODEL_MAX_CHARS).map(Self)
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CarModel {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Model year of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelYear(i32);

impl ModelYear {
    /// Parse a textual year.
    pub fn parse(raw: &str) -> Result<Self, FieldViolation> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldViolation::new(
                "year",
                Rule::Empty,
                "year must not be empty",
            ));
        }
        let year: i32 = trimmed
            .parse()
            .map_err(|_| FieldViolation::new("year", Rule::NotANumber, "year must be numeric"))?;
        if !(EARLIEST_MODEL_YEAR..=LATEST_MODEL_YEAR).contains(&year) {
            return Err(FieldViolation::new(
                "year",
                Rule::OutOfRange,
                format!("year must be between {EARLIEST_MODEL_YEAR} and {LATEST_MODEL_YEAR}"),
            ));
        }
        Ok(Self(year))
    }

    pub(crate) const fn from_stored(value: i32) -> Self {
        Self(value)
    }

    /// Numeric year.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Validated input for registering a car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub brand: CarBrand,
    pub model: CarModel,
    pub vin: Vin,
    pub year: ModelYear,
}

impl NewCar {
    /// Validate fields in order: brand, model, vin, year.
    pub fn try_from_parts(
        brand: &str,
        model: &str,
        vin: &str,
        year: &str,
    ) -> Result<Self, FieldViolation> {
        Ok(Self {
            brand: CarBrand::new(brand)?,
            model: CarModel::new(model)?,
            vin: Vin::new(vin)?,
            year: ModelYear::parse(year)?,
        })
    }
}

/// Stored car. Soft-deleted cars keep their row so existing orders resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    pub owner_id: UserId,
    pub brand: CarBrand,
    pub model: CarModel,
    pub vin: Vin,
    pub year: ModelYear,
    pub deleted: bool,
}
