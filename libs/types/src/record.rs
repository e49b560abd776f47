//! Sale record types
//!
//! `RawSaleRow` is one untyped row as handed over by the external loader;
//! `SaleRecord` is the validated form every engine component works on.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::columns::Column;
use crate::errors::{ValidationError, ValidationReason};
use crate::numeric::Money;

/// Year the first production automobile was sold.
pub const FIRST_CAR_YEAR: i32 = 1886;

/// Accepted `Date` layouts, tried in order after RFC 3339.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One row of the input table, all cells still text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSaleRow {
    #[serde(rename = "Salesperson")]
    pub salesperson: String,
    #[serde(rename = "Car Make")]
    pub car_make: String,
    #[serde(rename = "Car Model")]
    pub car_model: String,
    #[serde(rename = "Car Year")]
    pub car_year: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Sale Price")]
    pub sale_price: String,
    #[serde(rename = "Commission Earned")]
    pub commission_earned: String,
}

/// Validation limits applied while loading rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub min_car_year: i32,
    pub max_car_year: i32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            min_car_year: FIRST_CAR_YEAR,
            max_car_year: Utc::now().year() + 1,
        }
    }
}

/// A validated sale transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleRecord {
    pub salesperson: String,
    pub car_make: String,
    pub car_model: String,
    pub car_year: i32,
    pub sale_date: NaiveDate,
    pub sale_price: Money,
    pub commission_earned: Money,
}

impl SaleRecord {
    /// Validate a raw row. `row` is the 0-based position used in errors.
    ///
    /// Fields are checked in column order; the first failure is returned.
    pub fn from_raw(
        row: usize,
        raw: &RawSaleRow,
        config: &LoaderConfig,
    ) -> Result<Self, ValidationError> {
        let fail = |column: Column, value: &str, reason| {
            ValidationError::new(row, column.header(), value, reason)
        };

        let salesperson = non_empty(&raw.salesperson)
            .ok_or_else(|| fail(Column::Salesperson, &raw.salesperson, ValidationReason::Empty))?;
        let car_make = non_empty(&raw.car_make)
            .ok_or_else(|| fail(Column::CarMake, &raw.car_make, ValidationReason::Empty))?;
        let car_model = non_empty(&raw.car_model)
            .ok_or_else(|| fail(Column::CarModel, &raw.car_model, ValidationReason::Empty))?;
        let car_year = parse_year(&raw.car_year, config)
            .map_err(|reason| fail(Column::CarYear, &raw.car_year, reason))?;
        let sale_date = parse_date(&raw.date)
            .map_err(|reason| fail(Column::Date, &raw.date, reason))?;
        let sale_price = Money::parse(&raw.sale_price)
            .map_err(|reason| fail(Column::SalePrice, &raw.sale_price, reason))?;
        let commission_earned = Money::parse(&raw.commission_earned)
            .map_err(|reason| fail(Column::CommissionEarned, &raw.commission_earned, reason))?;

        Ok(Self {
            salesperson,
            car_make,
            car_model,
            car_year,
            sale_date,
            sale_price,
            commission_earned,
        })
    }

    /// Re-check an already typed record against the same invariants.
    ///
    /// Text fields must already be trimmed, as `from_raw` leaves them.
    pub fn validate(&self, row: usize, config: &LoaderConfig) -> Result<(), ValidationError> {
        for (column, value) in [
            (Column::Salesperson, &self.salesperson),
            (Column::CarMake, &self.car_make),
            (Column::CarModel, &self.car_model),
        ] {
            let trimmed = value.trim();
            let reason = if trimmed.is_empty() {
                ValidationReason::Empty
            } else if trimmed.len() != value.len() {
                ValidationReason::Untrimmed
            } else {
                continue;
            };
            return Err(ValidationError::new(row, column.header(), value.as_str(), reason));
        }
        check_year_range(self.car_year, config).map_err(|reason| {
            ValidationError::new(row, Column::CarYear.header(), self.car_year.to_string(), reason)
        })?;
        for (column, amount) in [
            (Column::SalePrice, self.sale_price),
            (Column::CommissionEarned, self.commission_earned),
        ] {
            amount.check_row_amount().map_err(|reason| {
                ValidationError::new(row, column.header(), amount.to_string(), reason)
            })?;
        }
        Ok(())
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_year(raw: &str, config: &LoaderConfig) -> Result<i32, ValidationReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationReason::Empty);
    }
    let year: i32 = trimmed.parse().map_err(|_| ValidationReason::NotInteger)?;
    check_year_range(year, config)?;
    Ok(year)
}

fn check_year_range(year: i32, config: &LoaderConfig) -> Result<(), ValidationReason> {
    if year < config.min_car_year || year > config.max_car_year {
        return Err(ValidationReason::YearOutOfRange {
            min: config.min_car_year,
            max: config.max_car_year,
        });
    }
    Ok(())
}

/// Parse a sale date, discarding any time of day.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationReason::Empty);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    Err(ValidationReason::UnparsableDate)
}
