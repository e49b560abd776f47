//! Named input columns
//!
//! Lets callers pick grouping keys and aggregation fields by column name
//! (as they appear in the CSV header) instead of closures.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidArgument;
use crate::numeric::Money;
use crate::record::SaleRecord;

/// One column of the sales table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Salesperson,
    CarMake,
    CarModel,
    CarYear,
    Date,
    SalePrice,
    CommissionEarned,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Salesperson,
        Column::CarMake,
        Column::CarModel,
        Column::CarYear,
        Column::Date,
        Column::SalePrice,
        Column::CommissionEarned,
    ];

    /// Header text in the input table.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Salesperson => "Salesperson",
            Column::CarMake => "Car Make",
            Column::CarModel => "Car Model",
            Column::CarYear => "Car Year",
            Column::Date => "Date",
            Column::SalePrice => "Sale Price",
            Column::CommissionEarned => "Commission Earned",
        }
    }

    /// Extract this column from a record as a grouping key.
    pub fn key_of(&self, record: &SaleRecord) -> KeyValue {
        match self {
            Column::Salesperson => KeyValue::Text(record.salesperson.clone()),
            Column::CarMake => KeyValue::Text(record.car_make.clone()),
            Column::CarModel => KeyValue::Text(record.car_model.clone()),
            Column::CarYear => KeyValue::Year(record.car_year),
            Column::Date => KeyValue::Date(record.sale_date),
            Column::SalePrice => KeyValue::Amount(record.sale_price),
            Column::CommissionEarned => KeyValue::Amount(record.commission_earned),
        }
    }
}

impl FromStr for Column {
    type Err = InvalidArgument;

    /// Matches the header text or its snake_case form, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Column::ALL
            .iter()
            .copied()
            .find(|c| normalize_name(c.header()) == wanted)
            .ok_or_else(|| InvalidArgument::new("column", format!("unknown column '{}'", s)))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// A grouping key cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    Text(String),
    Year(i32),
    Date(NaiveDate),
    Amount(Money),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Text(s) => f.write_str(s),
            KeyValue::Year(y) => write!(f, "{}", y),
            KeyValue::Date(d) => write!(f, "{}", d),
            KeyValue::Amount(m) => write!(f, "{}", m),
        }
    }
}

/// A column that can be summed or averaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    SalePrice,
    CommissionEarned,
    CarYear,
}

impl NumericField {
    pub fn value(&self, record: &SaleRecord) -> Decimal {
        match self {
            NumericField::SalePrice => record.sale_price.as_decimal(),
            NumericField::CommissionEarned => record.commission_earned.as_decimal(),
            NumericField::CarYear => Decimal::from(record.car_year),
        }
    }

    pub fn column(&self) -> Column {
        match self {
            NumericField::SalePrice => Column::SalePrice,
            NumericField::CommissionEarned => Column::CommissionEarned,
            NumericField::CarYear => Column::CarYear,
        }
    }
}

impl TryFrom<Column> for NumericField {
    type Error = InvalidArgument;

    fn try_from(column: Column) -> Result<Self, Self::Error> {
        match column {
            Column::SalePrice => Ok(NumericField::SalePrice),
            Column::CommissionEarned => Ok(NumericField::CommissionEarned),
            Column::CarYear => Ok(NumericField::CarYear),
            other => Err(InvalidArgument::new(
                "field",
                format!("column '{}' is not numeric", other),
            )),
        }
    }
}

impl FromStr for NumericField {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::from_str(s).and_then(NumericField::try_from)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_from_header_and_snake_case() {
        assert_eq!("Car Make".parse::<Column>().unwrap(), Column::CarMake);
        assert_eq!("car_model".parse::<Column>().unwrap(), Column::CarModel);
        assert_eq!("COMMISSION EARNED".parse::<Column>().unwrap(), Column::CommissionEarned);
    }

    #[test]
    fn test_unknown_column_is_invalid_argument() {
        let err = "Dealer".parse::<Column>().unwrap_err();
        assert_eq!(err.parameter, "column");
        assert!(err.reason.contains("Dealer"));
    }

    #[test]
    fn test_numeric_field_rejects_text_column() {
        assert_eq!("Sale Price".parse::<NumericField>().unwrap(), NumericField::SalePrice);
        assert!("Salesperson".parse::<NumericField>().is_err());
    }

    #[test]
    fn test_key_value_serializes_untagged() {
        let key = vec![KeyValue::Text("Golf".to_string()), KeyValue::Year(2021)];
        assert_eq!(serde_json::to_string(&key).unwrap(), "[\"Golf\",2021]");
    }
}
