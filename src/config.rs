// ⚙️ Location Configuration - grid shape, row bands and pricing as data
//
// Every location carries its own config, so two differently shaped
// locations can coexist in one process.
//
// Row bands: contiguous row ranges that share a unit type.
//
//   row  0 ┬─ STANDARD     (band starts at 0)
//          │
//   row  6 ├─ HUMIDITY     (band starts at 6)
//   row  8 ├─ TEMPERATURE  (band starts at 8, runs to the last row)
//   row 11 ┘

use crate::entities::storage_unit::{validate_dimensions, UnitType};
use crate::error::{Result, StorageError};
use anyhow::Context as AnyhowContext;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Number of rows of units in a location
pub const DEFAULT_ROWS: usize = 12;
/// Number of units in each row
pub const DEFAULT_UNITS_PER_ROW: usize = 20;
/// First row of humidity-controlled units
pub const DEFAULT_HUMIDITY_START_ROW: usize = 6;
/// First row of temperature-controlled units
pub const DEFAULT_TEMPERATURE_START_ROW: usize = 8;

/// Largest number of units a single location may hold (rows x units per row)
pub const MAX_UNITS_PER_LOCATION: usize = 100_000;

/// Monthly base price of a standard unit
pub const DEFAULT_BASE_PRICE: Decimal = dec!(100.00);
/// Discount taken off every additional unit rented by the same customer
pub const DEFAULT_MULTI_UNIT_DISCOUNT: Decimal = dec!(0.10);

// ============================================================================
// ROW BAND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowBand {
    /// First row of the band; the band runs until the next band starts
    pub start_row: usize,

    pub unit_type: UnitType,

    /// Multiplier applied to the base price for units in this band
    #[serde(default = "default_multiplier")]
    pub price_multiplier: Decimal,
}

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

// ============================================================================
// UNIT DIMENSIONS
// ============================================================================

/// Dimensions, in feet, of every unit a location builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDimensions {
    pub width: u32,
    pub length: u32,
    pub height: u32,
}

impl Default for UnitDimensions {
    fn default() -> Self {
        UnitDimensions {
            width: 4,
            length: 8,
            height: 8,
        }
    }
}

// ============================================================================
// LOCATION CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub rows: usize,
    pub units_per_row: usize,

    /// Sorted by start_row, first band starts at row 0
    pub bands: Vec<RowBand>,

    pub unit_dimensions: UnitDimensions,

    pub base_price: Decimal,

    /// Fraction in [0, 1)
    pub multi_unit_discount: Decimal,
}

impl Default for LocationConfig {
    fn default() -> Self {
        LocationConfig {
            rows: DEFAULT_ROWS,
            units_per_row: DEFAULT_UNITS_PER_ROW,
            bands: vec![
                RowBand {
                    start_row: 0,
                    unit_type: UnitType::Standard,
                    price_multiplier: dec!(1.00),
                },
                RowBand {
                    start_row: DEFAULT_HUMIDITY_START_ROW,
                    unit_type: UnitType::Humidity,
                    price_multiplier: dec!(1.25),
                },
                RowBand {
                    start_row: DEFAULT_TEMPERATURE_START_ROW,
                    unit_type: UnitType::Temperature,
                    price_multiplier: dec!(1.50),
                },
            ],
            unit_dimensions: UnitDimensions::default(),
            base_price: DEFAULT_BASE_PRICE,
            multi_unit_discount: DEFAULT_MULTI_UNIT_DISCOUNT,
        }
    }
}

impl LocationConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read location config: {:?}", path.as_ref()))?;

        let config: LocationConfig =
            serde_json::from_str(&content).context("Failed to parse location config JSON")?;

        config
            .validate()
            .with_context(|| format!("Invalid location config: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Replace the base price, keeping everything else
    pub fn with_base_price(mut self, base_price: Decimal) -> Self {
        self.base_price = base_price;
        self
    }

    /// Check grid shape, band table, dimensions and pricing
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.units_per_row == 0 {
            return Err(StorageError::invalid("a location needs at least one row and one unit per row"));
        }
        match self.rows.checked_mul(self.units_per_row) {
            Some(total) if total <= MAX_UNITS_PER_LOCATION => {}
            _ => {
                return Err(StorageError::invalid(format!(
                    "a location holds at most {} units ({} rows x {} per row requested)",
                    MAX_UNITS_PER_LOCATION, self.rows, self.units_per_row
                )))
            }
        }

        let first = self
            .bands
            .first()
            .ok_or_else(|| StorageError::invalid("at least one row band is required"))?;
        if first.start_row != 0 {
            return Err(StorageError::invalid("the first row band must start at row 0"));
        }
        for pair in self.bands.windows(2) {
            if pair[1].start_row <= pair[0].start_row {
                return Err(StorageError::invalid(format!(
                    "row bands must start on increasing rows ({} then {})",
                    pair[0].start_row, pair[1].start_row
                )));
            }
        }
        if let Some(last) = self.bands.last() {
            if last.start_row >= self.rows {
                return Err(StorageError::invalid(format!(
                    "row band {} starts at row {}, past the last row",
                    last.unit_type, last.start_row
                )));
            }
        }
        if let Some(band) = self.bands.iter().find(|b| b.price_multiplier <= Decimal::ZERO) {
            return Err(StorageError::invalid(format!(
                "price multiplier for {} must be > 0",
                band.unit_type
            )));
        }

        let dims = self.unit_dimensions;
        validate_dimensions(dims.width, dims.length, dims.height)?;

        if self.base_price <= Decimal::ZERO {
            return Err(StorageError::invalid("base price must be > 0"));
        }
        if self.multi_unit_discount < Decimal::ZERO || self.multi_unit_discount >= Decimal::ONE {
            return Err(StorageError::invalid("multi-unit discount must be in [0, 1)"));
        }

        Ok(())
    }

    /// The band a row falls in (last band whose start_row <= row)
    ///
    /// Only meaningful on a validated config with `row < rows`.
    pub fn band_for_row(&self, row: usize) -> Option<&RowBand> {
        self.bands.iter().rev().find(|band| band.start_row <= row)
    }

    /// Number of rows allocated to a unit type
    pub fn rows_of_type(&self, unit_type: UnitType) -> usize {
        (0..self.rows)
            .filter(|&row| self.band_for_row(row).map(|b| b.unit_type) == Some(unit_type))
            .count()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = LocationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rows, 12);
        assert_eq!(config.units_per_row, 20);
    }

    #[test]
    fn test_band_for_row() {
        let config = LocationConfig::default();

        assert_eq!(config.band_for_row(0).unwrap().unit_type, UnitType::Standard);
        assert_eq!(config.band_for_row(5).unwrap().unit_type, UnitType::Standard);
        assert_eq!(config.band_for_row(6).unwrap().unit_type, UnitType::Humidity);
        assert_eq!(config.band_for_row(7).unwrap().unit_type, UnitType::Humidity);
        assert_eq!(config.band_for_row(8).unwrap().unit_type, UnitType::Temperature);
        assert_eq!(config.band_for_row(11).unwrap().unit_type, UnitType::Temperature);
    }

    #[test]
    fn test_rows_of_type() {
        let config = LocationConfig::default();

        assert_eq!(config.rows_of_type(UnitType::Standard), 6);
        assert_eq!(config.rows_of_type(UnitType::Humidity), 2);
        assert_eq!(config.rows_of_type(UnitType::Temperature), 4);
    }

    #[test]
    fn test_invalid_band_tables() {
        let mut config = LocationConfig::default();
        config.bands.clear();
        assert!(config.validate().is_err());

        let mut config = LocationConfig::default();
        config.bands[0].start_row = 1;
        assert!(config.validate().is_err());

        let mut config = LocationConfig::default();
        config.bands[2].start_row = 6; // same row as humidity
        assert!(config.validate().is_err());

        let mut config = LocationConfig::default();
        config.bands[2].start_row = 12; // past the grid
        assert!(config.validate().is_err());

        let mut config = LocationConfig::default();
        config.bands[1].price_multiplier = Decimal::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_shape_and_pricing() {
        let mut config = LocationConfig::default();
        config.units_per_row = 0;
        assert!(config.validate().is_err());

        let mut config = LocationConfig::default();
        config.unit_dimensions.height = 5;
        assert!(config.validate().is_err());

        let config = LocationConfig::default().with_base_price(Decimal::ZERO);
        assert!(config.validate().is_err());

        let mut config = LocationConfig::default();
        config.multi_unit_discount = Decimal::ONE;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let huge_rows = LocationConfig {
            rows: usize::MAX,
            units_per_row: 1,
            ..LocationConfig::default()
        };
        assert!(matches!(
            huge_rows.validate(),
            Err(StorageError::InvalidArgument(_))
        ));

        // rows x units_per_row overflows usize
        let overflow = LocationConfig {
            rows: usize::MAX / 2,
            units_per_row: 3,
            ..LocationConfig::default()
        };
        assert!(overflow.validate().is_err());

        let at_limit = LocationConfig {
            rows: MAX_UNITS_PER_LOCATION / 20,
            units_per_row: 20,
            ..LocationConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let just_over = LocationConfig {
            rows: MAX_UNITS_PER_LOCATION / 20 + 1,
            ..at_limit
        };
        assert!(just_over.validate().is_err());
    }

    #[test]
    fn test_from_file_rejects_oversized_grid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rows": 18446744073709551615, "units_per_row": 1 }}"#).unwrap();

        let err = LocationConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid location config"));
    }

    #[test]
    fn test_from_file_with_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "rows": 4,
                "units_per_row": 5,
                "bands": [
                    {{ "start_row": 0, "unit_type": "STANDARD" }},
                    {{ "start_row": 3, "unit_type": "TEMPERATURE", "price_multiplier": "2" }}
                ],
                "base_price": "80.00"
            }}"#
        )
        .unwrap();

        let config = LocationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.rows, 4);
        assert_eq!(config.units_per_row, 5);
        assert_eq!(config.bands[0].price_multiplier, Decimal::ONE);
        assert_eq!(config.bands[1].price_multiplier, dec!(2));
        assert_eq!(config.base_price, dec!(80.00));
        // Not in the file, falls back to default
        assert_eq!(config.unit_dimensions, UnitDimensions::default());
        assert_eq!(config.multi_unit_discount, DEFAULT_MULTI_UNIT_DISCOUNT);
    }

    #[test]
    fn test_from_file_rejects_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rows": 0 }}"#).unwrap();

        let err = LocationConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid location config"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = LocationConfig::from_file("/definitely/not/here.json");
        assert!(result.is_err());
    }
}
