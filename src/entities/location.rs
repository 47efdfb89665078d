// 🏢 StorageLocation - one facility: unit grid + customer roster + billing
//
// The grid is built once from the LocationConfig and never changes shape.
// Units move between vacant and occupied; customers are only ever appended.
//
// Every scan (empty units, customer units, billing) walks the grid in
// row-major order: row ascending, then column ascending.

use crate::config::LocationConfig;
use crate::entities::customer::{Customer, CustomerSnapshot};
use crate::entities::storage_unit::{StorageUnit, UnitSnapshot, UnitType};
use crate::error::{Result, StorageError};
use crate::money::round_cents;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Two upper-case letters (state), two digits, then the city name
static DESIGNATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Za-z ]+$").expect("designation pattern compiles"));

/// Check a location designation, e.g. "WA23Issaquah"
pub fn validate_designation(designation: &str) -> Result<()> {
    if designation.is_empty() {
        return Err(StorageError::invalid("location designation must not be empty"));
    }
    if !DESIGNATION_PATTERN.is_match(designation) {
        return Err(StorageError::invalid(format!(
            "designation {:?} doesn't match the required pattern",
            designation
        )));
    }
    Ok(())
}

// ============================================================================
// STORAGE LOCATION
// ============================================================================

#[derive(Debug)]
pub struct StorageLocation {
    designation: String,
    config: LocationConfig,

    /// units[row][col]
    units: Vec<Vec<StorageUnit>>,

    /// Insertion order, append-only
    customers: Vec<Customer>,
}

impl StorageLocation {
    /// Create a location with the default 12 x 20 grid and pricing
    pub fn new(designation: impl Into<String>) -> Result<Self> {
        Self::with_config(designation, LocationConfig::default())
    }

    /// Create a location with an explicit grid shape, band table and pricing
    pub fn with_config(designation: impl Into<String>, config: LocationConfig) -> Result<Self> {
        let designation = designation.into();
        validate_designation(&designation)?;
        config.validate()?;

        let dims = config.unit_dimensions;
        let mut units = Vec::with_capacity(config.rows);
        for row in 0..config.rows {
            let unit_type = config
                .band_for_row(row)
                .map(|band| band.unit_type)
                .ok_or_else(|| StorageError::invalid(format!("no row band covers row {}", row)))?;

            let row_units = (0..config.units_per_row)
                .map(|_| StorageUnit::new(dims.width, dims.length, dims.height, unit_type))
                .collect::<Result<Vec<_>>>()?;
            units.push(row_units);
        }

        info!(
            %designation,
            rows = config.rows,
            units_per_row = config.units_per_row,
            "storage location created"
        );

        Ok(StorageLocation {
            designation,
            config,
            units,
            customers: Vec::new(),
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn config(&self) -> &LocationConfig {
        &self.config
    }

    pub fn row_count(&self) -> usize {
        self.units.len()
    }

    pub fn units_per_row_count(&self) -> usize {
        self.config.units_per_row
    }

    /// Monthly base price before band multiplier and discounts
    pub fn unit_base_price(&self) -> Decimal {
        self.config.base_price
    }

    pub fn multi_unit_discount(&self) -> Decimal {
        self.config.multi_unit_discount
    }

    /// The unit at (row, col)
    pub fn storage_unit(&self, row: usize, col: usize) -> Result<&StorageUnit> {
        let row_count = self.units.len();
        let row_units = self.units.get(row).ok_or(StorageError::IndexOutOfRange {
            what: "row",
            index: row,
            len: row_count,
        })?;
        row_units.get(col).ok_or(StorageError::IndexOutOfRange {
            what: "unit",
            index: col,
            len: row_units.len(),
        })
    }

    /// Mutable access to the unit at (row, col), for renting and releasing
    pub fn storage_unit_mut(&mut self, row: usize, col: usize) -> Result<&mut StorageUnit> {
        let row_count = self.units.len();
        let row_units = self.units.get_mut(row).ok_or(StorageError::IndexOutOfRange {
            what: "row",
            index: row,
            len: row_count,
        })?;
        let len = row_units.len();
        row_units.get_mut(col).ok_or(StorageError::IndexOutOfRange {
            what: "unit",
            index: col,
            len,
        })
    }

    /// All units in row-major order
    pub fn units(&self) -> impl Iterator<Item = &StorageUnit> {
        self.units.iter().flatten()
    }

    /// All units with their (row, col), in row-major order
    pub fn units_with_position(&self) -> impl Iterator<Item = (usize, usize, &StorageUnit)> {
        self.units.iter().enumerate().flat_map(|(row, row_units)| {
            row_units
                .iter()
                .enumerate()
                .map(move |(col, unit)| (row, col, unit))
        })
    }

    // ------------------------------------------------------------------------
    // Customer roster
    // ------------------------------------------------------------------------

    /// Append a customer to the roster and return its index
    pub fn add_customer(&mut self, customer: Customer) -> usize {
        info!(
            designation = %self.designation,
            customer = %customer.name(),
            "customer added"
        );
        self.customers.push(customer);
        self.customers.len() - 1
    }

    /// The customer at `index` in the roster
    pub fn customer(&self, index: usize) -> Result<&Customer> {
        self.customers.get(index).ok_or(StorageError::IndexOutOfRange {
            what: "customer",
            index,
            len: self.customers.len(),
        })
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    // ------------------------------------------------------------------------
    // Inventory queries
    // ------------------------------------------------------------------------

    /// Units rented to exactly this customer handle, in row-major order
    ///
    /// `None` in → `None` out. A customer with no units gets `Some(vec![])`.
    pub fn customer_units(&self, customer: Option<&Customer>) -> Option<Vec<&StorageUnit>> {
        let customer = customer?;
        Some(self.units().filter(|unit| unit.is_rented_to(customer)).collect())
    }

    /// Vacant units in row-major order, optionally only of one type
    pub fn empty_units(&self, unit_type: Option<UnitType>) -> Vec<&StorageUnit> {
        self.units()
            .filter(|unit| !unit.is_rented())
            .filter(|unit| unit_type.map_or(true, |wanted| unit.unit_type() == wanted))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Pricing and renting
    // ------------------------------------------------------------------------

    /// Monthly price this location would charge `customer` for the unit at (row, col)
    ///
    /// base price x band multiplier, less the multi-unit discount when the
    /// customer already rents something here.
    pub fn quote_price(&self, row: usize, col: usize, customer: &Customer) -> Result<Decimal> {
        self.storage_unit(row, col)?;
        let band = self
            .config
            .band_for_row(row)
            .ok_or_else(|| StorageError::invalid(format!("no row band covers row {}", row)))?;

        let mut price = self.config.base_price * band.price_multiplier;
        if self.units().any(|unit| unit.is_rented_to(customer)) {
            price *= Decimal::ONE - self.config.multi_unit_discount;
        }
        Ok(round_cents(price))
    }

    /// Rent the unit at (row, col) to `customer` at the quoted price
    ///
    /// `Ok(false)` if the unit is already rented.
    pub fn rent_unit(
        &mut self,
        row: usize,
        col: usize,
        customer: &Customer,
        start: NaiveDate,
    ) -> Result<bool> {
        let price = self.quote_price(row, col, customer)?;
        self.storage_unit_mut(row, col)?.rent(customer, start, price)
    }

    /// Release the unit at (row, col); `Ok(false)` if it wasn't rented
    pub fn release_unit(&mut self, row: usize, col: usize) -> Result<bool> {
        Ok(self.storage_unit_mut(row, col)?.release())
    }

    // ------------------------------------------------------------------------
    // Billing
    // ------------------------------------------------------------------------

    /// Charge every tenant the price of each unit they rent
    ///
    /// Returns the total charged. A tenant with three units is charged three times.
    pub fn charge_monthly_rent(&self) -> Decimal {
        let mut total = Decimal::ZERO;
        let mut charged_units = 0usize;

        for unit in self.units() {
            if let Some(tenant) = unit.tenant() {
                tenant.charge(unit.price());
                total += unit.price();
                charged_units += 1;
            }
        }

        info!(
            designation = %self.designation,
            charged_units,
            %total,
            "monthly rent charged"
        );
        total
    }

    // ------------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------------

    /// Counts of vacant/occupied units and the rent due each month
    pub fn occupancy(&self) -> OccupancySummary {
        let mut vacant_by_type: BTreeMap<String, usize> = UnitType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), 0))
            .collect();
        let mut summary = OccupancySummary {
            total_units: 0,
            vacant_units: 0,
            occupied_units: 0,
            vacant_by_type: BTreeMap::new(),
            monthly_rent_due: Decimal::ZERO,
        };

        for unit in self.units() {
            summary.total_units += 1;
            if unit.is_rented() {
                summary.occupied_units += 1;
                summary.monthly_rent_due += unit.price();
            } else {
                summary.vacant_units += 1;
                *vacant_by_type
                    .entry(unit.unit_type().as_str().to_string())
                    .or_insert(0) += 1;
            }
        }

        summary.vacant_by_type = vacant_by_type;
        summary
    }

    /// Serializable view of the location: roster, rented units and occupancy
    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            designation: self.designation.clone(),
            customers: self.customers.iter().map(Customer::snapshot).collect(),
            rented_units: self
                .units_with_position()
                .filter(|(_, _, unit)| unit.is_rented())
                .map(|(row, col, unit)| unit.snapshot(row, col))
                .collect(),
            occupancy: self.occupancy(),
        }
    }
}

// ============================================================================
// REPORTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub total_units: usize,
    pub vacant_units: usize,
    pub occupied_units: usize,

    /// Keyed by unit type name ("STANDARD", ...)
    pub vacant_by_type: BTreeMap<String, usize>,

    /// Sum of the prices of all occupied units
    pub monthly_rent_due: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub designation: String,
    pub customers: Vec<CustomerSnapshot>,
    pub rented_units: Vec<UnitSnapshot>,
    pub occupancy: OccupancySummary,
}

// ============================================================================
// TESTS
// ============================================================================
