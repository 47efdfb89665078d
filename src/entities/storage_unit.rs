// 📦 StorageUnit Entity - rentable slot with fixed shape
//
// Shape (width/length/height/type) is fixed at creation.
// Rental state is either fully Vacant or fully Occupied:
//
//   Vacant ──rent()──▶ Occupied
//     ▲                   │
//     └────release()──────┘
//
// Tenant, start date and price live together in one Option<Rental>,
// so a half-rented unit can't be represented.

use crate::entities::customer::{Customer, CustomerSnapshot};
use crate::error::{Result, StorageError};
use crate::money::round_cents;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

// ============================================================================
// UNIT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    /// Standard unit with no climate controls
    Standard,

    /// Humidity-controlled unit
    Humidity,

    /// Temperature-controlled unit
    Temperature,
}

impl UnitType {
    pub const ALL: [UnitType; 3] = [UnitType::Standard, UnitType::Humidity, UnitType::Temperature];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Standard => "STANDARD",
            UnitType::Humidity => "HUMIDITY",
            UnitType::Temperature => "TEMPERATURE",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check unit dimensions, in feet
///
/// All must be > 0; width and length multiples of 4; height a multiple of 2.
pub fn validate_dimensions(width: u32, length: u32, height: u32) -> Result<()> {
    if width == 0 || length == 0 || height == 0 {
        return Err(StorageError::invalid("all dimensions must be > 0"));
    }
    if width % 4 != 0 || length % 4 != 0 {
        return Err(StorageError::invalid("width and length must be a multiple of 4"));
    }
    if height % 2 != 0 {
        return Err(StorageError::invalid("height must be a multiple of 2"));
    }
    Ok(())
}

// ============================================================================
// STORAGE UNIT
// ============================================================================

#[derive(Debug, Clone)]
struct Rental {
    tenant: Customer,
    start: NaiveDate,
    price: Decimal,
}

#[derive(Debug, Clone)]
pub struct StorageUnit {
    width: u32,
    length: u32,
    height: u32,
    unit_type: UnitType,
    rental: Option<Rental>,
}

impl StorageUnit {
    /// Create a vacant unit
    pub fn new(width: u32, length: u32, height: u32, unit_type: UnitType) -> Result<Self> {
        validate_dimensions(width, length, height)?;

        Ok(StorageUnit {
            width,
            length,
            height,
            unit_type,
            rental: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    /// Monthly price of the current rental, zero while vacant
    pub fn price(&self) -> Decimal {
        self.rental.as_ref().map_or(Decimal::ZERO, |r| r.price)
    }

    /// Current tenant, None while vacant
    pub fn tenant(&self) -> Option<&Customer> {
        self.rental.as_ref().map(|r| &r.tenant)
    }

    /// Start date of the current rental, None while vacant
    pub fn rental_start(&self) -> Option<NaiveDate> {
        self.rental.as_ref().map(|r| r.start)
    }

    pub fn is_rented(&self) -> bool {
        self.rental.is_some()
    }

    /// Is this unit rented to exactly this customer handle?
    pub fn is_rented_to(&self, customer: &Customer) -> bool {
        self.tenant().is_some_and(|tenant| tenant == customer)
    }

    /// Rent the unit to `customer` starting `start` at a monthly `price`
    ///
    /// Returns `Ok(false)` (and changes nothing) if the unit is already rented.
    /// A zero price is rejected, since zero is what marks a vacant unit.
    /// Negative prices are allowed; billing them credits the tenant.
    pub fn rent(&mut self, customer: &Customer, start: NaiveDate, price: Decimal) -> Result<bool> {
        if price.is_zero() {
            return Err(StorageError::invalid("rental price must not be zero"));
        }
        if let Some(current) = &self.rental {
            warn!(
                unit_type = %self.unit_type,
                tenant = %current.tenant.name(),
                "rent refused: unit already rented"
            );
            return Ok(false);
        }

        debug!(
            unit_type = %self.unit_type,
            tenant = %customer.name(),
            %start,
            %price,
            "unit rented"
        );
        self.rental = Some(Rental {
            tenant: customer.clone(),
            start,
            price,
        });
        Ok(true)
    }

    /// Release the unit back to vacant
    ///
    /// Returns false if it wasn't rented.
    pub fn release(&mut self) -> bool {
        match self.rental.take() {
            Some(rental) => {
                debug!(
                    unit_type = %self.unit_type,
                    tenant = %rental.tenant.name(),
                    "unit released"
                );
                true
            }
            None => {
                warn!(unit_type = %self.unit_type, "release refused: unit not rented");
                false
            }
        }
    }

    /// Human-readable status line, e.g.
    /// `STANDARD unit, 4'(w) x 8'(l) x 8'(h), rented to Pat Perkins for $199.95`
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Copy of this unit's state, tagged with its grid position
    pub fn snapshot(&self, row: usize, col: usize) -> UnitSnapshot {
        UnitSnapshot {
            row,
            col,
            unit_type: self.unit_type,
            width: self.width,
            length: self.length,
            height: self.height,
            tenant: self.tenant().map(Customer::snapshot),
            rental_start: self.rental_start(),
            price: self.price(),
        }
    }
}

impl fmt::Display for StorageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} unit, {}'(w) x {}'(l) x {}'(h), ",
            self.unit_type, self.width, self.length, self.height
        )?;
        match &self.rental {
            None => f.write_str("available"),
            Some(rental) => write!(
                f,
                "rented to {} for ${:.2}",
                rental.tenant.name(),
                round_cents(rental.price)
            ),
        }
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub row: usize,
    pub col: usize,
    pub unit_type: UnitType,
    pub width: u32,
    pub length: u32,
    pub height: u32,
    pub tenant: Option<CustomerSnapshot>,
    pub rental_start: Option<NaiveDate>,
    pub price: Decimal,
}

// ============================================================================
// TESTS
// ============================================================================
