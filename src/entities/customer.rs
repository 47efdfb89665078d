// 🧑 Customer Entity - identity + running balance
//
// "Customer name is a VALUE (can change), the handle is IDENTITY (never changes)"
//
// A Customer is a shared handle: the location roster and every unit rented to
// the customer hold clones of the SAME handle. Charging rent through any clone
// moves the one balance everybody sees.
//
// Identity is the handle, not the data:
// - clones of one handle are the same customer
// - two customers built from identical name/phone are NOT

use crate::error::{Result, StorageError};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// CUSTOMER ENTITY
// ============================================================================

#[derive(Debug)]
struct CustomerRecord {
    id: Uuid,
    name: String,
    phone: String,
    balance: Decimal,
}

/// Customer handle - cheap to clone, clones share identity and balance
#[derive(Debug, Clone)]
pub struct Customer {
    inner: Arc<RwLock<CustomerRecord>>,
}

impl Customer {
    /// Create a new customer with a zero balance
    ///
    /// Fails with `InvalidArgument` if name or phone is empty.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let phone = phone.into();
        require_non_empty("name", &name)?;
        require_non_empty("phone", &phone)?;

        Ok(Customer {
            inner: Arc::new(RwLock::new(CustomerRecord {
                id: Uuid::new_v4(),
                name,
                phone,
                balance: Decimal::ZERO,
            })),
        })
    }

    /// Stable id, assigned at construction
    pub fn id(&self) -> Uuid {
        self.inner.read().id
    }

    pub fn name(&self) -> String {
        self.inner.read().name.clone()
    }

    pub fn phone(&self) -> String {
        self.inner.read().phone.clone()
    }

    /// Current balance (positive = customer owes money)
    pub fn balance(&self) -> Decimal {
        self.inner.read().balance
    }

    /// Rename the customer; an empty name is rejected and the old one kept
    pub fn set_name(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        require_non_empty("name", &name)?;
        self.inner.write().name = name;
        Ok(())
    }

    /// Change the phone number; an empty phone is rejected and the old one kept
    pub fn set_phone(&self, phone: impl Into<String>) -> Result<()> {
        let phone = phone.into();
        require_non_empty("phone", &phone)?;
        self.inner.write().phone = phone;
        Ok(())
    }

    /// Add `amount` to the balance and return the new balance
    ///
    /// The sign isn't checked: a negative charge behaves as a credit.
    pub fn charge(&self, amount: Decimal) -> Decimal {
        let mut record = self.inner.write();
        record.balance += amount;
        record.balance
    }

    /// Subtract `amount` from the balance and return the new balance
    pub fn credit(&self, amount: Decimal) -> Decimal {
        let mut record = self.inner.write();
        record.balance -= amount;
        record.balance
    }

    /// Point-in-time copy of the customer's values (for display / JSON)
    pub fn snapshot(&self) -> CustomerSnapshot {
        let record = self.inner.read();
        CustomerSnapshot {
            id: record.id,
            name: record.name.clone(),
            phone: record.phone.clone(),
            balance: record.balance,
        }
    }
}

/// Handle identity, not structural equality
impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Customer {}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(StorageError::invalid(format!("{} must not be empty", field)));
    }
    Ok(())
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Immutable copy of a customer's values at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub balance: Decimal,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pat() -> Customer {
        Customer::new("Pat Smith", "206-555-1212").unwrap()
    }

    #[test]
    fn test_customer_creation() {
        let customer = pat();

        assert_eq!(customer.name(), "Pat Smith");
        assert_eq!(customer.phone(), "206-555-1212");
        assert_eq!(customer.balance(), Decimal::ZERO);
        assert!(!customer.id().is_nil());
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(matches!(
            Customer::new("", "206-555-1212"),
            Err(StorageError::InvalidArgument(_))
        ));
        assert!(matches!(
            Customer::new("Pat Smith", ""),
            Err(StorageError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_setters() {
        let customer = pat();

        customer.set_name("Lupe Sanchez").unwrap();
        assert_eq!(customer.name(), "Lupe Sanchez");
        assert_eq!(customer.phone(), "206-555-1212");

        customer.set_phone("425-555-0000").unwrap();
        assert_eq!(customer.phone(), "425-555-0000");
    }

    #[test]
    fn test_setters_reject_empty_and_keep_old_value() {
        let customer = pat();

        assert!(customer.set_name("").is_err());
        assert!(customer.set_phone("").is_err());

        assert_eq!(customer.name(), "Pat Smith");
        assert_eq!(customer.phone(), "206-555-1212");
    }

    #[test]
    fn test_charge_and_credit() {
        let customer = pat();

        assert_eq!(customer.charge(dec!(123.45)), dec!(123.45));
        customer.charge(dec!(0.01));
        assert_eq!(customer.balance(), dec!(123.46));
        assert_eq!(customer.credit(dec!(59.35)), dec!(64.11));
        assert_eq!(customer.balance(), dec!(64.11));
    }

    #[test]
    fn test_negative_charge_acts_as_credit() {
        let customer = pat();

        customer.charge(dec!(-10.00));
        assert_eq!(customer.balance(), dec!(-10.00));

        customer.credit(dec!(-10.00));
        assert_eq!(customer.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_many_small_charges_do_not_drift() {
        let customer = pat();

        for _ in 0..1000 {
            customer.charge(dec!(0.10));
        }
        assert_eq!(customer.balance(), dec!(100.00));
    }

    #[test]
    fn test_identity_is_the_handle() {
        let a = pat();
        let b = pat();
        let a_again = a.clone();

        // Same fields, different customers
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());

        // Clones share identity and balance
        assert_eq!(a, a_again);
        a_again.charge(dec!(50));
        assert_eq!(a.balance(), dec!(50));
        assert_eq!(b.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_snapshot_serializes() {
        let customer = pat();
        customer.charge(dec!(19.99));

        let snapshot = customer.snapshot();
        assert_eq!(snapshot.name, "Pat Smith");
        assert_eq!(snapshot.balance, dec!(19.99));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["name"], "Pat Smith");
        assert_eq!(json["phone"], "206-555-1212");
    }
}
