// Entity Models
//
// - Customer: identity + balance ledger (shared handle)
// - StorageUnit: rentable slot, Vacant ⇄ Occupied
// - StorageLocation: owns the unit grid and the customer roster, does billing

pub mod customer;
pub mod location;
pub mod storage_unit;

pub use customer::{Customer, CustomerSnapshot};
pub use location::{validate_designation, LocationSnapshot, OccupancySummary, StorageLocation};
pub use storage_unit::{validate_dimensions, StorageUnit, UnitSnapshot, UnitType};
