// Storage Spots - Core Library
// Unit inventory and monthly billing for a single storage-rental facility

pub mod config;
pub mod entities;
pub mod error;
pub mod money;

// Re-export commonly used types
pub use config::{LocationConfig, RowBand, UnitDimensions};
pub use entities::{
    Customer, CustomerSnapshot,
    StorageUnit, UnitSnapshot, UnitType,
    StorageLocation, LocationSnapshot, OccupancySummary,
};
pub use error::{Result, StorageError};
pub use money::format_currency;
