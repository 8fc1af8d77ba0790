//! Sales data providers.
//!
//! ## Available Providers
//!
//! - [`InMemorySalesData`]: profiles and territory rows held in memory
//! - [`SqliteSalesData`]: queries the sales-person views of a SQLite database
//!
//! ## Example
//!
//! ```ignore
//! use salesreport_source::InMemorySalesData;
//! use salesreport_traits::{EmployeeSalesProfile, SalesDataProvider, TerritorySalesRow};
//!
//! let data = InMemorySalesData::new()
//!     .with_profile("275", EmployeeSalesProfile::new("Jane Doe", "555-1234", "jane@x.com",
//!         Some("Northwest".into()), Some("5000".into()), Some("7000".into())))
//!     .with_territory_row("Northwest", TerritorySalesRow::new("Jane Doe", "6000", "7000"));
//!
//! let profile = data.employee_profile("275")?;
//! ```

mod memory;
mod sqlite;

pub use memory::InMemorySalesData;
pub use sqlite::SqliteSalesData;
