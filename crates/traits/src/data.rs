//! The sales data seam.
//!
//! The report generator never talks to a database directly. It asks a
//! [`SalesDataProvider`] for one employee profile and for the territory
//! comparison rows, and renders whatever comes back.

use std::fmt::Debug;
use thiserror::Error;

/// Territory name used when the source row has none.
pub const DEFAULT_TERRITORY: &str = "NA";
/// Amount used when quota or year-to-date sales are missing.
pub const DEFAULT_AMOUNT: &str = "0";

/// Errors surfaced by a data provider.
#[derive(Error, Debug, Clone)]
pub enum DataAccessError {
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Contact and sales figures for a single employee.
///
/// Amounts are kept as the display strings produced by the data layer; the
/// document adds no currency symbol or grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSalesProfile {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub territory: String,
    pub sales_quota: String,
    pub sales_ytd: String,
}

impl EmployeeSalesProfile {
    /// Builds a profile from one result row, defaulting the nullable columns.
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        territory: Option<String>,
        sales_quota: Option<String>,
        sales_ytd: Option<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            email: email.into(),
            territory: territory.unwrap_or_else(|| DEFAULT_TERRITORY.to_string()),
            sales_quota: sales_quota.unwrap_or_else(|| DEFAULT_AMOUNT.to_string()),
            sales_ytd: sales_ytd.unwrap_or_else(|| DEFAULT_AMOUNT.to_string()),
        }
    }
}

/// The profile used when no record exists for the requested employee.
impl Default for EmployeeSalesProfile {
    fn default() -> Self {
        Self::new("", "", "", None, None, None)
    }
}

/// One employee's sales in the two compared fiscal years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritorySalesRow {
    pub employee_name: String,
    pub earlier_year_sales: String,
    pub later_year_sales: String,
}

impl TerritorySalesRow {
    pub fn new(
        employee_name: impl Into<String>,
        earlier_year_sales: impl Into<String>,
        later_year_sales: impl Into<String>,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            earlier_year_sales: earlier_year_sales.into(),
            later_year_sales: later_year_sales.into(),
        }
    }

    /// Cell values in table column order: name, earlier year, later year.
    pub fn cells(&self) -> [&str; 3] {
        [
            self.employee_name.as_str(),
            self.earlier_year_sales.as_str(),
            self.later_year_sales.as_str(),
        ]
    }
}

/// The two fiscal years compared in the territory table.
///
/// The same labels select the data columns and head the table, so the header
/// always names the years the numbers came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalYears {
    pub earlier: String,
    pub later: String,
}

impl FiscalYears {
    pub fn new(earlier: impl Into<String>, later: impl Into<String>) -> Self {
        Self {
            earlier: earlier.into(),
            later: later.into(),
        }
    }
}

impl Default for FiscalYears {
    fn default() -> Self {
        Self::new("2003", "2004")
    }
}

/// Read access to the sales database.
pub trait SalesDataProvider: Send + Sync + Debug {
    /// Fetch one employee's profile. `Ok(None)` means no such employee.
    fn employee_profile(
        &self,
        employee_id: &str,
    ) -> Result<Option<EmployeeSalesProfile>, DataAccessError>;

    /// Fetch the two-year comparison for every employee in `territory`.
    fn territory_comparison(
        &self,
        territory: &str,
    ) -> Result<Vec<TerritorySalesRow>, DataAccessError>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}
