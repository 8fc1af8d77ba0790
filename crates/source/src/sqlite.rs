//! SQLite-backed sales data.
//!
//! Expects the two AdventureWorks-style views:
//!
//! - `v_sales_person(sales_person_id, first_name, last_name, phone, email_address,
//!   territory_name, sales_quota, sales_ytd)`
//! - `v_sales_person_sales_by_fiscal_years(full_name, sales_territory, [<year>], ...)`
//!   with one column per fiscal year, named by the year.

use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use salesreport_traits::{
    DataAccessError, EmployeeSalesProfile, FiscalYears, SalesDataProvider, TerritorySalesRow,
};
use std::path::Path;
use std::sync::Mutex;

const PROFILE_QUERY: &str = "SELECT first_name || ' ' || last_name AS full_name, phone, email_address, \
     territory_name, sales_quota, sales_ytd \
     FROM v_sales_person WHERE sales_person_id = ?1";

/// A data provider reading from a SQLite database.
#[derive(Debug)]
pub struct SqliteSalesData {
    conn: Mutex<Connection>,
    territory_query: String,
}

impl SqliteSalesData {
    /// Opens the database at `path` read-only.
    pub fn open<P: AsRef<Path>>(path: P, years: FiscalYears) -> Result<Self, DataAccessError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| DataAccessError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_connection(conn, years)
    }

    /// Wraps an already opened connection.
    ///
    /// Year labels become column names, so they must be plain digits.
    pub fn from_connection(conn: Connection, years: FiscalYears) -> Result<Self, DataAccessError> {
        for year in [&years.earlier, &years.later] {
            if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
                return Err(DataAccessError::InvalidQuery(format!(
                    "fiscal year '{}' is not a year column",
                    year
                )));
            }
        }
        let territory_query = format!(
            "SELECT full_name, [{}], [{}] FROM v_sales_person_sales_by_fiscal_years \
             WHERE sales_territory = ?1",
            years.earlier, years.later
        );
        Ok(Self {
            conn: Mutex::new(conn),
            territory_query,
        })
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, DataAccessError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| DataAccessError::Unavailable("connection lock poisoned".to_string()))?;
        f(&conn).map_err(|e| DataAccessError::Query(e.to_string()))
    }
}

/// Renders a column value the way it should read in the document.
fn display_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

impl SalesDataProvider for SqliteSalesData {
    fn employee_profile(
        &self,
        employee_id: &str,
    ) -> Result<Option<EmployeeSalesProfile>, DataAccessError> {
        debug!("Querying profile for employee '{}'", employee_id);
        self.with_connection(|conn| {
            conn.query_row(PROFILE_QUERY, params![employee_id], |row| {
                Ok(EmployeeSalesProfile::new(
                    display_value(row.get_ref(0)?).unwrap_or_default(),
                    display_value(row.get_ref(1)?).unwrap_or_default(),
                    display_value(row.get_ref(2)?).unwrap_or_default(),
                    display_value(row.get_ref(3)?),
                    display_value(row.get_ref(4)?),
                    display_value(row.get_ref(5)?),
                ))
            })
            .optional()
        })
    }

    fn territory_comparison(
        &self,
        territory: &str,
    ) -> Result<Vec<TerritorySalesRow>, DataAccessError> {
        debug!("Querying fiscal year comparison for territory '{}'", territory);
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&self.territory_query)?;
            let rows = stmt.query_map(params![territory], |row| {
                Ok(TerritorySalesRow::new(
                    display_value(row.get_ref(0)?).unwrap_or_default(),
                    display_value(row.get_ref(1)?).unwrap_or_default(),
                    display_value(row.get_ref(2)?).unwrap_or_default(),
                ))
            })?;
            rows.collect()
        })
    }

    fn name(&self) -> &'static str {
        "SqliteSalesData"
    }
}
