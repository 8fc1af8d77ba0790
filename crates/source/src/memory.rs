use salesreport_traits::{DataAccessError, EmployeeSalesProfile, SalesDataProvider, TerritorySalesRow};
use std::collections::HashMap;

/// A data provider backed by in-memory maps.
///
/// Useful for tests and demos; rows are returned in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemorySalesData {
    profiles: HashMap<String, EmployeeSalesProfile>,
    territories: HashMap<String, Vec<TerritorySalesRow>>,
}

impl InMemorySalesData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, employee_id: impl Into<String>, profile: EmployeeSalesProfile) -> Self {
        self.profiles.insert(employee_id.into(), profile);
        self
    }

    pub fn with_territory_row(mut self, territory: impl Into<String>, row: TerritorySalesRow) -> Self {
        self.territories.entry(territory.into()).or_default().push(row);
        self
    }
}

impl SalesDataProvider for InMemorySalesData {
    fn employee_profile(
        &self,
        employee_id: &str,
    ) -> Result<Option<EmployeeSalesProfile>, DataAccessError> {
        Ok(self.profiles.get(employee_id).cloned())
    }

    fn territory_comparison(
        &self,
        territory: &str,
    ) -> Result<Vec<TerritorySalesRow>, DataAccessError> {
        Ok(self.territories.get(territory).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "InMemorySalesData"
    }
}
