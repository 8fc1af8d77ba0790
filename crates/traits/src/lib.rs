pub mod data;
pub mod resource;

pub use data::{
    DataAccessError, EmployeeSalesProfile, FiscalYears, SalesDataProvider, TerritorySalesRow,
};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
