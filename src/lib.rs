//! salesreport: per-employee sales reports as WordprocessingML documents.
//!
//! ```no_run
//! use salesreport::{ReportConfig, SalesReportGenerator, SqliteSalesData};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReportConfig::default();
//! let data = SqliteSalesData::open("sales.db", config.fiscal_years())?;
//! let generator = SalesReportGenerator::builder()
//!     .with_config(config)
//!     .with_data_provider(Arc::new(data))
//!     .build()?;
//! println!("{}", generator.generate_report("275"));
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;

pub use assembler::{AssembledPackage, PackageAssembler};
pub use config::{FiscalYearsConfig, ReportConfig, ResourceNames};
pub use content::SalesReportWriter;
pub use error::ReportError;
pub use generator::{ReportGeneratorBuilder, SalesReportGenerator};

pub use salesreport_resource::FilesystemResourceProvider;
pub use salesreport_source::{InMemorySalesData, SqliteSalesData};
pub use salesreport_traits::{
    DataAccessError, EmployeeSalesProfile, FiscalYears, InMemoryResourceProvider, ResourceError,
    ResourceProvider, SalesDataProvider, TerritorySalesRow,
};
pub use salesreport_wordml::{DrawingTemplate, RelationshipId, WordmlError};
