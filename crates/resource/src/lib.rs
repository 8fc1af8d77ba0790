//! Resource providers for the sales report templates.
//!
//! - [`FilesystemResourceProvider`]: loads templates from a resource directory
//! - [`InMemoryResourceProvider`]: re-exported from `salesreport-traits`

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use salesreport_traits::InMemoryResourceProvider;
