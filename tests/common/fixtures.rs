use salesreport::{
    EmployeeSalesProfile, FilesystemResourceProvider, InMemoryResourceProvider, InMemorySalesData,
    ReportConfig, ResourceProvider, SalesReportGenerator, TerritorySalesRow,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory holding the resources shipped with the crate
pub fn shipped_resource_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
}

/// Provider over the shipped styles, drawing template and header image
pub fn shipped_resources() -> Arc<dyn ResourceProvider> {
    Arc::new(FilesystemResourceProvider::new(shipped_resource_dir()))
}

/// In-memory copy of the shipped resources, for tests that replace one of them
pub fn in_memory_resources() -> InMemoryResourceProvider {
    let dir = shipped_resource_dir();
    let read = |name: &str| std::fs::read(dir.join(name)).expect("shipped resource missing");
    InMemoryResourceProvider::new()
        .with_resource("styles.xml", read("styles.xml"))
        .with_resource("drawingTemplate.xml", read("drawingTemplate.xml"))
        .with_resource("headerimage.gif", read("headerimage.gif"))
}

pub fn jane_doe() -> EmployeeSalesProfile {
    EmployeeSalesProfile::new(
        "Jane Doe",
        "555-1234",
        "jane@x.com",
        Some("Northwest".into()),
        Some("5000".into()),
        Some("7000".into()),
    )
}

/// Employee 275 (Jane Doe) with two Northwest comparison rows
pub fn sample_sales_data() -> InMemorySalesData {
    InMemorySalesData::new()
        .with_profile("275", jane_doe())
        .with_territory_row("Northwest", TerritorySalesRow::new("Jane Doe", "6000", "7000"))
        .with_territory_row("Northwest", TerritorySalesRow::new("Sam Lee", "4000", "4500"))
}

/// Build a generator writing into `output_dir`
pub fn generator(
    output_dir: &Path,
    resources: Arc<dyn ResourceProvider>,
    data: InMemorySalesData,
) -> SalesReportGenerator {
    SalesReportGenerator::builder()
        .with_config(ReportConfig::default().with_output_dir(output_dir))
        .with_resource_provider(resources)
        .with_data_provider(Arc::new(data))
        .build()
        .expect("generator configuration is valid")
}
