//! Report orchestration: one employee id in, one `.docx` file out.

use crate::assembler::PackageAssembler;
use crate::config::ReportConfig;
use crate::content::SalesReportWriter;
use crate::error::ReportError;
use chrono::Utc;
use log::{error, info, warn};
use rand::Rng;
use salesreport_traits::{EmployeeSalesProfile, ResourceProvider, SalesDataProvider};
use salesreport_wordml::{CoreProperties, DrawingTemplate};
use std::path::PathBuf;
use std::sync::Arc;

/// Generates sales report documents.
///
/// The generator holds no per-report state, so one instance can serve
/// concurrent callers. Each call writes its own uniquely named file.
#[derive(Debug, Clone)]
pub struct SalesReportGenerator {
    config: ReportConfig,
    resources: Arc<dyn ResourceProvider>,
    data: Arc<dyn SalesDataProvider>,
    assembler: PackageAssembler,
}

impl SalesReportGenerator {
    pub fn builder() -> ReportGeneratorBuilder {
        ReportGeneratorBuilder::new()
    }

    /// Generates the report for `employee_id` and returns the path written.
    pub fn generate(&self, employee_id: &str) -> Result<PathBuf, ReportError> {
        info!("Generating sales report for employee '{}'", employee_id);
        let output_path = self.unique_output_path();

        let drawing_name = &self.config.resources.drawing;
        let drawing = self
            .resources
            .load_text(drawing_name)
            .map_err(|e| ReportError::resource(drawing_name, e))
            .and_then(|text| {
                DrawingTemplate::parse(text).map_err(|e| ReportError::resource(drawing_name, e))
            })?;

        let mut package = self.assembler.create(&output_path)?;

        let profile = match self.data.employee_profile(employee_id)? {
            Some(profile) => profile,
            None => {
                warn!(
                    "No sales person record for employee '{}'; using defaults",
                    employee_id
                );
                EmployeeSalesProfile::default()
            }
        };
        let rows = self.data.territory_comparison(&profile.territory)?;

        let writer = SalesReportWriter::new(drawing, self.config.fiscal_years())
            .with_table_style(self.config.table_style.as_str())
            .with_territory_heading_style(self.config.territory_heading_style.as_str());
        let image_rel_id = package.image_relationship_id().clone();
        writer.write_body(package.main_document_part()?, &profile, &rows, &image_rel_id)?;

        package.set_core_properties(CoreProperties::new(
            format!("Sales Report - {}", profile.full_name),
            self.config.creator.as_str(),
        ));
        let path = package.finish()?;
        info!(
            "Sales report for employee '{}' written to '{}'",
            employee_id,
            path.display()
        );
        Ok(path)
    }

    /// Like [`generate`](Self::generate), but returns the path on success and
    /// the error message on failure.
    pub fn generate_report(&self, employee_id: &str) -> String {
        match self.generate(employee_id) {
            Ok(path) => path.display().to_string(),
            Err(e) => {
                error!("Sales report for employee '{}' failed: {}", employee_id, e);
                e.to_string()
            }
        }
    }

    /// `<output_dir>/<prefix><UTC timestamp>-<random token>.docx`
    fn unique_output_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%6fZ");
        let token: u32 = rand::rng().random();
        self.config.output_dir.join(format!(
            "{}{}-{:08x}.docx",
            self.config.file_prefix, stamp, token
        ))
    }
}

/// Builder for [`SalesReportGenerator`].
///
/// A data provider is required. Without an explicit resource provider, the
/// configured resource directory is used.
#[derive(Default)]
pub struct ReportGeneratorBuilder {
    config: Option<ReportConfig>,
    resources: Option<Arc<dyn ResourceProvider>>,
    data: Option<Arc<dyn SalesDataProvider>>,
}

impl ReportGeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(provider);
        self
    }

    pub fn with_data_provider(mut self, provider: Arc<dyn SalesDataProvider>) -> Self {
        self.data = Some(provider);
        self
    }

    pub fn build(self) -> Result<SalesReportGenerator, ReportError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let data = self.data.ok_or_else(|| {
            ReportError::Config(
                "No data provider has been configured. Use `with_data_provider`.".to_string(),
            )
        })?;
        let resources: Arc<dyn ResourceProvider> = match self.resources {
            Some(provider) => provider,
            None => Arc::new(salesreport_resource::FilesystemResourceProvider::new(
                &config.resource_dir,
            )),
        };
        info!(
            "Report generator ready (data: {}, resources: {} at '{}')",
            data.name(),
            resources.name(),
            resources.base_path().unwrap_or("<memory>")
        );
        for name in config.resources.names() {
            if !resources.exists(name) {
                warn!("Template resource '{}' not found; reports will fail", name);
            }
        }
        let assembler = PackageAssembler::new(Arc::clone(&resources), config.resources.clone());
        Ok(SalesReportGenerator {
            config,
            resources,
            data,
            assembler,
        })
    }
}
