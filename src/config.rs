//! Report configuration.
//!
//! Every field has a default, so an empty JSON object (or no config file at
//! all) yields a working setup that reads `resources/` and writes `reports/`.

use crate::error::ReportError;
use salesreport_traits::FiscalYears;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Names of the template resources, relative to the resource directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceNames {
    pub styles: String,
    pub drawing: String,
    pub header_image: String,
}

impl Default for ResourceNames {
    fn default() -> Self {
        Self {
            styles: "styles.xml".to_string(),
            drawing: "drawingTemplate.xml".to_string(),
            header_image: "headerimage.gif".to_string(),
        }
    }
}

impl ResourceNames {
    /// The configured resource names, styles first.
    pub fn names(&self) -> [&str; 3] {
        [
            self.styles.as_str(),
            self.drawing.as_str(),
            self.header_image.as_str(),
        ]
    }
}

/// The fiscal-year pair as it appears in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiscalYearsConfig {
    pub earlier: String,
    pub later: String,
}

impl Default for FiscalYearsConfig {
    fn default() -> Self {
        let years = FiscalYears::default();
        Self {
            earlier: years.earlier,
            later: years.later,
        }
    }
}

impl From<&FiscalYearsConfig> for FiscalYears {
    fn from(config: &FiscalYearsConfig) -> Self {
        FiscalYears::new(config.earlier.clone(), config.later.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    pub resource_dir: PathBuf,
    pub resources: ResourceNames,
    pub output_dir: PathBuf,
    /// Prepended to every generated file name.
    pub file_prefix: String,
    pub fiscal_years: FiscalYearsConfig,
    pub table_style: String,
    pub territory_heading_style: String,
    /// Written to `docProps/core.xml` as the document creator.
    pub creator: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("resources"),
            resources: ResourceNames::default(),
            output_dir: PathBuf::from("reports"),
            file_prefix: "AdventureWorks".to_string(),
            fiscal_years: FiscalYearsConfig::default(),
            table_style: "LightList-Accent2".to_string(),
            territory_heading_style: "Heading3".to_string(),
            creator: "salesreport".to_string(),
        }
    }
}

impl ReportConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config: ReportConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_resource_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.resource_dir = dir.into();
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_fiscal_years(mut self, earlier: &str, later: &str) -> Self {
        self.fiscal_years = FiscalYearsConfig {
            earlier: earlier.to_string(),
            later: later.to_string(),
        };
        self
    }

    pub fn fiscal_years(&self) -> FiscalYears {
        FiscalYears::from(&self.fiscal_years)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.file_prefix.contains(['/', '\\']) {
            return Err(ReportError::Config(format!(
                "file prefix '{}' must not contain path separators",
                self.file_prefix
            )));
        }
        for (field, value) in [
            ("resources.styles", &self.resources.styles),
            ("resources.drawing", &self.resources.drawing),
            ("resources.headerImage", &self.resources.header_image),
        ] {
            if value.is_empty() {
                return Err(ReportError::Config(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }

    /// Returns a copy with the resource and output directories made absolute
    /// against the current working directory.
    pub fn resolved(&self) -> Result<Self, ReportError> {
        let cwd = std::env::current_dir()?;
        let absolute = |dir: &Path| {
            if dir.is_absolute() {
                dir.to_path_buf()
            } else {
                cwd.join(dir)
            }
        };
        let mut config = self.clone();
        config.resource_dir = absolute(&self.resource_dir);
        config.output_dir = absolute(&self.output_dir);
        Ok(config)
    }
}
