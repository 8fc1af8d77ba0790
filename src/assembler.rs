//! Builds the package skeleton: container, styles part and header image.

use crate::config::ResourceNames;
use crate::error::ReportError;
use log::debug;
use salesreport_traits::ResourceProvider;
use salesreport_wordml::{CoreProperties, DocxPackage, ImageFormat, PartStream, RelationshipId};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Creates report packages from the template resources.
#[derive(Debug, Clone)]
pub struct PackageAssembler {
    resources: Arc<dyn ResourceProvider>,
    names: ResourceNames,
}

/// A package whose auxiliary parts are written and whose main document part
/// is still to come.
///
/// The package lives in a temporary file next to its output path. Dropping it
/// without calling [`finish`](Self::finish) removes that file.
pub struct AssembledPackage {
    package: DocxPackage<NamedTempFile>,
    image_rel_id: RelationshipId,
    output_path: PathBuf,
}

impl PackageAssembler {
    pub fn new(resources: Arc<dyn ResourceProvider>, names: ResourceNames) -> Self {
        Self { resources, names }
    }

    /// Starts a package destined for `output_path`.
    ///
    /// Fails with [`ReportError::ResourceMissing`] if the styles part or the
    /// header image cannot be loaded or has the wrong format, and with
    /// [`ReportError::Io`] if the container cannot be created. Nothing is left
    /// at `output_path` in either case.
    pub fn create<P: AsRef<Path>>(&self, output_path: P) -> Result<AssembledPackage, ReportError> {
        let output_path = output_path.as_ref().to_path_buf();
        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let temp = tempfile::Builder::new()
            .prefix(".salesreport-")
            .suffix(".tmp")
            .tempfile_in(&dir)?;
        debug!("Assembling package in '{}'", temp.path().display());

        let mut package = DocxPackage::new(temp);

        let styles = self
            .resources
            .load_text(&self.names.styles)
            .map_err(|e| ReportError::resource(&self.names.styles, e))?;
        package
            .add_styles_part(&styles)
            .map_err(|e| ReportError::resource(&self.names.styles, e))?;

        let image = self
            .resources
            .load(&self.names.header_image)
            .map_err(|e| ReportError::resource(&self.names.header_image, e))?;
        match image::guess_format(&image) {
            Ok(image::ImageFormat::Gif) => {}
            Ok(other) => {
                return Err(ReportError::resource(
                    &self.names.header_image,
                    format!("expected a GIF image, found {:?}", other),
                ));
            }
            Err(e) => return Err(ReportError::resource(&self.names.header_image, e)),
        }
        let image_rel_id = package.add_image_part(ImageFormat::Gif, &image)?;
        debug!("Header image related as '{}'", image_rel_id);

        Ok(AssembledPackage {
            package,
            image_rel_id,
            output_path,
        })
    }
}

impl AssembledPackage {
    /// The relationship id under which the header image is reachable from
    /// the main document part.
    pub fn image_relationship_id(&self) -> &RelationshipId {
        &self.image_rel_id
    }

    /// Opens the main document part for writing. It can be opened once.
    pub fn main_document_part(&mut self) -> Result<PartStream<'_, NamedTempFile>, ReportError> {
        Ok(self.package.main_document_part()?)
    }

    pub fn set_core_properties(&mut self, properties: CoreProperties) {
        self.package.set_core_properties(properties);
    }

    /// Completes the package and moves it to its output path.
    ///
    /// An existing file at the output path is never replaced.
    pub fn finish(self) -> Result<PathBuf, ReportError> {
        let mut temp = self.package.finish()?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        temp.persist_noclobber(&self.output_path)
            .map_err(|e| ReportError::Io(e.error))?;
        debug!("Package persisted to '{}'", self.output_path.display());
        Ok(self.output_path)
    }
}
