//! OPC package assembly for `.docx` files.
//!
//! Parts are streamed into the ZIP container in a fixed order:
//!
//! 1. auxiliary parts (styles, media) via `add_*`,
//! 2. the main document via [`DocxPackage::main_document_part`],
//! 3. relationships, content types and core properties on [`DocxPackage::finish`].
//!
//! Calling an operation out of that order is a [`WordmlError::PartOrder`].

use crate::error::WordmlError;
use crate::xml;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fmt;
use std::io::{self, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
const PACKAGE_RELS_PART: &str = "_rels/.rels";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
}

pub mod content_types {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const MAIN_DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
}

/// The id of a relationship from one part to another, e.g. `rId2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipId(String);

impl RelationshipId {
    pub fn new(index: usize) -> Self {
        Self(format!("rId{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
struct Relationship {
    id: RelationshipId,
    rel_type: &'static str,
    target: String,
}

/// The relationships of one source part. Ids are assigned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> RelationshipId {
        let id = RelationshipId::new(self.entries.len() + 1);
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type,
            target: target.into(),
        });
        id
    }

    pub fn to_xml(&self) -> Result<Vec<u8>, WordmlError> {
        serialize(|w| {
            let root = BytesStart::new("Relationships").with_attributes([("xmlns", RELATIONSHIPS_NS)]);
            w.write_event(Event::Start(root))?;
            for rel in &self.entries {
                let element = BytesStart::new("Relationship").with_attributes([
                    ("Id", rel.id.as_str()),
                    ("Type", rel.rel_type),
                    ("Target", rel.target.as_str()),
                ]);
                w.write_event(Event::Empty(element))?;
            }
            w.write_event(Event::End(BytesEnd::new("Relationships")))?;
            Ok(())
        })
    }
}

/// `[Content_Types].xml`: defaults by extension plus per-part overrides.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    defaults: Vec<(String, &'static str)>,
    overrides: Vec<(String, &'static str)>,
}

impl ContentTypes {
    pub fn new() -> Self {
        Self {
            defaults: vec![
                ("rels".to_string(), content_types::RELATIONSHIPS),
                ("xml".to_string(), content_types::XML),
            ],
            overrides: Vec::new(),
        }
    }

    /// Registers a default for `extension` unless one already exists.
    pub fn add_default(&mut self, extension: &str, content_type: &'static str) {
        if !self.defaults.iter().any(|(ext, _)| ext.eq_ignore_ascii_case(extension)) {
            self.defaults.push((extension.to_ascii_lowercase(), content_type));
        }
    }

    /// Registers an override for the part at `part_name` (without leading slash).
    pub fn add_override(&mut self, part_name: &str, content_type: &'static str) {
        self.overrides.push((format!("/{}", part_name), content_type));
    }

    pub fn to_xml(&self) -> Result<Vec<u8>, WordmlError> {
        serialize(|w| {
            let root = BytesStart::new("Types").with_attributes([("xmlns", CONTENT_TYPES_NS)]);
            w.write_event(Event::Start(root))?;
            for (extension, content_type) in &self.defaults {
                let element = BytesStart::new("Default").with_attributes([
                    ("Extension", extension.as_str()),
                    ("ContentType", *content_type),
                ]);
                w.write_event(Event::Empty(element))?;
            }
            for (part_name, content_type) in &self.overrides {
                let element = BytesStart::new("Override").with_attributes([
                    ("PartName", part_name.as_str()),
                    ("ContentType", *content_type),
                ]);
                w.write_event(Event::Empty(element))?;
            }
            w.write_event(Event::End(BytesEnd::new("Types")))?;
            Ok(())
        })
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}

/// Image formats accepted as media parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Gif,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Gif => "gif",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Gif => "image/gif",
        }
    }
}

/// Dublin Core metadata written to `docProps/core.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreProperties {
    pub title: String,
    pub creator: String,
    pub created: DateTime<Utc>,
}

impl CoreProperties {
    pub fn new(title: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            creator: creator.into(),
            created: Utc::now(),
        }
    }

    pub fn to_xml(&self) -> Result<Vec<u8>, WordmlError> {
        let created = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        serialize(|w| {
            let root = BytesStart::new("cp:coreProperties").with_attributes([
                (
                    "xmlns:cp",
                    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
                ),
                ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
                ("xmlns:dcterms", "http://purl.org/dc/terms/"),
                ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ]);
            w.write_event(Event::Start(root))?;
            text_element(w, BytesStart::new("dc:title"), &self.title)?;
            text_element(w, BytesStart::new("dc:creator"), &self.creator)?;
            text_element(
                w,
                BytesStart::new("dcterms:created").with_attributes([("xsi:type", "dcterms:W3CDTF")]),
                &created,
            )?;
            w.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
            Ok(())
        })
    }
}

fn text_element(
    w: &mut Writer<Vec<u8>>,
    start: BytesStart<'_>,
    text: &str,
) -> Result<(), WordmlError> {
    let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    w.write_event(Event::Start(start))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(end))?;
    Ok(())
}

fn serialize(
    body: impl FnOnce(&mut Writer<Vec<u8>>) -> Result<(), WordmlError>,
) -> Result<Vec<u8>, WordmlError> {
    let mut w = Writer::new(Vec::new());
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    body(&mut w)?;
    Ok(w.into_inner())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PackageState {
    /// Accepting styles and media parts.
    Auxiliary,
    /// The main document part has been opened.
    MainDocument,
}

/// A `.docx` package being written to `W`.
pub struct DocxPackage<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    state: PackageState,
    document_rels: Relationships,
    content_types: ContentTypes,
    core_properties: Option<CoreProperties>,
    has_styles: bool,
    image_count: usize,
}

impl<W: Write + Seek> DocxPackage<W> {
    pub fn new(inner: W) -> Self {
        Self {
            zip: ZipWriter::new(inner),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            state: PackageState::Auxiliary,
            document_rels: Relationships::new(),
            content_types: ContentTypes::new(),
            core_properties: None,
            has_styles: false,
            image_count: 0,
        }
    }

    fn require_auxiliary(&self, operation: &str) -> Result<(), WordmlError> {
        if self.state != PackageState::Auxiliary {
            return Err(WordmlError::PartOrder(format!(
                "{} after the main document part was opened",
                operation
            )));
        }
        Ok(())
    }

    fn write_part(&mut self, name: &str, bytes: &[u8]) -> Result<(), WordmlError> {
        debug!("Writing package part '{}' ({} bytes)", name, bytes.len());
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(bytes)?;
        Ok(())
    }

    /// Adds the style definitions part. The XML must have a `styles` root.
    pub fn add_styles_part(&mut self, styles_xml: &str) -> Result<RelationshipId, WordmlError> {
        self.require_auxiliary("adding styles")?;
        if self.has_styles {
            return Err(WordmlError::PartOrder("styles part added twice".to_string()));
        }
        let root = xml::root_local_name(styles_xml)?;
        if root != "styles" {
            return Err(WordmlError::MalformedTemplate(format!(
                "expected a 'styles' root element, found '{}'",
                root
            )));
        }
        self.write_part(STYLES_PART, styles_xml.as_bytes())?;
        self.has_styles = true;
        self.content_types
            .add_override(STYLES_PART, content_types::STYLES);
        Ok(self.document_rels.add(rel_types::STYLES, "styles.xml"))
    }

    /// Adds an image under `word/media/` and relates it to the main document.
    pub fn add_image_part(
        &mut self,
        format: ImageFormat,
        bytes: &[u8],
    ) -> Result<RelationshipId, WordmlError> {
        self.require_auxiliary("adding an image")?;
        self.image_count += 1;
        let file_name = format!("image{}.{}", self.image_count, format.extension());
        self.write_part(&format!("word/media/{}", file_name), bytes)?;
        self.content_types
            .add_default(format.extension(), format.content_type());
        Ok(self
            .document_rels
            .add(rel_types::IMAGE, format!("media/{}", file_name)))
    }

    pub fn set_core_properties(&mut self, properties: CoreProperties) {
        self.core_properties = Some(properties);
    }

    /// Opens `word/document.xml` for streaming. Only one main part may be written.
    pub fn main_document_part(&mut self) -> Result<PartStream<'_, W>, WordmlError> {
        self.require_auxiliary("opening the main document part")?;
        debug!("Opening main document part '{}'", MAIN_DOCUMENT_PART);
        self.zip.start_file(MAIN_DOCUMENT_PART, self.options)?;
        self.state = PackageState::MainDocument;
        self.content_types
            .add_override(MAIN_DOCUMENT_PART, content_types::MAIN_DOCUMENT);
        Ok(PartStream { zip: &mut self.zip })
    }

    /// Writes relationships, core properties and content types, then closes
    /// the container.
    pub fn finish(mut self) -> Result<W, WordmlError> {
        if self.state != PackageState::MainDocument {
            return Err(WordmlError::PartOrder(
                "package finished without a main document part".to_string(),
            ));
        }

        let document_rels = self.document_rels.to_xml()?;
        self.write_part(DOCUMENT_RELS_PART, &document_rels)?;

        let mut package_rels = Relationships::new();
        package_rels.add(rel_types::OFFICE_DOCUMENT, MAIN_DOCUMENT_PART);
        if let Some(properties) = self.core_properties.take() {
            let core = properties.to_xml()?;
            self.write_part(CORE_PROPERTIES_PART, &core)?;
            self.content_types
                .add_override(CORE_PROPERTIES_PART, content_types::CORE_PROPERTIES);
            package_rels.add(rel_types::CORE_PROPERTIES, CORE_PROPERTIES_PART);
        }
        let package_rels = package_rels.to_xml()?;
        self.write_part(PACKAGE_RELS_PART, &package_rels)?;

        let types = self.content_types.to_xml()?;
        self.write_part(CONTENT_TYPES_PART, &types)?;

        Ok(self.zip.finish()?)
    }
}

/// Write access to the currently open part of a [`DocxPackage`].
pub struct PartStream<'a, W: Write + Seek> {
    zip: &'a mut ZipWriter<W>,
}

impl<W: Write + Seek> Write for PartStream<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.zip.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.zip.flush()
    }
}
