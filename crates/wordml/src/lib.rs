//! WordprocessingML output for salesreport.
//!
//! - [`WmlWriter`] streams `word/document.xml` with escaped text and
//!   balanced elements.
//! - [`DocxPackage`] assembles the OPC container around it.
//! - [`DrawingTemplate`] holds the inline picture fragment for header images.

pub mod drawing;
pub mod error;
pub mod package;
pub mod props;
pub mod writer;
mod xml;

pub use drawing::{DrawingTemplate, IMAGE_REL_PLACEHOLDER};
pub use error::WordmlError;
pub use package::{
    ContentTypes, CoreProperties, DocxPackage, ImageFormat, PartStream, RelationshipId,
    Relationships,
};
pub use props::{Border, ParagraphProps, ParagraphSpacing, RunProps, TableProps};
pub use writer::{DOCUMENT_NAMESPACES, WmlWriter};
pub use xml::root_local_name;
