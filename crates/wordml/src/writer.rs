//! Streaming WordprocessingML writer.
//!
//! `WmlWriter` wraps a `quick_xml::Writer` so that every piece of text and
//! every attribute value is escaped on the way out. Nesting is expressed with
//! closures, which keeps start and end tags balanced:
//!
//! ```ignore
//! let mut w = WmlWriter::new(stream);
//! w.begin_document()?;
//! w.paragraph(&ParagraphProps::new(), |w| {
//!     w.run(&RunProps::new().bold(), |w| w.text("Contact"))
//! })?;
//! let stream = w.finish()?;
//! ```

use crate::error::WordmlError;
use crate::props::{ParagraphProps, RunProps, TableProps};
use crate::xml;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Namespaces declared on `w:document`.
pub const DOCUMENT_NAMESPACES: [(&str, &str); 5] = [
    ("xmlns:w", "http://schemas.openxmlformats.org/wordprocessingml/2006/main"),
    ("xmlns:r", "http://schemas.openxmlformats.org/officeDocument/2006/relationships"),
    ("xmlns:wp", "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"),
    ("xmlns:a", "http://schemas.openxmlformats.org/drawingml/2006/main"),
    ("xmlns:pic", "http://schemas.openxmlformats.org/drawingml/2006/picture"),
];

pub struct WmlWriter<W: Write> {
    xml: Writer<W>,
}

impl<W: Write> WmlWriter<W> {
    /// Creates a writer that indents nested elements by two spaces.
    pub fn new(inner: W) -> Self {
        Self {
            xml: Writer::new_with_indent(inner, b' ', 2),
        }
    }

    /// Creates a writer without indentation.
    pub fn compact(inner: W) -> Self {
        Self {
            xml: Writer::new(inner),
        }
    }

    /// Writes the XML declaration and opens `w:document` and `w:body`.
    pub fn begin_document(&mut self) -> Result<(), WordmlError> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        let root = BytesStart::new("w:document").with_attributes(DOCUMENT_NAMESPACES);
        self.xml.write_event(Event::Start(root))?;
        self.start("w:body")
    }

    /// Closes `w:body` and `w:document`, flushes and returns the stream.
    pub fn finish(mut self) -> Result<W, WordmlError> {
        self.end("w:body")?;
        self.end("w:document")?;
        let mut inner = self.xml.into_inner();
        inner.flush()?;
        Ok(inner)
    }

    /// Returns the underlying stream without closing any open element.
    pub fn into_inner(self) -> W {
        self.xml.into_inner()
    }

    pub fn paragraph<F>(&mut self, props: &ParagraphProps, content: F) -> Result<(), WordmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), WordmlError>,
    {
        self.start("w:p")?;
        props.write_to(self)?;
        content(self)?;
        self.end("w:p")
    }

    pub fn run<F>(&mut self, props: &RunProps, content: F) -> Result<(), WordmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), WordmlError>,
    {
        self.start("w:r")?;
        props.write_to(self)?;
        content(self)?;
        self.end("w:r")
    }

    /// A paragraph holding a single run of text.
    pub fn text_paragraph(
        &mut self,
        paragraph: &ParagraphProps,
        run: &RunProps,
        text: &str,
    ) -> Result<(), WordmlError> {
        self.paragraph(paragraph, |w| w.run(run, |w| w.text(text)))
    }

    /// Writes a `w:t` element. Leading or trailing whitespace is preserved.
    pub fn text(&mut self, text: &str) -> Result<(), WordmlError> {
        let mut start = BytesStart::new("w:t");
        if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
            start.push_attribute(("xml:space", "preserve"));
        }
        self.xml.write_event(Event::Start(start))?;
        self.xml.write_event(Event::Text(BytesText::new(text)))?;
        self.xml.write_event(Event::End(BytesEnd::new("w:t")))?;
        Ok(())
    }

    pub fn line_break(&mut self) -> Result<(), WordmlError> {
        self.empty("w:br", &[])
    }

    pub fn tab(&mut self) -> Result<(), WordmlError> {
        self.empty("w:tab", &[])
    }

    /// Writes a `w:tbl` with its properties and an evenly divided grid.
    pub fn table<F>(
        &mut self,
        props: &TableProps,
        columns: usize,
        content: F,
    ) -> Result<(), WordmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), WordmlError>,
    {
        self.start("w:tbl")?;
        props.write_to(self)?;
        self.start("w:tblGrid")?;
        for _ in 0..columns {
            self.empty("w:gridCol", &[])?;
        }
        self.end("w:tblGrid")?;
        content(self)?;
        self.end("w:tbl")
    }

    pub fn row<F>(&mut self, content: F) -> Result<(), WordmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), WordmlError>,
    {
        self.start("w:tr")?;
        content(self)?;
        self.end("w:tr")
    }

    /// A table cell with one plain paragraph of text.
    pub fn text_cell(&mut self, text: &str) -> Result<(), WordmlError> {
        self.start("w:tc")?;
        self.text_paragraph(&ParagraphProps::new(), &RunProps::new(), text)?;
        self.end("w:tc")
    }

    /// A table row of plain text cells.
    pub fn text_row<'a, I>(&mut self, cells: I) -> Result<(), WordmlError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.row(|w| {
            for cell in cells {
                w.text_cell(cell)?;
            }
            Ok(())
        })
    }

    /// Copies the children of a trusted XML fragment's root element.
    pub fn fragment(&mut self, xml: &str) -> Result<(), WordmlError> {
        xml::write_children(xml, &mut self.xml)
    }

    pub(crate) fn start(&mut self, tag: &str) -> Result<(), WordmlError> {
        self.xml.write_event(Event::Start(BytesStart::new(tag)))?;
        Ok(())
    }

    pub(crate) fn end(&mut self, tag: &str) -> Result<(), WordmlError> {
        self.xml.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    pub(crate) fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), WordmlError> {
        let element = BytesStart::new(tag).with_attributes(attrs.iter().copied());
        self.xml.write_event(Event::Empty(element))?;
        Ok(())
    }
}
