//! Paragraph, run and table property blocks.
//!
//! Each block is a plain value built once and emitted through
//! [`WmlWriter`](crate::WmlWriter), so call sites share formatting instead of
//! writing `w:pPr`/`w:rPr`/`w:tblPr` elements by hand. Child elements are
//! emitted in the order the WordprocessingML schema requires.

use crate::error::WordmlError;
use crate::writer::WmlWriter;
use std::io::Write;

/// A paragraph border edge (`w:bottom` inside `w:pBdr`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    pub style: String,
    /// Width in eighths of a point.
    pub size: u32,
    /// Distance from the text in points.
    pub space: u32,
    pub color: String,
}

impl Border {
    pub fn single(size: u32, space: u32, color: impl Into<String>) -> Self {
        Self {
            style: "single".to_string(),
            size,
            space,
            color: color.into(),
        }
    }
}

/// Paragraph spacing in twentieths of a point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphSpacing {
    pub before: Option<u32>,
    pub after: Option<u32>,
    /// Line pitch in 240ths of a line (`w:lineRule="auto"`).
    pub line: Option<u32>,
}

/// Properties emitted as a single `w:pPr`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphProps {
    style_id: Option<String>,
    bottom_border: Option<Border>,
    spacing: Option<ParagraphSpacing>,
}

impl ParagraphProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub fn bottom_border(mut self, border: Border) -> Self {
        self.bottom_border = Some(border);
        self
    }

    pub fn spacing_around(mut self, before: u32, after: u32) -> Self {
        let spacing = self.spacing.get_or_insert_with(Default::default);
        spacing.before = Some(before);
        spacing.after = Some(after);
        self
    }

    pub fn line_spacing(mut self, line: u32) -> Self {
        self.spacing.get_or_insert_with(Default::default).line = Some(line);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.style_id.is_none() && self.bottom_border.is_none() && self.spacing.is_none()
    }

    pub(crate) fn write_to<W: Write>(&self, w: &mut WmlWriter<W>) -> Result<(), WordmlError> {
        if self.is_empty() {
            return Ok(());
        }
        w.start("w:pPr")?;
        if let Some(style_id) = &self.style_id {
            w.empty("w:pStyle", &[("w:val", style_id.as_str())])?;
        }
        if let Some(border) = &self.bottom_border {
            w.start("w:pBdr")?;
            let size = border.size.to_string();
            let space = border.space.to_string();
            w.empty(
                "w:bottom",
                &[
                    ("w:val", border.style.as_str()),
                    ("w:sz", size.as_str()),
                    ("w:space", space.as_str()),
                    ("w:color", border.color.as_str()),
                ],
            )?;
            w.end("w:pBdr")?;
        }
        if let Some(spacing) = &self.spacing {
            let before = spacing.before.map(|v| v.to_string());
            let after = spacing.after.map(|v| v.to_string());
            let line = spacing.line.map(|v| v.to_string());

            let mut attrs: Vec<(&str, &str)> = Vec::with_capacity(4);
            if let Some(v) = &before {
                attrs.push(("w:before", v.as_str()));
            }
            if let Some(v) = &after {
                attrs.push(("w:after", v.as_str()));
            }
            if let Some(v) = &line {
                attrs.push(("w:line", v.as_str()));
                attrs.push(("w:lineRule", "auto"));
            }
            w.empty("w:spacing", &attrs)?;
        }
        w.end("w:pPr")
    }
}

/// Properties emitted as a single `w:rPr`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProps {
    bold: bool,
    /// Character spacing in twentieths of a point.
    character_spacing: Option<i32>,
    /// Font size in half-points.
    size: Option<u32>,
}

impl RunProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn character_spacing(mut self, twips: i32) -> Self {
        self.character_spacing = Some(twips);
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.bold && self.character_spacing.is_none() && self.size.is_none()
    }

    pub(crate) fn write_to<W: Write>(&self, w: &mut WmlWriter<W>) -> Result<(), WordmlError> {
        if self.is_empty() {
            return Ok(());
        }
        w.start("w:rPr")?;
        if self.bold {
            w.empty("w:b", &[])?;
        }
        if let Some(spacing) = self.character_spacing {
            w.empty("w:spacing", &[("w:val", spacing.to_string().as_str())])?;
        }
        if let Some(size) = self.size {
            w.empty("w:sz", &[("w:val", size.to_string().as_str())])?;
        }
        w.end("w:rPr")
    }
}

/// Properties emitted as a single `w:tblPr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProps {
    style_id: Option<String>,
}

impl TableProps {
    pub fn new() -> Self {
        Self { style_id: None }
    }

    pub fn style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub(crate) fn write_to<W: Write>(&self, w: &mut WmlWriter<W>) -> Result<(), WordmlError> {
        w.start("w:tblPr")?;
        if let Some(style_id) = &self.style_id {
            w.empty("w:tblStyle", &[("w:val", style_id.as_str())])?;
        }
        // Width 0/auto lets the table size to its content.
        w.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
        w.empty("w:tblLook", &[("w:val", "04A0")])?;
        w.end("w:tblPr")
    }
}

impl Default for TableProps {
    fn default() -> Self {
        Self::new()
    }
}
