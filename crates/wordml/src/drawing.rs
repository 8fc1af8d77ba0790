use crate::error::WordmlError;
use crate::package::RelationshipId;
use crate::xml;
use quick_xml::escape::escape;

/// Marker in a drawing template that is replaced by the image relationship id.
pub const IMAGE_REL_PLACEHOLDER: &str = "{{image_rel_id}}";

/// An inline picture fragment with a single relationship placeholder.
///
/// The template's root element is a wrapper that only carries namespace
/// declarations; its children are copied into a run of the document body.
#[derive(Debug, Clone)]
pub struct DrawingTemplate {
    source: String,
}

impl DrawingTemplate {
    /// Validates the template text.
    ///
    /// The text must be a single well-formed element tree, and the placeholder
    /// must occur exactly once, in an attribute value or text below the root.
    /// The root itself is dropped when the drawing is copied.
    pub fn parse(source: impl Into<String>) -> Result<Self, WordmlError> {
        let source = source.into();
        let found = source.matches(IMAGE_REL_PLACEHOLDER).count();
        if found != 1 {
            return Err(WordmlError::Placeholder {
                placeholder: IMAGE_REL_PLACEHOLDER,
                found,
            });
        }
        xml::root_local_name(&source)?;
        if xml::count_in_children(&source, IMAGE_REL_PLACEHOLDER)? != 1 {
            return Err(WordmlError::MalformedTemplate(format!(
                "'{}' must be in an attribute or text below the root element",
                IMAGE_REL_PLACEHOLDER
            )));
        }
        Ok(Self { source })
    }

    /// Returns the template text with the placeholder replaced by `id`.
    pub fn render(&self, id: &RelationshipId) -> String {
        self.source
            .replacen(IMAGE_REL_PLACEHOLDER, &escape(id.as_str()), 1)
    }
}
