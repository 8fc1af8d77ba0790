//! Checks and pass-through for trusted XML templates.
//!
//! Template resources (the styles part, the drawing fragment) are copied into
//! the package rather than generated, so they are only checked for
//! well-formedness here. The drawing fragment only gains the namespace
//! declarations of its wrapper.

use crate::error::WordmlError;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use std::borrow::Cow;
use std::io::Write;

fn strip_bom(xml: &str) -> &str {
    xml.strip_prefix('\u{feff}').unwrap_or(xml)
}

/// Verifies that `xml` holds exactly one well-formed element tree and
/// returns the local name of its root element.
pub fn root_local_name(xml: &str) -> Result<String, WordmlError> {
    let mut reader = Reader::from_str(strip_bom(xml));
    let mut depth = 0usize;
    let mut root: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 0 {
                    if root.is_some() {
                        return Err(WordmlError::MalformedTemplate(
                            "more than one root element".to_string(),
                        ));
                    }
                    root = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Event::Empty(e) if depth == 0 => {
                if root.is_some() {
                    return Err(WordmlError::MalformedTemplate(
                        "more than one root element".to_string(),
                    ));
                }
                root = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    WordmlError::MalformedTemplate("unmatched closing tag".to_string())
                })?;
            }
            Event::Text(t) if depth == 0 => {
                if !t.iter().all(u8::is_ascii_whitespace) {
                    return Err(WordmlError::MalformedTemplate(
                        "text outside the root element".to_string(),
                    ));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(WordmlError::MalformedTemplate(format!(
            "{} element(s) left unclosed",
            depth
        )));
    }
    root.ok_or_else(|| WordmlError::MalformedTemplate("no root element".to_string()))
}

/// Copies the children of the root element of `xml` into `writer`.
///
/// The root acts as a wrapper that carries namespace declarations. Those
/// declarations are repeated on every copied top-level element, so prefixes
/// the surrounding document does not declare still resolve. Text is copied
/// as is.
pub(crate) fn write_children<W: Write>(
    xml: &str,
    writer: &mut Writer<W>,
) -> Result<(), WordmlError> {
    let mut reader = Reader::from_str(strip_bom(xml));
    let mut depth = 0usize;
    let mut namespaces: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                match depth {
                    0 => namespaces = namespace_declarations(&e)?,
                    1 => writer.write_event(Event::Start(redeclare(e, &namespaces)?))?,
                    _ => writer.write_event(Event::Start(e))?,
                }
                depth += 1;
            }
            Event::Empty(e) if depth == 1 => {
                writer.write_event(Event::Empty(redeclare(e, &namespaces)?))?
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if depth > 0 {
                    writer.write_event(Event::End(e))?;
                }
            }
            event if depth > 0 => writer.write_event(event)?,
            _ => {}
        }
    }
    Ok(())
}

/// Counts the occurrences of `needle` that [`write_children`] would copy:
/// attribute values of the root's descendants and text below the root.
/// Comments and processing instructions are not counted.
pub(crate) fn count_in_children(xml: &str, needle: &str) -> Result<usize, WordmlError> {
    let mut reader = Reader::from_str(strip_bom(xml));
    let mut depth = 0usize;
    let mut found = 0usize;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                if depth > 0 {
                    found += count_in_attributes(&e, needle)?;
                }
                depth += 1;
            }
            Event::Empty(e) if depth > 0 => found += count_in_attributes(&e, needle)?,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(t) if depth > 0 => found += occurrences(&t, needle),
            Event::CData(t) if depth > 0 => found += occurrences(&t, needle),
            _ => {}
        }
    }
    Ok(found)
}

fn occurrences(bytes: &[u8], needle: &str) -> usize {
    String::from_utf8_lossy(bytes).matches(needle).count()
}

fn count_in_attributes(e: &BytesStart, needle: &str) -> Result<usize, WordmlError> {
    let mut found = 0;
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        found += occurrences(&attr.value, needle);
    }
    Ok(found)
}

fn namespace_declarations(e: &BytesStart) -> Result<Vec<(Vec<u8>, Vec<u8>)>, WordmlError> {
    let mut declarations = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            declarations.push((key.to_vec(), attr.value.into_owned()));
        }
    }
    Ok(declarations)
}

/// Adds the wrapper's declarations that `start` does not make itself.
/// Values are kept in their raw, already escaped form.
fn redeclare<'a>(
    mut start: BytesStart<'a>,
    namespaces: &[(Vec<u8>, Vec<u8>)],
) -> Result<BytesStart<'a>, WordmlError> {
    let mut declared: Vec<Vec<u8>> = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        declared.push(attr.key.as_ref().to_vec());
    }
    for (key, value) in namespaces {
        if !declared.contains(key) {
            start.push_attribute(Attribute {
                key: QName(key),
                value: Cow::Borrowed(value),
            });
        }
    }
    Ok(start)
}
