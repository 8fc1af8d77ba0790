mod common;

use common::fixtures::*;
use common::{GeneratedDocx, TestResult, count_files};
use salesreport::ReportError;
use std::sync::Arc;

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

#[test]
fn test_package_layout() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = generator(dir.path(), shipped_resources(), sample_sales_data()).generate("275")?;
    let docx = GeneratedDocx::open(&path)?;

    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
        "word/media/image1.gif",
    ] {
        assert_docx_has_part!(docx, part);
    }
    Ok(())
}

#[test]
fn test_content_types() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = generator(dir.path(), shipped_resources(), sample_sales_data()).generate("275")?;
    let docx = GeneratedDocx::open(&path)?;

    let xml = docx.part_text("[Content_Types].xml").ok_or("no content types")?;
    let doc = roxmltree::Document::parse(&xml)?;
    assert_eq!(doc.root_element().tag_name().namespace(), Some(CONTENT_TYPES_NS));

    let overrides: Vec<(&str, &str)> = doc
        .root_element()
        .children()
        .filter(|n| n.tag_name().name() == "Override")
        .filter_map(|n| Some((n.attribute("PartName")?, n.attribute("ContentType")?)))
        .collect();
    assert!(overrides.contains(&(
        "/word/document.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"
    )));
    assert!(overrides.contains(&(
        "/word/styles.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"
    )));

    let gif_default = doc.root_element().children().any(|n| {
        n.tag_name().name() == "Default"
            && n.attribute("Extension") == Some("gif")
            && n.attribute("ContentType") == Some("image/gif")
    });
    assert!(gif_default);
    Ok(())
}

#[test]
fn test_styles_copied_verbatim() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = generator(dir.path(), shipped_resources(), sample_sales_data()).generate("275")?;
    let docx = GeneratedDocx::open(&path)?;

    let shipped = std::fs::read(shipped_resource_dir().join("styles.xml"))?;
    assert_eq!(docx.parts.get("word/styles.xml"), Some(&shipped));
    Ok(())
}

#[test]
fn test_core_properties_title() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = generator(dir.path(), shipped_resources(), sample_sales_data()).generate("275")?;
    let docx = GeneratedDocx::open(&path)?;

    let xml = docx.part_text("docProps/core.xml").ok_or("no core properties")?;
    let doc = roxmltree::Document::parse(&xml)?;
    let title = doc
        .descendants()
        .find(|n| n.tag_name().name() == "title")
        .and_then(|n| n.text());
    assert_eq!(title, Some("Sales Report - Jane Doe"));
    Ok(())
}

fn assert_fails_cleanly(resources: salesreport::InMemoryResourceProvider, name: &str) -> TestResult {
    let dir = tempfile::tempdir()?;
    let err = generator(dir.path(), Arc::new(resources), sample_sales_data())
        .generate("275")
        .err()
        .ok_or("expected failure")?;
    match err {
        ReportError::ResourceMissing(msg) => assert!(msg.contains(name), "message: {}", msg),
        other => panic!("expected ResourceMissing, got {:?}", other),
    }
    assert_eq!(count_files(dir.path()), 0, "no output or temporary file may remain");
    Ok(())
}

#[test]
fn test_missing_styles_leaves_no_file() -> TestResult {
    let resources = in_memory_resources();
    resources.remove("styles.xml");
    assert_fails_cleanly(resources, "styles.xml")
}

#[test]
fn test_malformed_styles_leaves_no_file() -> TestResult {
    let resources = in_memory_resources().with_resource("styles.xml", "<w:styles xmlns:w=\"urn:w\">");
    assert_fails_cleanly(resources, "styles.xml")
}

#[test]
fn test_missing_image_leaves_no_file() -> TestResult {
    let resources = in_memory_resources();
    resources.remove("headerimage.gif");
    assert_fails_cleanly(resources, "headerimage.gif")
}

#[test]
fn test_image_that_is_not_gif() -> TestResult {
    let resources = in_memory_resources().with_resource("headerimage.gif", "plain text");
    assert_fails_cleanly(resources, "headerimage.gif")
}

#[test]
fn test_drawing_without_placeholder() -> TestResult {
    let resources = in_memory_resources()
        .with_resource("drawingTemplate.xml", "<drawing><w:drawing xmlns:w=\"urn:w\"/></drawing>");
    assert_fails_cleanly(resources, "drawingTemplate.xml")
}

#[test]
fn test_drawing_with_two_placeholders() -> TestResult {
    let resources = in_memory_resources().with_resource(
        "drawingTemplate.xml",
        "<drawing a=\"{{image_rel_id}}\" b=\"{{image_rel_id}}\"/>",
    );
    assert_fails_cleanly(resources, "drawingTemplate.xml")
}

#[test]
fn test_drawing_placeholder_on_wrapper() -> TestResult {
    let resources = in_memory_resources().with_resource(
        "drawingTemplate.xml",
        "<drawing xmlns:w=\"urn:w\" id=\"{{image_rel_id}}\"><w:drawing/></drawing>",
    );
    assert_fails_cleanly(resources, "drawingTemplate.xml")
}
