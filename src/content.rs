//! The body of a sales report.

use log::debug;
use salesreport_traits::{EmployeeSalesProfile, FiscalYears, TerritorySalesRow};
use salesreport_wordml::{
    Border, DrawingTemplate, ParagraphProps, RelationshipId, RunProps, TableProps,
    WmlWriter, WordmlError,
};
use std::io::Write;

const TITLE_PREFIX: &str = "Sales Report - ";
const TERRITORY_PREFIX: &str = "Sales by Territory - ";
const EMPLOYEE_COLUMN: &str = "Employee";

/// Writes `word/document.xml` for one employee.
#[derive(Debug, Clone)]
pub struct SalesReportWriter {
    drawing: DrawingTemplate,
    years: FiscalYears,
    table_style: String,
    territory_heading_style: String,
}

impl SalesReportWriter {
    pub fn new(drawing: DrawingTemplate, years: FiscalYears) -> Self {
        Self {
            drawing,
            years,
            table_style: "LightList-Accent2".to_string(),
            territory_heading_style: "Heading3".to_string(),
        }
    }

    pub fn with_table_style(mut self, style_id: impl Into<String>) -> Self {
        self.table_style = style_id.into();
        self
    }

    pub fn with_territory_heading_style(mut self, style_id: impl Into<String>) -> Self {
        self.territory_heading_style = style_id.into();
        self
    }

    /// Writes the complete main document part to `stream` and returns it.
    ///
    /// Sections, in order: header image, title, contact, sales summary and
    /// the territory comparison table.
    pub fn write_body<W: Write>(
        &self,
        stream: W,
        profile: &EmployeeSalesProfile,
        territory_rows: &[TerritorySalesRow],
        image_rel_id: &RelationshipId,
    ) -> Result<W, WordmlError> {
        debug!(
            "Writing report body for '{}' ({} territory rows)",
            profile.full_name,
            territory_rows.len()
        );
        let mut w = WmlWriter::new(stream);
        w.begin_document()?;
        self.write_header_image(&mut w, image_rel_id)?;
        write_title(&mut w, &profile.full_name)?;
        write_contact(&mut w, profile)?;
        write_summary(&mut w, profile)?;
        self.write_territory_table(&mut w, &profile.territory, territory_rows)?;
        w.finish()
    }

    fn write_header_image<W: Write>(
        &self,
        w: &mut WmlWriter<W>,
        image_rel_id: &RelationshipId,
    ) -> Result<(), WordmlError> {
        let fragment = self.drawing.render(image_rel_id);
        w.paragraph(&ParagraphProps::new(), |w| {
            w.run(&RunProps::new(), |w| w.fragment(&fragment))
        })
    }

    fn write_territory_table<W: Write>(
        &self,
        w: &mut WmlWriter<W>,
        territory: &str,
        rows: &[TerritorySalesRow],
    ) -> Result<(), WordmlError> {
        let heading = subtitle_props().style(self.territory_heading_style.as_str());
        w.text_paragraph(
            &heading,
            &subtitle_run(),
            &format!("{}{}", TERRITORY_PREFIX, territory),
        )?;

        let props = TableProps::new().style(self.table_style.as_str());
        w.table(&props, 3, |w| {
            w.text_row([
                EMPLOYEE_COLUMN,
                self.years.earlier.as_str(),
                self.years.later.as_str(),
            ])?;
            for row in rows {
                w.text_row(row.cells())?;
            }
            Ok(())
        })
    }
}

fn subtitle_props() -> ParagraphProps {
    ParagraphProps::new().spacing_around(200, 0)
}

fn subtitle_run() -> RunProps {
    RunProps::new().bold().size(26)
}

fn write_subtitle<W: Write>(w: &mut WmlWriter<W>, text: &str) -> Result<(), WordmlError> {
    w.text_paragraph(&subtitle_props(), &subtitle_run(), text)
}

fn write_title<W: Write>(w: &mut WmlWriter<W>, full_name: &str) -> Result<(), WordmlError> {
    let paragraph = ParagraphProps::new()
        .bottom_border(Border::single(4, 1, "blue"))
        .line_spacing(240);
    let run = RunProps::new().character_spacing(5).size(52);
    w.text_paragraph(&paragraph, &run, &format!("{}{}", TITLE_PREFIX, full_name))
}

fn write_contact<W: Write>(
    w: &mut WmlWriter<W>,
    profile: &EmployeeSalesProfile,
) -> Result<(), WordmlError> {
    write_subtitle(w, "Contact")?;
    w.paragraph(&ParagraphProps::new(), |w| {
        w.run(&RunProps::new(), |w| {
            w.text(&profile.full_name)?;
            w.line_break()?;
            w.text(&profile.email)?;
            w.line_break()?;
            w.text(&profile.phone)
        })
    })
}

fn write_summary<W: Write>(
    w: &mut WmlWriter<W>,
    profile: &EmployeeSalesProfile,
) -> Result<(), WordmlError> {
    write_subtitle(w, "Sales Summary")?;
    let plain = RunProps::new();
    w.paragraph(&ParagraphProps::new(), |w| {
        w.run(&plain, |w| {
            w.text("Total Sales:")?;
            w.tab()
        })?;
        w.run(&plain, |w| w.text(&profile.sales_ytd))?;
        w.run(&plain, |w| w.line_break())?;
        w.run(&plain, |w| {
            w.text("Sales Quota:")?;
            w.tab()
        })?;
        w.run(&plain, |w| w.text(&profile.sales_quota))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::{Document, Node};

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    const DRAWING: &str = r#"<root xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:drawing><a:blip r:embed="{{image_rel_id}}"/></w:drawing></root>"#;

    fn writer() -> SalesReportWriter {
        SalesReportWriter::new(DrawingTemplate::parse(DRAWING).unwrap(), FiscalYears::default())
    }

    fn profile() -> EmployeeSalesProfile {
        EmployeeSalesProfile::new(
            "Jane Doe",
            "555-1234",
            "jane@x.com",
            Some("Northwest".into()),
            Some("5000".into()),
            Some("7000".into()),
        )
    }

    fn render(profile: &EmployeeSalesProfile, rows: &[TerritorySalesRow]) -> String {
        let out = writer()
            .write_body(Vec::new(), profile, rows, &RelationshipId::new(2))
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn is_w(node: &Node, name: &str) -> bool {
        node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(W_NS)
    }

    fn texts(node: Node) -> Vec<String> {
        node.descendants()
            .filter(|n| is_w(n, "t"))
            .map(|n| n.text().unwrap_or_default().to_string())
            .collect()
    }

    fn body_paragraphs<'a, 'input>(doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
        let body = doc.root_element().first_element_child().unwrap();
        body.children().filter(|n| is_w(n, "p")).collect()
    }

    #[test]
    fn test_section_order_and_text() {
        let xml = render(&profile(), &[TerritorySalesRow::new("Jane Doe", "6000", "7000")]);
        let doc = Document::parse(&xml).unwrap();
        let paragraphs = body_paragraphs(&doc);

        let joined: Vec<String> = paragraphs.iter().map(|p| texts(*p).join("|")).collect();
        assert_eq!(
            joined,
            [
                "",
                "Sales Report - Jane Doe",
                "Contact",
                "Jane Doe|jane@x.com|555-1234",
                "Sales Summary",
                "Total Sales:|7000|Sales Quota:|5000",
                "Sales by Territory - Northwest",
            ]
        );
        assert!(xml.contains(r#"r:embed="rId2""#));
    }

    #[test]
    fn test_drawing_with_extra_namespace_stays_well_formed() {
        const WPS: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";
        let template = format!(
            r#"<drawing xmlns:w="{}" xmlns:wps="{}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:drawing><wps:wsp r:id="{{{{image_rel_id}}}}"/></w:drawing></drawing>"#,
            W_NS, WPS
        );
        let writer =
            SalesReportWriter::new(DrawingTemplate::parse(template).unwrap(), FiscalYears::default());
        let out = writer
            .write_body(Vec::new(), &profile(), &[], &RelationshipId::new(2))
            .unwrap();
        let xml = String::from_utf8(out).unwrap();

        let doc = Document::parse(&xml).unwrap();
        let shape = doc
            .descendants()
            .find(|n| n.tag_name().name() == "wsp")
            .unwrap();
        assert_eq!(shape.tag_name().namespace(), Some(WPS));
        assert_eq!(
            shape.attribute((
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
                "id"
            )),
            Some("rId2")
        );
    }

    #[test]
    fn test_title_formatting() {
        let xml = render(&profile(), &[]);
        let doc = Document::parse(&xml).unwrap();
        let title = body_paragraphs(&doc)[1];

        let ppr: Vec<_> = title.children().filter(|n| is_w(n, "pPr")).collect();
        assert_eq!(ppr.len(), 1);
        let bottom = ppr[0].descendants().find(|n| is_w(n, "bottom")).unwrap();
        assert_eq!(bottom.attribute((W_NS, "val")), Some("single"));
        assert_eq!(bottom.attribute((W_NS, "sz")), Some("4"));
        assert_eq!(bottom.attribute((W_NS, "color")), Some("blue"));
        let size = title.descendants().find(|n| is_w(n, "sz")).unwrap();
        assert_eq!(size.attribute((W_NS, "val")), Some("52"));
    }

    #[test]
    fn test_territory_heading_has_single_ppr_with_style() {
        let xml = render(&profile(), &[]);
        let doc = Document::parse(&xml).unwrap();
        let heading = *body_paragraphs(&doc).last().unwrap();
        let ppr: Vec<_> = heading.children().filter(|n| is_w(n, "pPr")).collect();
        assert_eq!(ppr.len(), 1);
        let style = ppr[0].children().find(|n| is_w(n, "pStyle")).unwrap();
        assert_eq!(style.attribute((W_NS, "val")), Some("Heading3"));
        assert!(heading.descendants().any(|n| is_w(&n, "b")));
    }

    #[test]
    fn test_table_rows_follow_input_order() {
        let rows = [
            TerritorySalesRow::new("Zed", "1", "2"),
            TerritorySalesRow::new("Amy", "3", "4"),
        ];
        let xml = render(&profile(), &rows);
        let doc = Document::parse(&xml).unwrap();
        let table = doc.descendants().find(|n| is_w(n, "tbl")).unwrap();
        let table_rows: Vec<Vec<String>> = table
            .children()
            .filter(|n| is_w(n, "tr"))
            .map(texts)
            .collect();
        assert_eq!(
            table_rows,
            [
                vec!["Employee", "2003", "2004"],
                vec!["Zed", "1", "2"],
                vec!["Amy", "3", "4"],
            ]
        );
        let style = table.descendants().find(|n| is_w(n, "tblStyle")).unwrap();
        assert_eq!(style.attribute((W_NS, "val")), Some("LightList-Accent2"));
    }

    #[test]
    fn test_empty_territory_has_header_only() {
        let xml = render(&EmployeeSalesProfile::default(), &[]);
        let doc = Document::parse(&xml).unwrap();
        let table = doc.descendants().find(|n| is_w(n, "tbl")).unwrap();
        assert_eq!(table.children().filter(|n| is_w(n, "tr")).count(), 1);
        assert!(texts(doc.root_element()).contains(&"Sales by Territory - NA".to_string()));
    }

    #[test]
    fn test_markup_characters_round_trip() {
        let profile = EmployeeSalesProfile::new(
            "A <B> & C",
            "1",
            "a&b@x.com",
            None,
            None,
            None,
        );
        let xml = render(&profile, &[]);
        let doc = Document::parse(&xml).unwrap();
        let all = texts(doc.root_element());
        assert!(all.contains(&"Sales Report - A <B> & C".to_string()));
        assert!(all.contains(&"a&b@x.com".to_string()));
    }

    #[test]
    fn test_custom_years_and_styles() {
        let writer = SalesReportWriter::new(
            DrawingTemplate::parse(DRAWING).unwrap(),
            FiscalYears::new("2007", "2008"),
        )
        .with_table_style("Grid")
        .with_territory_heading_style("Heading2");
        let out = writer
            .write_body(Vec::new(), &profile(), &[], &RelationshipId::new(1))
            .unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert!(xml.contains("<w:t>2007</w:t>"));
        assert!(xml.contains(r#"<w:tblStyle w:val="Grid"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
    }
}
