pub mod docx_assertions;
pub mod fixtures;

use roxmltree::{Document, Node};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A generated `.docx` package read back into memory.
pub struct GeneratedDocx {
    pub parts: BTreeMap<String, Vec<u8>>,
}

impl GeneratedDocx {
    /// Read every part of the package at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let mut archive = zip::ZipArchive::new(File::open(path)?)?;
        let mut parts = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            parts.insert(file.name().to_string(), bytes);
        }
        Ok(Self { parts })
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.keys().map(String::as_str).collect()
    }

    /// Get a part as UTF-8 text
    pub fn part_text(&self, name: &str) -> Option<String> {
        self.parts
            .get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn document_xml(&self) -> String {
        self.part_text("word/document.xml")
            .expect("package has no main document part")
    }

    /// Text of each paragraph directly under `w:body`, runs joined with `|`
    pub fn paragraph_texts(&self) -> Vec<String> {
        let xml = self.document_xml();
        let doc = Document::parse(&xml).expect("main document part is not well-formed");
        let body = doc
            .root_element()
            .children()
            .find(|n| is_w(n, "body"))
            .expect("document has no body");
        body.children()
            .filter(|n| is_w(n, "p"))
            .map(|p| texts(p).join("|"))
            .collect()
    }

    /// Cell texts of every row of the first table
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        let xml = self.document_xml();
        let doc = Document::parse(&xml).expect("main document part is not well-formed");
        let Some(table) = doc.descendants().find(|n| is_w(n, "tbl")) else {
            return Vec::new();
        };
        table
            .children()
            .filter(|n| is_w(n, "tr"))
            .map(|tr| {
                tr.children()
                    .filter(|n| is_w(n, "tc"))
                    .map(|tc| texts(tc).concat())
                    .collect()
            })
            .collect()
    }

    /// All `w:t` texts in document order
    pub fn all_text(&self) -> Vec<String> {
        let xml = self.document_xml();
        let doc = Document::parse(&xml).expect("main document part is not well-formed");
        texts(doc.root_element())
    }
}

pub fn is_w(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(W_NS)
}

fn texts(node: Node) -> Vec<String> {
    node.descendants()
        .filter(|n| is_w(n, "t"))
        .map(|n| n.text().unwrap_or_default().to_string())
        .collect()
}

/// Number of entries in a directory
pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
