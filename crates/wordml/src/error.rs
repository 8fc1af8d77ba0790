use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordmlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Package container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML template: {0}")]
    MalformedTemplate(String),

    #[error("Drawing template must contain exactly one '{placeholder}' placeholder, found {found}")]
    Placeholder {
        placeholder: &'static str,
        found: usize,
    },

    #[error("Invalid part order: {0}")]
    PartOrder(String),
}
