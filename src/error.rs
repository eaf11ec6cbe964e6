use thiserror::Error;

/// Failures while packaging or unpacking a DOCX container.
///
/// The markdown translator itself never fails; every fallible operation
/// lives at the container boundary.
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid docx container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed document xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("docx package is missing {0}")]
    MissingPart(&'static str),
}
