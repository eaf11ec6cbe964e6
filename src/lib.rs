mod block;
mod docx;
mod error;
mod extract;
mod inline;
mod parser;

pub mod config;
pub mod server;

pub use block::{Block, Run};
pub use config::Config;
pub use error::DocxError;

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to DOCX bytes.
pub fn markdown_to_docx(markdown: &str) -> Result<Vec<u8>, DocxError> {
    let blocks = parse(markdown);
    docx::write_docx(&blocks)
}

/// Extract markdown text from DOCX bytes.
pub fn docx_to_markdown(bytes: &[u8]) -> Result<String, DocxError> {
    extract::docx_to_markdown(bytes)
}
