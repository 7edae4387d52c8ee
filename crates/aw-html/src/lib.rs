//! aw-html - Markup loader
//!
//! Parses HTML5 with html5ever and converts the result into an
//! [`aw_dom::Document`] the widgets can annotate.

mod parser;

pub use parser::HtmlParser;

use aw_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read markup: {0}")]
    Read(#[from] std::io::Error),

    #[error("Markup produced an invalid tree: {0}")]
    Tree(#[from] aw_dom::DomError),
}
