//! HTML5 Parser implementation
//!
//! Uses html5ever's built-in RcDom and converts it to our arena format.

use aw_dom::{Document, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser {
    keep_whitespace: bool,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep whitespace-only text nodes (dropped by default)
    pub fn keep_whitespace(mut self, keep: bool) -> Self {
        self.keep_whitespace = keep;
        self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty();
        self.convert_node(&dom.document, &mut document, NodeId::ROOT)?;
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(
        &self,
        handle: &Handle,
        document: &mut Document,
        parent: NodeId,
    ) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, document, parent)?;
                }
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if self.keep_whitespace || !text.trim().is_empty() {
                    let id = document.create_text(&text);
                    document.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = document.tree_mut().create_comment(&contents.to_string());
                document.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = document.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    document.set_attribute(id, &attr.name.local, &attr.value);
                }
                document.append_child(parent, id)?;

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, document, id)?;
                }
            }
            // Doctype and processing instructions carry nothing widgets use
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        }
        Ok(())
    }
}
