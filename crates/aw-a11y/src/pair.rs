//! Controller/target pairing
//!
//! A controller names its target with `aria-controls`. Given either side
//! of the relationship, [`resolve_pair`] finds the other one.

use aw_dom::{Document, NodeId};

use crate::A11yError;

/// An element that toggles and the element it toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementPair {
    pub controller: NodeId,
    pub target: NodeId,
}

/// Resolve the pair `element` belongs to
///
/// `element` is treated as the controller when it carries
/// `aria-controls` (only the first id is followed), otherwise as the
/// target of whichever element controls its id.
pub fn resolve_pair(doc: &Document, element: NodeId) -> Result<ElementPair, A11yError> {
    if !doc.is_element(element) {
        return Err(A11yError::MissingElement(element));
    }

    if let Some(controls) = doc.get_attribute(element, "aria-controls") {
        let first = controls.split_whitespace().next().unwrap_or_default();
        let target = doc
            .get_element_by_id(first)
            .ok_or_else(|| A11yError::MissingReference(first.to_string()))?;
        return validate_pair(doc, element, target);
    }

    if let Some(id) = doc.id_of(element).filter(|id| !id.is_empty()) {
        let controller = doc
            .elements_with_attribute("aria-controls", None)
            .into_iter()
            .find(|&candidate| {
                doc.get_attribute(candidate, "aria-controls")
                    .is_some_and(|v| v.split_whitespace().any(|token| token == id))
            });
        if let Some(controller) = controller {
            return validate_pair(doc, controller, element);
        }
    }

    Err(A11yError::UnresolvedPair(element))
}

/// Check an explicitly supplied pair
pub fn validate_pair(
    doc: &Document,
    controller: NodeId,
    target: NodeId,
) -> Result<ElementPair, A11yError> {
    for node in [controller, target] {
        if !doc.is_element(node) {
            return Err(A11yError::MissingElement(node));
        }
    }
    if controller == target {
        return Err(A11yError::SameElement(controller));
    }
    Ok(ElementPair { controller, target })
}
