//! aw-a11y - ARIA engines
//!
//! The shared machinery every widget is built from:
//! - ARIA vocabulary (roles, popup types, orientation)
//! - Attribute tracking with precise undo
//! - Controller/target pair resolution
//! - Interactive-children scanning
//! - Roving tabindex
//! - Type-ahead search
//! - Directional navigation
//! - Unique id generation and an injectable clock

pub mod aria;
pub mod clock;
pub mod ids;
pub mod interactive;
pub mod navigation;
pub mod pair;
pub mod roving;
pub mod search;
pub mod tracker;

pub use aria::{AriaRole, HasPopup, Orientation, bool_value};
pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::IdGenerator;
pub use interactive::{interactive_children, is_interactive};
pub use navigation::{Direction, next_index};
pub use pair::{ElementPair, resolve_pair, validate_pair};
pub use roving::{allow, deny, roving_tab_index};
pub use search::{SEARCH_RESET, Search};
pub use tracker::AttributeTracker;

use aw_dom::NodeId;

/// Accessibility error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("Element {0} is not an element in the document")]
    MissingElement(NodeId),

    #[error("No element with id \"{0}\" exists in the document")]
    MissingReference(String),

    #[error("Element {0} has no aria-controls and no controller references its id")]
    UnresolvedPair(NodeId),

    #[error("Controller and target must be distinct elements (got {0} twice)")]
    SameElement(NodeId),
}
