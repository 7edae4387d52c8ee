//! DOM Events
//!
//! Input events delivered to components: click, keydown and focus changes.

use crate::NodeId;

/// Event types a listener can register for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    FocusIn,
    FocusOut,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
        }
    }
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The document itself (last stop of every bubbling event)
    Document,
    /// A node
    Node(NodeId),
}

impl EventTarget {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            Self::Document => None,
        }
    }
}

/// Logical key value (`KeyboardEvent.key`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    /// A printable character
    Character(char),
    /// Anything else, by name
    Other(String),
}

impl Key {
    /// Parse a `KeyboardEvent.key` value
    pub fn parse(value: &str) -> Self {
        match value {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Self::Character(c),
                    _ => Self::Other(other.to_string()),
                }
            }
        }
    }

    /// Printable character carried by this key, used for type-ahead
    pub fn printable(&self) -> Option<char> {
        match self {
            Self::Character(c) => Some(*c),
            _ => None,
        }
    }
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl, Alt or Meta held (shortcuts the widgets must not swallow)
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Keyboard event payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Event payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown(KeyboardEvent),
    FocusIn { related: Option<NodeId> },
    FocusOut { related: Option<NodeId> },
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    pub current_target: Option<EventTarget>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    fn with_kind(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create click event
    pub fn click(target: NodeId) -> Self {
        Self::with_kind(EventKind::Click, target)
    }

    /// Create keydown event
    pub fn key_down(target: NodeId, key: Key, modifiers: Modifiers) -> Self {
        Self::with_kind(EventKind::KeyDown(KeyboardEvent { key, modifiers }), target)
    }

    /// Create focusin event
    pub fn focus_in(target: NodeId, related: Option<NodeId>) -> Self {
        Self::with_kind(EventKind::FocusIn { related }, target)
    }

    /// Create focusout event
    pub fn focus_out(target: NodeId, related: Option<NodeId>) -> Self {
        Self::with_kind(EventKind::FocusOut { related }, target)
    }

    pub fn event_type(&self) -> EventType {
        match self.kind {
            EventKind::Click => EventType::Click,
            EventKind::KeyDown(_) => EventType::KeyDown,
            EventKind::FocusIn { .. } => EventType::FocusIn,
            EventKind::FocusOut { .. } => EventType::FocusOut,
        }
    }

    /// Keyboard payload, for keydown events
    pub fn keyboard(&self) -> Option<&KeyboardEvent> {
        match &self.kind {
            EventKind::KeyDown(k) => Some(k),
            _ => None,
        }
    }

    /// Element focus moves to, for focus events
    pub fn related_target(&self) -> Option<NodeId> {
        match self.kind {
            EventKind::FocusIn { related } | EventKind::FocusOut { related } => related,
            _ => None,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parse() {
        assert_eq!(Key::parse(" "), Key::Space);
        assert_eq!(Key::parse("Down"), Key::ArrowDown);
        assert_eq!(Key::parse("e"), Key::Character('e'));
        assert_eq!(Key::parse("F5"), Key::Other("F5".to_string()));
        assert_eq!(Key::parse("e").printable(), Some('e'));
        assert_eq!(Key::Enter.printable(), None);
    }

    #[test]
    fn test_keydown_event() {
        let mut event = Event::key_down(NodeId(3), Key::Tab, Modifiers::SHIFT);

        assert_eq!(event.event_type(), EventType::KeyDown);
        assert!(event.keyboard().unwrap().modifiers.shift);
        assert!(!event.is_default_prevented());

        event.prevent_default();
        event.stop_propagation();
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn test_focus_out_related() {
        let event = Event::focus_out(NodeId(1), Some(NodeId(2)));
        assert_eq!(event.related_target(), Some(NodeId(2)));
        assert_eq!(event.event_type().as_str(), "focusout");
    }
}
