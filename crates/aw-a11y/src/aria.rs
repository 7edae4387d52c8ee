//! ARIA Support
//!
//! Roles, popup types and orientation values the widgets write.

use serde::Deserialize;

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    Button,
    Dialog,
    AlertDialog,
    Listbox,
    Option,
    Menu,
    MenuBar,
    MenuItem,
    Tab,
    TabList,
    TabPanel,
    Presentation,
    None,
}

impl AriaRole {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "button" => Self::Button,
            "dialog" => Self::Dialog,
            "alertdialog" => Self::AlertDialog,
            "listbox" => Self::Listbox,
            "option" => Self::Option,
            "menu" => Self::Menu,
            "menubar" => Self::MenuBar,
            "menuitem" => Self::MenuItem,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "tabpanel" => Self::TabPanel,
            "presentation" => Self::Presentation,
            "none" => Self::None,
            _ => return Option::None,
        })
    }

    /// Attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Dialog => "dialog",
            Self::AlertDialog => "alertdialog",
            Self::Listbox => "listbox",
            Self::Option => "option",
            Self::Menu => "menu",
            Self::MenuBar => "menubar",
            Self::MenuItem => "menuitem",
            Self::Tab => "tab",
            Self::TabList => "tablist",
            Self::TabPanel => "tabpanel",
            Self::Presentation => "presentation",
            Self::None => "none",
        }
    }

    /// Roles that own a managed set of children
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Self::Listbox | Self::Menu | Self::MenuBar | Self::TabList
        )
    }
}

/// `aria-haspopup` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasPopup {
    #[default]
    True,
    Menu,
    Listbox,
    Tree,
    Grid,
    Dialog,
}

impl HasPopup {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "true" => Self::True,
            "menu" => Self::Menu,
            "listbox" => Self::Listbox,
            "tree" => Self::Tree,
            "grid" => Self::Grid,
            "dialog" => Self::Dialog,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::Menu => "menu",
            Self::Listbox => "listbox",
            Self::Tree => "tree",
            Self::Grid => "grid",
            Self::Dialog => "dialog",
        }
    }
}

/// Layout axis of a composite widget; selects which arrow keys navigate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Boolean ARIA state value
pub fn bool_value(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(AriaRole::parse("tablist"), Some(AriaRole::TabList));
        assert_eq!(AriaRole::parse(" MENUITEM "), Some(AriaRole::MenuItem));
        assert_eq!(AriaRole::parse("banner"), None);
        assert!(AriaRole::Listbox.is_composite());
        assert!(!AriaRole::Button.is_composite());
    }

    #[test]
    fn test_has_popup_round_trip() {
        for kind in [HasPopup::True, HasPopup::Menu, HasPopup::Dialog] {
            assert_eq!(HasPopup::parse(kind.as_str()), Some(kind));
        }
    }
}
