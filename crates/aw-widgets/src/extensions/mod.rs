//! Optional behaviors
//!
//! Extensions only add presentation on top of a widget's core state
//! machine. Each keeps its own [`AttributeTracker`] so its cleanup
//! removes exactly what it wrote, independent of the widget's own
//! attributes.
//!
//! ```ignore
//! let setup = Setup::new()
//!     .extension(UseHiddenAttribute)
//!     .extension(UseButtonRole);
//! let disclosure = Disclosure::new(&mut page, button, Default::default(), setup)?;
//! ```

mod activation;
mod button_role;
mod hidden;
mod tabindex;

pub use activation::AutomaticActivation;
pub use button_role::UseButtonRole;
pub use hidden::UseHiddenAttribute;
pub use tabindex::ManageTabIndex;

use std::cell::RefCell;
use std::rc::Rc;

use aw_a11y::AttributeTracker;

use crate::component::Cleanup;

/// Tracker shared between an extension's subscriber and its cleanup
type SharedTracker = Rc<RefCell<AttributeTracker>>;

fn shared_tracker() -> SharedTracker {
    Rc::new(RefCell::new(AttributeTracker::new()))
}

/// Cleanup that restores everything `tracker` recorded
fn restore_on_cleanup(tracker: SharedTracker) -> Cleanup {
    Box::new(move |page| tracker.borrow_mut().remove_all(&mut page.document))
}

/// Implement [`Extension`](crate::Extension) for each listed widget by
/// delegating to a generic attach function
macro_rules! delegate_extension {
    ($extension:ty => $attach:ident for $($widget:ty),+ $(,)?) => {
        $(
            impl $crate::component::Extension<$widget> for $extension {
                fn attach(
                    self: Box<Self>,
                    widget: &mut $widget,
                    page: &mut $crate::Page,
                ) -> $crate::component::Cleanup {
                    $attach(widget, page)
                }
            }
        )+
    };
}

pub(crate) use delegate_extension;
