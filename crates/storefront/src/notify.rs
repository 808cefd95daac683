//! User notifications.
//!
//! Both stores report what they did through a [`Notifier`]. On a page that
//! is the [`Toast`]: one element, created the first time it is needed and
//! reused for every later message.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::info;

use crate::page::{Page, ids};

/// CSS class that makes the toast visible.
const SHOW_CLASS: &str = "show";

/// Receives short user-facing messages.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Current state of the toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub visible: bool,
    pub shown_at: DateTime<Utc>,
    pub hide_at: DateTime<Utc>,
}

/// The page-wide toast notification.
pub struct Toast<P: Page> {
    page: Rc<RefCell<P>>,
    duration: TimeDelta,
    state: RefCell<Option<ToastState>>,
}

impl<P: Page> Toast<P> {
    /// Create a toast that hides `duration` after each message.
    #[must_use]
    pub fn new(page: Rc<RefCell<P>>, duration: Duration) -> Self {
        Self {
            page,
            duration: TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX),
            state: RefCell::new(None),
        }
    }

    /// Snapshot of the toast, `None` until the first message.
    #[must_use]
    pub fn current(&self) -> Option<ToastState> {
        self.state.borrow().clone()
    }

    /// Show `message` as if at `now`.
    pub fn show_at(&self, message: &str, now: DateTime<Utc>) {
        {
            let mut page = self.page.borrow_mut();
            if !page.has_element(ids::STORE_TOAST) {
                page.create_element(ids::STORE_TOAST);
            }
            page.set_text(ids::STORE_TOAST, message);
            page.toggle_class(ids::STORE_TOAST, SHOW_CLASS, true);
        }

        let hide_at = now
            .checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        *self.state.borrow_mut() = Some(ToastState {
            message: message.to_owned(),
            visible: true,
            shown_at: now,
            hide_at,
        });
    }

    /// Hide the toast if its deadline has passed at `now`.
    ///
    /// Returns true if the toast was hidden by this call.
    pub fn expire_at(&self, now: DateTime<Utc>) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(toast) = state.as_mut().filter(|t| t.visible && now >= t.hide_at) else {
            return false;
        };

        toast.visible = false;
        self.page
            .borrow_mut()
            .toggle_class(ids::STORE_TOAST, SHOW_CLASS, false);
        true
    }

    /// Hide the toast if its deadline has passed.
    pub fn expire(&self) -> bool {
        self.expire_at(Utc::now())
    }
}

impl<P: Page> Notifier for Toast<P> {
    fn notify(&self, message: &str) {
        info!(message, "Toast");
        self.show_at(message, Utc::now());
    }
}
