//! Observable state container.
//!
//! [`Store`] owns the [`AppState`] and is the single entry point for
//! mutations: every event goes through [`Store::dispatch`], which runs the
//! event handler and notifies subscribers when the state visibly changed.
//!
//! # Example
//!
//! ```rust
//! use game_library::app::{AppState, Event, Store};
//! use game_library::ui::Theme;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let renders = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&renders);
//!
//! let mut store = Store::new(AppState::new(Theme::default(), 10));
//! store.subscribe(move |_state| counter.set(counter.get() + 1));
//!
//! let actions = store.dispatch(&Event::Start)?;
//! assert_eq!(actions.len(), 2);
//! assert_eq!(renders.get(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::handler::{handle_event, Event};
use super::{Action, AppState};
use crate::domain::error::Result;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState)>;

/// Owner of the application state.
pub struct Store {
    state: AppState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Store {
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Registers `listener`, called after every state-changing dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AppState) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Applies `event` and returns the actions the driver must execute.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`]. Listeners are not notified
    /// when the event is rejected.
    pub fn dispatch(&mut self, event: &Event) -> Result<Vec<Action>> {
        let (changed, actions) = handle_event(&mut self.state, event)?;

        if changed {
            tracing::trace!(listeners = self.listeners.len(), "notifying listeners");
            for (_, listener) in &mut self.listeners {
                listener(&self.state);
            }
        }

        Ok(actions)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Theme;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_see_changed_state_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);

        let mut store = Store::new(AppState::new(Theme::default(), 10));
        store.subscribe(move |state| log.borrow_mut().push(state.loading.catalog));

        store.dispatch(&Event::Start).unwrap();
        store.dispatch(&Event::ToggleCatalogPanel).unwrap();

        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn rejected_events_do_not_notify() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);

        let mut store = Store::new(AppState::new(Theme::default(), 10));
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(store.dispatch(&Event::SelectTitle(42)).is_err());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);

        let mut store = Store::new(AppState::new(Theme::default(), 10));
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));

        store.dispatch(&Event::Start).unwrap();
        assert_eq!(*calls.borrow(), 0);
    }
}
