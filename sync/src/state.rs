use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use crate::conversation::ActiveConversation;
use crate::directory::SessionDirectory;
use crate::model::SessionId;

/// Everything the presentation layer renders. Handed out as a snapshot;
/// only the controller mutates the live copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncState {
    pub(crate) directory: SessionDirectory,
    pub(crate) conversation: ActiveConversation,
    pub(crate) draft: String,
    pub(crate) pending: BTreeSet<SessionId>,
    pub(crate) directory_loading: bool,
    pub(crate) error: Option<String>,
}

impl SyncState {
    pub fn directory(&self) -> &SessionDirectory {
        &self.directory
    }

    pub fn conversation(&self) -> &ActiveConversation {
        &self.conversation
    }

    /// The outgoing-text buffer.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn directory_loading(&self) -> bool {
        self.directory_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A send for the selected session is awaiting its reply.
    pub fn is_sending(&self) -> bool {
        self.conversation
            .session_id()
            .is_some_and(|id| self.pending.contains(id))
    }

    /// Whether a send of `text` would go out right now.
    pub fn can_send(&self, text: &str) -> bool {
        self.conversation.session_id().is_some()
            && !text.trim().is_empty()
            && self.send_blocker().is_none()
    }

    /// Why the selected session cannot take a message yet, if it cannot.
    /// Empty text is not reported.
    pub fn send_blocker(&self) -> Option<&'static str> {
        if self.conversation.is_loading() {
            Some("Loading conversation...")
        } else if self.is_sending() {
            Some("Waiting for the reply...")
        } else {
            None
        }
    }
}

type Listener = Rc<dyn Fn(&SyncState)>;

/// Owns the live state and the listeners notified after each mutation.
pub(crate) struct Store {
    state: RefCell<SyncState>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
}

impl Store {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(SyncState::default()),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        })
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&SyncState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub(crate) fn snapshot(&self) -> SyncState {
        self.state.borrow().clone()
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut SyncState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        // Listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    pub(crate) fn subscribe(self: &Rc<Self>, listener: impl Fn(&SyncState) + 'static) -> Subscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription { store: Rc::downgrade(self), id, active: true }
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    store: Weak<Store>,
    id: u64,
    active: bool,
}

impl Subscription {
    /// Leave the listener registered for as long as the controller lives.
    pub fn detach(mut self) {
        self.active = false;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Some(store) = self.store.upgrade() {
            store.unsubscribe(self.id);
        }
    }
}
