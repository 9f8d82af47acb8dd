use chrono::{DateTime, Utc};

use crate::model::{Message, MessageId, Sender, SessionId};

/// Identifies one "opening" of a conversation. Each select or create starts
/// a new generation; async results carry the generation they were issued
/// under and are dropped if it is no longer current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// The selected session and its in-memory history.
///
/// With no session selected the history is always empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveConversation {
    session_id: Option<SessionId>,
    messages: Vec<Message>,
    generation: Generation,
    loading: bool,
    next_id: u64,
}

impl Default for ActiveConversation {
    fn default() -> Self {
        Self {
            session_id: None,
            messages: Vec::new(),
            generation: Generation(0),
            loading: false,
            next_id: 0,
        }
    }
}

impl ActiveConversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// True while the history fetch for the selected session is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_current(&self, generation: Generation, session_id: &SessionId) -> bool {
        self.generation == generation && self.session_id.as_ref() == Some(session_id)
    }

    /// Switch to `session_id` and wait for its history.
    pub fn begin_load(&mut self, session_id: SessionId) -> Generation {
        self.open(session_id, true)
    }

    /// Switch to a session known to have no history.
    pub fn open_empty(&mut self, session_id: SessionId) -> Generation {
        self.open(session_id, false)
    }

    fn open(&mut self, session_id: SessionId, loading: bool) -> Generation {
        self.generation = Generation(self.generation.0 + 1);
        self.session_id = Some(session_id);
        self.messages.clear();
        self.next_id = 0;
        self.loading = loading;
        self.generation
    }

    /// Install a fetched history. Returns false, leaving everything
    /// untouched, if the fetch is stale.
    pub fn commit_history<I>(&mut self, generation: Generation, session_id: &SessionId, history: I) -> bool
    where
        I: IntoIterator<Item = (String, Sender, DateTime<Utc>)>,
    {
        if !self.is_current(generation, session_id) {
            return false;
        }
        self.messages.clear();
        self.next_id = 0;
        for (content, sender, timestamp) in history {
            self.push_unchecked(sender, content, timestamp);
        }
        self.loading = false;
        true
    }

    /// The fetch failed: show an empty history but keep the session selected.
    pub fn fail_history(&mut self, generation: Generation, session_id: &SessionId) -> bool {
        if !self.is_current(generation, session_id) {
            return false;
        }
        self.messages.clear();
        self.next_id = 0;
        self.loading = false;
        true
    }

    /// Append a message to the selected session. `None` if nothing is
    /// selected.
    pub fn push(&mut self, sender: Sender, content: String, timestamp: DateTime<Utc>) -> Option<MessageId> {
        self.session_id.as_ref()?;
        Some(self.push_unchecked(sender, content, timestamp))
    }

    /// Append the assistant's answer to a send made in `session_id`.
    ///
    /// Refused if another session is open. A reply the freshly loaded
    /// history already ends with is not repeated.
    pub fn push_reply(&mut self, session_id: &SessionId, content: String, timestamp: DateTime<Utc>) -> bool {
        if self.session_id.as_ref() != Some(session_id) {
            return false;
        }
        let already_loaded = self
            .messages
            .last()
            .is_some_and(|m| m.sender == Sender::Assistant && m.content == content);
        if !already_loaded {
            self.push_unchecked(Sender::Assistant, content, timestamp);
        }
        true
    }

    fn push_unchecked(&mut self, sender: Sender, content: String, timestamp: DateTime<Utc>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message { id, content, sender, timestamp });
        id
    }
}
