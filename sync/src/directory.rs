use std::collections::HashSet;

use crate::model::{Session, SessionId};

/// Ordered list of sessions shown in the sidebar.
///
/// Order is the server's (most recently updated first). The client only
/// breaks ties between equal `updated_at` values, by id, so that two
/// refreshes of the same data always produce the same order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionDirectory {
    sessions: Vec<Session>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full contents with a server listing. Duplicate ids keep
    /// their first occurrence.
    pub fn replace(&mut self, sessions: Vec<Session>) {
        let mut seen = HashSet::with_capacity(sessions.len());
        let mut sessions: Vec<Session> = sessions
            .into_iter()
            .filter(|s| {
                let fresh = seen.insert(s.id.clone());
                if !fresh {
                    log::warn!("Dropping duplicate session {} from listing", s.id);
                }
                fresh
            })
            .collect();

        for run in sessions.chunk_by_mut(|a, b| a.updated_at == b.updated_at) {
            run.sort_by(|a, b| a.id.cmp(&b.id));
        }
        self.sessions = sessions;
    }

    /// Place a locally created session first. Any stale entry with the same
    /// id is removed.
    pub fn insert_front(&mut self, session: Session) {
        self.sessions.retain(|s| s.id != session.id);
        self.sessions.insert(0, session);
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn first(&self) -> Option<&Session> {
        self.sessions.first()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
