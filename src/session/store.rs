//! Reactive wrapper around [`Session`].

use std::fmt;

use super::{Action, Session};
use crate::Result;
use crate::codec::ArchiveCodec;
use crate::tree::TreeNode;

/// File name used for exports when the archive name is unknown.
pub const DEFAULT_EXPORT_NAME: &str = "download.zip";

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Identifies one archive load started with [`SessionStore::begin_load`].
///
/// Only the most recently issued ticket can commit; results for older
/// tickets are discarded when they complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    file_name: String,
}

impl LoadTicket {
    /// Returns the file name the load was started for.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// An encoded archive ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArchive {
    /// Suggested file name: the loaded archive's name, or
    /// [`DEFAULT_EXPORT_NAME`].
    pub file_name: String,
    /// Archive bytes.
    pub bytes: Vec<u8>,
}

type Listener = Box<dyn FnMut(&Session)>;

/// Owns the current [`Session`] and notifies subscribers of changes.
///
/// All mutation goes through [`dispatch`](Self::dispatch) or the load
/// helpers, which run to completion before listeners are called.
#[derive(Default)]
pub struct SessionStore {
    state: Session,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    load_generation: u64,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("load_generation", &self.load_generation)
            .finish()
    }
}

impl SessionStore {
    /// Creates a store with an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store around an existing session.
    pub fn with_session(state: Session) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Returns the current session.
    pub fn state(&self) -> &Session {
        &self.state
    }

    /// Registers a listener called after every state change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Session) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Applies `action` and notifies listeners if the session changed.
    pub fn dispatch(&mut self, action: Action) {
        let next = self.state.clone().apply(action);
        if next != self.state {
            self.state = next;
            self.notify();
        }
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    /// Starts a load and returns its ticket.
    ///
    /// Starting another load before this one completes makes this ticket
    /// stale.
    pub fn begin_load(&mut self, file_name: impl Into<String>) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket {
            generation: self.load_generation,
            file_name: file_name.into(),
        }
    }

    /// Commits the result of a load started with [`begin_load`](Self::begin_load).
    ///
    /// Returns `Ok(true)` if the tree replaced the session, `Ok(false)` if
    /// the ticket was stale and the result was dropped.
    ///
    /// # Errors
    ///
    /// Returns the load error for the current ticket. The session is left
    /// exactly as it was.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<TreeNode>) -> Result<bool> {
        if ticket.generation != self.load_generation {
            log::debug!(
                "Discarding stale load of '{}' (ticket {}, current {})",
                ticket.file_name,
                ticket.generation,
                self.load_generation
            );
            return Ok(false);
        }

        let root = result?;
        self.dispatch(Action::load(root, ticket.file_name));
        Ok(true)
    }

    /// Decodes `bytes` and replaces the session with the resulting tree.
    ///
    /// Decoding and tree building finish before anything is committed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::Error::Decode) or
    /// [`Error::ResourceLimitExceeded`](crate::Error::ResourceLimitExceeded)
    /// if the archive cannot be opened; the session is unchanged.
    pub fn load_archive<C>(&mut self, codec: &C, bytes: Vec<u8>, file_name: &str) -> Result<()>
    where
        C: ArchiveCodec + ?Sized,
    {
        let ticket = self.begin_load(file_name);
        let result = codec
            .decode(&bytes)
            .map(|decoded| decoded.into_tree(file_name));
        if let Err(e) = &result {
            log::warn!("Could not open '{}': {}", file_name, e);
        }
        self.complete_load(ticket, result).map(|_| ())
    }

    /// Encodes the current tree.
    ///
    /// Returns `Ok(None)` when no archive is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`](crate::Error::Encode) if writing fails.
    pub fn export_archive<C>(&self, codec: &C) -> Result<Option<ExportedArchive>>
    where
        C: ArchiveCodec + ?Sized,
    {
        let Some(root) = self.state.root() else {
            return Ok(None);
        };
        let bytes = codec.encode(root)?;
        Ok(Some(ExportedArchive {
            file_name: self.export_name(),
            bytes,
        }))
    }

    pub(crate) fn export_name(&self) -> String {
        self.state
            .archive_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_EXPORT_NAME)
            .to_string()
    }
}
