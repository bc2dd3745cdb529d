use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;

use thiserror::Error;

use crate::config::SESSION_STORAGE_KEY;
use crate::models::session::SessionRecord;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no browser window available")]
    NoWindow,
    #[error("localStorage is unavailable")]
    StorageUnavailable,
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Synchronous access to the persisted session.
pub trait SessionSource {
    fn read_user(&self) -> Option<SessionRecord>;
}

/// Reads the session the host application keeps in `localStorage`.
#[derive(Clone, Debug)]
pub struct LocalSession {
    key: &'static str,
}

impl Default for LocalSession {
    fn default() -> Self {
        Self {
            key: SESSION_STORAGE_KEY,
        }
    }
}

impl LocalSession {
    pub fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        let window = web_sys::window().ok_or(SessionError::NoWindow)?;
        let storage = window
            .local_storage()
            .ok()
            .flatten()
            .ok_or(SessionError::StorageUnavailable)?;
        match storage.get_item(self.key) {
            Ok(Some(raw)) => parse_record(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(SessionError::StorageUnavailable),
        }
    }
}

impl SessionSource for LocalSession {
    fn read_user(&self) -> Option<SessionRecord> {
        match self.load() {
            Ok(record) => record,
            Err(e) => {
                log::debug!("session read failed: {}", e);
                None
            }
        }
    }
}

pub fn parse_record(raw: &str) -> Result<SessionRecord, SessionError> {
    Ok(serde_json::from_str(raw)?)
}

/// In-memory session, for tests and for hosts that keep the session elsewhere.
#[derive(Clone, Debug, Default)]
pub struct MemorySession {
    record: RefCell<Option<SessionRecord>>,
    reads: Cell<usize>,
}

impl MemorySession {
    pub fn new(record: Option<SessionRecord>) -> Self {
        Self {
            record: RefCell::new(record),
            reads: Cell::new(0),
        }
    }

    pub fn with_user(username: impl Into<String>) -> Self {
        Self::new(Some(SessionRecord::new(username)))
    }

    pub fn set(&self, record: Option<SessionRecord>) {
        *self.record.borrow_mut() = record;
    }

    /// How many times the session has been read.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl SessionSource for MemorySession {
    fn read_user(&self) -> Option<SessionRecord> {
        self.reads.set(self.reads.get() + 1);
        self.record.borrow().clone()
    }
}

/// Session source handed down as a Yew context. Falls back to
/// `LocalSession` when the application provides none.
#[derive(Clone)]
pub struct SessionContext(Rc<dyn SessionSource>);

impl SessionContext {
    pub fn new(source: impl SessionSource + 'static) -> Self {
        Self(Rc::new(source))
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(LocalSession::default())
    }
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SessionContext {
    type Target = dyn SessionSource;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_record() {
        let record = parse_record(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(record, SessionRecord::new("alice"));
    }

    #[test]
    fn malformed_record_is_an_error() {
        let err = parse_record("not json").unwrap_err();
        assert!(matches!(err, SessionError::Malformed(_)));
        assert!(err.to_string().starts_with("malformed session record"));
    }

    #[test]
    fn memory_session_reads_back_what_was_set() {
        let session = MemorySession::default();
        assert_eq!(session.read_user(), None);

        session.set(Some(SessionRecord::new("bob")));
        assert_eq!(session.read_user().map(|r| r.username), Some("bob".to_string()));
        assert_eq!(session.reads(), 2);
    }

    #[test]
    fn context_equality_is_by_identity() {
        let a = SessionContext::new(MemorySession::with_user("alice"));
        let b = SessionContext::new(MemorySession::with_user("alice"));
        assert!(a == a.clone());
        assert!(a != b);
        assert_eq!(a.read_user(), Some(SessionRecord::new("alice")));
    }
}
