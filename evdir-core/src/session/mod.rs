//! The session flag: a single "is authenticated" boolean.
//!
//! This is display gating only. The credentials are a fixed pair compiled
//! into the binary and the events API serves private events to anyone, so
//! the flag must never be treated as a security boundary.
//!
//! `SessionFlag` is the one authority over the flag. Consumers get it passed
//! in (usually as `Arc<SessionFlag>`) and either read it or `subscribe()`.
//! Every login and logout writes the store first and then notifies
//! subscribers.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::constants::{DEMO_PASSWORD, DEMO_USERNAME};

const STORED_TRUE: &str = "true";
const STORED_FALSE: &str = "false";

/// The expected username/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials {
            username: DEMO_USERNAME.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }
}

impl Credentials {
    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

pub struct SessionFlag {
    store: Box<dyn SessionStore>,
    credentials: Credentials,
    state: watch::Sender<bool>,
}

impl SessionFlag {
    /// Initialize from the store. Absent or unreadable values mean signed out.
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self::with_credentials(store, Credentials::default())
    }

    pub fn with_credentials(store: impl SessionStore + 'static, credentials: Credentials) -> Self {
        let initial = read_flag(&store);
        let (state, _) = watch::channel(initial);

        SessionFlag {
            store: Box::new(store),
            credentials,
            state,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.state.borrow()
    }

    /// Returns false on a mismatch and leaves the flag as it was. Callers
    /// should report a generic "invalid username or password".
    pub fn login(&self, username: &str, password: &str) -> bool {
        if !self.credentials.matches(username, password) {
            tracing::debug!("login rejected");
            return false;
        }

        self.set(true);
        true
    }

    /// Always signs out, even when already signed out.
    pub fn logout(&self) {
        self.set(false);
    }

    /// Receiver marked changed after every login/logout.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    /// Pick up a change written by another process. Returns true when the
    /// flag changed and subscribers were notified.
    pub fn sync_from_store(&self) -> bool {
        let stored = read_flag(self.store.as_ref());

        self.state.send_if_modified(|current| {
            if *current == stored {
                return false;
            }
            tracing::debug!(authenticated = stored, "session changed in another process");
            *current = stored;
            true
        })
    }

    /// Poll the store in the background until the returned task is aborted.
    pub fn watch_store(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let flag = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                flag.sync_from_store();
            }
        })
    }

    fn set(&self, authenticated: bool) {
        let value = if authenticated { STORED_TRUE } else { STORED_FALSE };

        // An unwritable store only costs persistence; the flag still flips
        // for this process.
        if let Err(e) = self.store.save(value) {
            tracing::warn!(error = %e, "could not persist session flag");
        }

        self.state.send_replace(authenticated);
    }
}

fn read_flag(store: &dyn SessionStore) -> bool {
    match store.load() {
        Ok(Some(value)) => value == STORED_TRUE,
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(error = %e, "could not read session flag, assuming signed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag() -> SessionFlag {
        SessionFlag::new(MemorySessionStore::default())
    }

    #[test]
    fn starts_signed_out_without_stored_value() {
        assert!(!flag().is_authenticated());
    }

    #[test]
    fn unparsable_stored_value_is_signed_out() {
        let flag = SessionFlag::new(MemorySessionStore::with_value("yes please"));
        assert!(!flag.is_authenticated());
    }

    #[test]
    fn restores_stored_true() {
        let flag = SessionFlag::new(MemorySessionStore::with_value("true"));
        assert!(flag.is_authenticated());
    }

    #[test]
    fn login_with_expected_pair() {
        let flag = flag();

        assert!(flag.login(DEMO_USERNAME, DEMO_PASSWORD));
        assert!(flag.is_authenticated());
    }

    #[test]
    fn login_with_wrong_pair_leaves_flag() {
        let flag = flag();
        assert!(!flag.login(DEMO_USERNAME, "nope"));
        assert!(!flag.login("someone", DEMO_PASSWORD));
        assert!(!flag.is_authenticated());

        flag.login(DEMO_USERNAME, DEMO_PASSWORD);
        assert!(!flag.login("someone", "else"));
        assert!(flag.is_authenticated());
    }

    #[test]
    fn logout_is_idempotent() {
        let flag = flag();
        flag.login(DEMO_USERNAME, DEMO_PASSWORD);

        flag.logout();
        assert!(!flag.is_authenticated());
        flag.logout();
        assert!(!flag.is_authenticated());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let flag = flag();
        let mut first = flag.subscribe();
        let mut second = flag.subscribe();

        flag.login(DEMO_USERNAME, DEMO_PASSWORD);
        assert!(first.has_changed().unwrap());
        assert!(*second.borrow_and_update());
        assert!(*first.borrow_and_update());

        // logging out while signed out still notifies
        flag.logout();
        flag.logout();
        assert!(second.has_changed().unwrap());
        assert!(!*second.borrow_and_update());
    }

    #[test]
    fn failed_login_does_not_notify() {
        let flag = flag();
        let rx = flag.subscribe();

        flag.login("x", "y");
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn persists_before_notifying() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        let flag = SessionFlag::new(FileSessionStore::new(&path));

        flag.login(DEMO_USERNAME, DEMO_PASSWORD);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "true");

        flag.logout();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "false");
    }

    #[test]
    fn sync_picks_up_other_process() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        let ours = SessionFlag::new(FileSessionStore::new(&path));
        let theirs = SessionFlag::new(FileSessionStore::new(&path));
        let rx = ours.subscribe();

        theirs.login(DEMO_USERNAME, DEMO_PASSWORD);
        assert!(!ours.is_authenticated());

        assert!(ours.sync_from_store());
        assert!(ours.is_authenticated());
        assert!(rx.has_changed().unwrap());

        // nothing new to pick up
        assert!(!ours.sync_from_store());
    }

    #[tokio::test(start_paused = true)]
    async fn watch_store_polls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        let ours = Arc::new(SessionFlag::new(FileSessionStore::new(&path)));
        let mut rx = ours.subscribe();
        let handle = ours.watch_store(Duration::from_millis(100));

        FileSessionStore::new(&path).save("true").unwrap();
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .unwrap()
            .unwrap();

        assert!(ours.is_authenticated());
        handle.abort();
    }
}
