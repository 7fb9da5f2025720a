//! Scripted executor for testing.

use crate::application::ports::{ActionExecutor, ActionKind, SessionError};
use crate::domain::identity::Identity;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Executor test double with scripted outcomes.
///
/// By default every session opens and every action succeeds. Failure modes
/// can be scripted per identity: expected failures (`Ok(false)`), a login
/// rejection, or a session loss triggered by a specific identity.
///
/// Clones share the call log, so tests can keep a handle while the
/// scheduler owns the executor.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    fail_on: BTreeSet<Identity>,
    lose_session_on: Option<Identity>,
    fail_login: bool,
    calls: Arc<Mutex<Vec<(ActionKind, Identity)>>>,
}

impl ScriptedExecutor {
    /// Create an executor that succeeds at everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script expected failures (`Ok(false)`) for the given identities.
    pub fn failing_on<I, S>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fail_on = identities
            .into_iter()
            .map(|s| Identity::new(s.into()))
            .collect();
        self
    }

    /// Script a session loss when the given identity is attempted.
    pub fn losing_session_on(mut self, identity: impl Into<String>) -> Self {
        self.lose_session_on = Some(Identity::new(identity.into()));
        self
    }

    /// Script `open_session` to fail.
    pub fn with_login_failure(mut self) -> Self {
        self.fail_login = true;
        self
    }

    /// All attempted actions, in order.
    pub fn calls(&self) -> Vec<(ActionKind, Identity)> {
        self.calls
            .lock()
            .expect("ScriptedExecutor mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }

    fn attempt(&mut self, kind: ActionKind, identity: &Identity) -> Result<bool, SessionError> {
        if self.lose_session_on.as_ref() == Some(identity) {
            return Err(SessionError::SessionLost(format!(
                "scripted session loss on {identity}"
            )));
        }

        self.calls
            .lock()
            .expect("ScriptedExecutor mutex poisoned - a test thread panicked while holding the lock")
            .push((kind, identity.clone()));

        Ok(!self.fail_on.contains(identity))
    }
}

impl ActionExecutor for ScriptedExecutor {
    fn open_session(&mut self) -> Result<(), SessionError> {
        if self.fail_login {
            Err(SessionError::LoginFailed(
                "scripted login failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn attempt_follow(&mut self, identity: &Identity) -> Result<bool, SessionError> {
        self.attempt(ActionKind::Follow, identity)
    }

    fn attempt_unfollow(&mut self, identity: &Identity) -> Result<bool, SessionError> {
        self.attempt(ActionKind::Unfollow, identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_succeeds() {
        let mut executor = ScriptedExecutor::new();
        assert!(executor.open_session().is_ok());
        assert_eq!(executor.attempt_follow(&Identity::new("alice")), Ok(true));
    }

    #[test]
    fn test_scripted_expected_failure() {
        let mut executor = ScriptedExecutor::new().failing_on(["bob"]);
        assert_eq!(executor.attempt_unfollow(&Identity::new("bob")), Ok(false));
        assert_eq!(executor.attempt_unfollow(&Identity::new("alice")), Ok(true));
    }

    #[test]
    fn test_call_log_shared_across_clones() {
        let executor = ScriptedExecutor::new();
        let mut owned = executor.clone();

        owned.attempt_follow(&Identity::new("alice")).unwrap();

        assert_eq!(
            executor.calls(),
            vec![(ActionKind::Follow, Identity::new("alice"))]
        );
    }

    #[test]
    fn test_session_loss() {
        let mut executor = ScriptedExecutor::new().losing_session_on("bob");
        assert!(matches!(
            executor.attempt_follow(&Identity::new("bob")),
            Err(SessionError::SessionLost(_))
        ));
    }
}
