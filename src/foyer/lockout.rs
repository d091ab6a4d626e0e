//! Account-lockout state machine. An account is `Active` until its attempt
//! counter passes the threshold, after which `Locked` is terminal here:
//! recovery is the only way out, and that lives elsewhere.

use crate::foyer::error::Error;
use crate::foyer::store::UserStore;

/// Consecutive failed attempts allowed before the account locks; the next
/// failure after this (the third) flips the lock.
pub const MAX_LOGIN_ATTEMPTS: i32 = 2;

/// What the login handler should tell the user after a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockoutOutcome {
    /// Attempt counted, account still active.
    WrongPassword,
    /// This failure crossed the threshold; the account is now locked.
    Locked,
}

/// Record a wrong-password attempt. Only called for the wrong-password
/// outcome: a no-such-user lookup never reaches this machine.
///
/// The counter update is a single atomic increment-and-return, so two
/// concurrent failures for the same account each see a distinct count and the
/// threshold is crossed exactly once.
///
/// # Errors
/// Returns an error if any of the persistence calls fail; the caller aborts
/// the login flow with a generic failure response.
pub async fn record_failed_attempt(
    store: &dyn UserStore,
    user_id: i64,
) -> Result<LockoutOutcome, Error> {
    let attempts = store.increment_login_attempts(user_id).await?;

    if attempts > MAX_LOGIN_ATTEMPTS {
        store.lock_account(user_id).await?;

        // Read the flag back before surfacing the blocked message.
        if store.is_locked(user_id).await? {
            return Ok(LockoutOutcome::Locked);
        }
    }

    Ok(LockoutOutcome::WrongPassword)
}

/// Reset the attempt counter after a successful credential check.
///
/// # Errors
/// Returns an error if the persistence call fails.
pub async fn record_successful_login(store: &dyn UserStore, user_id: i64) -> Result<(), Error> {
    store.reset_login_attempts(user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foyer::store::mem::MemStore;

    #[tokio::test]
    async fn locks_on_the_third_failure() {
        let store = MemStore::new();
        let user_id = store.seed("alice", "alice@example.com", "hash");

        assert_eq!(
            record_failed_attempt(&store, user_id).await.unwrap(),
            LockoutOutcome::WrongPassword
        );
        assert_eq!(
            record_failed_attempt(&store, user_id).await.unwrap(),
            LockoutOutcome::WrongPassword
        );
        assert_eq!(
            record_failed_attempt(&store, user_id).await.unwrap(),
            LockoutOutcome::Locked
        );

        assert!(store.is_locked(user_id).await.unwrap());
    }

    #[tokio::test]
    async fn success_resets_the_counter() {
        let store = MemStore::new();
        let user_id = store.seed("bob", "bob@example.com", "hash");

        record_failed_attempt(&store, user_id).await.unwrap();
        record_failed_attempt(&store, user_id).await.unwrap();
        assert_eq!(store.login_attempts(user_id), 2);

        record_successful_login(&store, user_id).await.unwrap();
        assert_eq!(store.login_attempts(user_id), 0);
        assert!(!store.is_locked(user_id).await.unwrap());
    }

    #[tokio::test]
    async fn persistence_failure_aborts_without_counting() {
        let store = MemStore::new();
        let user_id = store.seed("dave", "dave@example.com", "hash");
        store.fail_writes();

        assert!(record_failed_attempt(&store, user_id).await.is_err());
        assert_eq!(store.login_attempts(user_id), 0);

        assert!(record_successful_login(&store, user_id).await.is_err());
    }

    #[tokio::test]
    async fn lock_is_terminal() {
        let store = MemStore::new();
        let user_id = store.seed("carol", "carol@example.com", "hash");

        for _ in 0..3 {
            record_failed_attempt(&store, user_id).await.unwrap();
        }
        assert!(store.is_locked(user_id).await.unwrap());

        // Further failures keep reporting the locked state.
        assert_eq!(
            record_failed_attempt(&store, user_id).await.unwrap(),
            LockoutOutcome::Locked
        );
    }
}
