use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::api::AccountApi;
use crate::dto::user::UserDto;
use crate::error::Result;
use crate::models::settings::AccountSettings;
use crate::validation::{precheck_username, FieldError, UsernamePrecheck};

/// Monotonic token source deciding which async result may still be applied.
///
/// Every new request takes a ticket; only the holder of the latest ticket
/// may apply its result. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: Rc<Cell<u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Makes every outstanding ticket stale, e.g. when the owner goes away.
    pub fn invalidate(&self) {
        self.begin();
    }
}

/// Full username rule: unchanged usernames pass without a remote call,
/// pattern mismatches fail fast, anything else must be available.
pub async fn check_username<A>(
    api: &A,
    username: &str,
    user: &UserDto,
    settings: &AccountSettings,
) -> Result<Option<FieldError>>
where
    A: AccountApi + ?Sized,
{
    match precheck_username(username, user, settings) {
        UsernamePrecheck::Unchanged => Ok(None),
        UsernamePrecheck::Invalid => Ok(Some(FieldError::InvalidUsername)),
        UsernamePrecheck::NeedsAvailabilityCheck => {
            let available = api.check_username_availability(username).await?;
            Ok((!available).then_some(FieldError::UsernameTaken))
        }
    }
}

/// Runs [`check_username`] under a fresh ticket and returns `None` when a
/// newer check started while this one was in flight.
pub async fn check_username_latest<A>(
    api: &A,
    sequence: &RequestSequence,
    username: &str,
    user: &UserDto,
    settings: &AccountSettings,
) -> Option<Result<Option<FieldError>>>
where
    A: AccountApi + ?Sized,
{
    let ticket = sequence.begin();
    let outcome = check_username(api, username, user, settings).await;
    if sequence.is_current(ticket) {
        Some(outcome)
    } else {
        debug!("Discarding stale username check for {:?}", username);
        None
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::models::settings::compile_names_regex;
    use crate::workflow::testing::{ApiCall, RecordingApi};
    use pretty_assertions::assert_eq;

    fn user() -> UserDto {
        UserDto {
            id: "u1".to_string(),
            username: Some("ada".to_string()),
            ..Default::default()
        }
    }

    fn settings() -> AccountSettings {
        AccountSettings {
            can_change_username: true,
            names_regex: compile_names_regex("[a-z.]+"),
            ..Default::default()
        }
    }

    #[test]
    fn test_sequence_tickets() {
        let sequence = RequestSequence::new();
        let first = sequence.begin();
        assert!(sequence.is_current(first));
        let second = sequence.clone().begin();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
        sequence.invalidate();
        assert!(!sequence.is_current(second));
    }

    #[tokio::test]
    async fn test_unchanged_username_skips_remote() {
        let api = RecordingApi::default();
        let result = check_username(&api, "ada", &user(), &settings()).await.unwrap();
        assert_eq!(result, None);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pattern_mismatch_fails_fast() {
        let api = RecordingApi::default();
        let result = check_username(&api, "Ada!", &user(), &settings()).await.unwrap();
        assert_eq!(result, Some(FieldError::InvalidUsername));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_taken_username() {
        let api = RecordingApi {
            taken_usernames: ["grace".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let taken = check_username(&api, "grace", &user(), &settings()).await.unwrap();
        assert_eq!(taken, Some(FieldError::UsernameTaken));
        let free = check_username(&api, "ada.l", &user(), &settings()).await.unwrap();
        assert_eq!(free, None);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::CheckUsername("grace".to_string()),
                ApiCall::CheckUsername("ada.l".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_stale_check_is_discarded() {
        let api = RecordingApi {
            taken_usernames: ["slow".to_string()].into_iter().collect(),
            slow_usernames: ["slow".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let sequence = RequestSequence::new();
        let user = user();
        let settings = settings();

        let (stale, fresh) = tokio::join!(
            check_username_latest(&api, &sequence, "slow", &user, &settings),
            check_username_latest(&api, &sequence, "fast", &user, &settings),
        );

        assert!(stale.is_none());
        assert_eq!(fresh, Some(Ok(None)));
    }
}
