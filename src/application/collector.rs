//! Bounded identity collection.
//!
//! Drains a paginated feed into a deduplicated set, stopping after a fixed
//! number of consecutive pages that add nothing new. This is the
//! "scroll until the list stops growing" loop with the UI details removed:
//! a stall is normal termination, not an error.

use crate::application::ports::{IdentityFeed, SessionError, Sleeper};
use crate::domain::identity::Identity;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

/// Collect a finite, deduplicated set of identities from `feed`.
///
/// Fetches pages until `stall_threshold` consecutive fetches add no new
/// identity, sleeping `settle` between fetches to let the source catch up.
/// Feed errors are session-level and abort collection.
pub fn collect_identities<F>(
    feed: &mut F,
    sleeper: &dyn Sleeper,
    settle: Duration,
    stall_threshold: u32,
) -> Result<BTreeSet<Identity>, SessionError>
where
    F: IdentityFeed + ?Sized,
{
    let mut collected = BTreeSet::new();
    let mut stalls = 0u32;

    while stalls < stall_threshold {
        let page = feed.next_page()?;
        let before = collected.len();
        collected.extend(page);

        if collected.len() == before {
            stalls += 1;
            debug!(stalls, total = collected.len(), "no new identities in page");
        } else {
            stalls = 0;
            debug!(total = collected.len(), "collected page");
        }

        if stalls < stall_threshold {
            sleeper.sleep(settle);
        }
    }

    debug!(total = collected.len(), "collection exhausted");
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::{MockSleeper, PagedFeed};

    fn page(handles: &[&str]) -> Vec<Identity> {
        handles.iter().copied().map(Identity::new).collect()
    }

    #[test]
    fn test_collects_and_deduplicates() {
        let mut feed = PagedFeed::new(vec![
            page(&["alice", "bob"]),
            page(&["bob", "carol"]),
        ]);
        let sleeper = MockSleeper::new();

        let collected =
            collect_identities(&mut feed, &sleeper, Duration::from_secs(2), 3).unwrap();

        assert_eq!(collected.len(), 3);
        assert!(collected.contains(&Identity::new("alice")));
        assert!(collected.contains(&Identity::new("carol")));
    }

    #[test]
    fn test_stops_after_three_stalled_pages() {
        let mut feed = PagedFeed::new(vec![page(&["alice"])]);
        let sleeper = MockSleeper::new();

        let collected =
            collect_identities(&mut feed, &sleeper, Duration::from_secs(2), 3).unwrap();

        assert_eq!(collected.len(), 1);
        // One growing page plus three empty pages before the stall threshold
        // trips.
        assert_eq!(feed.pages_served(), 4);
    }

    #[test]
    fn test_stall_counter_resets_on_growth() {
        let mut feed = PagedFeed::new(vec![
            page(&["alice"]),
            page(&["alice"]),
            page(&["alice"]),
            page(&["bob"]),
        ]);
        let sleeper = MockSleeper::new();

        let collected =
            collect_identities(&mut feed, &sleeper, Duration::from_secs(2), 3).unwrap();

        // Two stalled pages, then growth resets the counter, then three
        // empty pages finish the loop.
        assert_eq!(collected.len(), 2);
        assert_eq!(feed.pages_served(), 7);
    }

    #[test]
    fn test_sleeps_between_pages() {
        let mut feed = PagedFeed::new(vec![page(&["alice"])]);
        let sleeper = MockSleeper::new();

        collect_identities(&mut feed, &sleeper, Duration::from_secs(2), 3).unwrap();

        // No sleep after the final stalled page.
        assert_eq!(sleeper.sleeps().len(), 3);
        assert!(sleeper
            .sleeps()
            .iter()
            .all(|d| *d == Duration::from_secs(2)));
    }

    #[test]
    fn test_feed_error_aborts_collection() {
        let mut feed = PagedFeed::failing_after(vec![page(&["alice"])]);
        let sleeper = MockSleeper::new();

        let result = collect_identities(&mut feed, &sleeper, Duration::from_secs(2), 3);
        assert!(matches!(result, Err(SessionError::SessionLost(_))));
    }
}
