//! Identity source test doubles.

use crate::application::ports::{IdentityFeed, IdentitySource, SessionError};
use crate::domain::identity::Identity;
use std::collections::BTreeSet;

/// Identity source backed by fixed sets.
#[derive(Debug, Clone)]
pub struct StaticSource {
    following: BTreeSet<Identity>,
    followers: BTreeSet<Identity>,
}

impl StaticSource {
    /// Create a source from handle lists.
    pub fn new<I, J, S, T>(following: I, followers: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            following: following
                .into_iter()
                .map(|s| Identity::new(s.into()))
                .collect(),
            followers: followers
                .into_iter()
                .map(|s| Identity::new(s.into()))
                .collect(),
        }
    }
}

impl IdentitySource for StaticSource {
    fn following(&mut self) -> Result<BTreeSet<Identity>, SessionError> {
        Ok(self.following.clone())
    }

    fn followers(&mut self) -> Result<BTreeSet<Identity>, SessionError> {
        Ok(self.followers.clone())
    }
}

/// Paginated feed backed by a fixed page list.
///
/// Once the scripted pages are exhausted, serves empty pages (so the
/// collector's stall threshold terminates it), or a session error if
/// constructed with [`failing_after`](PagedFeed::failing_after).
#[derive(Debug, Clone)]
pub struct PagedFeed {
    pages: Vec<Vec<Identity>>,
    served: usize,
    fail_when_exhausted: bool,
}

impl PagedFeed {
    /// Create a feed serving the given pages, then empty pages.
    pub fn new(pages: Vec<Vec<Identity>>) -> Self {
        Self {
            pages,
            served: 0,
            fail_when_exhausted: false,
        }
    }

    /// Create a feed that errors once its pages run out.
    pub fn failing_after(pages: Vec<Vec<Identity>>) -> Self {
        Self {
            pages,
            served: 0,
            fail_when_exhausted: true,
        }
    }

    /// Number of pages served so far.
    pub fn pages_served(&self) -> usize {
        self.served
    }
}

impl IdentityFeed for PagedFeed {
    fn next_page(&mut self) -> Result<Vec<Identity>, SessionError> {
        if self.served >= self.pages.len() && self.fail_when_exhausted {
            return Err(SessionError::SessionLost(
                "scripted feed failure".to_string(),
            ));
        }

        let page = self.pages.get(self.served).cloned().unwrap_or_default();
        self.served += 1;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source() {
        let mut source = StaticSource::new(["alice", "bob"], ["carol"]);
        assert_eq!(source.following().unwrap().len(), 2);
        assert!(source.followers().unwrap().contains(&Identity::new("carol")));
    }

    #[test]
    fn test_paged_feed_serves_then_empties() {
        let mut feed = PagedFeed::new(vec![vec![Identity::new("alice")]]);
        assert_eq!(feed.next_page().unwrap().len(), 1);
        assert!(feed.next_page().unwrap().is_empty());
        assert_eq!(feed.pages_served(), 2);
    }

    #[test]
    fn test_failing_feed_errors_when_exhausted() {
        let mut feed = PagedFeed::failing_after(vec![]);
        assert!(feed.next_page().is_err());
    }
}
