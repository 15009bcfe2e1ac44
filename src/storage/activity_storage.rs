use dashmap::DashMap;
use tracing::debug;

use crate::models::{ActivityFeed, FeedScope, TransactionDetails};
use crate::storage::FeedStorage;

/// In-memory feeds keyed by wallet and chain.
#[derive(Debug, Default)]
pub struct ActivityStorage {
    feeds: DashMap<FeedScope, ActivityFeed>
}

impl ActivityStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Records of one scope, newest first, without taking the feed.
    pub fn records(&self, scope: &FeedScope) -> Option<Vec<TransactionDetails>> {
        self.feeds.get(scope).map(|feed| feed.records())
    }

    /// Every stored feed, ordered by owner and then chain id, each newest first.
    pub fn snapshot(&self) -> Vec<(FeedScope, Vec<TransactionDetails>)> {
        let mut feeds: Vec<_> = self.feeds.iter()
            .map(|entry| (entry.key().clone(), entry.value().records()))
            .collect();

        feeds.sort_by(|(a, _), (b, _)| a.owner.cmp(&b.owner).then_with(|| a.chain.id().cmp(&b.chain.id())));
        feeds
    }
}

impl FeedStorage for ActivityStorage {
    fn take(&self, scope: &FeedScope) -> Option<ActivityFeed> {
        self.feeds.remove(scope).map(|(_, feed)| feed)
    }

    fn put(&self, scope: FeedScope, feed: ActivityFeed) {
        debug!("Storing [{}] records for feed [{scope}]", feed.len());
        self.feeds.insert(scope, feed);
    }
}
