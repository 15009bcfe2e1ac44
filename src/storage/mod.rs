mod activity_storage;

use crate::models::{ActivityFeed, FeedScope};

pub use activity_storage::ActivityStorage;

/// Where feeds rest while no actor owns them.
///
/// An actor takes its scope's feed when it starts, so nothing else can observe
/// a half-applied batch, and puts it back once its queue is drained.
pub trait FeedStorage: Send + Sync + 'static {
    fn take(&self, scope: &FeedScope) -> Option<ActivityFeed>;
    fn put(&self, scope: FeedScope, feed: ActivityFeed);
}
