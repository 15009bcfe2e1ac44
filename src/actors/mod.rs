mod feed_actor;

pub use feed_actor::{FeedActor, FeedEvent};
