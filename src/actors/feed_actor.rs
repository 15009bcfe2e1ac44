use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::models::{ActivityFeed, FeedScope, Origin, TransactionDetails};
use crate::storage::FeedStorage;

/// A record routed to the actor owning its scope.
#[derive(Debug, Clone)]
pub struct FeedEvent {
    pub origin: Origin,
    pub details: TransactionDetails
}

impl FeedEvent {
    pub fn local(details: TransactionDetails) -> Self {
        Self { origin: Origin::Local, details }
    }

    pub fn remote(details: TransactionDetails) -> Self {
        Self { origin: Origin::Remote, details }
    }
}

/// Owns the feed of a single wallet scope and applies records to it in arrival order.
pub struct FeedActor {
    scope: FeedScope,
    sender: mpsc::UnboundedSender<FeedEvent>,
    handle: JoinHandle<()>
}

impl FeedActor {
    /// Spawns the actor. The feed is taken from `storage` and put back on despawn.
    pub fn new<S: FeedStorage>(scope: FeedScope, storage: Arc<S>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<FeedEvent>();
        let task_scope = scope.clone();

        let handle = spawn(async move {
            let mut feed = storage.take(&task_scope).unwrap_or_else(ActivityFeed::new);

            while let Some(event) = receiver.recv().await {
                let id = event.details.id.clone();
                let status = event.details.status;

                match feed.apply(event.origin, event.details) {
                    Ok(()) => {
                        debug!("Record [{id}]:[{status:?}] applied to feed [{task_scope}]");
                    },
                    Err(error) => {
                        warn!("{error}");
                    }
                }
            }

            for details in feed.resubmittable() {
                info!("Local transaction [{}] submitted at [{:?}] is still unmatched and can be resubmitted", details.id, details.options.submitted_at);
            }

            storage.put(task_scope, feed);
        });

        Self { scope, sender, handle }
    }

    pub fn scope(&self) -> &FeedScope {
        &self.scope
    }

    /// Queues a record. Returns `false` when the actor has already stopped.
    pub fn accept(&self, event: FeedEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    /// Closes the queue and waits until every queued record is applied and the feed is saved.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
