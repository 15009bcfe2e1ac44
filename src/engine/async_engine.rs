use crate::actors::{FeedActor, FeedEvent};
use crate::engine::InputRecord;
use crate::models::FeedScope;
use crate::storage::ActivityStorage;
use moka::future::Cache;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error};

const DEFAULT_BACKPRESSURE: usize = 256;
const DEFAULT_DEDUP_CAPACITY: u64 = 10_000;
const DEFAULT_DEDUP_TIMEOUT: Duration = Duration::from_secs(300);

/// Normalizes a stream of provider and local records into per-wallet activity feeds.
pub struct AsyncEngine {
    storage: Arc<ActivityStorage>,
    backpressure: usize,
    dedup_capacity: u64,
    dedup_timeout: Duration,
    delivered: Cache<String, ()>
}

impl AsyncEngine {
    /// Creates a new engine instance with the provided storage.
    pub fn new(storage: Arc<ActivityStorage>) -> Self {
        Self {
            storage,
            backpressure: DEFAULT_BACKPRESSURE,
            dedup_capacity: DEFAULT_DEDUP_CAPACITY,
            dedup_timeout: DEFAULT_DEDUP_TIMEOUT,
            delivered: build_cache(DEFAULT_DEDUP_CAPACITY, DEFAULT_DEDUP_TIMEOUT)
        }
    }

    /// Number of assembled records the reader may run ahead of the actors.
    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Number of recent deliveries remembered to skip repeated ones.
    pub fn with_dedup_capacity(mut self, capacity: u64) -> Self {
        self.dedup_capacity = capacity;
        self.delivered = build_cache(self.dedup_capacity, self.dedup_timeout);
        self
    }

    /// How long a delivery is remembered.
    pub fn with_dedup_timeout(mut self, timeout: Duration) -> Self {
        self.dedup_timeout = timeout;
        self.delivered = build_cache(self.dedup_capacity, self.dedup_timeout);
        self
    }

    /// Orchestrates the end-to-end normalization pipeline for a JSON lines file.
    pub async fn run(&self, path: &str) -> anyhow::Result<()> {
        let (sender, receiver) = mpsc::channel::<FeedEvent>(self.backpressure);
        let reader_handle = self.spawn_jsonl_reader(path.to_string(), sender);
        let processing_result = self.process_events(receiver).await;

        if let Err(error) = reader_handle.await {
            error!("JSON lines ingestion failed: {error}");
        }

        processing_result
    }

    fn spawn_jsonl_reader(&self, path: String, sender: mpsc::Sender<FeedEvent>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening input at path: {path} | {error}");
                    return;
                }
            };

            for (index, line) in BufReader::new(file).lines().enumerate() {
                let line = match line {
                    Ok(line) => line,
                    Err(error) => {
                        error!("Error reading input at path: {path} | {error}");
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                let record = match serde_json::from_str::<InputRecord>(&line) {
                    Ok(record) => record,
                    Err(error) => {
                        error!("Line [{}] deserialization error: {error}", index + 1);
                        continue;
                    }
                };

                let Some(event) = record.into_event() else {
                    continue;
                };

                if sender.blocking_send(event).is_err() {
                    break;
                }
            }
        })
    }

    async fn process_events(&self, mut receiver: mpsc::Receiver<FeedEvent>) -> anyhow::Result<()> {
        let mut actors = HashMap::<FeedScope, FeedActor>::new();

        while let Some(event) = receiver.recv().await {
            let fingerprint = fingerprint(&event);

            if self.delivered.contains_key(&fingerprint) {
                debug!("Skipping repeated delivery [{fingerprint}]");
                continue;
            }

            self.delivered.insert(fingerprint, ()).await;

            let scope = event.details.scope();
            let id = event.details.id.clone();

            let actor = actors.entry(scope.clone()).or_insert_with(|| {
                FeedActor::new(scope.clone(), self.storage.clone())
            });

            if !actor.accept(event) {
                error!("Feed actor for [{scope}] could not accept record [{id}]");
            }
        }

        for actor in actors.into_values() {
            let scope = actor.scope().clone();

            if let Err(error) = actor.despawn().await {
                error!("Feed actor for [{scope}] did not despawn gracefully: {error:?}");
            }
        }

        Ok(())
    }
}

fn build_cache(capacity: u64, timeout: Duration) -> Cache<String, ()> {
    Cache::builder()
        .max_capacity(capacity)
        .time_to_live(timeout)
        .build()
}

/// Same scope, key, id, origin, status and time means the same delivery.
pub(super) fn fingerprint(event: &FeedEvent) -> String {
    let details = &event.details;
    format!("{}|{}|{}|{:?}|{:?}|{}", details.scope(), details.primary_key(), details.id, event.origin, details.status, details.added_time)
}
