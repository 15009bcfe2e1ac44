use crate::models::errors::FeedError;
use crate::models::{Origin, TransactionDetails};
use crate::types::{Address, Chain, Nonce};
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// Natural key used to match a provider record with a local placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExternalKey {
    /// Nonces are per sender, so the sender is part of the key.
    Nonce(Chain, Address, Nonce),
    Hash(Chain, String),
    Id(Chain, String)
}

impl Display for ExternalKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExternalKey::Nonce(chain, from, nonce) => write!(formatter, "{chain}:{from}:nonce:{nonce}"),
            ExternalKey::Hash(chain, hash) => write!(formatter, "{chain}:hash:{hash}"),
            ExternalKey::Id(chain, id) => write!(formatter, "{chain}:id:{id}")
        }
    }
}

/// The activity list of one wallet on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedScope {
    pub owner: Address,
    pub chain: Chain
}

impl FeedScope {
    pub fn new(owner: Address, chain: Chain) -> Self {
        Self { owner, chain }
    }
}

impl Display for FeedScope {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}@{}", self.owner, self.chain)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    origin: Origin,
    details: TransactionDetails,
    /// Keys of every record merged into this entry, so late deliveries of any of them still match.
    keys: Vec<ExternalKey>
}

impl Entry {
    /// Whether `details` arriving from `origin` may take this entry's place.
    fn admits(&self, origin: Origin, details: &TransactionDetails) -> bool {
        if origin == Origin::Remote && self.origin == Origin::Local {
            return !self.details.status.is_final() || details.status.is_final();
        }

        details.status.may_replace(self.details.status)
    }
}

/// Merged view of local pending transactions and provider records.
///
/// Each external key maps to a single entry. Provider records replace the local
/// placeholder sharing their key, and a final status never regresses. A record
/// whose keys span several entries (a local placeholder known by nonce, an
/// order known by hash) merges them into one.
#[derive(Debug, Clone, Default)]
pub struct ActivityFeed {
    entries: Vec<Entry>,
    index: HashMap<ExternalKey, usize>
}

impl ActivityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one record into the feed.
    ///
    /// # Errors
    /// Returns `FeedError` when the record is ignored:
    /// - it would move a final status back to a non-final one.
    /// - it is identical to the record already shown.
    /// - it is a local record that adds nothing over a provider record.
    pub fn apply(&mut self, origin: Origin, details: TransactionDetails) -> Result<(), FeedError> {
        let keys = details.keys();

        let mut slots: Vec<usize> = keys.iter().filter_map(|key| self.index.get(key).copied()).collect();
        slots.sort_unstable();
        slots.dedup();

        if slots.is_empty() {
            self.insert(origin, details, keys);
            return Ok(());
        }

        for &slot in &slots {
            let existing = &self.entries[slot];

            if existing.details == details {
                return Err(FeedError::duplicate_record(&details));
            }

            if !existing.admits(origin, &details) {
                return Err(FeedError::stale_status(&existing.details, &details));
            }

            if origin == Origin::Local && existing.origin == Origin::Remote && details.status == existing.details.status {
                return Err(FeedError::remote_already_present(&details));
            }
        }

        self.merge(&slots, origin, details, keys);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records newest first.
    pub fn records(&self) -> Vec<TransactionDetails> {
        let mut records: Vec<_> = self.entries.iter().map(|entry| entry.details.clone()).collect();
        records.sort_by(|a, b| b.added_time.cmp(&a.added_time).then_with(|| a.id.cmp(&b.id)));
        records
    }

    /// Local placeholders no provider record has matched yet.
    pub fn pending_local(&self) -> impl Iterator<Item = &TransactionDetails> {
        self.entries.iter()
            .filter(|entry| entry.origin == Origin::Local)
            .map(|entry| &entry.details)
    }

    /// Unmatched local placeholders that still carry the request needed to send them again.
    pub fn resubmittable(&self) -> impl Iterator<Item = &TransactionDetails> {
        self.pending_local().filter(|details| details.is_resubmittable())
    }

    fn insert(&mut self, origin: Origin, details: TransactionDetails, keys: Vec<ExternalKey>) {
        let slot = self.entries.len();

        for key in &keys {
            self.index.insert(key.clone(), slot);
        }

        self.entries.push(Entry { origin, details, keys });
    }

    /// Folds every entry in `slots` into the first one and replaces its record with `details`.
    fn merge(&mut self, slots: &[usize], origin: Origin, mut details: TransactionDetails, mut keys: Vec<ExternalKey>) {
        let Some((&target, absorbed)) = slots.split_first() else {
            return;
        };

        let mut added_time = details.added_time.max(self.entries[target].details.added_time);
        keys.append(&mut self.entries[target].keys);

        for &slot in absorbed.iter().rev() {
            let mut entry = self.entries.remove(slot);
            added_time = added_time.max(entry.details.added_time);
            keys.append(&mut entry.keys);
        }

        keys.sort();
        keys.dedup();

        details.added_time = added_time;
        self.entries[target] = Entry { origin, details, keys };

        if absorbed.is_empty() {
            for key in &self.entries[target].keys {
                self.index.insert(key.clone(), target);
            }
        } else {
            self.reindex();
        }
    }

    fn reindex(&mut self) {
        self.index.clear();

        for (slot, entry) in self.entries.iter().enumerate() {
            for key in &entry.keys {
                self.index.insert(key.clone(), slot);
            }
        }
    }
}

/// Merges provider records for one wallet with the transactions this client
/// submitted itself and returns the deduplicated list, newest first.
pub fn reconcile(local: Vec<TransactionDetails>, remote: Vec<TransactionDetails>) -> Vec<TransactionDetails> {
    let mut feed = ActivityFeed::new();

    for (origin, details) in local.into_iter().map(|details| (Origin::Local, details))
        .chain(remote.into_iter().map(|details| (Origin::Remote, details)))
    {
        if let Err(error) = feed.apply(origin, details) {
            debug!("{error}");
        }
    }

    feed.records()
}
