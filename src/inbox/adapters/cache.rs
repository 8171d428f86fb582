//! Time-bounded caching of per-user message fetches.
//!
//! [`TtlCache`] is a bounded key to (value, inserted-at) store whose notion of
//! "now" comes from an injected [`Clock`]. [`CachingMessageRepository`] puts
//! one in front of any [`MessageRepository`] so repeated inbox renders within
//! the freshness window skip the backing store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

use crate::inbox::{
    config::InboxConfig,
    domain::{Message, MessageId, UserId},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

/// Bounded cache whose entries go stale `ttl` after insertion.
///
/// Stale entries are treated as misses and dropped on access. Inserting into
/// a full cache first purges stale entries, then evicts the oldest one.
///
/// Every [`invalidate`](Self::invalidate) or [`clear`](Self::clear) advances
/// an epoch. A reader that loads a value outside the lock records the epoch
/// first and stores through [`insert_if_current`](Self::insert_if_current),
/// so a value read before a concurrent write is never cached.
///
/// # Examples
///
/// ```
/// use rental_inbox::inbox::adapters::cache::TtlCache;
/// use mockable::DefaultClock;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let mut cache = TtlCache::new(Duration::from_secs(60), 2, Arc::new(DefaultClock));
/// cache.insert("alice", 1);
/// assert_eq!(cache.get(&"alice"), Some(1));
/// assert_eq!(cache.get(&"bob"), None);
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V, C> {
    ttl: Duration,
    capacity: usize,
    clock: Arc<C>,
    entries: HashMap<K, CacheEntry<V>>,
    epoch: u64,
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates an empty cache.
    ///
    /// A `capacity` of zero is raised to one.
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize, clock: Arc<C>) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            clock,
            entries: HashMap::new(),
            epoch: 0,
        }
    }

    /// Returns a fresh copy of the cached value, or `None` on miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.utc();
        let stale = self
            .entries
            .get(key)
            .map(|entry| is_stale(self.ttl, entry.inserted_at, now))?;
        if stale {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Inserts or replaces a value, evicting if the cache is full.
    pub fn insert(&mut self, key: K, value: V) {
        let now = self.clock.utc();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.purge_stale(now);
            if self.entries.len() >= self.capacity {
                self.evict_oldest();
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Inserts `value` only if no invalidation happened since `epoch` was read.
    ///
    /// Returns `false`, leaving the cache untouched, when the epoch has moved.
    pub fn insert_if_current(&mut self, key: K, value: V, epoch: u64) -> bool {
        if self.epoch != epoch {
            return false;
        }
        self.insert(key, value);
        true
    }

    /// Returns the current invalidation epoch.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Drops the entry for `key`, if present.
    pub fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Returns the number of stored entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_stale(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| !is_stale(ttl, entry.inserted_at, now));
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

fn is_stale(ttl: Duration, inserted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    // A clock that moved backwards yields a negative age; keep the entry.
    now.signed_duration_since(inserted_at)
        .to_std()
        .is_ok_and(|age| age >= ttl)
}

/// [`MessageRepository`] decorator caching `find_for_participant` per user.
///
/// Writes through the decorator invalidate the cached fetches of both
/// participants. A fetch that overlaps such a write is returned but not
/// cached. Writes that bypass the decorator are only observed once the entry
/// goes stale.
pub struct CachingMessageRepository<R, C> {
    inner: R,
    cache: Mutex<TtlCache<UserId, Vec<Message>, C>>,
}

impl<R, C> CachingMessageRepository<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    /// Wraps `inner` with a cache of the given freshness and size.
    #[must_use]
    pub fn new(inner: R, clock: Arc<C>, ttl: Duration, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(TtlCache::new(ttl, capacity, clock)),
        }
    }

    /// Wraps `inner` using the cache settings of `config`.
    #[must_use]
    pub fn from_config(inner: R, clock: Arc<C>, config: &InboxConfig) -> Self {
        Self::new(inner, clock, config.cache_ttl(), config.cache_capacity)
    }

    /// Returns the wrapped repository.
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.inner
    }

    fn with_cache<T>(
        &self,
        f: impl FnOnce(&mut TtlCache<UserId, Vec<Message>, C>) -> T,
    ) -> MessageRepositoryResult<T> {
        let mut guard = self.cache.lock().map_err(|err| {
            MessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(f(&mut *guard))
    }

    fn invalidate_pair(&self, first: &UserId, second: &UserId) -> MessageRepositoryResult<()> {
        self.with_cache(|cache| {
            cache.invalidate(first);
            cache.invalidate(second);
        })
    }
}

#[async_trait]
impl<R, C> MessageRepository for CachingMessageRepository<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()> {
        self.inner.store(message).await?;
        self.invalidate_pair(message.sender_id(), message.recipient_id())
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        self.inner.find_by_id(id).await
    }

    async fn find_for_participant(
        &self,
        user_id: &UserId,
    ) -> MessageRepositoryResult<Vec<Message>> {
        let (cached, epoch) = self.with_cache(|cache| (cache.get(user_id), cache.epoch()))?;
        if let Some(hit) = cached {
            debug!(user_id = %user_id, "message cache hit");
            return Ok(hit);
        }

        debug!(user_id = %user_id, "message cache miss");
        let messages = self.inner.find_for_participant(user_id).await?;
        let stored = messages.clone();
        let cached_now =
            self.with_cache(|cache| cache.insert_if_current(user_id.clone(), stored, epoch))?;
        if !cached_now {
            debug!(user_id = %user_id, "write during fetch; result not cached");
        }
        Ok(messages)
    }

    async fn mark_read(
        &self,
        recipient_id: &UserId,
        sender_id: &UserId,
    ) -> MessageRepositoryResult<usize> {
        let transitioned = self.inner.mark_read(recipient_id, sender_id).await?;
        if transitioned > 0 {
            self.invalidate_pair(recipient_id, sender_id)?;
        }
        Ok(transitioned)
    }

    async fn count_unread(&self, user_id: &UserId) -> MessageRepositoryResult<usize> {
        self.inner.count_unread(user_id).await
    }
}
