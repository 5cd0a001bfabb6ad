//! Read-through caching for indexed data lookups.
//!
//! Subgraph reads are slow and the figures they feed change on the
//! order of minutes, so every query except transaction history sits
//! behind a TTL cache. Histories are append-only and cheap to re-fetch
//! alongside the rest of a portfolio build, so they go straight
//! through.

use crate::datasource::{
    DataSource, DataSourceError, RawLiquidityPosition, RawPair, RawPairDayResponse,
    RawTokenDayData, RawTransactionBatch,
};
use crate::domain::Decimal;
use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Bounded map of values that expire a fixed duration after insertion.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a live entry, dropping it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        if let Some((inserted, value)) = entries.get(key) {
            if inserted.elapsed() < self.ttl {
                return Some(value.clone());
            }
        }
        entries.remove(key);
        None
    }

    /// Store an entry, evicting expired entries first and then the
    /// oldest live one if the cache is still full.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().unwrap();
        let ttl = self.ttl;
        entries.retain(|_, (inserted, _)| inserted.elapsed() < ttl);
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, (inserted, _))| *inserted)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        entries.insert(key, (Instant::now(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decorator caching the results of an inner [`DataSource`].
#[derive(Debug)]
pub struct CachedDataSource<S> {
    inner: S,
    eth_price: TtlCache<(), Decimal>,
    positions: TtlCache<String, Vec<RawLiquidityPosition>>,
    pairs: TtlCache<String, Option<RawPair>>,
    token_days: TtlCache<String, Vec<RawTokenDayData>>,
    pair_days: TtlCache<String, RawPairDayResponse>,
    top: TtlCache<(), Vec<RawPair>>,
}

impl<S: DataSource> CachedDataSource<S> {
    pub fn new(inner: S, ttl: Duration, capacity: usize) -> Self {
        Self {
            inner,
            eth_price: TtlCache::new(ttl, capacity),
            positions: TtlCache::new(ttl, capacity),
            pairs: TtlCache::new(ttl, capacity),
            token_days: TtlCache::new(ttl, capacity),
            pair_days: TtlCache::new(ttl, capacity),
            top: TtlCache::new(ttl, capacity),
        }
    }
}

#[async_trait]
impl<S: DataSource> DataSource for CachedDataSource<S> {
    async fn eth_price(&self) -> Result<Decimal, DataSourceError> {
        if let Some(price) = self.eth_price.get(&()) {
            debug!("eth_price served from cache");
            return Ok(price);
        }
        let price = self.inner.eth_price().await?;
        self.eth_price.insert((), price);
        Ok(price)
    }

    async fn liquidity_positions(
        &self,
        address: &str,
    ) -> Result<Vec<RawLiquidityPosition>, DataSourceError> {
        let key = address.to_lowercase();
        if let Some(positions) = self.positions.get(&key) {
            debug!(address, "liquidity_positions served from cache");
            return Ok(positions);
        }
        let positions = self.inner.liquidity_positions(address).await?;
        self.positions.insert(key, positions.clone());
        Ok(positions)
    }

    async fn pair(&self, pair_address: &str) -> Result<Option<RawPair>, DataSourceError> {
        let key = pair_address.to_lowercase();
        if let Some(pair) = self.pairs.get(&key) {
            debug!(pair_address, "pair served from cache");
            return Ok(pair);
        }
        let pair = self.inner.pair(pair_address).await?;
        self.pairs.insert(key, pair.clone());
        Ok(pair)
    }

    async fn transactions(
        &self,
        address: &str,
        pair_addresses: &[String],
    ) -> Result<RawTransactionBatch, DataSourceError> {
        self.inner.transactions(address, pair_addresses).await
    }

    async fn token_day_data(
        &self,
        token_address: &str,
    ) -> Result<Vec<RawTokenDayData>, DataSourceError> {
        let key = token_address.to_lowercase();
        if let Some(days) = self.token_days.get(&key) {
            debug!(token_address, "token_day_data served from cache");
            return Ok(days);
        }
        let days = self.inner.token_day_data(token_address).await?;
        self.token_days.insert(key, days.clone());
        Ok(days)
    }

    async fn pair_day_data(
        &self,
        pair_address: &str,
    ) -> Result<RawPairDayResponse, DataSourceError> {
        let key = pair_address.to_lowercase();
        if let Some(response) = self.pair_days.get(&key) {
            debug!(pair_address, "pair_day_data served from cache");
            return Ok(response);
        }
        let response = self.inner.pair_day_data(pair_address).await?;
        self.pair_days.insert(key, response.clone());
        Ok(response)
    }

    async fn top_pairs(&self) -> Result<Vec<RawPair>, DataSourceError> {
        if let Some(pairs) = self.top.get(&()) {
            debug!("top_pairs served from cache");
            return Ok(pairs);
        }
        let pairs = self.inner.top_pairs().await?;
        self.top.insert((), pairs.clone());
        Ok(pairs)
    }
}
