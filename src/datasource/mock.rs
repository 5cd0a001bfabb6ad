//! Mock collaborators for testing without network calls.

use super::{
    ChainSource, DataSource, DataSourceError, RawLiquidityPosition, RawPair, RawPairDayResponse,
    RawTokenDayData, RawTransactionBatch,
};
use crate::domain::{Address, Decimal};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock indexed data source returning predefined records.
///
/// Records every call so tests can assert what the aggregator asked
/// for (and that it asked nothing at all on invalid input).
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    eth_price: Decimal,
    positions: HashMap<String, Vec<RawLiquidityPosition>>,
    pairs: HashMap<String, RawPair>,
    batch: RawTransactionBatch,
    token_days: Vec<RawTokenDayData>,
    pair_days: Option<RawPairDayResponse>,
    top: Vec<RawPair>,
    calls: Arc<Mutex<Vec<String>>>,
    transaction_calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eth_price(mut self, price: Decimal) -> Self {
        self.eth_price = price;
        self
    }

    /// Register the direct positions returned for an owner address.
    pub fn with_positions(mut self, owner: &str, positions: Vec<RawLiquidityPosition>) -> Self {
        self.positions.insert(owner.to_lowercase(), positions);
        self
    }

    /// Register a pair record, looked up by its id.
    pub fn with_pair(mut self, pair: RawPair) -> Self {
        self.pairs.insert(pair.id.to_lowercase(), pair);
        self
    }

    pub fn with_transactions(mut self, batch: RawTransactionBatch) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_token_day_data(mut self, days: Vec<RawTokenDayData>) -> Self {
        self.token_days = days;
        self
    }

    pub fn with_pair_day_data(mut self, response: RawPairDayResponse) -> Self {
        self.pair_days = Some(response);
        self
    }

    pub fn with_top_pairs(mut self, pairs: Vec<RawPair>) -> Self {
        self.top = pairs;
        self
    }

    /// Names of every method invoked so far, in call order.
    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments of every `transactions` call so far.
    pub fn recorded_transaction_calls(&self) -> Vec<(String, Vec<String>)> {
        self.transaction_calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn eth_price(&self) -> Result<Decimal, DataSourceError> {
        self.record("eth_price");
        Ok(self.eth_price)
    }

    async fn liquidity_positions(
        &self,
        address: &str,
    ) -> Result<Vec<RawLiquidityPosition>, DataSourceError> {
        self.record("liquidity_positions");
        Ok(self
            .positions
            .get(&address.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    async fn pair(&self, pair_address: &str) -> Result<Option<RawPair>, DataSourceError> {
        self.record("pair");
        Ok(self.pairs.get(&pair_address.to_lowercase()).cloned())
    }

    async fn transactions(
        &self,
        address: &str,
        pair_addresses: &[String],
    ) -> Result<RawTransactionBatch, DataSourceError> {
        self.record("transactions");
        self.transaction_calls
            .lock()
            .unwrap()
            .push((address.to_string(), pair_addresses.to_vec()));
        Ok(self.batch.clone())
    }

    async fn token_day_data(
        &self,
        _token_address: &str,
    ) -> Result<Vec<RawTokenDayData>, DataSourceError> {
        self.record("token_day_data");
        Ok(self.token_days.clone())
    }

    async fn pair_day_data(
        &self,
        _pair_address: &str,
    ) -> Result<RawPairDayResponse, DataSourceError> {
        self.record("pair_day_data");
        self.pair_days
            .clone()
            .ok_or_else(|| DataSourceError::Parse("no pair day data configured".to_string()))
    }

    async fn top_pairs(&self) -> Result<Vec<RawPair>, DataSourceError> {
        self.record("top_pairs");
        Ok(self.top.clone())
    }
}

/// Mock chain read client with per-(contract, owner) balances.
/// Unknown combinations read as zero, like an empty staking contract.
#[derive(Debug, Clone, Default)]
pub struct MockChainSource {
    balances: HashMap<(String, String), String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChainSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wei balance returned for an owner in a staking contract.
    pub fn with_balance(mut self, staking_contract: &str, owner: &str, wei: &str) -> Self {
        self.balances.insert(
            (staking_contract.to_lowercase(), owner.to_lowercase()),
            wei.to_string(),
        );
        self
    }

    /// (staking contract, owner) pairs read so far, in call order.
    pub fn recorded_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainSource for MockChainSource {
    async fn staked_balance(
        &self,
        staking_contract: &Address,
        owner: &Address,
    ) -> Result<String, DataSourceError> {
        let key = (staking_contract.to_query(), owner.to_query());
        self.calls.lock().unwrap().push(key.clone());
        Ok(self.balances.get(&key).cloned().unwrap_or_else(|| "0".to_string()))
    }
}
