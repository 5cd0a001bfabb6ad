//! Collaborator boundary: indexed (subgraph) reads and on-chain reads.
//!
//! The core consumes these traits only; GraphQL transport and RPC
//! detail live in the implementations.

use crate::domain::{Address, Decimal};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod chain;
pub mod mock;
pub mod raw;
pub mod subgraph;

pub use chain::EthersChainSource;
pub use mock::{MockChainSource, MockDataSource};
pub use raw::{
    RawLiquidityEvent, RawLiquidityPosition, RawPair, RawPairDayData, RawPairDayResponse,
    RawPairRef, RawToken, RawTokenDayData, RawTransactionBatch, RawTransactionRef,
};
pub use subgraph::SubgraphClient;

/// Indexed data source: pool, price and transaction records.
///
/// Methods return raw string-typed records; conversion into domain
/// types happens at the normalization boundary, not here.
/// Address arguments are lower-cased by implementations before lookup
/// (the upstream is case-sensitive and stores ids lower-cased).
#[async_trait]
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Current quote price of the network's base asset in the
    /// reporting currency (ETH/USD).
    async fn eth_price(&self) -> Result<Decimal, DataSourceError>;

    /// Pool shares held directly by an address. "No holder record"
    /// upstream maps to an empty list, never an error.
    async fn liquidity_positions(
        &self,
        address: &str,
    ) -> Result<Vec<RawLiquidityPosition>, DataSourceError>;

    /// Single-pool lookup by address.
    async fn pair(&self, pair_address: &str) -> Result<Option<RawPair>, DataSourceError>;

    /// Raw mint/burn records filtered to the given pools, where the
    /// address is the relevant counterparty (recipient for mints,
    /// sender for burns).
    async fn transactions(
        &self,
        address: &str,
        pair_addresses: &[String],
    ) -> Result<RawTransactionBatch, DataSourceError>;

    /// Last 31 token-day records, most recent first.
    async fn token_day_data(
        &self,
        token_address: &str,
    ) -> Result<Vec<RawTokenDayData>, DataSourceError>;

    /// Pair snapshot plus its last 31 pair-day records.
    async fn pair_day_data(
        &self,
        pair_address: &str,
    ) -> Result<RawPairDayResponse, DataSourceError>;

    /// First 10 pairs ordered by combined reserve value, descending.
    async fn top_pairs(&self) -> Result<Vec<RawPair>, DataSourceError>;
}

/// Blockchain read client for staking-contract balances.
#[async_trait]
pub trait ChainSource: Send + Sync + fmt::Debug {
    /// Balance of `owner` inside `staking_contract`, as a base-10
    /// integer string in the chain's smallest unit.
    async fn staked_balance(
        &self,
        staking_contract: &Address,
        owner: &Address,
    ) -> Result<String, DataSourceError>;
}

/// Error type for collaborator calls. All variants surface to callers
/// as the single "upstream service unavailable" condition.
#[derive(Debug, Clone, Error)]
pub enum DataSourceError {
    /// Connection-level failure (timeout, DNS, refused).
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the upstream service.
    #[error("http error {status}: {message}")]
    Http { status: u16, message: String },

    /// The GraphQL envelope carried an errors array.
    #[error("query error: {0}")]
    Query(String),

    /// Malformed response body or field value.
    #[error("parse error: {0}")]
    Parse(String),

    /// Upstream asked us to back off.
    #[error("rate limited")]
    RateLimited,
}
