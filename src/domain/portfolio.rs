//! Derived portfolio documents: PairInfo, Portfolio and the daily
//! price-series types.
//!
//! Everything here is recomputed per query and never persisted.

use crate::domain::{Address, Decimal, Token, Transaction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The holder's proportional claim on one of a pair's two tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPosition {
    pub symbol: String,
    pub price_usd: Decimal,
    pub balance: Decimal,
    pub balance_usd: Decimal,
}

/// Fully-derived economics for one portfolio line item.
///
/// All pool-derived fields are `None` when the indexer had no record
/// of the pool; `balance_usd` degrades to zero in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairInfo {
    pub contract_address: Option<Address>,
    pub staking_contract_address: Option<Address>,
    pub owner_balance: Decimal,
    pub symbol: Option<String>,
    pub total_supply: Option<Decimal>,
    pub price_usd: Option<Decimal>,
    /// Ownership share of the pool, as a percentage.
    pub share: Option<Decimal>,
    pub balance_usd: Decimal,
    pub tokens: Vec<TokenPosition>,
    pub transactions: Vec<Transaction>,
}

/// A liquidity provider's full portfolio, one line item per position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub address: Address,
    pub balance_usd: Decimal,
    pub pairs: Vec<PairInfo>,
}

/// One day-granular price observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPricePoint {
    pub date: DateTime<Utc>,
    pub price_usd: Decimal,
}

/// Pair snapshot enriched with its derived pool-token price, as served
/// by the pair-daily and top-pairs queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairOverview {
    pub address: Address,
    pub symbol: String,
    pub token0: Token,
    pub token1: Token,
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    pub total_supply: Decimal,
    pub reserve_usd: Decimal,
    /// reserve_usd / total_supply.
    pub price_usd: Decimal,
    pub token0_price: Decimal,
    pub token1_price: Decimal,
}

/// Pair-daily query result: current snapshot plus the price series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDaily {
    pub pair: Option<PairOverview>,
    pub date_price: Vec<DailyPricePoint>,
}
