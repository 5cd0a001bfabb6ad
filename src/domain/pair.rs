//! Pool (pair) snapshot types and position sources.

use crate::domain::{Address, Decimal};
use serde::{Deserialize, Serialize};

/// Immutable token snapshot as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    /// Token price denominated in the network's base asset (ETH).
    pub derived_eth: Decimal,
}

/// A two-token liquidity pool snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    pub total_supply: Decimal,
    /// Combined reserve value in the reporting currency.
    pub reserve_usd: Decimal,
    pub token0_price: Decimal,
    pub token1_price: Decimal,
    /// Set on pairs reached through the staking registry, absent on
    /// directly-held pairs.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub staking_contract_address: Option<Address>,
}

impl Pair {
    pub fn token(&self, index: usize) -> &Token {
        match index {
            0 => &self.token0,
            1 => &self.token1,
            _ => panic!("pair token index out of range: {}", index),
        }
    }

    pub fn reserve(&self, index: usize) -> Decimal {
        match index {
            0 => self.reserve0,
            1 => self.reserve1,
            _ => panic!("pair reserve index out of range: {}", index),
        }
    }

    /// Combined symbol, e.g. "DAI-WETH".
    pub fn symbol(&self) -> String {
        format!("{}-{}", self.token0.symbol, self.token1.symbol)
    }
}

/// How a pool share is held by the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSource {
    Direct,
    Staked,
}

/// A holder's stake in one pool, in pool-share units.
///
/// The same pool may appear twice for one owner (held directly and
/// staked); the two are kept as separate positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The pool record, when the indexer knows it. A missing pool still
    /// produces a (degenerate) portfolio line item.
    pub pair: Option<Pair>,
    pub balance: Decimal,
    pub source: PositionSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str) -> Token {
        Token {
            address: Address::new("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            derived_eth: Decimal::parse("1").unwrap(),
        }
    }

    #[test]
    fn test_pair_symbol_joins_token_symbols() {
        let pair = Pair {
            address: Address::new("0xa478c2975ab1ea89e8196811f51a7b7ade33eb11"),
            token0: token("DAI"),
            token1: token("WETH"),
            reserve0: Decimal::zero(),
            reserve1: Decimal::zero(),
            total_supply: Decimal::zero(),
            reserve_usd: Decimal::zero(),
            token0_price: Decimal::zero(),
            token1_price: Decimal::zero(),
            staking_contract_address: None,
        };
        assert_eq!(pair.symbol(), "DAI-WETH");
    }

    #[test]
    fn test_position_source_serialization() {
        assert_eq!(
            serde_json::to_string(&PositionSource::Direct).unwrap(),
            "\"direct\""
        );
        assert_eq!(
            serde_json::to_string(&PositionSource::Staked).unwrap(),
            "\"staked\""
        );
    }
}
