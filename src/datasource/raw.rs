//! Raw subgraph record shapes.
//!
//! Numeric fields arrive as strings and stay strings here; typed
//! conversion happens at the normalization boundary so that field
//! presence is validated in one place.

use super::DataSourceError;
use crate::domain::{Address, Decimal, Pair, Token};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "derivedETH")]
    pub derived_eth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPair {
    pub id: String,
    pub token0: RawToken,
    pub token1: RawToken,
    pub reserve0: String,
    pub reserve1: String,
    #[serde(rename = "totalSupply")]
    pub total_supply: String,
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: String,
    #[serde(rename = "token0Price")]
    pub token0_price: String,
    #[serde(rename = "token1Price")]
    pub token1_price: String,
}

/// One direct liquidity position as returned by the user query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLiquidityPosition {
    #[serde(rename = "liquidityTokenBalance")]
    pub liquidity_token_balance: String,
    pub pair: RawPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPairRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransactionRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "blockNumber")]
    pub block_number: String,
    pub timestamp: String,
}

/// One raw mint or burn record; whether it is a mint or a burn is
/// carried by which batch list it sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLiquidityEvent {
    pub to: String,
    pub sender: String,
    pub liquidity: String,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD")]
    pub amount_usd: String,
    pub pair: RawPairRef,
    pub transaction: RawTransactionRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawTransactionBatch {
    pub mints: Vec<RawLiquidityEvent>,
    pub burns: Vec<RawLiquidityEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTokenDayData {
    pub date: i64,
    #[serde(rename = "priceUSD")]
    pub price_usd: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPairDayData {
    pub date: i64,
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: String,
    #[serde(rename = "totalSupply")]
    pub total_supply: String,
}

/// Combined pair-daily query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPairDayResponse {
    pub pair: Option<RawPair>,
    #[serde(rename = "pairDayDatas")]
    pub day_data: Vec<RawPairDayData>,
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, DataSourceError> {
    Decimal::parse(value)
        .map_err(|e| DataSourceError::Parse(format!("invalid {}: {}", field, e)))
}

impl TryFrom<RawToken> for Token {
    type Error = DataSourceError;

    fn try_from(raw: RawToken) -> Result<Self, Self::Error> {
        Ok(Token {
            derived_eth: parse_decimal("derivedETH", &raw.derived_eth)?,
            address: Address::new(raw.id),
            symbol: raw.symbol,
            name: raw.name,
        })
    }
}

impl TryFrom<RawPair> for Pair {
    type Error = DataSourceError;

    fn try_from(raw: RawPair) -> Result<Self, Self::Error> {
        Ok(Pair {
            reserve0: parse_decimal("reserve0", &raw.reserve0)?,
            reserve1: parse_decimal("reserve1", &raw.reserve1)?,
            total_supply: parse_decimal("totalSupply", &raw.total_supply)?,
            reserve_usd: parse_decimal("reserveUSD", &raw.reserve_usd)?,
            token0_price: parse_decimal("token0Price", &raw.token0_price)?,
            token1_price: parse_decimal("token1Price", &raw.token1_price)?,
            address: Address::new(raw.id),
            token0: Token::try_from(raw.token0)?,
            token1: Token::try_from(raw.token1)?,
            staking_contract_address: None,
        })
    }
}
