//! Typed mint/burn transaction records.

use crate::domain::{Address, Decimal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liquidity-provision (mint) or liquidity-withdrawal (burn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Mint,
    Burn,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Mint => write!(f, "mint"),
            TransactionKind::Burn => write!(f, "burn"),
        }
    }
}

/// One historical mint or burn against a pool, fully typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub pair_address: Address,
    pub sender: Address,
    pub to: Address,
    pub amount0: Decimal,
    pub amount1: Decimal,
    pub amount_usd: Decimal,
    pub liquidity: Decimal,
    pub block_number: i64,
    pub timestamp: DateTime<Utc>,
}
