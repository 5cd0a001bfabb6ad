//! Transaction normalizer: raw mint/burn records into typed,
//! time-ordered, pool-grouped histories.

use crate::datasource::{DataSourceError, RawLiquidityEvent, RawTransactionBatch};
use crate::domain::{Address, Decimal, Transaction, TransactionKind};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Per-pool transaction histories, keyed by lower-cased pool address.
/// Pools with no history are absent; look up with
/// [`transactions_for`] to substitute an empty list.
pub type TransactionMap = HashMap<String, Vec<Transaction>>;

/// Convert a raw mint/burn batch into pool-grouped, timestamp-ordered
/// transaction lists.
///
/// Mints are concatenated before burns, and the sort is stable, so two
/// records sharing a timestamp keep mint-before-burn order.
pub fn normalize(batch: &RawTransactionBatch) -> Result<TransactionMap, DataSourceError> {
    let mut transactions = Vec::with_capacity(batch.mints.len() + batch.burns.len());
    for raw in &batch.mints {
        transactions.push(convert(raw, TransactionKind::Mint)?);
    }
    for raw in &batch.burns {
        transactions.push(convert(raw, TransactionKind::Burn)?);
    }

    transactions.sort_by_key(|tx| tx.timestamp);

    let mut grouped: TransactionMap = HashMap::new();
    for tx in transactions {
        grouped
            .entry(tx.pair_address.to_query())
            .or_default()
            .push(tx);
    }
    Ok(grouped)
}

/// Look up a pool's history, treating a missing key as empty.
pub fn transactions_for(map: &TransactionMap, pair_address: &Address) -> Vec<Transaction> {
    map.get(&pair_address.to_query()).cloned().unwrap_or_default()
}

fn convert(
    raw: &RawLiquidityEvent,
    kind: TransactionKind,
) -> Result<Transaction, DataSourceError> {
    Ok(Transaction {
        kind,
        pair_address: Address::new(raw.pair.id.clone()),
        sender: Address::new(raw.sender.clone()),
        to: Address::new(raw.to.clone()),
        amount0: parse_decimal("amount0", &raw.amount0)?,
        amount1: parse_decimal("amount1", &raw.amount1)?,
        amount_usd: parse_decimal("amountUSD", &raw.amount_usd)?,
        liquidity: parse_decimal("liquidity", &raw.liquidity)?,
        block_number: raw
            .transaction
            .block_number
            .parse::<i64>()
            .map_err(|e| DataSourceError::Parse(format!("invalid blockNumber: {}", e)))?,
        timestamp: parse_timestamp(&raw.transaction.timestamp)?,
    })
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, DataSourceError> {
    Decimal::parse(value)
        .map_err(|e| DataSourceError::Parse(format!("invalid {}: {}", field, e)))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DataSourceError> {
    let secs = value
        .parse::<i64>()
        .map_err(|e| DataSourceError::Parse(format!("invalid timestamp: {}", e)))?;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| DataSourceError::Parse(format!("timestamp out of range: {}", secs)))
}
