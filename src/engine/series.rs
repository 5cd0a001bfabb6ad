//! Time-series normalizer: raw daily snapshots into typed date→price
//! series, plus the shared pair-snapshot enrichment.

use crate::datasource::{DataSourceError, RawPairDayData, RawTokenDayData};
use crate::domain::{DailyPricePoint, Decimal, Pair, PairOverview};
use crate::error::MathError;
use chrono::{DateTime, Utc};

/// Convert raw token-day records. Source order (typically descending
/// by date) is preserved.
pub fn normalize_token_daily(
    raw: &[RawTokenDayData],
) -> Result<Vec<DailyPricePoint>, DataSourceError> {
    raw.iter()
        .map(|day| {
            Ok(DailyPricePoint {
                date: day_timestamp(day.date)?,
                price_usd: parse_decimal("priceUSD", &day.price_usd)?,
            })
        })
        .collect()
}

/// Convert raw pair-day records, deriving the pool-token price.
///
/// A day with zero total supply (whether or not reserveUSD is also
/// zero) yields a zero price instead of an error: this is read-only
/// historical reporting, and masking a degenerate point beats failing
/// the whole series. Live valuation keeps the opposite policy.
pub fn normalize_pair_daily(
    raw: &[RawPairDayData],
) -> Result<Vec<DailyPricePoint>, DataSourceError> {
    raw.iter()
        .map(|day| {
            let reserve_usd = parse_decimal("reserveUSD", &day.reserve_usd)?;
            let total_supply = parse_decimal("totalSupply", &day.total_supply)?;
            let price_usd = reserve_usd
                .checked_div(total_supply)
                .unwrap_or_else(Decimal::zero);
            Ok(DailyPricePoint {
                date: day_timestamp(day.date)?,
                price_usd,
            })
        })
        .collect()
}

/// Enrich a pair snapshot with its derived pool-token price. Used by
/// the pair-daily and top-pairs queries; a zero supply here is a live
/// snapshot inconsistency and propagates.
pub fn enrich_pair(pair: Pair) -> Result<PairOverview, MathError> {
    let price_usd = pair
        .reserve_usd
        .checked_div(pair.total_supply)
        .ok_or(MathError::DivisionByZero)?;
    Ok(PairOverview {
        symbol: pair.symbol(),
        address: pair.address,
        token0: pair.token0,
        token1: pair.token1,
        reserve0: pair.reserve0,
        reserve1: pair.reserve1,
        total_supply: pair.total_supply,
        reserve_usd: pair.reserve_usd,
        price_usd,
        token0_price: pair.token0_price,
        token1_price: pair.token1_price,
    })
}

fn day_timestamp(secs: i64) -> Result<DateTime<Utc>, DataSourceError> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| DataSourceError::Parse(format!("date out of range: {}", secs)))
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, DataSourceError> {
    Decimal::parse(value)
        .map_err(|e| DataSourceError::Parse(format!("invalid {}: {}", field, e)))
}
