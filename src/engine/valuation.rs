//! Pair valuation: a holder's proportional claim on a pool.

use crate::domain::{Decimal, Pair, PairInfo, TokenPosition};
use crate::error::MathError;

/// Compute the derived economics of one position.
///
/// A missing pair yields a degenerate PairInfo (all derived fields
/// null, zero value) rather than an error: the position exists even
/// when the indexer has no pool record for it.
///
/// A pair with zero total supply is an upstream inconsistency on a
/// live position; the division error propagates instead of silently
/// valuing the position at zero.
pub fn valuate(
    pair: Option<&Pair>,
    owner_balance: Decimal,
    eth_price: Decimal,
) -> Result<PairInfo, MathError> {
    let Some(pair) = pair else {
        return Ok(PairInfo {
            contract_address: None,
            staking_contract_address: None,
            owner_balance,
            symbol: None,
            total_supply: None,
            price_usd: None,
            share: None,
            balance_usd: Decimal::zero(),
            tokens: Vec::new(),
            transactions: Vec::new(),
        });
    };

    let share = Decimal::hundred()
        * owner_balance
            .checked_div(pair.total_supply)
            .ok_or(MathError::DivisionByZero)?;
    let price_usd = pair
        .reserve_usd
        .checked_div(pair.total_supply)
        .ok_or(MathError::DivisionByZero)?;

    let mut tokens = Vec::with_capacity(2);
    for i in 0..2 {
        let token = pair.token(i);
        let token_price = token.derived_eth * eth_price;
        let balance = pair.reserve(i) * share * Decimal::one_hundredth();
        tokens.push(TokenPosition {
            symbol: token.symbol.clone(),
            price_usd: token_price,
            balance,
            balance_usd: balance * token_price,
        });
    }
    let balance_usd = tokens
        .iter()
        .fold(Decimal::zero(), |acc, t| acc + t.balance_usd);

    Ok(PairInfo {
        contract_address: Some(pair.address.clone()),
        staking_contract_address: pair.staking_contract_address.clone(),
        owner_balance,
        symbol: Some(pair.symbol()),
        total_supply: Some(pair.total_supply),
        price_usd: Some(price_usd),
        share: Some(share),
        balance_usd,
        tokens,
        transactions: Vec::new(),
    })
}
