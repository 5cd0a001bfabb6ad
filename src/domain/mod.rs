//! Domain types for liquidity-provider portfolio valuation.
//!
//! This module provides:
//! - Exact numeric handling via the Decimal wrapper
//! - Validated Address primitive
//! - Pool, position and transaction entities
//! - Derived portfolio and daily-series documents

pub mod decimal;
pub mod pair;
pub mod portfolio;
pub mod primitives;
pub mod transaction;

pub use decimal::Decimal;
pub use pair::{Pair, Position, PositionSource, Token};
pub use portfolio::{DailyPricePoint, PairDaily, PairInfo, PairOverview, Portfolio, TokenPosition};
pub use primitives::{Address, AddressParseError};
pub use transaction::{Transaction, TransactionKind};
