pub mod cache;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use cache::CachedDataSource;
pub use config::Config;
pub use datasource::{
    ChainSource, DataSource, DataSourceError, EthersChainSource, MockChainSource, MockDataSource,
    SubgraphClient,
};
pub use domain::{
    Address, DailyPricePoint, Decimal, Pair, PairDaily, PairInfo, PairOverview, Portfolio,
    Position, PositionSource, Token, TokenPosition, Transaction, TransactionKind,
};
pub use error::{MathError, PortfolioError};
pub use orchestration::{PortfolioService, StakingRegistry};
