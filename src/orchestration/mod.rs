//! Wiring of data sources, chain reads and the valuation engine into
//! the public operations.

pub mod service;
pub mod staking;

pub use service::PortfolioService;
pub use staking::StakingRegistry;
