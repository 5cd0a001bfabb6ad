//! Portfolio aggregation over the collaborator traits.

use crate::datasource::{ChainSource, DataSource};
use crate::domain::{
    Address, DailyPricePoint, Decimal, Pair, PairDaily, PairOverview, Portfolio, Position,
    PositionSource,
};
use crate::engine::{series, transactions, valuation};
use crate::error::PortfolioError;
use crate::orchestration::staking::{self, StakingRegistry};
use std::sync::Arc;

/// Read-only valuation facade. All public operations take an address
/// string, validate it, and fan out to the indexed and on-chain
/// collaborators.
#[derive(Debug, Clone)]
pub struct PortfolioService {
    data: Arc<dyn DataSource>,
    chain: Arc<dyn ChainSource>,
    registry: StakingRegistry,
}

impl PortfolioService {
    pub fn new(data: Arc<dyn DataSource>, chain: Arc<dyn ChainSource>) -> Self {
        Self::with_registry(data, chain, StakingRegistry::mainnet())
    }

    pub fn with_registry(
        data: Arc<dyn DataSource>,
        chain: Arc<dyn ChainSource>,
        registry: StakingRegistry,
    ) -> Self {
        Self {
            data,
            chain,
            registry,
        }
    }

    /// Value every pool position an address holds, directly or staked,
    /// with its mint/burn history attached.
    pub async fn build_portfolio(&self, address: &str) -> Result<Portfolio, PortfolioError> {
        let owner = Address::parse(address)?;

        let (eth_price, raw_positions, staked) = tokio::try_join!(
            async { self.data.eth_price().await.map_err(PortfolioError::from) },
            async {
                self.data
                    .liquidity_positions(&owner.to_query())
                    .await
                    .map_err(PortfolioError::from)
            },
            staking::staked_positions(
                self.data.as_ref(),
                self.chain.as_ref(),
                &self.registry,
                &owner,
            ),
        )?;

        let mut positions = Vec::with_capacity(raw_positions.len() + staked.len());
        for raw in raw_positions {
            let balance =
                Decimal::parse(&raw.liquidity_token_balance).map_err(|e| {
                    PortfolioError::Upstream(crate::datasource::DataSourceError::Parse(format!(
                        "invalid liquidityTokenBalance: {}",
                        e
                    )))
                })?;
            positions.push(Position {
                pair: Some(Pair::try_from(raw.pair)?),
                balance,
                source: PositionSource::Direct,
            });
        }
        positions.extend(staked);

        // One history query covers every pool in the portfolio.
        let pair_addresses: Vec<String> = positions
            .iter()
            .filter_map(|p| p.pair.as_ref())
            .map(|pair| pair.address.to_query())
            .collect();
        let batch = self
            .data
            .transactions(&owner.to_query(), &pair_addresses)
            .await?;
        let history = transactions::normalize(&batch)?;

        let mut pairs = Vec::with_capacity(positions.len());
        for position in &positions {
            let mut info = valuation::valuate(position.pair.as_ref(), position.balance, eth_price)?;
            if let Some(contract) = &info.contract_address {
                info.transactions = transactions::transactions_for(&history, contract);
            }
            pairs.push(info);
        }
        let balance_usd = pairs
            .iter()
            .fold(Decimal::zero(), |acc, p| acc + p.balance_usd);

        Ok(Portfolio {
            address: owner,
            balance_usd,
            pairs,
        })
    }

    /// Daily price series for a token, most recent day first.
    pub async fn token_daily(
        &self,
        token_address: &str,
    ) -> Result<Vec<DailyPricePoint>, PortfolioError> {
        let token = Address::parse(token_address)?;
        let raw = self.data.token_day_data(&token.to_query()).await?;
        Ok(series::normalize_token_daily(&raw)?)
    }

    /// Pair snapshot plus its daily pool-token price series.
    pub async fn pair_daily(&self, pair_address: &str) -> Result<PairDaily, PortfolioError> {
        let address = Address::parse(pair_address)?;
        let response = self.data.pair_day_data(&address.to_query()).await?;
        let pair = match response.pair {
            Some(raw) => Some(series::enrich_pair(Pair::try_from(raw)?)?),
            None => None,
        };
        let date_price = series::normalize_pair_daily(&response.day_data)?;
        Ok(PairDaily { pair, date_price })
    }

    /// The largest pools by combined reserve value.
    pub async fn top_pairs(&self) -> Result<Vec<PairOverview>, PortfolioError> {
        let raw = self.data.top_pairs().await?;
        raw.into_iter()
            .map(|r| Ok(series::enrich_pair(Pair::try_from(r)?)?))
            .collect()
    }
}
