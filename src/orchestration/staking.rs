//! Staked liquidity discovery through the Uniswap V2 staking rewards
//! contracts.

use crate::datasource::{ChainSource, DataSource, DataSourceError};
use crate::domain::{Address, Decimal, Pair, Position, PositionSource};
use crate::error::PortfolioError;
use tracing::{debug, warn};

/// Known (staking contract, staked pool) pairs.
#[derive(Debug, Clone)]
pub struct StakingRegistry {
    entries: Vec<(Address, Address)>,
}

impl StakingRegistry {
    /// The four mainnet staking rewards deployments: DAI-ETH, USDC-ETH,
    /// USDT-ETH and WBTC-ETH.
    pub fn mainnet() -> Self {
        Self::new(vec![
            (
                Address::new("0xa1484C3aa22a66C62b77E0AE78E15258bd0cB711"),
                Address::new("0xA478c2975Ab1Ea89e8196811F51A7B7Ade33eB11"),
            ),
            (
                Address::new("0x7FBa4B8Dc5E7616e59622806932DBea72537A56b"),
                Address::new("0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc"),
            ),
            (
                Address::new("0x6C3e4cb2E96B01F4b866965A91ed4437839A121a"),
                Address::new("0x0d4a11d5EEaaC28EC3F61d100daF4d40471f1852"),
            ),
            (
                Address::new("0xCA35e32e7926b96A9988f61d510E038108d8068e"),
                Address::new("0xBb2b8038a1640196FbE3e38816F3e67Cba72D940"),
            ),
        ])
    }

    pub fn new(entries: Vec<(Address, Address)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(Address, Address)] {
        &self.entries
    }
}

/// Scan every registered staking contract for the owner's deposits and
/// turn non-zero ones into positions.
///
/// The balance read from chain is in wei of pool token; positions
/// carry it converted to whole tokens. A pool the indexer does not
/// know about still produces a position, just without pair data.
pub async fn staked_positions(
    data: &dyn DataSource,
    chain: &dyn ChainSource,
    registry: &StakingRegistry,
    owner: &Address,
) -> Result<Vec<Position>, PortfolioError> {
    let mut positions = Vec::new();
    for (staking_contract, pair_address) in registry.entries() {
        let wei = chain.staked_balance(staking_contract, owner).await?;
        let balance = Decimal::from_wei(&wei).map_err(|e| {
            PortfolioError::Upstream(DataSourceError::Parse(format!(
                "invalid staked balance for {}: {}",
                staking_contract, e
            )))
        })?;
        if !balance.is_positive() {
            continue;
        }
        debug!(
            staking_contract = %staking_contract,
            pair = %pair_address,
            %balance,
            "found staked position"
        );

        let pair = match data.pair(&pair_address.to_query()).await? {
            Some(raw) => {
                let mut pair = Pair::try_from(raw).map_err(PortfolioError::Upstream)?;
                pair.staking_contract_address = Some(staking_contract.clone());
                Some(pair)
            }
            None => {
                warn!(pair = %pair_address, "staked pool not found in index");
                None
            }
        };
        positions.push(Position {
            pair,
            balance,
            source: PositionSource::Staked,
        });
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{MockChainSource, MockDataSource};

    const OWNER: &str = "0x000000000000000000000000000000000000dEaD";
    const DAI_ETH_STAKING: &str = "0xa1484C3aa22a66C62b77E0AE78E15258bd0cB711";
    const DAI_ETH_PAIR: &str = "0xA478c2975Ab1Ea89e8196811F51A7B7Ade33eB11";

    fn dai_weth_raw() -> crate::datasource::RawPair {
        serde_json::from_value(serde_json::json!({
            "id": DAI_ETH_PAIR.to_lowercase(),
            "reserve0": "100", "reserve1": "50",
            "reserveUSD": "400", "totalSupply": "8",
            "token0Price": "2", "token1Price": "0.5",
            "token0": {"id": "0x1", "symbol": "DAI", "name": "Dai", "derivedETH": "0.1"},
            "token1": {"id": "0x2", "symbol": "WETH", "name": "Weth", "derivedETH": "1"}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_no_deposits_no_positions() {
        let data = MockDataSource::new();
        let chain = MockChainSource::new();
        let owner = Address::new(OWNER);
        let positions =
            staked_positions(&data, &chain, &StakingRegistry::mainnet(), &owner)
                .await
                .unwrap();
        assert!(positions.is_empty());
        // every registered contract was checked, none looked up a pair
        assert_eq!(chain.recorded_calls().len(), 4);
        assert!(data.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_wei_deposit_converted_to_pool_tokens() {
        let data = MockDataSource::new().with_pair(dai_weth_raw());
        let chain = MockChainSource::new().with_balance(DAI_ETH_STAKING, OWNER, "1");
        let owner = Address::new(OWNER);
        let positions =
            staked_positions(&data, &chain, &StakingRegistry::mainnet(), &owner)
                .await
                .unwrap();
        assert_eq!(positions.len(), 1);
        let position = &positions[0];
        assert_eq!(position.source, PositionSource::Staked);
        assert_eq!(
            position.balance,
            Decimal::parse("0.000000000000000001").unwrap()
        );
        let pair = position.pair.as_ref().unwrap();
        assert_eq!(
            pair.staking_contract_address,
            Some(Address::new(DAI_ETH_STAKING))
        );
    }

    #[tokio::test]
    async fn test_unknown_pool_keeps_position_without_pair() {
        let data = MockDataSource::new();
        let chain = MockChainSource::new().with_balance(
            DAI_ETH_STAKING,
            OWNER,
            "2000000000000000000",
        );
        let owner = Address::new(OWNER);
        let positions =
            staked_positions(&data, &chain, &StakingRegistry::mainnet(), &owner)
                .await
                .unwrap();
        assert_eq!(positions.len(), 1);
        assert!(positions[0].pair.is_none());
        assert_eq!(positions[0].balance, Decimal::parse("2").unwrap());
    }
}
