//! On-chain balance reads through an Ethereum JSON-RPC provider.

use super::{ChainSource, DataSourceError};
use crate::domain::Address;
use async_trait::async_trait;
use ethers::contract::abigen;
use ethers::providers::{Http, Provider};
use ethers::types::{Address as EthAddress, U256};
use std::sync::Arc;
use tracing::debug;

// All staking contracts share the same minimal read surface.
abigen!(
    StakingRewards,
    r#"[
        function balanceOf(address account) external view returns (uint256)
    ]"#,
);

/// Chain read client backed by an HTTP JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct EthersChainSource {
    provider: Arc<Provider<Http>>,
}

impl EthersChainSource {
    pub fn new(rpc_url: &str) -> Result<Self, DataSourceError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| DataSourceError::Network(e.to_string()))?;
        Ok(Self {
            provider: Arc::new(provider),
        })
    }
}

#[async_trait]
impl ChainSource for EthersChainSource {
    async fn staked_balance(
        &self,
        staking_contract: &Address,
        owner: &Address,
    ) -> Result<String, DataSourceError> {
        debug!(
            "reading staked balance of {} in {}",
            owner, staking_contract
        );
        let contract_address: EthAddress = staking_contract
            .as_str()
            .parse()
            .map_err(|e| DataSourceError::Parse(format!("invalid staking contract: {}", e)))?;
        let owner_address: EthAddress = owner
            .as_str()
            .parse()
            .map_err(|e| DataSourceError::Parse(format!("invalid owner address: {}", e)))?;

        let contract = StakingRewards::new(contract_address, self.provider.clone());
        let balance: U256 = contract
            .balance_of(owner_address)
            .call()
            .await
            .map_err(|e| DataSourceError::Network(e.to_string()))?;

        Ok(balance.to_string())
    }
}
