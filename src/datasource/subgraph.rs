//! Uniswap V2 subgraph client.

use super::{
    DataSource, DataSourceError, RawLiquidityPosition, RawPair, RawPairDayResponse,
    RawTokenDayData, RawTransactionBatch,
};
use crate::domain::Decimal;
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Hosted Uniswap V2 subgraph endpoint.
pub const DEFAULT_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v2";

/// Pair fields requested by every pair-shaped query.
const PAIR_FIELDS: &str = r#"
id
token0 {
  id
  symbol
  name
  derivedETH
}
token1 {
  id
  symbol
  name
  derivedETH
}
reserve0
reserve1
totalSupply
reserveUSD
token0Price
token1Price
"#;

/// Indexed data source backed by a GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    client: Client,
    url: String,
}

impl SubgraphClient {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Create with the hosted Uniswap V2 endpoint.
    pub fn default_url() -> Self {
        Self::new(DEFAULT_SUBGRAPH_URL.to_string())
    }

    async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, DataSourceError> {
        let payload = serde_json::json!({
            "query": query,
            "variables": variables,
        });
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        let body = retry(backoff, || async {
            let response = self
                .client
                .post(&self.url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| backoff::Error::transient(DataSourceError::Network(e.to_string())))?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(DataSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(DataSourceError::Http {
                    status: status.as_u16(),
                    message: "server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(DataSourceError::Http {
                    status: status.as_u16(),
                    message: "client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(DataSourceError::Parse(e.to_string())))
        })
        .await?;

        graphql_data(body)
    }
}

/// Unwrap a GraphQL response envelope, mapping the errors array to a
/// query error.
fn graphql_data(body: serde_json::Value) -> Result<serde_json::Value, DataSourceError> {
    if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
        if !errors.is_empty() {
            let message = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("unknown error")
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join("; ");
            warn!("subgraph returned errors: {}", message);
            return Err(DataSourceError::Query(message));
        }
    }
    body.get("data")
        .cloned()
        .ok_or_else(|| DataSourceError::Parse("missing data field in response".to_string()))
}

fn field<T: serde::de::DeserializeOwned>(
    data: &serde_json::Value,
    name: &str,
) -> Result<T, DataSourceError> {
    let value = data
        .get(name)
        .cloned()
        .ok_or_else(|| DataSourceError::Parse(format!("missing {} field", name)))?;
    serde_json::from_value(value)
        .map_err(|e| DataSourceError::Parse(format!("invalid {}: {}", name, e)))
}

#[async_trait]
impl DataSource for SubgraphClient {
    async fn eth_price(&self) -> Result<Decimal, DataSourceError> {
        debug!("fetching eth price");
        let query = r#"{bundle(id: "1") {ethPrice}}"#;
        let data = self.execute(query, serde_json::json!({})).await?;
        let price = data
            .pointer("/bundle/ethPrice")
            .and_then(|v| v.as_str())
            .ok_or_else(|| DataSourceError::Parse("missing bundle.ethPrice".to_string()))?;
        Decimal::parse(price)
            .map_err(|e| DataSourceError::Parse(format!("invalid ethPrice: {}", e)))
    }

    async fn liquidity_positions(
        &self,
        address: &str,
    ) -> Result<Vec<RawLiquidityPosition>, DataSourceError> {
        debug!("fetching liquidity positions for {}", address);
        let query = format!(
            r#"
            query ($id: ID!) {{
              user(id: $id) {{
                liquidityPositions (where: {{liquidityTokenBalance_not: "0"}}) {{
                  liquidityTokenBalance
                  pair {{{pair_fields}}}
                }}
              }}
            }}
            "#,
            pair_fields = PAIR_FIELDS
        );
        let variables = serde_json::json!({"id": address.to_lowercase()});
        let data = self.execute(&query, variables).await?;
        // a user with no holder record comes back as null, not an error
        match data.get("user") {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(user) => field(user, "liquidityPositions"),
        }
    }

    async fn pair(&self, pair_address: &str) -> Result<Option<RawPair>, DataSourceError> {
        debug!("fetching pair {}", pair_address);
        let query = format!(
            "query ($id: ID!) {{pair(id: $id) {{{pair_fields}}}}}",
            pair_fields = PAIR_FIELDS
        );
        let variables = serde_json::json!({"id": pair_address.to_lowercase()});
        let data = self.execute(&query, variables).await?;
        field(&data, "pair")
    }

    async fn transactions(
        &self,
        address: &str,
        pair_addresses: &[String],
    ) -> Result<RawTransactionBatch, DataSourceError> {
        debug!(
            "fetching transactions for {} across {} pairs",
            address,
            pair_addresses.len()
        );
        let query = r#"
            query ($address: Bytes! $pairs: [String!]) {
              mints(
                where: { to: $address pair_in: $pairs}, orderBy: timestamp, orderDirection: desc
              ) {
                transaction { id timestamp blockNumber } pair { id } to sender liquidity amount0 amount1 amountUSD
              }
              burns(
                where: { sender: $address pair_in: $pairs}, orderBy: timestamp, orderDirection: desc
              ) {
                transaction { id timestamp blockNumber } pair { id } to sender liquidity amount0 amount1 amountUSD
              }
            }
        "#;
        let variables = serde_json::json!({
            "address": address.to_lowercase(),
            "pairs": pair_addresses,
        });
        let data = self.execute(query, variables).await?;
        serde_json::from_value(data)
            .map_err(|e| DataSourceError::Parse(format!("invalid mints/burns: {}", e)))
    }

    async fn token_day_data(
        &self,
        token_address: &str,
    ) -> Result<Vec<RawTokenDayData>, DataSourceError> {
        debug!("fetching token day data for {}", token_address);
        let query = r#"
            query ($token: String!) {
              tokenDayDatas(
                orderBy: date,
                orderDirection: desc,
                first: 31,
                where: {token: $token}
              ) {
                date
                priceUSD
              }
            }
        "#;
        let variables = serde_json::json!({"token": token_address.to_lowercase()});
        let data = self.execute(query, variables).await?;
        field(&data, "tokenDayDatas")
    }

    async fn pair_day_data(
        &self,
        pair_address: &str,
    ) -> Result<RawPairDayResponse, DataSourceError> {
        debug!("fetching pair day data for {}", pair_address);
        let query = format!(
            r#"
            query ($pairAddress: Bytes!, $id: ID!) {{
              pair(id: $id) {{{pair_fields}}}
              pairDayDatas(
                orderBy: date,
                orderDirection: desc,
                first: 31,
                where: {{pairAddress: $pairAddress}}
              ) {{
                date
                totalSupply
                reserveUSD
              }}
            }}
            "#,
            pair_fields = PAIR_FIELDS
        );
        let address = pair_address.to_lowercase();
        let variables = serde_json::json!({"id": address, "pairAddress": address});
        let data = self.execute(&query, variables).await?;
        serde_json::from_value(data)
            .map_err(|e| DataSourceError::Parse(format!("invalid pair day data: {}", e)))
    }

    async fn top_pairs(&self) -> Result<Vec<RawPair>, DataSourceError> {
        debug!("fetching top pairs");
        let query = format!(
            r#"
            {{
              pairs(first: 10, orderBy: reserveUSD, orderDirection: desc) {{{pair_fields}}}
            }}
            "#,
            pair_fields = PAIR_FIELDS
        );
        let data = self.execute(&query, serde_json::json!({})).await?;
        field(&data, "pairs")
    }
}
