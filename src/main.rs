use lpfolio::{
    CachedDataSource, ChainSource, Config, DataSource, EthersChainSource, PortfolioService,
    SubgraphClient,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let address = match std::env::args().nth(1) {
        Some(address) => address,
        None => {
            eprintln!("usage: lpfolio <address>");
            std::process::exit(2);
        }
    };

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let chain: Arc<dyn ChainSource> = match EthersChainSource::new(&config.rpc_url) {
        Ok(source) => Arc::new(source),
        Err(e) => {
            eprintln!("Failed to initialize chain client: {}", e);
            std::process::exit(1);
        }
    };
    let data: Arc<dyn DataSource> = Arc::new(CachedDataSource::new(
        SubgraphClient::new(config.subgraph_url.clone()),
        Duration::from_secs(config.cache_ttl_secs),
        config.cache_capacity,
    ));

    let service = PortfolioService::new(data, chain);
    let portfolio = match service.build_portfolio(&address).await {
        Ok(portfolio) => portfolio,
        Err(e) => {
            eprintln!("Failed to build portfolio for {}: {}", address, e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&portfolio) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize portfolio: {}", e);
            std::process::exit(1);
        }
    }
}
