use chrono::{TimeZone, Utc};
use lpfolio::datasource::{MockChainSource, MockDataSource, RawPairDayResponse, RawTokenDayData};
use lpfolio::{ChainSource, DataSource, Decimal, PortfolioService};
use std::sync::Arc;

const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
const DAI_WETH: &str = "0xA478c2975Ab1Ea89e8196811F51A7B7Ade33eB11";

fn dec(s: &str) -> Decimal {
    Decimal::parse(s).unwrap()
}

fn assert_dec_approx(actual: Decimal, expected: &str, dp: u32) {
    assert_eq!(
        actual.round_dp(dp),
        dec(expected).round_dp(dp),
        "expected {} ~ {}",
        actual,
        expected
    );
}

fn token_days() -> Vec<RawTokenDayData> {
    serde_json::from_value(serde_json::json!([
        {"date": 1603584000, "priceUSD": "1.0037"},
        {"date": 1603497600, "priceUSD": "1.0053"},
        {"date": 1603411200, "priceUSD": "1.0063"},
        {"date": 1603324800, "priceUSD": "1.0047"},
        {"date": 1603238400, "priceUSD": "1.0059"},
        {"date": 1603152000, "priceUSD": "1.0049"},
    ]))
    .unwrap()
}

fn pair_day_response() -> RawPairDayResponse {
    serde_json::from_value(serde_json::json!({
        "pair": {
            "id": DAI_WETH.to_lowercase(),
            "reserve0": "167190167.517422004453016764",
            "reserve1": "419470.533376099392406803",
            "reserveUSD": "415905325.9588990528391949333277547",
            "token0": {
                "derivedETH": "0.002482164437276671900656302172320963",
                "id": "0x6b175474e89094c44da98b954eedeac495271d0f",
                "name": "Dai Stablecoin",
                "symbol": "DAI"
            },
            "token0Price": "402.87419519117702623465593526239",
            "token1": {
                "derivedETH": "1",
                "id": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                "name": "Wrapped Ether",
                "symbol": "WETH"
            },
            "token1Price": "0.002482164437276671900656302172320963",
            "totalSupply": "8730969.742669688720211513"
        },
        "pairDayDatas": [
            {
                "date": 1603584000,
                "reserveUSD": "433176263.4363820888744425087438633",
                "totalSupply": "9069902.755513910975050686"
            },
            {
                "date": 1603497600,
                "reserveUSD": "435317156.2189432956087607791883648",
                "totalSupply": "9065803.30917003335268362"
            },
            {
                "date": 1603411200,
                "reserveUSD": "432572804.7594039159237288025989709",
                "totalSupply": "9033867.416922493126112964"
            }
        ]
    }))
    .unwrap()
}

fn service(data: MockDataSource) -> PortfolioService {
    let data: Arc<dyn DataSource> = Arc::new(data);
    let chain: Arc<dyn ChainSource> = Arc::new(MockChainSource::new());
    PortfolioService::new(data, chain)
}

#[tokio::test]
async fn token_daily_series() {
    let svc = service(MockDataSource::new().with_token_day_data(token_days()));

    let series = svc.token_daily(DAI).await.unwrap();

    assert_eq!(series.len(), 6);
    assert_eq!(
        series[0].date,
        Utc.with_ymd_and_hms(2020, 10, 25, 0, 0, 0).unwrap()
    );
    assert_eq!(series[0].price_usd, dec("1.0037"));
    assert_eq!(
        series[5].date,
        Utc.with_ymd_and_hms(2020, 10, 20, 0, 0, 0).unwrap()
    );
    assert_eq!(series[5].price_usd, dec("1.0049"));
}

#[tokio::test]
async fn token_daily_rejects_invalid_address() {
    let svc = service(MockDataSource::new());
    assert!(svc.token_daily("0xnope").await.is_err());
}

#[tokio::test]
async fn pair_daily_series_with_snapshot() {
    let svc = service(MockDataSource::new().with_pair_day_data(pair_day_response()));

    let daily = svc.pair_daily(DAI_WETH).await.unwrap();

    let pair = daily.pair.unwrap();
    assert_eq!(pair.symbol, "DAI-WETH");
    assert_eq!(pair.total_supply, dec("8730969.742669688720211513"));
    assert_dec_approx(pair.price_usd, "47.63563936389575939010629216", 18);

    assert_eq!(daily.date_price.len(), 3);
    assert_eq!(
        daily.date_price[0].date,
        Utc.with_ymd_and_hms(2020, 10, 25, 0, 0, 0).unwrap()
    );
    assert_dec_approx(
        daily.date_price[0].price_usd,
        "47.75974727766944294903865913",
        18,
    );
    assert_dec_approx(
        daily.date_price[1].price_usd,
        "48.01749402379172222921539513",
        18,
    );
    assert_dec_approx(
        daily.date_price[2].price_usd,
        "47.88345730523966278509766686",
        18,
    );
}

#[tokio::test]
async fn pair_daily_zero_supply_day_reads_as_zero() {
    let mut response = pair_day_response();
    response.day_data[0].total_supply = "0".to_string();
    response.day_data[2].reserve_usd = "0".to_string();
    response.day_data[2].total_supply = "0".to_string();
    let svc = service(MockDataSource::new().with_pair_day_data(response));

    let daily = svc.pair_daily(DAI_WETH).await.unwrap();

    assert_eq!(daily.date_price[0].price_usd, Decimal::zero());
    assert!(daily.date_price[1].price_usd.is_positive());
    assert_eq!(daily.date_price[2].price_usd, Decimal::zero());
}

#[tokio::test]
async fn pair_daily_unknown_pair_has_no_snapshot() {
    let mut response = pair_day_response();
    response.pair = None;
    response.day_data.clear();
    let svc = service(MockDataSource::new().with_pair_day_data(response));

    let daily = svc.pair_daily(DAI_WETH).await.unwrap();

    assert!(daily.pair.is_none());
    assert!(daily.date_price.is_empty());
}

#[tokio::test]
async fn top_pairs_overview() {
    let pairs = serde_json::from_value(serde_json::json!([
        {
            "id": "0xc5ddc3e9d103b9dfdf32ae7096f1392cf88696f9",
            "reserve0": "2063243.37701238",
            "reserve1": "78990431.276124196481995237",
            "reserveUSD": "1155422539.501794978568848429540974",
            "token0": {
                "derivedETH": "1.384712347348822582084534991907731",
                "id": "0x4c6e796bbfe5eb37f9e3e0f66c009c8bf2a5f428",
                "name": "FC Bitcoin",
                "symbol": "FCBTC"
            },
            "token0Price": "0.02612016852775457641571125345392988",
            "token1": {
                "derivedETH": "0",
                "id": "0x975ce667d59318e13da8acd3d2f534be5a64087b",
                "name": "The Whale of Blockchain",
                "symbol": "TWOB"
            },
            "token1Price": "38.284592189266595295457534649458",
            "totalSupply": "6.764183030477266625"
        },
        {
            "id": "0xbb2b8038a1640196fbe3e38816f3e67cba72d940",
            "reserve0": "26186.56317714",
            "reserve1": "854243.645375842632389955",
            "reserveUSD": "688815654.2814067218630940203749505",
            "token0": {
                "derivedETH": "32.62144938979884788549711871554279",
                "id": "0x2260fac5e5542a773aa44fbcfedf7c193bc2c599",
                "name": "Wrapped BTC",
                "symbol": "WBTC"
            },
            "token0Price": "0.03065467717423717613465000666387854",
            "token1": {
                "derivedETH": "1",
                "id": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                "name": "Wrapped Ether",
                "symbol": "WETH"
            },
            "token1Price": "32.62144938979884788549711871554279",
            "totalSupply": "1.375359727911146499"
        },
        {
            "id": "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc",
            "reserve0": "317611971.451732",
            "reserve1": "786437.873958944776984124",
            "reserveUSD": "634135172.5331979997924002078257594",
            "token0": {
                "derivedETH": "0.002476096446756450426416512921592668",
                "id": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "name": "USD//C",
                "symbol": "USDC"
            },
            "token0Price": "403.861489850261997342877776919223",
            "token1": {
                "derivedETH": "1",
                "id": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                "name": "Wrapped Ether",
                "symbol": "WETH"
            },
            "token1Price": "0.002476096446756450426416512921592668",
            "totalSupply": "12.621500317891400641"
        }
    ]))
    .unwrap();
    let svc = service(MockDataSource::new().with_top_pairs(pairs));

    let overviews = svc.top_pairs().await.unwrap();

    assert_eq!(overviews.len(), 3);
    assert_eq!(overviews[0].symbol, "FCBTC-TWOB");
    assert_dec_approx(overviews[0].price_usd, "170814795.2673407741498589706", 15);
    assert_eq!(overviews[1].symbol, "WBTC-WETH");
    assert_dec_approx(overviews[1].price_usd, "500825813.2783620728235026365", 15);
    assert_eq!(overviews[2].symbol, "USDC-WETH");
    assert_dec_approx(overviews[2].price_usd, "50242455.85402316180433129715", 15);
    assert_eq!(
        overviews[2].total_supply,
        dec("12.621500317891400641")
    );
}
