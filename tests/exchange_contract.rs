//! Contract tests for the exchange adapters: request URLs, payload
//! interpretation and listing checks.

use coinprice_core::{
    BinanceAdapter, BithumbAdapter, CoinbaseAdapter, ExchangeClient, UpbitAdapter,
};
use coinprice_tests::*;

// =============================================================================
// Request conventions
// =============================================================================

#[tokio::test]
async fn when_quoting_then_each_exchange_is_asked_with_its_market_convention() {
    // Given: a transport that records requests and answers nothing
    let http = MarketScript::new().build();
    let aggregator = aggregator(http.clone(), None);

    // When: LINK is quoted on every exchange
    let _ = aggregator.quote(&symbol("link")).await;

    // Then: one request per exchange plus one for the rate
    let urls = http
        .recorded_requests()
        .into_iter()
        .map(|request| request.url)
        .collect::<Vec<_>>();
    assert_eq!(urls.len(), 5);
    for expected in [
        "https://api.upbit.com/v1/ticker?markets=KRW-USDT",
        "https://api.binance.com/api/v3/ticker/price?symbol=LINKUSDT",
        "https://api.upbit.com/v1/ticker?markets=KRW-LINK",
        "https://api.bithumb.com/public/ticker/LINK_KRW",
        "https://api.coinbase.com/v2/exchange-rates?currency=LINK",
    ] {
        assert!(urls.iter().any(|url| url == expected), "missing request {expected}");
    }
}

#[tokio::test]
async fn when_adapters_are_registered_then_ids_match_exchanges() {
    let http: Arc<dyn coinprice_core::HttpClient> = MarketScript::new().build();
    let clients: Vec<Arc<dyn ExchangeClient>> = vec![
        Arc::new(BinanceAdapter::with_http_client(http.clone())),
        Arc::new(UpbitAdapter::with_http_client(http.clone())),
        Arc::new(BithumbAdapter::with_http_client(http.clone())),
        Arc::new(CoinbaseAdapter::with_http_client(http)),
    ];

    let ids = clients.iter().map(|client| client.id()).collect::<Vec<_>>();

    assert_eq!(ids, ExchangeId::ALL.to_vec());
}

// =============================================================================
// Quote payloads
// =============================================================================

#[tokio::test]
async fn when_binance_price_is_zero_then_quote_fails() {
    // Given: Binance reports a zero price
    let http = MarketScript::new().binance("DEAD", "0.00000000").build();
    let adapter = BinanceAdapter::with_http_client(http);

    // When: the coin is quoted
    let result = adapter.quote(&symbol("DEAD"), ExchangeRate::fallback()).await;

    // Then: the failure carries the user-facing message
    let error = result.expect_err("zero price must fail");
    assert_eq!(error.exchange(), ExchangeId::Binance);
    assert_eq!(error.message(), "바이낸스에서 해당 코인을 찾을 수 없습니다");
}

#[tokio::test]
async fn when_upbit_returns_empty_list_then_quote_fails_and_coin_is_not_listed() {
    // Given: Upbit answers with an empty ticker list
    let http = MarketScript::new()
        .route(
            format!("{UPBIT_TICKER}KRW-ABC"),
            HttpResponse::ok_json("[]"),
        )
        .build();
    let adapter = UpbitAdapter::with_http_client(http);

    // When: the coin is quoted and checked
    let quote = adapter.quote(&symbol("ABC"), ExchangeRate::fallback()).await;
    let listing = adapter.listing(&symbol("ABC")).await;

    // Then: both report absence
    assert!(quote.is_err());
    assert_eq!(listing, ListingStatus::not_listed(ExchangeId::Upbit));
}

#[tokio::test]
async fn when_upbit_rejects_market_then_http_error_is_unavailable() {
    // Given: Upbit answers 404 for an unknown market
    let http = MarketScript::new()
        .route(
            format!("{UPBIT_TICKER}KRW-ZZZ"),
            HttpResponse::with_status(404, r#"{"error":{"name":"404","message":"Code not found"}}"#),
        )
        .build();
    let adapter = UpbitAdapter::with_http_client(http);

    // When: the coin is quoted
    let error = adapter
        .quote(&symbol("ZZZ"), ExchangeRate::fallback())
        .await
        .expect_err("404 must fail");

    // Then: the error names the status for logs and stays unavailable
    assert_eq!(error.code(), "source.unavailable");
    assert!(error.detail().contains("404"));
}

// =============================================================================
// Listing checks
// =============================================================================

#[tokio::test]
async fn when_doge_trades_on_binance_and_upbit_then_listing_partitions_in_order() {
    // Given: DOGE is listed on Binance and Upbit only
    let http = MarketScript::new()
        .binance("DOGE", "0.15")
        .upbit("DOGE", "210")
        .route(
            format!("{BITHUMB_TICKER}DOGE_KRW"),
            HttpResponse::ok_json(r#"{"status":"5600","message":"코인명이 잘못 입력되었습니다."}"#),
        )
        .route(
            format!("{COINBASE_RATES}DOGE"),
            HttpResponse::ok_json(r#"{"data":{"currency":"DOGE","rates":{}}}"#),
        )
        .build();
    let aggregator = aggregator(http, None);

    // When: listings are checked
    let result = aggregator.listings(&symbol("DOGE")).await;

    // Then: listed Binance-then-Upbit, not listed Bithumb-then-Coinbase
    let listed = result.listed().map(|status| status.exchange).collect::<Vec<_>>();
    let not_listed = result.not_listed().map(|status| status.exchange).collect::<Vec<_>>();
    assert_eq!(listed, vec![ExchangeId::Binance, ExchangeId::Upbit]);
    assert_eq!(not_listed, vec![ExchangeId::Bithumb, ExchangeId::Coinbase]);
    assert_eq!(
        render::render(&AggregateResult::from(result), fixed_clock()),
        "🏪 DOGE 상장 거래소\n\n\
         ✅ 상장된 거래소:\n🟡 바이낸스 (DOGE/USDT)\n🔵 업비트 (DOGE/KRW)\n\n\
         ❌ 상장되지 않은 거래소:\n🚫 빗썸\n🚫 코인베이스\n\n\
         💡 /시세 DOGE 또는 /가격 DOGE 으로 시세를 확인할 수 있습니다."
    );
}

#[tokio::test]
async fn when_binance_answers_without_usable_price_then_it_still_counts_as_listed() {
    // Given: Binance returns 200 with an unparseable price
    let http = MarketScript::new().binance("ODD", "n/a").build();
    let adapter = BinanceAdapter::with_http_client(http);

    // When: listing and quote are requested
    let listing = adapter.listing(&symbol("ODD")).await;
    let quote = adapter.quote(&symbol("ODD"), ExchangeRate::fallback()).await;

    // Then: the listing probe only checks for a successful response
    assert_eq!(listing, ListingStatus::listed(ExchangeId::Binance, "ODD/USDT"));
    assert!(quote.is_err());
}

#[tokio::test]
async fn when_nothing_lists_the_coin_then_dedicated_reply_is_rendered() {
    // Given: every exchange rejects the coin
    let http = MarketScript::new().build();
    let aggregator = aggregator(http, None);

    // When: listings are checked
    let result = aggregator.listings(&symbol("NOPE")).await;

    // Then: no exchange is listed and the reply says so
    assert!(!result.listed_anywhere());
    assert_eq!(
        render::render_listings(&result),
        "❌ NOPE 코인이 지원하는 거래소에 상장되지 않았습니다.\n\n다른 코인을 확인해보시거나 /coins 로 지원 코인 목록을 확인해주세요."
    );
}
