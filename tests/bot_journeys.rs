//! End-to-end chat journeys: text in, replies out.

use coinprice_bot::{
    ChatCommand, CommandRouter, RecordingNotifier, TelegramClient, TelegramConfig, TelegramPoller,
};
use coinprice_tests::*;
use std::time::Duration;

fn router(http: Arc<ScriptedHttpClient>) -> (CommandRouter, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let aggregator = aggregator(http, Some(Duration::from_millis(3_000)));
    let router = CommandRouter::new(Arc::new(aggregator), notifier.clone()).with_clock(fixed_clock);
    (router, notifier)
}

// =============================================================================
// Quote journeys
// =============================================================================

#[tokio::test]
async fn when_user_asks_price_in_korean_then_loading_and_quote_are_sent() {
    // Given: Upbit and Bithumb quote BTC
    let http = MarketScript::new()
        .usdt_rate("1390")
        .upbit("BTC", "96000000")
        .bithumb("BTC", "96010000")
        .build();
    let (router, notifier) = router(http);

    // When: the user types the Korean name
    router.handle(100, "/시세 비트코인").await.expect("handled");

    // Then: a loading message precedes the quote reply
    assert_eq!(
        notifier.texts_for(100),
        vec![
            String::from("🔍 BTC 시세 정보를 가져오는 중..."),
            format!(
                "💰 BTC 시세 정보\n\n🔵 업비트: 96,000,000 KRW\n🟢 빗썸: 96,010,000 KRW\n\n💱 USD/KRW 환율: 1,390\n📅 {FIXED_STAMP} 기준"
            ),
        ]
    );
}

#[tokio::test]
async fn when_unknown_coin_is_quoted_then_user_is_pointed_to_listing_check() {
    // Given: no exchange knows the coin
    let (router, notifier) = router(MarketScript::new().build());

    // When: the user asks for it
    router.handle(5, "/가격 nope").await.expect("handled");

    // Then: the not-found reply follows the loading message
    let texts = notifier.texts_for(5);
    assert_eq!(texts.len(), 2);
    assert!(texts[1].starts_with("❌ NOPE 코인을 찾을 수 없습니다."));
}

#[tokio::test]
async fn when_btc_shortcut_finds_nothing_then_footer_is_still_rendered() {
    // Given: every exchange is down
    let (router, notifier) = router(MarketScript::new().build());

    // When: the shortcut is used
    router.handle(9, "/btc").await.expect("handled");

    // Then: the bitcoin header and footer are sent without quote lines
    assert_eq!(
        notifier.texts_for(9),
        vec![
            String::from("🔍 비트코인 시세 정보를 가져오는 중..."),
            format!("₿ 비트코인 시세 정보\n\n\n💱 USD/KRW 환율: 1,350\n📅 {FIXED_STAMP} 기준"),
        ]
    );
}

#[tokio::test]
async fn when_single_exchange_is_down_then_reply_names_it() {
    // Given: Coinbase does not answer but Binance does
    let http = MarketScript::new().binance("SOL", "150").build();
    let (router, notifier) = router(http);

    // When: the user asks Coinbase only
    router.handle(3, "/coinbase sol").await.expect("handled");

    // Then: the reply names Coinbase and never touches Binance
    let texts = notifier.texts_for(3);
    assert_eq!(
        texts[1],
        "❌ 코인베이스에서 해당 코인을 찾을 수 없습니다\n\n💡 /어디 SOL 으로 상장 거래소를 먼저 확인해보세요."
    );
}

// =============================================================================
// Input handling
// =============================================================================

#[tokio::test]
async fn when_argument_is_missing_then_usage_is_sent_without_lookup() {
    let http = MarketScript::new().build();
    let (router, notifier) = router(http.clone());

    router.handle(1, "/어디").await.expect("handled");

    assert_eq!(
        notifier.texts_for(1),
        vec![String::from("💡 사용법: /어디 [코인명]\n예: /어디 BTC")]
    );
    assert!(http.recorded_requests().is_empty());
}

#[tokio::test]
async fn when_argument_is_not_a_coin_then_unsupported_message_is_sent() {
    let http = MarketScript::new().build();
    let (router, notifier) = router(http.clone());

    router.handle(1, "/price BTC USDT").await.expect("handled");

    assert_eq!(
        notifier.texts_for(1),
        vec![String::from(
            "❌ 지원하지 않는 코인입니다. /coins 로 지원 코인을 확인해주세요."
        )]
    );
    assert!(http.recorded_requests().is_empty());
}

#[tokio::test]
async fn when_parsed_command_is_dispatched_then_it_matches_handled_text() {
    let (router, notifier) = router(MarketScript::new().build());

    router
        .dispatch(2, ChatCommand::Help)
        .await
        .expect("dispatched");
    router.handle(3, "/help").await.expect("handled");

    assert_eq!(notifier.texts_for(2), notifier.texts_for(3));
}

// =============================================================================
// Telegram transport
// =============================================================================

#[tokio::test]
async fn when_telegram_delivers_listing_command_then_replies_are_posted_back() {
    // Given: one pending update and a market where DOGE trades on Upbit
    let http = MarketScript::new()
        .route(
            "https://telegram.test/botT/getUpdates",
            HttpResponse::ok_json(
                r#"{"ok":true,"result":[{"update_id":900,"message":{"message_id":1,"chat":{"id":321,"type":"private"},"text":"/어디@coinprice_bot 도지코인"}}]}"#,
            ),
        )
        .route(
            "https://telegram.test/botT/sendMessage",
            HttpResponse::ok_json(r#"{"ok":true,"result":{"message_id":2}}"#),
        )
        .upbit("DOGE", "210")
        .build();
    let telegram = Arc::new(TelegramClient::new(
        http.clone(),
        TelegramConfig::new("T").with_api_base("https://telegram.test"),
    ));
    let aggregator = Arc::new(aggregator(http.clone(), None));
    let router = Arc::new(CommandRouter::new(aggregator, telegram.clone()));
    let mut poller = TelegramPoller::new(telegram, router);

    // When: one polling round completes
    let handlers = poller.poll_once().await.expect("poll");
    for handler in handlers {
        handler.await.expect("handler finished");
    }

    // Then: loading and listing replies were posted to the same chat
    let posted = http
        .recorded_requests()
        .into_iter()
        .filter(|request| request.url.ends_with("/sendMessage"))
        .map(|request| {
            serde_json::from_str::<serde_json::Value>(request.body.as_deref().unwrap_or("{}"))
                .expect("json body")
        })
        .collect::<Vec<_>>();
    assert_eq!(posted.len(), 2);
    assert!(posted.iter().all(|body| body["chat_id"] == 321));
    assert_eq!(posted[0]["text"], "🔍 DOGE 상장 거래소를 확인하는 중...");
    let listing = posted[1]["text"].as_str().unwrap_or_default();
    assert!(listing.contains("✅ 상장된 거래소:\n🔵 업비트 (DOGE/KRW)\n\n"));
    assert!(listing.contains("🚫 바이낸스\n🚫 빗썸\n🚫 코인베이스"));
    assert_eq!(poller.offset(), Some(901));
}
