//! Static chat texts.

use coinprice_core::Symbol;

pub const WELCOME: &str = "🚀 암호화폐 시세 봇입니다!

📊 사용 가능한 명령어:
/btc - 비트코인 시세 (전체 거래소)
/시세 [코인명] - 특정 코인 시세
/가격 [코인명] - 특정 코인 시세
/어디 [코인명] - 코인 상장 거래소 확인
  예: /시세 ETH, /가격 ADA, /어디 DOGE

🏪 개별 거래소:
/binance [코인] - 바이낸스 시세
/upbit [코인] - 업비트 시세
/bithumb [코인] - 빗썸 시세
/coinbase [코인] - 코인베이스 시세

📖 /help - 자세한 도움말
/coins - 지원하는 코인 목록";

pub const HELP: &str = "📖 상세 사용법:

🔍 시세 조회:
/price BTC 또는 /시세 BTC 또는 /가격 BTC - 비트코인 시세 (모든 거래소)
/시세 ETH - 이더리움 시세
/가격 ADA - 에이다 시세

🏪 상장 거래소 확인:
/어디 BTC - 비트코인이 상장된 거래소들
/어디 ETH - 이더리움이 상장된 거래소들
/어디 DOGE - 도지코인이 상장된 거래소들

🏪 거래소별 조회:
/binance BTC - 바이낸스 비트코인
/upbit ETH - 업비트 이더리움
/bithumb XRP - 빗썸 리플
/coinbase SOL - 코인베이스 솔라나

💡 팁:
- 한국어도 가능해요: /price 비트코인, /어디 비트코인
- 대소문자 구분 안함: btc, BTC 모두 OK
- /coins 로 지원 코인 목록 확인

❓ 지원하는 거래소:
🟡 바이낸스 (글로벌)
🔵 업비트 (한국)
🟢 빗썸 (한국)
🟠 코인베이스 (글로벌)";

pub const COINS: &str = "💰 지원하는 주요 코인들:

🥇 메이저:
• BTC (비트코인)
• ETH (이더리움)
• XRP (리플)

🥈 알트코인:
• ADA (에이다/카르다노)
• SOL (솔라나)
• DOT (폴카닷)
• MATIC (폴리곤)
• LINK (체인링크)
• UNI (유니스왑)
• AVAX (아발란체)
• ATOM (코스모스)
• DOGE (도지코인)
• LTC (라이트코인)
• BCH (비트코인캐시)
• BONK (봉크)
• SHIB (시바이누)
• PEPE (페페)

📝 사용법:
/시세 [심볼] 또는 /가격 [심볼] 또는 /price [심볼]
/어디 [심볼] 또는 /어디 [한국어명]

예: /시세 BTC, /가격 이더리움, /어디 도지코인

💡 새로운 코인이 필요하시면 말씀해주세요!";

/// Reply to any text that is not a command.
pub const COMMAND_HINT: &str = "💡 명령어를 사용해주세요!

🔍 시세 조회: /시세 [코인명] 또는 /가격 [코인명]
🏪 상장 확인: /어디 [코인명]
📖 도움말: /help
💰 지원 코인: /coins";

pub const UNSUPPORTED_COIN: &str =
    "❌ 지원하지 않는 코인입니다. /coins 로 지원 코인을 확인해주세요.";

pub const BITCOIN_LOADING: &str = "🔍 비트코인 시세 정보를 가져오는 중...";

pub fn quote_loading(symbol: &Symbol) -> String {
    format!("🔍 {symbol} 시세 정보를 가져오는 중...")
}

pub fn listing_loading(symbol: &Symbol) -> String {
    format!("🔍 {symbol} 상장 거래소를 확인하는 중...")
}

/// Usage line for a command that arrived without its coin argument.
pub fn usage(command: &str) -> String {
    format!("💡 사용법: {command} [코인명]\n예: {command} BTC")
}
