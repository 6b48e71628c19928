//! 時刻取得の抽象
//!
//! キャッシュの TTL 判定はこの trait 経由で現在時刻を読む。
//! テストでは固定時刻実装を差し込む。

use std::time::{SystemTime, UNIX_EPOCH};

/// 時刻取得の抽象
pub trait Clock: Send + Sync {
    /// 現在時刻をミリ秒（Unix epoch）で返す
    fn now_ms(&self) -> u64;
}

/// 標準ライブラリの SystemTime を使う Clock 実装
#[derive(Debug, Clone, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}
