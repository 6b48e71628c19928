//! クライアント設定
//!
//! API キーの解決（明示指定 > `DEVIN_API_KEY` 環境変数）と、ベース URL・
//! キャッシュ TTL のデフォルト値。

use std::env;
use std::time::Duration;

use crate::error::ClientError;

/// Devin API のベース URL
pub const DEFAULT_BASE_URL: &str = "https://api.devin.ai/v1";

/// 一覧キャッシュ TTL のデフォルト（plan 1 回分の所要時間を想定して 5 分）
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// API キーを読む環境変数名
pub const API_KEY_ENV: &str = "DEVIN_API_KEY";

/// クライアント設定
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API キー（Bearer トークン）
    pub api_key: String,
    /// ベース URL（テスト用エンドポイントへの差し替えに使う）
    pub base_url: String,
    /// 一覧キャッシュの TTL
    pub cache_ttl: Duration,
}

impl ClientConfig {
    /// API キーを指定し、残りはデフォルトの設定を作る
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// API キーを解決して設定を作る
    ///
    /// 明示指定が非空ならそれを使い、なければ `DEVIN_API_KEY` を読む。
    /// どちらも空なら `MissingApiKey`。
    pub fn from_env(explicit_api_key: Option<&str>) -> Result<Self, ClientError> {
        let api_key = match explicit_api_key {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => env::var(API_KEY_ENV).unwrap_or_default(),
        };
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }
        Ok(Self::new(api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let cfg = ClientConfig::new("my-key");
        assert_eq!(cfg.api_key, "my-key");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_from_env_explicit_key_wins() {
        let cfg = ClientConfig::from_env(Some("explicit-key")).unwrap();
        assert_eq!(cfg.api_key, "explicit-key");
    }

    #[test]
    fn test_from_env_missing_key() {
        // 空の明示指定は未指定と同じ扱い
        env::remove_var(API_KEY_ENV);
        let err = ClientConfig::from_env(Some("")).unwrap_err();
        assert!(matches!(err, ClientError::MissingApiKey));
    }
}
