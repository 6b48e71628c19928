//! エラーハンドリング
//!
//! クライアント層のエラーは `ClientError` に統一する。リコンサイラ層の
//! ラッパー（`OperationFailed`）は `resource` モジュール側にある。

use thiserror::Error;

/// Devin API クライアントのエラー
#[derive(Debug, Error)]
pub enum ClientError {
    /// リクエストボディの JSON エンコードに失敗（ローカル起因）
    #[error("failed to JSON encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// トランスポートレベルの失敗（接続・DNS・タイムアウト等、レスポンスなし）
    #[error("failed to execute HTTP request: {0}")]
    Network(#[from] reqwest::Error),

    /// API がリクエストを拒否した（構造化エラーボディあり）
    #[error("API error: {message} ({error_type})")]
    Api {
        message: String,
        error_type: String,
    },

    /// API がエラーを返したがボディを解釈できなかった
    #[error("API error: status code {0}")]
    ApiStatus(u16),

    /// レスポンスボディの JSON デコードに失敗
    #[error("failed to decode JSON response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// ID に一致するナレッジが一覧に存在しない
    #[error("knowledge resource with ID '{0}' not found")]
    KnowledgeNotFound(String),

    /// ID に一致するフォルダが一覧に存在しない
    #[error("folder resource with ID '{0}' not found")]
    FolderNotFound(String),

    /// 名前に一致するフォルダが一覧に存在しない
    #[error("folder resource with name '{0}' not found")]
    FolderNameNotFound(String),

    /// API キーが未設定
    #[error("API Key for Devin API is not set (set DEVIN_API_KEY or pass it explicitly)")]
    MissingApiKey,
}

impl ClientError {
    /// 検索系の NotFound かどうか
    ///
    /// ホストは Read フェーズでリモートから消えたリソースをエラーとして
    /// 扱うか追跡から外すかを選べる。その判定に使う。
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::KnowledgeNotFound(_) | Self::FolderNotFound(_) | Self::FolderNameNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(ClientError::KnowledgeNotFound("x".to_string()).is_not_found());
        assert!(ClientError::FolderNotFound("x".to_string()).is_not_found());
        assert!(ClientError::FolderNameNotFound("x".to_string()).is_not_found());
        assert!(!ClientError::ApiStatus(500).is_not_found());
        assert!(!ClientError::MissingApiKey.is_not_found());
    }

    #[test]
    fn test_display_messages() {
        let err = ClientError::KnowledgeNotFound("abc".to_string());
        assert_eq!(
            err.to_string(),
            "knowledge resource with ID 'abc' not found"
        );

        let err = ClientError::ApiStatus(503);
        assert_eq!(err.to_string(), "API error: status code 503");

        let err = ClientError::Api {
            message: "rate limited".to_string(),
            error_type: "rate_limit".to_string(),
        };
        assert_eq!(err.to_string(), "API error: rate limited (rate_limit)");
    }
}
