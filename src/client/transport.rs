//! Devin API への HTTP トランスポート
//!
//! 認証ヘッダ付きで JSON リクエストを送り、生のレスポンスボディを返す。
//! ステータス >= 400 はエラーボディを解析して `ClientError` に分類する。

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Method;
use serde::Serialize;

use crate::error::ClientError;
use crate::model::ErrorBody;

/// リクエストタイムアウト（最悪ケースのレイテンシを 30 秒で抑える）
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP トランスポート
pub struct HttpTransport {
    api_key: String,
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// 新しいトランスポートを作成する
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        })
    }

    /// リクエストを送って生のレスポンスボディを返す共通処理
    ///
    /// デシリアライズは呼び出し側の責務。リトライはしない。
    pub fn send<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            let json = serde_json::to_string(body).map_err(ClientError::Encoding)?;
            request = request.body(json);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let text = response.text()?;

        if status >= 400 {
            return Err(classify_error_body(status, &text));
        }

        Ok(text)
    }
}

/// エラーレスポンスを `ClientError` に分類する
///
/// `{error: {message, type}}` として解析できればその内容、
/// できなければステータスコードのみのエラーにする。
fn classify_error_body(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ClientError::Api {
            message: parsed.error.message,
            error_type: parsed.error.error_type,
        },
        Err(_) => ClientError::ApiStatus(status),
    }
}
