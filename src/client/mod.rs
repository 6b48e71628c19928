//! Devin API クライアント
//!
//! 公開エントリポイント。コンストラクタで API キーからバックエンド
//! （実 API / モック）を選択し、各操作はバックエンドへ委譲する。

pub mod backend;
pub mod cache;
pub mod clock;
pub mod http;
pub mod mock;
pub mod transport;

use std::sync::Arc;

use crate::client::backend::{AnyBackend, Backend};
use crate::client::http::HttpBackend;
use crate::client::mock::MockBackend;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{Folder, Knowledge, KnowledgeListing};

/// Devin API クライアント
///
/// 独立したインスタンスはキャッシュを共有しない。テストで複数の
/// クライアントを作っても状態が混ざることはない。
pub struct DevinClient {
    backend: AnyBackend,
}

impl DevinClient {
    /// API キーからクライアントを作成する（ベース URL・TTL はデフォルト）
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// 設定を指定してクライアントを作成する
    ///
    /// API キーがセンチネル値（`mock::MOCK_API_KEY`）のときは
    /// モックバックエンドを選択する。
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let backend = if mock::is_mock_api_key(&config.api_key) {
            AnyBackend::Mock(MockBackend::new())
        } else {
            AnyBackend::Http(HttpBackend::new(
                config.api_key,
                config.base_url,
                config.cache_ttl,
            )?)
        };
        Ok(Self { backend })
    }

    /// 選択されたバックエンド名（"http" / "mock"）
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// ナレッジ一覧を取得する
    ///
    /// 結果は TTL 付きでキャッシュされる（plan/apply 中のレートリミット回避）。
    pub fn list_knowledge(&self) -> Result<Arc<KnowledgeListing>, ClientError> {
        self.backend.list_knowledge()
    }

    /// ID でナレッジを取得する
    ///
    /// Devin API に単体取得のエンドポイントがないため、一覧から ID で
    /// 抽出する。見つからなければ `KnowledgeNotFound`。
    pub fn get_knowledge(&self, id: &str) -> Result<Knowledge, ClientError> {
        self.backend.get_knowledge(id)
    }

    /// ナレッジを作成する。成功時はキャッシュが無効化される。
    pub fn create_knowledge(
        &self,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError> {
        self.backend
            .create_knowledge(name, body, trigger_description, parent_folder_id)
    }

    /// ナレッジを更新する。成功時はキャッシュが無効化される。
    pub fn update_knowledge(
        &self,
        id: &str,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError> {
        self.backend
            .update_knowledge(id, name, body, trigger_description, parent_folder_id)
    }

    /// ナレッジを削除する。成功時のみキャッシュが無効化される。
    pub fn delete_knowledge(&self, id: &str) -> Result<(), ClientError> {
        self.backend.delete_knowledge(id)
    }

    /// ID でフォルダを取得する（一覧からの抽出）
    pub fn get_folder_by_id(&self, id: &str) -> Result<Folder, ClientError> {
        self.backend.get_folder_by_id(id)
    }

    /// 名前でフォルダを取得する（一覧からの抽出、最初の一致）
    pub fn get_folder_by_name(&self, name: &str) -> Result<Folder, ClientError> {
        self.backend.get_folder_by_name(name)
    }
}
