//! 実 API バックエンド
//!
//! 一覧はキャッシュ経由で取得する。個別取得とフォルダ検索は一覧の線形走査で
//! 導出する（Devin API に単体取得のエンドポイントがないため。一覧は小さく
//! キャッシュされるので走査で足りる）。変更系は成功時にキャッシュを無効化する。

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;

use crate::client::backend::Backend;
use crate::client::cache::ListingCache;
use crate::client::transport::HttpTransport;
use crate::error::ClientError;
use crate::model::{
    CreateKnowledgeRequest, Folder, Knowledge, KnowledgeListing, UpdateKnowledgeRequest,
};

/// 実 API バックエンド
pub struct HttpBackend {
    transport: HttpTransport,
    cache: ListingCache,
}

impl HttpBackend {
    /// トランスポートとキャッシュを組み立てる
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        cache_ttl: Duration,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            transport: HttpTransport::new(api_key, base_url)?,
            cache: ListingCache::new(cache_ttl),
        })
    }

    /// 一覧 API を直接呼ぶ（キャッシュ判定は呼び出し側）
    fn fetch_listing(&self) -> Result<KnowledgeListing, ClientError> {
        let body = self.transport.send(Method::GET, "/knowledge", None::<&()>)?;
        serde_json::from_str(&body).map_err(ClientError::Decoding)
    }
}

impl Backend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    fn list_knowledge(&self) -> Result<Arc<KnowledgeListing>, ClientError> {
        self.cache.get_or_fetch(|| self.fetch_listing())
    }

    fn get_knowledge(&self, id: &str) -> Result<Knowledge, ClientError> {
        let listing = self.list_knowledge()?;
        listing
            .knowledge
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| ClientError::KnowledgeNotFound(id.to_string()))
    }

    fn create_knowledge(
        &self,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError> {
        let request = CreateKnowledgeRequest {
            name: name.to_string(),
            body: body.to_string(),
            parent_folder_id: parent_folder_id.unwrap_or_default().to_string(),
            trigger_description: trigger_description.to_string(),
        };

        let response = self
            .transport
            .send(Method::POST, "/knowledge", Some(&request))?;
        let knowledge: Knowledge =
            serde_json::from_str(&response).map_err(ClientError::Decoding)?;

        // 作成したナレッジが次の一覧で見えるようにキャッシュを捨てる
        self.cache.invalidate();

        Ok(knowledge)
    }

    fn update_knowledge(
        &self,
        id: &str,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError> {
        let request = UpdateKnowledgeRequest {
            name: name.to_string(),
            body: body.to_string(),
            parent_folder_id: parent_folder_id.unwrap_or_default().to_string(),
            trigger_description: trigger_description.to_string(),
        };

        let path = format!("/knowledge/{id}");
        let response = self.transport.send(Method::PUT, &path, Some(&request))?;
        let knowledge: Knowledge =
            serde_json::from_str(&response).map_err(ClientError::Decoding)?;

        self.cache.invalidate();

        Ok(knowledge)
    }

    fn delete_knowledge(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/knowledge/{id}");
        // レスポンスボディは使わない
        self.transport.send(Method::DELETE, &path, None::<&()>)?;

        // 失敗時は無効化しない（変更が起きていないため）
        self.cache.invalidate();

        Ok(())
    }

    fn get_folder_by_id(&self, id: &str) -> Result<Folder, ClientError> {
        let listing = self.list_knowledge()?;
        listing
            .folders
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| ClientError::FolderNotFound(id.to_string()))
    }

    fn get_folder_by_name(&self, name: &str) -> Result<Folder, ClientError> {
        let listing = self.list_knowledge()?;
        // 名前の一意性は仮定で、重複があっても最初の一致を返す（重複検出はしない）
        listing
            .folders
            .iter()
            .find(|item| item.name == name)
            .cloned()
            .ok_or_else(|| ClientError::FolderNameNotFound(name.to_string()))
    }
}
