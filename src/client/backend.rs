//! バックエンドの抽象
//!
//! リポジトリ操作の全面を trait として切り出し、実 API とモックを
//! コンストラクタ時に選択する。センチネル API キーの判定を業務ロジックの
//! 各操作に散らばらせないための層。

use std::sync::Arc;

use crate::client::http::HttpBackend;
use crate::client::mock::MockBackend;
use crate::error::ClientError;
use crate::model::{Folder, Knowledge, KnowledgeListing};

/// リポジトリ操作のバックエンド
pub trait Backend: Send + Sync {
    /// バックエンド名を返す
    fn name(&self) -> &str;

    /// ナレッジ一覧を取得する（キャッシュ込み）
    fn list_knowledge(&self) -> Result<Arc<KnowledgeListing>, ClientError>;

    /// ID でナレッジを取得する
    fn get_knowledge(&self, id: &str) -> Result<Knowledge, ClientError>;

    /// ナレッジを作成する
    fn create_knowledge(
        &self,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError>;

    /// ナレッジを更新する
    fn update_knowledge(
        &self,
        id: &str,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError>;

    /// ナレッジを削除する
    fn delete_knowledge(&self, id: &str) -> Result<(), ClientError>;

    /// ID でフォルダを取得する
    fn get_folder_by_id(&self, id: &str) -> Result<Folder, ClientError>;

    /// 名前でフォルダを取得する
    fn get_folder_by_name(&self, name: &str) -> Result<Folder, ClientError>;
}

/// バックエンドの enum ラッパー
///
/// 実 API とモックを型安全に扱うために使う。
pub enum AnyBackend {
    Http(HttpBackend),
    Mock(MockBackend),
}

impl Backend for AnyBackend {
    fn name(&self) -> &str {
        match self {
            Self::Http(b) => b.name(),
            Self::Mock(b) => b.name(),
        }
    }

    fn list_knowledge(&self) -> Result<Arc<KnowledgeListing>, ClientError> {
        match self {
            Self::Http(b) => b.list_knowledge(),
            Self::Mock(b) => b.list_knowledge(),
        }
    }

    fn get_knowledge(&self, id: &str) -> Result<Knowledge, ClientError> {
        match self {
            Self::Http(b) => b.get_knowledge(id),
            Self::Mock(b) => b.get_knowledge(id),
        }
    }

    fn create_knowledge(
        &self,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError> {
        match self {
            Self::Http(b) => b.create_knowledge(name, body, trigger_description, parent_folder_id),
            Self::Mock(b) => b.create_knowledge(name, body, trigger_description, parent_folder_id),
        }
    }

    fn update_knowledge(
        &self,
        id: &str,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError> {
        match self {
            Self::Http(b) => {
                b.update_knowledge(id, name, body, trigger_description, parent_folder_id)
            }
            Self::Mock(b) => {
                b.update_knowledge(id, name, body, trigger_description, parent_folder_id)
            }
        }
    }

    fn delete_knowledge(&self, id: &str) -> Result<(), ClientError> {
        match self {
            Self::Http(b) => b.delete_knowledge(id),
            Self::Mock(b) => b.delete_knowledge(id),
        }
    }

    fn get_folder_by_id(&self, id: &str) -> Result<Folder, ClientError> {
        match self {
            Self::Http(b) => b.get_folder_by_id(id),
            Self::Mock(b) => b.get_folder_by_id(id),
        }
    }

    fn get_folder_by_name(&self, name: &str) -> Result<Folder, ClientError> {
        match self {
            Self::Http(b) => b.get_folder_by_name(name),
            Self::Mock(b) => b.get_folder_by_name(name),
        }
    }
}
