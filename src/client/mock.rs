//! モックバックエンド
//!
//! ネットワークなしで決定的に動くフィクスチャ実装。API キーがセンチネル値の
//! ときにコンストラクタで選択される。デモとテストの実行用。

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::client::backend::Backend;
use crate::error::ClientError;
use crate::model::{Folder, Knowledge, KnowledgeListing};

/// モック動作を選択するセンチネル API キー
pub const MOCK_API_KEY: &str = "test_api_key";

/// 指定された API キーがモック用かどうかを返す
pub fn is_mock_api_key(api_key: &str) -> bool {
    api_key == MOCK_API_KEY
}

/// モックバックエンド
#[derive(Debug, Clone, Default)]
pub struct MockBackend;

impl MockBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn list_knowledge(&self) -> Result<Arc<KnowledgeListing>, ClientError> {
        Ok(Arc::new(KnowledgeListing {
            knowledge: vec![
                Knowledge {
                    id: "mock-knowledge-1".to_string(),
                    name: "モックナレッジ1".to_string(),
                    body: "これはテスト用のモックナレッジの内容です。".to_string(),
                    trigger_description: "テスト用トリガーの説明".to_string(),
                    parent_folder_id: "mock-folder-1".to_string(),
                    created_at: Utc::now() - Duration::hours(24),
                },
                Knowledge {
                    id: "mock-knowledge-2".to_string(),
                    name: "モックナレッジ2".to_string(),
                    body: "これは別のテスト用のモックナレッジの内容です。".to_string(),
                    trigger_description: "別のテスト用トリガーの説明".to_string(),
                    parent_folder_id: "mock-folder-2".to_string(),
                    created_at: Utc::now() - Duration::hours(48),
                },
            ],
            folders: vec![mock_folder_1(), mock_folder_2()],
        }))
    }

    fn get_knowledge(&self, id: &str) -> Result<Knowledge, ClientError> {
        match id {
            // 空 ID は作成前の状態から来るため、先頭のフィクスチャを返す
            "mock-knowledge-1" | "" => Ok(Knowledge {
                id: "mock-knowledge-1".to_string(),
                name: "モックナレッジ1".to_string(),
                body: "これはテスト用のモックナレッジです".to_string(),
                trigger_description: "テスト用トリガーの説明".to_string(),
                parent_folder_id: "mock-folder-1".to_string(),
                created_at: Utc::now() - Duration::hours(24),
            }),
            "mock-knowledge-2" => Ok(Knowledge {
                id: "mock-knowledge-2".to_string(),
                name: "モックナレッジ2".to_string(),
                body: "これは別のテスト用のモックナレッジです".to_string(),
                trigger_description: "別のテスト用トリガーの説明".to_string(),
                parent_folder_id: "mock-folder-2".to_string(),
                created_at: Utc::now() - Duration::hours(48),
            }),
            "new-mock-knowledge" => Ok(Knowledge {
                id: "new-mock-knowledge".to_string(),
                name: "サンプルナレッジ".to_string(),
                body: "これはTerraformで作成されたサンプルナレッジです".to_string(),
                trigger_description: "Terraformサンプルトリガー".to_string(),
                parent_folder_id: "mock-folder-1".to_string(),
                created_at: Utc::now() - Duration::hours(1),
            }),
            _ => Err(ClientError::KnowledgeNotFound(id.to_string())),
        }
    }

    fn create_knowledge(
        &self,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError> {
        Ok(Knowledge {
            id: "new-mock-knowledge".to_string(),
            name: name.to_string(),
            body: body.to_string(),
            trigger_description: trigger_description.to_string(),
            parent_folder_id: parent_folder_id.unwrap_or_default().to_string(),
            created_at: Utc::now(),
        })
    }

    fn update_knowledge(
        &self,
        id: &str,
        name: &str,
        body: &str,
        trigger_description: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Knowledge, ClientError> {
        Ok(Knowledge {
            id: id.to_string(),
            name: name.to_string(),
            body: body.to_string(),
            trigger_description: trigger_description.to_string(),
            parent_folder_id: parent_folder_id.unwrap_or_default().to_string(),
            created_at: Utc::now() - Duration::hours(24),
        })
    }

    fn delete_knowledge(&self, _id: &str) -> Result<(), ClientError> {
        Ok(())
    }

    fn get_folder_by_id(&self, id: &str) -> Result<Folder, ClientError> {
        match id {
            "mock-folder-1" => Ok(mock_folder_1()),
            "mock-folder-2" => Ok(mock_folder_2()),
            _ => Err(ClientError::FolderNotFound(id.to_string())),
        }
    }

    fn get_folder_by_name(&self, name: &str) -> Result<Folder, ClientError> {
        match name {
            "モックフォルダ1" => Ok(mock_folder_1()),
            "モックフォルダ2" => Ok(mock_folder_2()),
            _ => Err(ClientError::FolderNameNotFound(name.to_string())),
        }
    }
}

fn mock_folder_1() -> Folder {
    Folder {
        id: "mock-folder-1".to_string(),
        name: "モックフォルダ1".to_string(),
        description: "これはテスト用のモックフォルダです".to_string(),
        created_at: Utc::now() - Duration::hours(72),
    }
}

fn mock_folder_2() -> Folder {
    Folder {
        id: "mock-folder-2".to_string(),
        name: "モックフォルダ2".to_string(),
        description: "これは別のテスト用のモックフォルダです".to_string(),
        created_at: Utc::now() - Duration::hours(96),
    }
}
