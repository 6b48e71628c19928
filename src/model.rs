//! Devin API のデータモデル
//!
//! フィールド名と JSON 表現は Devin API のワイヤ形式に合わせる。
//! `parent_folder_id` と `description` はワイヤ上「空文字列 = なし」で、
//! リクエスト時は空なら省略する（omitempty 互換）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ナレッジリソース
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knowledge {
    /// サーバ採番の ID（作成後は不変）
    pub id: String,
    pub name: String,
    /// 本文（必須）
    pub body: String,
    /// いつこのナレッジを参照すべきかの説明（必須）
    pub trigger_description: String,
    /// 親フォルダ ID（任意。空文字列は「親なし」）
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_folder_id: String,
    pub created_at: DateTime<Utc>,
}

/// フォルダリソース
///
/// このクライアントからは読み取り専用（作成・更新・削除の API はない）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// 説明（任意）
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// 一覧 API のレスポンス
///
/// ナレッジとフォルダをまとめた不変スナップショットで、キャッシュの単位。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeListing {
    pub knowledge: Vec<Knowledge>,
    pub folders: Vec<Folder>,
}

/// ナレッジ作成 API のリクエストボディ
#[derive(Debug, Clone, Serialize)]
pub struct CreateKnowledgeRequest {
    pub name: String,
    pub body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_folder_id: String,
    pub trigger_description: String,
}

/// ナレッジ更新 API のリクエストボディ（作成と同形）
#[derive(Debug, Clone, Serialize)]
pub struct UpdateKnowledgeRequest {
    pub name: String,
    pub body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_folder_id: String,
    pub trigger_description: String,
}

/// API のエラーレスポンス `{error: {message, type}}`
///
/// フィールドはすべてデフォルト可。`{}` のようなボディも空文字列として
/// 受理する（元 API クライアントのゼロ値デコードと同じ挙動）。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: ErrorDetail,
}

/// エラーレスポンスの中身
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: String,
}
