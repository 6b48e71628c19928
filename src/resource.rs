//! ナレッジリソースのリコンサイラ
//!
//! 宣言的に記述された望ましい状態（`DesiredKnowledge`）とリモートの実状態を
//! ライフサイクル各フェーズ（Create/Read/Update/Delete/Import）で突き合わせ、
//! 永続化する状態（`KnowledgeState`）を組み立てる。どのフェーズを呼ぶかの
//! 判断はホスト側で済んでいる前提。

use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::client::DevinClient;
use crate::error::ClientError;

/// ライフサイクルのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Create,
    Read,
    Update,
    Delete,
    /// リコンサイラ自身は Import で失敗しないが、ホストが状態書き込みの
    /// 失敗を同じ型で包めるように用意している
    Import,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// リコンサイラのエラー
///
/// 失敗したフェーズと元のクライアントエラーを保持してホストへ返す。
/// Read 中の消失（NotFound）を区別したいホストは `source.is_not_found()` を見る。
#[derive(Debug, Error)]
#[error("failed to {phase} knowledge: {source}")]
pub struct OperationFailed {
    pub phase: Phase,
    #[source]
    pub source: ClientError,
}

/// 望ましい状態（ホストの設定記述から来る入力）
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredKnowledge {
    pub name: String,
    pub body: String,
    pub trigger_description: String,
    /// `None` は「親フォルダ指定なし」
    pub parent_folder_id: Option<String>,
}

/// 永続化される状態
///
/// 各フィールドは「未設定（`None`）」と「空文字列が設定済み（`Some("")`）」を
/// 区別する。リモート API は親フォルダなしを空文字列に畳み込むため、
/// この区別が Read フェーズの差分検出に必要になる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeState {
    /// サーバ採番の ID。未作成のときだけ `None`
    pub id: Option<String>,
    pub name: Option<String>,
    pub body: Option<String>,
    pub trigger_description: Option<String>,
    pub parent_folder_id: Option<String>,
}

/// ナレッジリソースのリコンサイラ
pub struct KnowledgeReconciler<'a> {
    client: &'a DevinClient,
}

impl<'a> KnowledgeReconciler<'a> {
    pub fn new(client: &'a DevinClient) -> Self {
        Self { client }
    }

    fn fail(phase: Phase, source: ClientError) -> OperationFailed {
        OperationFailed { phase, source }
    }

    /// Create: 望ましい状態で作成し、採番された ID を加えて永続化する
    ///
    /// クライアント呼び出しが失敗したら状態は返さない（部分的な永続化をしない）。
    pub fn create(&self, desired: &DesiredKnowledge) -> Result<KnowledgeState, OperationFailed> {
        info!("starting knowledge resource creation");

        let knowledge = self
            .client
            .create_knowledge(
                &desired.name,
                &desired.body,
                &desired.trigger_description,
                desired.parent_folder_id.as_deref(),
            )
            .map_err(|e| Self::fail(Phase::Create, e))?;

        info!(id = %knowledge.id, "knowledge resource creation completed");

        Ok(KnowledgeState {
            id: Some(knowledge.id),
            name: Some(desired.name.clone()),
            body: Some(desired.body.clone()),
            trigger_description: Some(desired.trigger_description.clone()),
            parent_folder_id: desired.parent_folder_id.clone(),
        })
    }

    /// Read: リモートの値で name / body / trigger_description を上書きする
    ///
    /// `parent_folder_id` は非対称に扱う: リモートが非空ならその値を採用、
    /// リモートが空でローカルに設定履歴があれば空文字列で上書き（フォルダから
    /// 外されたドリフトを可視化する）、未設定のままなら触らない。
    /// 失敗時は呼び出し側の状態がそのまま残る。
    pub fn read(&self, state: &KnowledgeState) -> Result<KnowledgeState, OperationFailed> {
        let id = state.id.clone().unwrap_or_default();
        info!(id = %id, "retrieving knowledge resource information");

        let knowledge = self
            .client
            .get_knowledge(&id)
            .map_err(|e| Self::fail(Phase::Read, e))?;

        let mut next = state.clone();
        next.name = Some(knowledge.name);
        next.body = Some(knowledge.body);
        next.trigger_description = Some(knowledge.trigger_description);
        merge_parent_folder(&mut next.parent_folder_id, &knowledge.parent_folder_id);

        info!(id = %id, "knowledge resource information retrieval completed");
        Ok(next)
    }

    /// Update: ID は永続化済みの値を維持し、成功時は望ましい状態をそのまま永続化する
    ///
    /// ID は望ましい状態には含まれない（作成後は不変のため）。更新 API の
    /// 返り値は取得するが、成功した更新では望ましい状態が正となるので
    /// フィールドごとの反映はしない。
    pub fn update(
        &self,
        state: &KnowledgeState,
        desired: &DesiredKnowledge,
    ) -> Result<KnowledgeState, OperationFailed> {
        let id = state.id.clone().unwrap_or_default();
        info!(id = %id, "starting knowledge resource update");

        self.client
            .update_knowledge(
                &id,
                &desired.name,
                &desired.body,
                &desired.trigger_description,
                desired.parent_folder_id.as_deref(),
            )
            .map_err(|e| Self::fail(Phase::Update, e))?;

        info!(id = %id, "knowledge resource update completed");

        Ok(KnowledgeState {
            id: state.id.clone(),
            name: Some(desired.name.clone()),
            body: Some(desired.body.clone()),
            trigger_description: Some(desired.trigger_description.clone()),
            parent_folder_id: desired.parent_folder_id.clone(),
        })
    }

    /// Delete: リモートから削除する
    ///
    /// 成功時に永続状態を破棄するのは呼び出し側の責務。失敗時は状態が残る。
    pub fn delete(&self, state: &KnowledgeState) -> Result<(), OperationFailed> {
        let id = state.id.clone().unwrap_or_default();
        info!(id = %id, "starting knowledge resource deletion");

        self.client
            .delete_knowledge(&id)
            .map_err(|e| Self::fail(Phase::Delete, e))?;

        info!(id = %id, "knowledge resource deletion completed");
        Ok(())
    }

    /// Import: ID だけを設定した空の状態を作る（リモート呼び出しなし）
    ///
    /// 残りのフィールドは続く Read フェーズで埋まる。
    pub fn import(id: &str) -> KnowledgeState {
        info!(id = %id, "importing knowledge resource");
        KnowledgeState {
            id: Some(id.to_string()),
            ..KnowledgeState::default()
        }
    }
}

/// Read フェーズの親フォルダ統合規則（3 分岐）
///
/// リモートは「親を外された」と「もともと親がない」をどちらも空文字列で
/// 返すため、ローカルに値の履歴がある場合に限って「外された」と解釈する。
fn merge_parent_folder(prior: &mut Option<String>, remote: &str) {
    if !remote.is_empty() {
        *prior = Some(remote.to_string());
    } else if prior.is_some() {
        *prior = Some(String::new());
    }
    // prior が None のままなら区別が付かないので触らない
}
