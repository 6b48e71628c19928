//! Devin API のナレッジ管理クライアントとリソースリコンサイラ
//!
//! 一覧 API しか持たない Devin API に対して、TTL 付きキャッシュと
//! 変更時の無効化を備えたクライアント（`client`）と、IaC ライフサイクル
//! （Create/Read/Update/Delete/Import）をローカルの永続状態へ対応付ける
//! リコンサイラ（`resource`）を提供します。

/// エラーハンドリング
pub mod error;

/// データモデル（Devin API のワイヤ形式）
pub mod model;

/// クライアント設定
pub mod config;

/// API クライアント（トランスポート・キャッシュ・バックエンド）
pub mod client;

/// リソースリコンサイラ
pub mod resource;

pub use client::DevinClient;
pub use config::ClientConfig;
pub use error::ClientError;
