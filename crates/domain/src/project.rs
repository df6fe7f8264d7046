//! # プロジェクト
//!
//! バッジ認定を受けるプロジェクトと、月次レポートに載せる統計スナップショットを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`Project`] | プロジェクト | 外部のプロジェクトストアが所有 |
//! | [`ProjectStat`] | プロジェクト統計 | 月末時点のバッジ取得状況 |
//!
//! ## 設計方針
//!
//! - **欠損を型で表現**: 保存前のレコードや所有者不明のプロジェクトが渡されうるため、
//!   `id` と `user_id` は `Option` で保持する
//! - **テンプレート変数として直列化**: serde でそのままメール本文に渡せる

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

define_i64_id! {
    /// プロジェクト ID
    ///
    /// プロジェクトストアが採番する連番。
    pub struct ProjectId;
}

/// プロジェクト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// プロジェクト ID（保存前のレコードでは存在しない）
    pub id:      Option<ProjectId>,
    /// プロジェクト名
    pub name:    String,
    /// オーナーのユーザー ID
    pub user_id: Option<UserId>,
}

impl Project {
    pub fn new(id: Option<ProjectId>, name: impl Into<String>, user_id: Option<UserId>) -> Self {
        Self {
            id,
            name: name.into(),
            user_id,
        }
    }

    /// 件名や URL に埋め込む ID 文字列を返す
    ///
    /// ID が存在しない場合は空文字列になる。
    pub fn display_id(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }

    /// オーナー宛て通知の送信対象として有効な場合、ID とオーナー ID を返す
    pub fn owner_reference(&self) -> Option<(ProjectId, UserId)> {
        Some((self.id?, self.user_id?))
    }
}

/// プロジェクト統計のスナップショット
///
/// 月次レポートで前月末・前々月末の状況を比較するために使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStat {
    /// 集計日時
    pub recorded_at:          DateTime<Utc>,
    /// 登録プロジェクト総数
    pub total_projects:       u64,
    /// passing バッジ取得済みのプロジェクト数
    pub passing_projects:     u64,
    /// 取得途中のプロジェクト数
    pub in_progress_projects: u64,
}
