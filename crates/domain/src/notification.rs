//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`NotificationEvent`] | 通知イベント | 7 種類: 状態変化報告、バッジ更新、リマインダー、リマインダー集計、月次告知、新規登録、削除報告 |
//! | [`NotificationKind`] | 通知種別 | 既定のテンプレート名を兼ねる |
//! | [`MessageEnvelope`] | エンベロープ | 送信直前のメール 1 通分の指定 |
//! | [`DispatchOutcome`] | 送信結果 | 送信済み / スキップ / 配信失敗 |
//!
//! ## 設計方針
//!
//! - **オーナー宛てと運用者宛て**: オーナー宛てイベントはプロジェクトが欠損しうるため
//!   `Option<Project>` を受け取り、前提条件を満たさなければスキップする
//! - **スキップはエラーではない**: 前提条件の不成立は [`SkipReason`] として返す
//! - **エンベロープは不変**: 生成後に変更する手段を持たない

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    project::{Project, ProjectId, ProjectStat},
    user::User,
};

/// クリックトラッキング無効化ヘッダー名
///
/// 配信バックエンド（SendGrid）がリンクを計測用 URL に書き換えるのを止める。
pub const CLICK_TRACKING_HEADER_NAME: &str = "X-SMTPAPI";

/// クリックトラッキング無効化ヘッダー値
pub const CLICK_TRACKING_HEADER_VALUE: &str =
    r#"{ "filters" : { "clicktrack" : { "settings" : { "enable" : 0 } } } }"#;

/// テンプレート変数
pub type TemplateVars = serde_json::Map<String, serde_json::Value>;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// 送信先ユーザーの取得に失敗
    #[error("ユーザーの取得に失敗: {0}")]
    LookupFailed(String),
}

/// 通知種別
///
/// 文字列表現は既定のテンプレート名として使われる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
pub enum NotificationKind {
    /// 状態変化報告 → 運用者宛て
    #[strum(serialize = "project_status_change")]
    StatusChange,
    /// バッジ状態の更新 → オーナー宛て
    #[strum(serialize = "email_owner")]
    OwnerBadgeUpdate,
    /// 未取得プロジェクトへのリマインダー → オーナー宛て
    #[strum(serialize = "email_reminder_owner")]
    OwnerReminder,
    /// 送信したリマインダーの集計 → 運用者宛て
    #[strum(serialize = "report_reminder_summary")]
    ReminderSummary,
    /// 月次のバッジ取得告知 → 設定された宛先
    #[strum(serialize = "report_monthly_announcement")]
    MonthlyAnnouncement,
    /// プロジェクト新規登録のお知らせ → オーナー宛て
    #[strum(serialize = "email_new_project_owner")]
    OwnerNewProject,
    /// プロジェクト削除報告 → 運用者宛て
    #[strum(serialize = "report_project_deleted")]
    ProjectDeleted,
}

impl NotificationKind {
    /// オーナー宛ての通知かどうか
    pub fn is_owner_targeted(self) -> bool {
        matches!(
            self,
            Self::OwnerBadgeUpdate | Self::OwnerReminder | Self::OwnerNewProject
        )
    }
}

/// 通知イベント
///
/// ジョブから JSON で投入できるよう `kind` タグ付きでデシリアライズする。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// プロジェクトのバッジ状態が変化した
    StatusChange {
        project:    Project,
        old_status: String,
        new_status: String,
    },
    /// オーナーに新しいバッジ状態を知らせる
    OwnerBadgeUpdate {
        project:    Option<Project>,
        new_status: String,
    },
    /// バッジ未取得のまま放置されているプロジェクトのオーナーに催促する
    OwnerReminder { project: Option<Project> },
    /// リマインダーを送ったプロジェクトの一覧を報告する
    ReminderSummary { projects: Option<Vec<Project>> },
    /// 前月にバッジを取得したプロジェクトを告知する
    MonthlyAnnouncement {
        projects:             Vec<Project>,
        month:                String,
        prev_month_stat:      Option<ProjectStat>,
        prev_prev_month_stat: Option<ProjectStat>,
    },
    /// プロジェクトを登録したオーナーにお知らせする
    OwnerNewProject { project: Option<Project> },
    /// プロジェクトが削除されたことを報告する
    ProjectDeleted { project: Project, user: User },
}

impl NotificationEvent {
    /// 通知種別を返す
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::StatusChange { .. } => NotificationKind::StatusChange,
            Self::OwnerBadgeUpdate { .. } => NotificationKind::OwnerBadgeUpdate,
            Self::OwnerReminder { .. } => NotificationKind::OwnerReminder,
            Self::ReminderSummary { .. } => NotificationKind::ReminderSummary,
            Self::MonthlyAnnouncement { .. } => NotificationKind::MonthlyAnnouncement,
            Self::OwnerNewProject { .. } => NotificationKind::OwnerNewProject,
            Self::ProjectDeleted { .. } => NotificationKind::ProjectDeleted,
        }
    }
    /// 通知の対象となるプロジェクトの ID
    ///
    /// 複数のプロジェクトを扱う集計・告知や、プロジェクトまたは ID が欠けている場合は `None`。
    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            Self::StatusChange { project, .. } | Self::ProjectDeleted { project, .. } => project.id,
            Self::OwnerBadgeUpdate { project, .. }
            | Self::OwnerReminder { project }
            | Self::OwnerNewProject { project } => project.as_ref().and_then(|p| p.id),
            Self::ReminderSummary { .. } | Self::MonthlyAnnouncement { .. } => None,
        }
    }
}

/// メッセージエンベロープ
///
/// 宛先・件名・テンプレート・ヘッダー・テンプレート変数を保持する。
/// 生成時にクリックトラッキング無効化ヘッダーが必ず付与される。
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEnvelope {
    kind:     NotificationKind,
    to:       String,
    subject:  String,
    template: Option<String>,
    headers:  BTreeMap<String, String>,
    vars:     TemplateVars,
}

impl MessageEnvelope {
    pub fn new(
        kind: NotificationKind,
        to: impl Into<String>,
        subject: impl Into<String>,
        template: Option<String>,
        vars: TemplateVars,
    ) -> Self {
        let headers = BTreeMap::from([(
            CLICK_TRACKING_HEADER_NAME.to_string(),
            CLICK_TRACKING_HEADER_VALUE.to_string(),
        )]);

        Self {
            kind,
            to: to.into(),
            subject: subject.into(),
            template,
            headers,
            vars,
        }
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// 送信先メールアドレス
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// 明示的に指定されたテンプレート名
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// 使用するテンプレート名（未指定なら通知種別の既定名）
    pub fn template_name(&self) -> &str {
        let default: &'static str = self.kind.into();
        self.template.as_deref().unwrap_or(default)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn vars(&self) -> &TemplateVars {
        &self.vars
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
    /// 追加ヘッダー
    pub headers:   BTreeMap<String, String>,
}

/// 送信をスキップした理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
pub enum SkipReason {
    /// プロジェクト、その ID、オーナー ID のいずれかが欠けている
    #[strum(serialize = "invalid project reference")]
    InvalidProjectReference,
    /// オーナーがユーザーストアに存在しない
    #[strum(serialize = "user not found")]
    UserNotFound,
    /// オーナーのメールアドレスが空、または `@` を含まない
    #[strum(serialize = "no valid email")]
    NoValidEmail,
    /// 集計対象のプロジェクト一覧が渡されなかった
    #[strum(serialize = "no projects given")]
    NoProjects,
    /// 月次レポートの宛先が設定されていない
    #[strum(serialize = "no destination configured")]
    NoDestinationConfigured,
}

/// 通知の送信結果
#[derive(Debug)]
pub enum DispatchOutcome {
    /// 送信済み（送信したエンベロープを返す）
    Sent(MessageEnvelope),
    /// 前提条件を満たさないため送信しなかった
    Skipped(SkipReason),
    /// レンダリング・送信・ユーザー取得のいずれかで失敗した
    DeliveryFailed(NotificationError),
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    pub fn envelope(&self) -> Option<&MessageEnvelope> {
        match self {
            Self::Sent(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}
