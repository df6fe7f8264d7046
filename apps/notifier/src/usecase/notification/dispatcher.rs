//! # 通知ディスパッチャー
//!
//! 通知イベントから前提条件を確認してエンベロープを組み立て、
//! テンプレートレンダリング → メール送信 → 結果のログ記録を行う。
//!
//! ## 設計方針
//!
//! - **2 段階**: [`prepare`](NotificationDispatcher::prepare) でエンベロープを組み立て、
//!   [`deliver`](NotificationDispatcher::deliver) で描画・送信する
//! - **スキップはエラーではない**: 前提条件を満たさない場合は
//!   [`DispatchOutcome::Skipped`] を返し、理由をログに残す
//! - **再送しない**: 送信失敗は [`DispatchOutcome::DeliveryFailed`] としてそのまま返す
//! - **依存性注入**: `UserRepository` と `NotificationSender` は trait で抽象化

use std::sync::Arc;

use badgeapp_domain::{
    notification::{
        DispatchOutcome,
        MessageEnvelope,
        NotificationError,
        NotificationEvent,
        NotificationKind,
        SkipReason,
        TemplateVars,
    },
    project::Project,
};
use badgeapp_infra::{notification::NotificationSender, repository::UserRepository};
use badgeapp_shared::{
    event_log::{error, event},
    log_business_event,
};
use serde_json::{Value, json};

use super::TemplateRenderer;
use crate::config::DispatcherConfig;

/// 運用者向けレポートの宛先
pub const REPORT_EMAIL_DESTINATION: &str = "cii-badge-log@lists.coreinfrastructure.org";

/// エンベロープを組み立てられなかった理由
#[derive(Debug)]
pub enum NotPrepared {
    /// 前提条件を満たさない
    Skipped(SkipReason),
    /// ユーザーストアの参照に失敗した
    Failed(NotificationError),
}

impl From<NotPrepared> for DispatchOutcome {
    fn from(value: NotPrepared) -> Self {
        match value {
            NotPrepared::Skipped(reason) => Self::Skipped(reason),
            NotPrepared::Failed(e) => Self::DeliveryFailed(e),
        }
    }
}

/// 通知ディスパッチャー
///
/// 設定は生成時に受け取り、以降変更しない。
/// 内部に可変状態を持たないため、複数の通知を並行して処理できる。
pub struct NotificationDispatcher {
    user_repo: Arc<dyn UserRepository>,
    sender: Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    config: DispatcherConfig,
}

impl NotificationDispatcher {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            user_repo,
            sender,
            template_renderer,
            config,
        }
    }

    /// 通知イベントを処理する
    ///
    /// 結果は成功・スキップ・失敗のいずれもログに記録してから返す。
    /// 単一プロジェクトを対象とする通知では `event.entity_id` にプロジェクト ID を出力する。
    pub async fn dispatch(&self, event: NotificationEvent) -> DispatchOutcome {
        let kind = event.kind();
        let kind_str: &'static str = kind.into();
        let owner_targeted = kind.is_owner_targeted();
        let project_id = event.project_id().map(|id| id.as_i64());

        let outcome = match self.prepare(event).await {
            Ok(envelope) => self.deliver(envelope).await,
            Err(not_prepared) => not_prepared.into(),
        };

        match &outcome {
            DispatchOutcome::Sent(envelope) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::PROJECT,
                    event.entity_id = project_id,
                    event.result = event::result::SUCCESS,
                    notification.kind = kind_str,
                    notification.owner_targeted = owner_targeted,
                    notification.recipient = %envelope.to(),
                    notification.template = %envelope.template_name(),
                    "通知メール送信成功"
                );
            }
            DispatchOutcome::Skipped(reason) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SKIPPED,
                    event.entity_type = event::entity_type::PROJECT,
                    event.entity_id = project_id,
                    event.result = event::result::SKIPPED,
                    notification.kind = kind_str,
                    notification.owner_targeted = owner_targeted,
                    notification.skip_reason = %reason,
                    "通知メール送信をスキップ"
                );
            }
            DispatchOutcome::DeliveryFailed(e) => {
                let (category, error_kind) = error_context(e);
                tracing::error!(
                    error.category = category,
                    error.kind = error_kind,
                    notification.kind = kind_str,
                    "通知メール送信に失敗: {e}"
                );
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::PROJECT,
                    event.entity_id = project_id,
                    event.result = event::result::FAILURE,
                    notification.kind = kind_str,
                    notification.owner_targeted = owner_targeted,
                    error = %e,
                    "通知メール送信失敗"
                );
            }
        }

        outcome
    }

    /// 通知イベントからエンベロープを組み立てる
    ///
    /// オーナー宛ての通知では、プロジェクトの参照 → ユーザーの存在 → メールアドレスの順に
    /// 前提条件を確認する。送信は行わない。
    pub async fn prepare(&self, event: NotificationEvent) -> Result<MessageEnvelope, NotPrepared> {
        let kind = event.kind();

        let envelope = match event {
            NotificationEvent::StatusChange {
                project,
                old_status,
                new_status,
            } => {
                let id = project.display_id();
                let project_info_url = self.config.project_info_url(&id);
                MessageEnvelope::new(
                    kind,
                    REPORT_EMAIL_DESTINATION,
                    format!("Project {id} status change to passing={new_status}"),
                    None,
                    template_vars([
                        ("project", json!(project)),
                        ("old_status", json!(old_status)),
                        ("new_status", json!(new_status)),
                        ("project_info_url", json!(project_info_url)),
                    ]),
                )
            }
            NotificationEvent::OwnerBadgeUpdate {
                project,
                new_status,
            } => {
                let (to, vars) = self.resolve_owner(kind, project).await?.into_parts();
                let subject = if new_status == "passing" {
                    "CONGRATULATIONS on achieving a passing best practices badge!"
                } else {
                    "Your best practices badge is no longer passing"
                };
                MessageEnvelope::new(kind, to, subject, Some(new_status), vars)
            }
            NotificationEvent::OwnerReminder { project } => {
                let (to, vars) = self.resolve_owner(kind, project).await?.into_parts();
                MessageEnvelope::new(
                    kind,
                    to,
                    r#"Your project does not yet have the "best practices" badge"#,
                    None,
                    vars,
                )
            }
            NotificationEvent::ReminderSummary { projects } => {
                let Some(projects) = projects else {
                    return Err(NotPrepared::Skipped(SkipReason::NoProjects));
                };
                MessageEnvelope::new(
                    kind,
                    REPORT_EMAIL_DESTINATION,
                    "Summary of reminders sent",
                    None,
                    template_vars([("projects", json!(projects))]),
                )
            }
            NotificationEvent::MonthlyAnnouncement {
                projects,
                month,
                prev_month_stat,
                prev_prev_month_stat,
            } => {
                let Some(destination) = self.config.monthly_report_destination() else {
                    return Err(NotPrepared::Skipped(SkipReason::NoDestinationConfigured));
                };
                MessageEnvelope::new(
                    kind,
                    destination,
                    "Projects that received badges (monthly summary)",
                    None,
                    template_vars([
                        ("projects", json!(projects)),
                        ("month", json!(month)),
                        ("prev_month_stat", json!(prev_month_stat)),
                        ("prev_prev_month_stat", json!(prev_prev_month_stat)),
                    ]),
                )
            }
            NotificationEvent::OwnerNewProject { project } => {
                let (to, vars) = self.resolve_owner(kind, project).await?.into_parts();
                MessageEnvelope::new(
                    kind,
                    to,
                    "You added a project to the Best Practices Badging Program",
                    None,
                    vars,
                )
            }
            NotificationEvent::ProjectDeleted { project, user } => MessageEnvelope::new(
                kind,
                REPORT_EMAIL_DESTINATION,
                format!(
                    "Project {} named {} was deleted",
                    project.display_id(),
                    project.name
                ),
                None,
                template_vars([("project", json!(project)), ("user", json!(user))]),
            ),
        };

        Ok(envelope)
    }

    /// エンベロープを描画して送信する
    pub async fn deliver(&self, envelope: MessageEnvelope) -> DispatchOutcome {
        let email = match self.template_renderer.render(&envelope) {
            Ok(email) => email,
            Err(e) => return DispatchOutcome::DeliveryFailed(e),
        };

        match self.sender.send_email(&email).await {
            Ok(()) => DispatchOutcome::Sent(envelope),
            Err(e) => DispatchOutcome::DeliveryFailed(e),
        }
    }

    /// オーナー宛て通知の送信先を解決する
    async fn resolve_owner(
        &self,
        kind: NotificationKind,
        project: Option<Project>,
    ) -> Result<Owner, NotPrepared> {
        let Some((project, (project_id, user_id))) =
            project.and_then(|p| p.owner_reference().map(|reference| (p, reference)))
        else {
            return Err(NotPrepared::Skipped(SkipReason::InvalidProjectReference));
        };

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await
            .map_err(|e| {
                tracing::debug!(
                    notification.kind = %kind,
                    user_id = %user_id,
                    "オーナーの取得に失敗"
                );
                NotPrepared::Failed(NotificationError::LookupFailed(e.to_string()))
            })?
            .ok_or(NotPrepared::Skipped(SkipReason::UserNotFound))?;

        let email = user
            .deliverable_email()
            .ok_or(NotPrepared::Skipped(SkipReason::NoValidEmail))?
            .to_string();

        Ok(Owner {
            project_info_url: self.config.project_info_url(project_id),
            project,
            email,
        })
    }
}

/// 前提条件を満たしたオーナー宛て通知の送信先
struct Owner {
    project:          Project,
    email:            String,
    project_info_url: String,
}

impl Owner {
    /// 宛先とテンプレート変数に分解する
    fn into_parts(self) -> (String, TemplateVars) {
        let vars = template_vars([
            ("project", json!(self.project)),
            ("project_info_url", json!(self.project_info_url)),
        ]);
        (self.email, vars)
    }
}

fn template_vars<const N: usize>(vars: [(&str, Value); N]) -> TemplateVars {
    vars.into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// 失敗内容に対応するエラーカテゴリとエラー種別
fn error_context(e: &NotificationError) -> (&'static str, &'static str) {
    match e {
        NotificationError::LookupFailed(_) => {
            (error::category::INFRASTRUCTURE, error::kind::USER_LOOKUP)
        }
        NotificationError::TemplateFailed(_) => (error::category::INTERNAL, error::kind::TEMPLATE),
        NotificationError::SendFailed(_) => {
            (error::category::EXTERNAL_SERVICE, error::kind::MAIL_DELIVERY)
        }
    }
}
