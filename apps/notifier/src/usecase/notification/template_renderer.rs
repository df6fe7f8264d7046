//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **テンプレート名**: エンベロープの [`MessageEnvelope::template_name`] に
//!   `.html` / `.txt` を付けたものを使う
//! - **変数はエンベロープが持つ**: 件名や変数の組み立ては
//!   [`NotificationDispatcher`](super::NotificationDispatcher) 側で行い、ここでは描画のみ

use badgeapp_domain::notification::{EmailMessage, MessageEnvelope, NotificationError};
use tera::{Context, Tera};

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`MessageEnvelope` から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "project_status_change.html",
                    include_str!("../../../templates/notifications/project_status_change.html"),
                ),
                (
                    "project_status_change.txt",
                    include_str!("../../../templates/notifications/project_status_change.txt"),
                ),
                (
                    "passing.html",
                    include_str!("../../../templates/notifications/passing.html"),
                ),
                (
                    "passing.txt",
                    include_str!("../../../templates/notifications/passing.txt"),
                ),
                (
                    "in_progress.html",
                    include_str!("../../../templates/notifications/in_progress.html"),
                ),
                (
                    "in_progress.txt",
                    include_str!("../../../templates/notifications/in_progress.txt"),
                ),
                (
                    "email_reminder_owner.html",
                    include_str!("../../../templates/notifications/email_reminder_owner.html"),
                ),
                (
                    "email_reminder_owner.txt",
                    include_str!("../../../templates/notifications/email_reminder_owner.txt"),
                ),
                (
                    "report_reminder_summary.html",
                    include_str!("../../../templates/notifications/report_reminder_summary.html"),
                ),
                (
                    "report_reminder_summary.txt",
                    include_str!("../../../templates/notifications/report_reminder_summary.txt"),
                ),
                (
                    "report_monthly_announcement.html",
                    include_str!(
                        "../../../templates/notifications/report_monthly_announcement.html"
                    ),
                ),
                (
                    "report_monthly_announcement.txt",
                    include_str!(
                        "../../../templates/notifications/report_monthly_announcement.txt"
                    ),
                ),
                (
                    "email_new_project_owner.html",
                    include_str!("../../../templates/notifications/email_new_project_owner.html"),
                ),
                (
                    "email_new_project_owner.txt",
                    include_str!("../../../templates/notifications/email_new_project_owner.txt"),
                ),
                (
                    "report_project_deleted.html",
                    include_str!("../../../templates/notifications/report_project_deleted.html"),
                ),
                (
                    "report_project_deleted.txt",
                    include_str!("../../../templates/notifications/report_project_deleted.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// エンベロープからメールメッセージを生成する
    ///
    /// 宛先・件名・ヘッダーはエンベロープの値をそのまま引き継ぐ。
    /// 該当するテンプレートが登録されていない場合は `TemplateFailed` を返す。
    pub fn render(&self, envelope: &MessageEnvelope) -> Result<EmailMessage, NotificationError> {
        let template_name = envelope.template_name();
        let context = Context::from_serialize(envelope.vars())
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: envelope.to().to_string(),
            subject: envelope.subject().to_string(),
            html_body,
            text_body,
            headers: envelope.headers().clone(),
        })
    }
}
