//! # Notifier ジョブ
//!
//! 標準入力から通知イベントを 1 件読み取り、メールを送信するジョブ。
//!
//! ## 役割
//!
//! - **前提条件の確認**: オーナー宛て通知はユーザーストアでオーナーを解決する
//! - **メール生成**: 埋め込みテンプレートから HTML/plaintext を生成する
//! - **メール送信**: SMTP リレー（本番は SendGrid、開発は Mailpit）または Noop
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `PUBLIC_HOSTNAME` | No | メール内リンクのホスト名（デフォルト: `localhost`） |
//! | `REPORT_MONTHLY_EMAIL` | No | 月次レポートの宛先 |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP リレー（デフォルト: `localhost:1025`） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元メールアドレス |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! echo '{"kind":"reminder_summary","projects":[]}' \
//!   | DATABASE_URL=postgres://... cargo run -p badgeapp-notifier
//! ```
//!
//! 送信に失敗した場合は非ゼロで終了する。スキップは正常終了として扱う。

use std::sync::Arc;

use anyhow::Context as _;
use badgeapp_domain::notification::{DispatchOutcome, NotificationEvent};
use badgeapp_infra::{
    db,
    notification::{NoopNotificationSender, NotificationSender, SmtpNotificationSender},
    repository::user_repository::PostgresUserRepository,
};
use badgeapp_notifier::{
    config::{NotifierConfig, SenderBackend},
    usecase::{NotificationDispatcher, TemplateRenderer},
};
use badgeapp_shared::observability::{TracingConfig, init_tracing};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("badgeapp-notifier");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing_config.root_span().entered();

    tracing::info!("通知ジョブを開始します");

    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    let sender: Arc<dyn NotificationSender> = match config.sender.backend {
        SenderBackend::Smtp => {
            tracing::info!(
                "SMTP で送信します: {}:{}",
                config.sender.smtp_host,
                config.sender.smtp_port
            );
            Arc::new(SmtpNotificationSender::new(
                &config.sender.smtp_host,
                config.sender.smtp_port,
                config.sender.from_address.clone(),
            ))
        }
        SenderBackend::Noop => {
            tracing::info!("Noop 送信（メールは送信されません）");
            Arc::new(NoopNotificationSender)
        }
    };

    let template_renderer =
        TemplateRenderer::new().context("テンプレートの初期化に失敗しました")?;

    let dispatcher = NotificationDispatcher::new(
        Arc::new(PostgresUserRepository::new(pool)),
        sender,
        template_renderer,
        config.dispatcher,
    );

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("標準入力の読み取りに失敗しました")?;
    let event: NotificationEvent =
        serde_json::from_str(&input).context("通知イベントの JSON が不正です")?;

    match dispatcher.dispatch(event).await {
        DispatchOutcome::Sent(envelope) => {
            tracing::info!("通知を送信しました: {}", envelope.subject());
            Ok(())
        }
        DispatchOutcome::Skipped(reason) => {
            tracing::info!("通知をスキップしました: {reason}");
            Ok(())
        }
        DispatchOutcome::DeliveryFailed(e) => Err(e).context("通知の送信に失敗しました"),
    }
}
