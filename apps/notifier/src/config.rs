//! # Notifier 設定
//!
//! 環境変数から通知ジョブの設定を読み込む。
//! 起動時に一度だけ読み込み、以降は不変の値として各コンポーネントに渡す。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | ユーザーストア（PostgreSQL）接続 URL |
//! | `PUBLIC_HOSTNAME` | No | メール内リンクのホスト名（未設定時: `localhost`） |
//! | `REPORT_MONTHLY_EMAIL` | No | 月次レポートの宛先（未設定なら月次レポートは送らない） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` または `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元メールアドレス |

use std::{env, fmt::Display};

use crate::error::ConfigError;

/// `PUBLIC_HOSTNAME` 未設定時のホスト名
pub const DEFAULT_PUBLIC_HOSTNAME: &str = "localhost";

/// Notifier ジョブの設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// データベース接続 URL
    pub database_url: String,
    /// 通知内容に関わる設定
    pub dispatcher:   DispatcherConfig,
    /// 送信バックエンドの設定
    pub sender:       SenderConfig,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の変数ソースから設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            dispatcher: DispatcherConfig::new(
                lookup("PUBLIC_HOSTNAME"),
                lookup("REPORT_MONTHLY_EMAIL"),
            ),
            sender: SenderConfig::from_lookup(&lookup)?,
        })
    }
}

/// 通知内容に関わる設定
///
/// メール内リンクのホスト名と、月次レポートの宛先を保持する。
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfig {
    public_hostname:            Option<String>,
    monthly_report_destination: Option<String>,
}

impl DispatcherConfig {
    pub fn new(
        public_hostname: Option<String>,
        monthly_report_destination: Option<String>,
    ) -> Self {
        Self {
            public_hostname,
            monthly_report_destination,
        }
    }

    /// メール内リンクのホスト名
    ///
    /// 未設定の場合のみ `localhost` を返す。空文字列が設定されていればそのまま使う。
    pub fn public_hostname(&self) -> &str {
        self.public_hostname
            .as_deref()
            .unwrap_or(DEFAULT_PUBLIC_HOSTNAME)
    }

    /// 月次レポートの宛先
    ///
    /// 未設定、または空白のみの場合は `None`。
    pub fn monthly_report_destination(&self) -> Option<&str> {
        self.monthly_report_destination
            .as_deref()
            .filter(|destination| !destination.trim().is_empty())
    }

    /// プロジェクト詳細ページの URL
    ///
    /// 過去に送信したメールと同じ文字列になること。
    pub fn project_info_url(&self, id: impl Display) -> String {
        format!("https://{}/projects/{id}", self.public_hostname())
    }
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderBackend {
    /// SMTP サーバー経由で送信
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

impl SenderBackend {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "smtp" => Ok(Self::Smtp),
            "noop" => Ok(Self::Noop),
            other => Err(ConfigError::Invalid {
                name:  "NOTIFICATION_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

/// 送信バックエンドの設定
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub backend:      SenderBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// 送信元メールアドレス
    pub from_address: String,
}

impl SenderConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("NOTIFICATION_BACKEND") {
            Some(value) => SenderBackend::parse(&value)?,
            None => SenderBackend::Noop,
        };

        let smtp_port = match lookup("SMTP_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "SMTP_PORT",
                value,
            })?,
            None => 1025,
        };

        Ok(Self {
            backend,
            smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
            smtp_port,
            from_address: lookup("NOTIFICATION_FROM_ADDRESS")
                .unwrap_or_else(|| "noreply@bestpractices.example.org".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_project_info_urlはデフォルトでlocalhostを使う() {
        let config = DispatcherConfig::default();
        assert_eq!(config.project_info_url(42), "https://localhost/projects/42");
    }

    #[test]
    fn test_project_info_urlは設定されたホスト名を使う() {
        let config = DispatcherConfig::new(Some("www.bestpractices.dev".to_string()), None);
        assert_eq!(
            config.project_info_url(42),
            "https://www.bestpractices.dev/projects/42"
        );
    }

    #[test]
    fn test_空のホスト名は置き換えずにそのまま使う() {
        let config = DispatcherConfig::new(Some(String::new()), None);
        assert_eq!(config.project_info_url(1), "https:///projects/1");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some("announce@example.org"), Some("announce@example.org"))]
    fn test_monthly_report_destinationは空白のみなら未設定扱い(
        #[case] configured: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let config = DispatcherConfig::new(None, configured.map(str::to_string));
        assert_eq!(config.monthly_report_destination(), expected);
    }

    #[test]
    fn test_必須変数のみでデフォルト値が使われる() {
        let config =
            NotifierConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db")])).unwrap();

        assert_eq!(config.database_url, "postgres://db");
        assert_eq!(config.sender.backend, SenderBackend::Noop);
        assert_eq!(config.sender.smtp_host, "localhost");
        assert_eq!(config.sender.smtp_port, 1025);
        assert_eq!(config.dispatcher.public_hostname(), "localhost");
        assert_eq!(config.dispatcher.monthly_report_destination(), None);
    }

    #[test]
    fn test_database_url未設定はエラー() {
        let result = NotifierConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_全変数を読み込める() {
        let config = NotifierConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("PUBLIC_HOSTNAME", "www.bestpractices.dev"),
            ("REPORT_MONTHLY_EMAIL", "announce@example.org"),
            ("NOTIFICATION_BACKEND", "smtp"),
            ("SMTP_HOST", "smtp.sendgrid.net"),
            ("SMTP_PORT", "587"),
            ("NOTIFICATION_FROM_ADDRESS", "badgeapp@example.org"),
        ]))
        .unwrap();

        assert_eq!(config.sender.backend, SenderBackend::Smtp);
        assert_eq!(config.sender.smtp_host, "smtp.sendgrid.net");
        assert_eq!(config.sender.smtp_port, 587);
        assert_eq!(config.sender.from_address, "badgeapp@example.org");
        assert_eq!(config.dispatcher.public_hostname(), "www.bestpractices.dev");
        assert_eq!(
            config.dispatcher.monthly_report_destination(),
            Some("announce@example.org")
        );
    }

    #[rstest]
    #[case("NOTIFICATION_BACKEND", "ses")]
    #[case("SMTP_PORT", "not-a-port")]
    #[case("SMTP_PORT", "70000")]
    fn test_不正な値はinvalidエラー(#[case] name: &str, #[case] value: &str) {
        let result =
            NotifierConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db"), (name, value)]));

        assert!(
            matches!(&result, Err(ConfigError::Invalid { name: n, value: v }) if *n == name && v == value),
            "{result:?}"
        );
    }
}
