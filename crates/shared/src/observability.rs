//! # Observability 基盤
//!
//! 通知ジョブのログ出力を初期化する。
//!
//! - 出力形式は `LOG_FORMAT`（`json` / `pretty`）で選ぶ
//! - ログレベルは `RUST_LOG` で上書きできる（未設定時は [`DEFAULT_LOG_FILTER`]）
//! - ジョブ全体を [`TracingConfig::root_span`] の中で実行し、すべてのログに `service` を付ける

use tracing::Span;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,badgeapp=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON（ログ基盤への取り込み用）
    Json,
    /// 端末向け
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値から出力形式を決める
    ///
    /// 未設定なら `Pretty`。不正な値も `Pretty` として扱い、stderr に警告を出す。
    /// subscriber の初期化前に呼ばれるため、警告に tracing は使えない。
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("json") => Self::Json,
            Some("pretty") | None => Self::Pretty,
            Some(other) => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    pub fn from_env() -> Self {
        Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// トレーシング設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// ルートスパンの `service` フィールドに出力する名前
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// `LOG_FORMAT` から出力形式を読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }

    /// `service` フィールド付きのルートスパン
    ///
    /// `entered()` したガードを `main` の終わりまで保持する。
    pub fn root_span(&self) -> Span {
        tracing::info_span!("app", service = %self.service_name)
    }
}

/// グローバル subscriber を登録する
///
/// JSON 形式ではイベントのフィールドをトップレベルに展開し、
/// 現在のスパン（`service` を含む）を `span` キーに出力する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
