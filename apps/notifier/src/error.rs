//! # Notifier エラー定義
//!
//! 起動時の設定読み込みで発生するエラーを定義する。
//! 通知の送信結果は [`DispatchOutcome`](badgeapp_domain::notification::DispatchOutcome)
//! で表現し、ここでは扱わない。

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が設定されていない
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("{name} の値が不正です: {value}")]
    Invalid {
        name:  &'static str,
        value: String,
    },
}
