//! # ユースケース層
//!
//! Notifier のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと送信バックエンドを `Arc<dyn Trait>` で外部から注入
//!
//! ## モジュール構成
//!
//! - `notification`: 通知イベントからメールを組み立てて送信する

pub mod notification;

pub use notification::{NotificationDispatcher, TemplateRenderer};
