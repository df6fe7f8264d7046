//! # 通知ユースケース
//!
//! 通知イベントに伴うメールの組み立て・レンダリング・送信を統合する。
//!
//! ## モジュール構成
//!
//! - [`dispatcher`] - 前提条件の検証、エンベロープ生成、送信の統合
//! - [`template_renderer`] - tera テンプレートエンジンによるメール本文の生成

pub mod dispatcher;
pub mod template_renderer;

pub use dispatcher::{NotPrepared, NotificationDispatcher, REPORT_EMAIL_DESTINATION};
pub use template_renderer::TemplateRenderer;
