//! # BadgeApp ドメイン層
//!
//! バッジ認定アプリケーションの通知機能で扱うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **外部所有のエンティティ**: プロジェクトとユーザーは外部ストアが所有し、
//!   このクレートでは読み取り専用の表現のみを持つ
//! - **通知イベントは enum**: 各バリアントが 1 種類のメール送信契機に対応
//! - **インフラ非依存**: DB やメール送信の詳細には一切依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//!       ↘             ↑
//!         ────────────
//! ```
//!
//! ## モジュール構成
//!
//! - [`project`] - プロジェクトと月次統計
//! - [`user`] - プロジェクトのオーナーとなるユーザー
//! - [`notification`] - 通知イベント、メッセージエンベロープ、送信結果
//!
//! ## 使用例
//!
//! ```rust
//! use badgeapp_domain::project::{Project, ProjectId};
//!
//! let project = Project::new(Some(ProjectId::new(42)), "curl", None);
//! assert_eq!(project.display_id(), "42");
//! ```

#[macro_use]
mod macros;

pub mod notification;
pub mod project;
pub mod user;
