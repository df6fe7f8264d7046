//! # BadgeApp 共有ユーティリティ
//!
//! 各クレートで共通に使うログ関連のユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, notifier）から依存されうる
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える（subscriber は feature で有効化）

pub mod event_log;
pub mod observability;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
