//! # Notifier ライブラリ
//!
//! バッジ認定に関する通知メールの組み立てと送信を公開する。
//! ジョブバイナリ（`main.rs`）と結合テストから利用する。

pub mod config;
pub mod error;
pub mod usecase;
