//! # リポジトリ実装
//!
//! 外部ストアが所有するエンティティの読み取りを提供する。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: 通知機能はユーザーを検索するだけで、書き込みは行わない
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod user_repository;

pub use user_repository::{PostgresUserRepository, UserRepository};
