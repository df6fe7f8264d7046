//! # UserRepository
//!
//! プロジェクトのオーナーを ID で検索するリポジトリ。
//!
//! ## 設計方針
//!
//! - **素のメールアドレスを返す**: `users.email` は NULL や不正な値も含めてそのまま返し、
//!   送信可否の判定はユースケース層に任せる
//! - **実行時クエリ**: `sqlx::query_as` でタプルにマッピングする

use async_trait::async_trait;
use badgeapp_domain::user::{User, UserId};
use sqlx::PgPool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ID でユーザーを検索
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        let row: Option<(i64, Option<String>)> = sqlx::query_as(
            r#"
            SELECT id, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, email)| User::new(UserId::new(id), email)))
    }
}
