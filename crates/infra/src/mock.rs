//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! badgeapp-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use badgeapp_domain::{
    notification::{EmailMessage, NotificationError},
    user::{User, UserId},
};

use crate::{error::InfraError, notification::NotificationSender, repository::UserRepository};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:       Arc<Mutex<Vec<User>>>,
    lookups:     Arc<Mutex<Vec<UserId>>>,
    fail_lookup: bool,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常にデータベースエラーを返すリポジトリ
    pub fn failing() -> Self {
        Self {
            fail_lookup: true,
            ..Self::default()
        }
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    /// `find_by_id` に渡された ID の履歴
    pub fn lookups(&self) -> Vec<UserId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        self.lookups.lock().unwrap().push(*id);

        if self.fail_lookup {
            return Err(InfraError::unexpected("モック: ユーザー検索失敗"));
        }

        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id)
            .cloned())
    }
}

// ===== MockNotificationSender =====

#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:      Arc<Mutex<Vec<EmailMessage>>>,
    fail_send: bool,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信失敗を返すセンダー
    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    /// 送信に成功したメールの一覧
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if self.fail_send {
            return Err(NotificationError::SendFailed(
                "モック: SMTP 接続失敗".to_string(),
            ));
        }

        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn mock_user_repositoryは登録済みユーザーを返す() {
        let repo = MockUserRepository::new();
        repo.add_user(User::new(UserId::new(1), Some("a@example.com".to_string())));

        let found = repo.find_by_id(&UserId::new(1)).await.unwrap();
        let missing = repo.find_by_id(&UserId::new(2)).await.unwrap();

        assert_eq!(found.map(|u| u.id), Some(UserId::new(1)));
        assert!(missing.is_none());
        assert_eq!(repo.lookups(), vec![UserId::new(1), UserId::new(2)]);
    }

    #[tokio::test]
    async fn mock_notification_senderは失敗時に記録しない() {
        let sender = MockNotificationSender::failing();
        let email = EmailMessage {
            to:        "a@example.com".to_string(),
            subject:   "s".to_string(),
            html_body: String::new(),
            text_body: String::new(),
            headers:   BTreeMap::new(),
        };

        assert!(sender.send_email(&email).await.is_err());
        assert!(sender.sent_emails().is_empty());
    }
}
