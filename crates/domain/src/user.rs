//! # ユーザー
//!
//! プロジェクトのオーナーとなるユーザーの読み取り用モデル。
//!
//! メールアドレスは外部ストアに保存されている値をそのまま保持する。
//! 送信可否の判定は [`User::deliverable_email`] の構文チェックのみで行い、
//! 生成時のバリデーションはしない（不正な値のレコードも読み込めるようにする）。

use serde::{Deserialize, Serialize};

define_i64_id! {
    /// ユーザー ID
    pub struct UserId;
}

/// ユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id:    UserId,
    /// メールアドレス（未登録の場合は `None`）
    pub email: Option<String>,
}

impl User {
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// 送信先として使えるメールアドレスを返す
    ///
    /// 空でなく `@` を含む場合のみ `Some` を返す。
    /// アドレスとしての妥当性は検証しない。
    pub fn deliverable_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .filter(|email| !email.is_empty() && email.contains('@'))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("owner@example.com"), Some("owner@example.com"))]
    #[case(Some("@"), Some("@"))]
    #[case(Some("not-an-address@"), Some("not-an-address@"))]
    #[case(Some("owner.example.com"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_deliverable_emailは空でなくアットマークを含む場合のみ返す(
        #[case] email: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let user = User::new(UserId::new(1), email.map(str::to_string));
        assert_eq!(user.deliverable_email(), expected);
    }
}
