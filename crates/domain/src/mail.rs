//! # メール
//!
//! ゲートウェイがメールトランスポートに渡すメッセージと、送信に必要な認証情報を定義する。
//!
//! ## 設計方針
//!
//! - **認証情報は起動時に 1 度だけ読み込む**: ハンドラ内で環境変数を参照しない
//! - **未設定は設定不備**: 値が無い・空文字のどちらも「未設定」として扱う
//! - **秘密は出力しない**: `Debug` でアプリパスワードを伏せる

use std::fmt;

use thiserror::Error;

/// 送信元の表示名
pub const SENDER_DISPLAY_NAME: &str = "Idee Catcher";

/// メール送信エラー
#[derive(Debug, Error)]
pub enum MailError {
    /// アドレスの形式が不正
    #[error("メールアドレスが不正: {0}")]
    InvalidAddress(String),

    /// メッセージの構築に失敗
    #[error("メッセージ構築に失敗: {0}")]
    BuildFailed(String),

    /// 送信に失敗（ネットワーク・認証・クォータなど）
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// メールアカウントの認証情報
#[derive(Clone, PartialEq, Eq)]
pub struct MailCredentials {
    user:         String,
    app_password: String,
}

impl MailCredentials {
    /// 両方の値が揃っている場合のみ作成する
    ///
    /// どちらかが未設定または空文字なら `None`（設定不備）。
    pub fn from_parts(user: Option<String>, app_password: Option<String>) -> Option<Self> {
        let user = user.filter(|v| !v.is_empty())?;
        let app_password = app_password.filter(|v| !v.is_empty())?;
        Some(Self { user, app_password })
    }

    /// アカウント（送信元アドレスを兼ねる）
    pub fn user(&self) -> &str {
        &self.user
    }

    /// アプリケーション用パスワード
    pub fn app_password(&self) -> &str {
        &self.app_password
    }
}

impl fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailCredentials")
            .field("user", &self.user)
            .field("app_password", &"[REDACTED]")
            .finish()
    }
}

/// 送信メール
///
/// ゲートウェイで組み立て、`MailTransport` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// 送信元の表示名
    pub from_name:    String,
    /// 送信元アドレス
    pub from_address: String,
    /// 送信先アドレス
    pub to:           String,
    /// 件名
    pub subject:      String,
    /// プレーンテキスト本文
    pub text:         String,
}

impl OutgoingMail {
    /// アカウントのアドレスを送信元として作成する
    pub fn from_account(
        credentials: &MailCredentials,
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            from_name:    SENDER_DISPLAY_NAME.to_string(),
            from_address: credentials.user().to_string(),
            to:           to.into(),
            subject:      subject.into(),
            text:         text.into(),
        }
    }

    /// `"表示名" <アドレス>` 形式の送信元
    pub fn from_header(&self) -> String {
        format!("\"{}\" <{}>", self.from_name, self.from_address)
    }
}
