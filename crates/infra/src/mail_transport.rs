//! # メール送信
//!
//! メール送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailTransport` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（Gmail など）、Noop（ローカル開発用）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択
//! - **認証情報は呼び出しごとに渡す**: 認証情報の有無はゲートウェイが判定する

mod noop;
mod smtp;

use async_trait::async_trait;
use ideecatcher_domain::mail::{MailCredentials, MailError, OutgoingMail};
pub use noop::NoopMailTransport;
pub use smtp::{SmtpMailTransport, SmtpSecurity};

/// メール送信トレイト
///
/// 送信の成否だけを返す。失敗理由はログ用であり、呼び出し元の利用者には返さないこと。
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// メールを送信する
    async fn send(
        &self,
        credentials: &MailCredentials,
        mail: &OutgoingMail,
    ) -> Result<(), MailError>;
}
