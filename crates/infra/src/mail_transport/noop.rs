//! Noop メール送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! SMTP サーバーなしでゲートウェイを動かすときに使用する。

use async_trait::async_trait;
use ideecatcher_domain::mail::{MailCredentials, MailError, OutgoingMail};

use super::MailTransport;

/// Noop メール送信（ログ出力のみ）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMailTransport;

#[async_trait]
impl MailTransport for NoopMailTransport {
    async fn send(
        &self,
        _credentials: &MailCredentials,
        mail: &OutgoingMail,
    ) -> Result<(), MailError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sendがエラーを返さない() {
        let credentials =
            MailCredentials::from_parts(Some("ideas@gmail.com".into()), Some("secret".into()))
                .unwrap();
        let mail = OutgoingMail::from_account(&credentials, "me@example.com", "件名", "本文");

        let result = NoopMailTransport.send(&credentials, &mail).await;

        assert!(result.is_ok());
    }
}
