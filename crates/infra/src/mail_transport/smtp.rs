//! SMTP メール送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 本番では Gmail（`smtp.gmail.com:587`、STARTTLS + アプリパスワード）に接続する。
//! 開発環境では TLS なしで Mailpit などのローカル SMTP サーバーにも接続できる。

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use ideecatcher_domain::mail::{MailCredentials, MailError, OutgoingMail};
use lettre::{
    Address,
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::MailTransport;

/// SMTP 接続のセキュリティ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// STARTTLS で暗号化する
    #[default]
    StartTls,
    /// 暗号化しない（ローカル SMTP 向け）
    None,
}

/// SMTP メール送信
///
/// トランスポートは認証情報ごとに 1 度だけ構築し、以降の送信で使い回す。
/// 起動時に認証情報が分かっていれば [`SmtpMailTransport::connect_with`] で先に構築しておく。
pub struct SmtpMailTransport {
    host:     String,
    port:     u16,
    security: SmtpSecurity,
    built:    Mutex<Option<BuiltTransport>>,
}

struct BuiltTransport {
    credentials: MailCredentials,
    transport:   AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "smtp.gmail.com"）
    /// - `port`: SMTP サーバーのポート番号（例: 587）
    /// - `security`: STARTTLS を使うかどうか
    pub fn new(host: impl Into<String>, port: u16, security: SmtpSecurity) -> Self {
        Self {
            host: host.into(),
            port,
            security,
            built: Mutex::new(None),
        }
    }

    /// 認証情報を使うトランスポートを先に構築する
    pub fn connect_with(self, credentials: &MailCredentials) -> Result<Self, MailError> {
        let transport = self.build(credentials)?;
        *self.lock() = Some(BuiltTransport {
            credentials: credentials.clone(),
            transport,
        });
        Ok(self)
    }

    fn lock(&self) -> MutexGuard<'_, Option<BuiltTransport>> {
        self.built.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 構築済みのトランスポートを返す。認証情報が違えば作り直す
    fn transport_for(
        &self,
        credentials: &MailCredentials,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let mut built = self.lock();
        if let Some(existing) = built.as_ref().filter(|b| &b.credentials == credentials) {
            return Ok(existing.transport.clone());
        }

        let transport = self.build(credentials)?;
        *built = Some(BuiltTransport {
            credentials: credentials.clone(),
            transport:   transport.clone(),
        });
        Ok(transport)
    }

    fn build(
        &self,
        credentials: &MailCredentials,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let builder = match self.security {
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
                    .map_err(|e| MailError::SendFailed(format!("SMTP 接続設定に失敗: {e}")))?
            }
            // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host),
        };

        Ok(builder
            .port(self.port)
            .credentials(Credentials::new(
                credentials.user().to_string(),
                credentials.app_password().to_string(),
            ))
            .build())
    }
}

/// 送信メールを lettre のメッセージに変換する
fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    let from_address: Address = mail
        .from_address
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("送信元アドレス不正: {e}")))?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("宛先アドレス不正: {e}")))?;

    Message::builder()
        .from(Mailbox::new(Some(mail.from_name.clone()), from_address))
        .to(to)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.text.clone())
        .map_err(|e| MailError::BuildFailed(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(
        &self,
        credentials: &MailCredentials,
        mail: &OutgoingMail,
    ) -> Result<(), MailError> {
        let message = build_message(mail)?;

        self.transport_for(credentials)?
            .send(message)
            .await
            .map_err(|e| MailError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}
