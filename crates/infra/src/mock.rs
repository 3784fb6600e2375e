//! # テスト用モックトランスポート
//!
//! 送信したメールをメモリに記録するモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! ideecatcher-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ideecatcher_domain::mail::{MailCredentials, MailError, OutgoingMail};

use crate::mail_transport::MailTransport;

// ===== MockMailTransport =====

/// 送信内容を記録するモック
///
/// `clone()` した値は記録を共有するため、テスト側で 1 つ保持して検証に使う。
#[derive(Debug, Clone, Default)]
pub struct MockMailTransport {
    sent:     Arc<Mutex<Vec<OutgoingMail>>>,
    attempts: Arc<Mutex<usize>>,
    failure:  Option<String>,
}

impl MockMailTransport {
    /// 常に成功するモック
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に `SendFailed` を返すモック
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// 送信に成功したメール
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }

    /// 成否を問わず `send` が呼ばれた回数
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(
        &self,
        _credentials: &MailCredentials,
        mail: &OutgoingMail,
    ) -> Result<(), MailError> {
        *self.attempts.lock().unwrap() += 1;

        if let Some(reason) = &self.failure {
            return Err(MailError::SendFailed(reason.clone()));
        }

        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}
