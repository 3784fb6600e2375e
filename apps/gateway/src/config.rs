//! # Gateway 設定
//!
//! 環境変数からゲートウェイの設定を読み込む。
//!
//! 起動時に 1 度だけ読み込み、以降は [`GatewayConfig`] を明示的に受け渡す。
//! ハンドラが環境変数を直接参照することはない。
//!
//! メール認証情報（`GMAIL_USER` / `GMAIL_APP_PASSWORD`）が未設定でも起動は失敗しない。
//! 未設定は送信リクエストごとに設定不備（500）として報告する。

use std::env;

use ideecatcher_domain::mail::MailCredentials;
use ideecatcher_infra::SmtpSecurity;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 値の形式が不正
    #[error("{name} の値が不正です: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Gateway サーバーの設定
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// バインドアドレス
    pub host:        String,
    /// ポート番号
    pub port:        u16,
    /// メール認証情報（未設定なら `None`）
    pub credentials: Option<MailCredentials>,
    /// メール送信の設定
    pub mail:        MailConfig,
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailBackend {
    /// SMTP 経由で送信
    #[default]
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// メール送信の設定
///
/// `MAIL_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `smtp`: SMTP サーバー経由で送信（既定、Gmail）
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub backend:       MailBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:     String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:     u16,
    /// STARTTLS を使うかどうか
    pub smtp_security: SmtpSecurity,
}

impl GatewayConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストでプロセスの環境変数を汚さずに検証するために使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:        lookup("GATEWAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:        parse_port("GATEWAY_PORT", lookup("GATEWAY_PORT"), 3000)?,
            credentials: MailCredentials::from_parts(
                lookup("GMAIL_USER"),
                lookup("GMAIL_APP_PASSWORD"),
            ),
            mail:        MailConfig::from_lookup(&lookup)?,
        })
    }
}

impl MailConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("MAIL_BACKEND").as_deref() {
            None | Some("smtp") => MailBackend::Smtp,
            Some("noop") => MailBackend::Noop,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name:  "MAIL_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let smtp_security = match lookup("SMTP_STARTTLS") {
            None => SmtpSecurity::StartTls,
            Some(v) if v.eq_ignore_ascii_case("true") => SmtpSecurity::StartTls,
            Some(v) if v.eq_ignore_ascii_case("false") => SmtpSecurity::None,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name:  "SMTP_STARTTLS",
                    value: other,
                });
            }
        };

        Ok(Self {
            backend,
            smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: parse_port("SMTP_PORT", lookup("SMTP_PORT"), 587)?,
            smtp_security,
        })
    }
}

fn parse_port(name: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: v }),
    }
}
