//! # コンポーザー設定
//!
//! ゲートウェイの URL と、送信先プロファイルごとのアドレスを環境変数から読み込む。

use std::env;

use ideecatcher_domain::recipient::RecipientBook;
use thiserror::Error;

/// ゲートウェイ URL の既定値
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),
}

/// コンポーザーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    /// ゲートウェイのベース URL
    pub gateway_url: String,
    /// 送信先アドレス
    pub recipients:  RecipientBook,
}

impl ComposerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let private = required("IDEA_PRIVATE_EMAIL")?;
        let business = required("IDEA_BUSINESS_EMAIL")?;

        Ok(Self {
            gateway_url: lookup("GATEWAY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            recipients:  RecipientBook::new(private, business),
        })
    }
}
