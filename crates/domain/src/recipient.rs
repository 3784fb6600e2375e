//! # 送信先プロファイル
//!
//! アイデアの送信先は「プライベート」と「ビジネス」の 2 つに固定されている。
//! 各プロファイルのメールアドレスは起動時に [`RecipientBook`] として読み込む。
//!
//! キーボードショートカットは常に既定のプロファイル（[`RecipientProfile::Private`]）
//! に送信する。既定値を設定で変える仕組みは持たない。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// 送信先プロファイル
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecipientProfile {
    /// プライベート（既定、ショートカットの送信先）
    #[default]
    Private,
    /// ビジネス
    Business,
}

impl RecipientProfile {
    /// 送信ボタンのラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Private => "Privé",
            Self::Business => "Zakelijk",
        }
    }
}

/// プロファイルごとの送信先アドレス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientBook {
    private:  String,
    business: String,
}

impl RecipientBook {
    pub fn new(private: impl Into<String>, business: impl Into<String>) -> Self {
        Self {
            private:  private.into(),
            business: business.into(),
        }
    }

    /// プロファイルに対応するアドレスを返す
    pub fn address(&self, profile: RecipientProfile) -> &str {
        match profile {
            RecipientProfile::Private => &self.private,
            RecipientProfile::Business => &self.business,
        }
    }
}
