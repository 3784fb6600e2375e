//! # 送信リクエストと送信結果
//!
//! コンポーザーがゲートウェイへ送る [`DispatchRequest`] と、
//! ゲートウェイ呼び出しの結果である [`DispatchResult`] を定義する。
//!
//! ## 設計方針
//!
//! - **送信ごとに新規作成**: リクエストは送信試行ごとに組み立て、作成後は変更しない
//! - **永続化しない**: 送信したアイデアはどこにも保存しない
//! - **結果は 1 回だけ消費**: 結果はコンポーザーがフィードバックを導出するために 1 度だけ使う

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{composition::NonBlankText, timestamp::format_timestamp};

/// 送信メールの件名（固定）
pub const EMAIL_SUBJECT: &str = "Nieuw idee";

/// 本文末尾の送信日時の見出し
pub const SENT_AT_LABEL: &str = "Verzonden op";

/// 送信リクエスト
///
/// ゲートウェイの `POST` ボディとしてそのまま JSON にシリアライズされる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    recipient: String,
    subject:   String,
    body:      String,
}

impl DispatchRequest {
    /// 送信リクエストを組み立てる
    ///
    /// 本文は「trim 済みテキスト + 空行 + 送信日時」。
    pub fn compose<Tz>(
        recipient: impl Into<String>,
        text: &NonBlankText,
        sent_at: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            recipient: recipient.into(),
            subject:   EMAIL_SUBJECT.to_string(),
            body:      format!("{text}\n\n{SENT_AT_LABEL}: {}", format_timestamp(sent_at)),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// 送信結果の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success,
    Failure,
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub outcome: DispatchOutcome,
    /// 人が読めるメッセージ（ゲートウェイの応答、または失敗理由）
    pub message: String,
}

impl DispatchResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            outcome: DispatchOutcome::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: DispatchOutcome::Failure,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == DispatchOutcome::Success
    }
}
