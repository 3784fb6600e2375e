//! # メッセージレスポンス
//!
//! ゲートウェイが返す全レスポンスの共通ボディ `{"message": "..."}` を提供する。
//!
//! ## 設計
//!
//! - `MessageResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はゲートウェイの責務（shared に axum 依存を入れない）
//! - ゲートウェイが返しうるメッセージは固定集合のため、定数と便利コンストラクタで提供する
//! - コンポーザー側のクライアントも同じ型でデシリアライズする

use serde::{Deserialize, Serialize};

/// 送信成功
pub const EMAIL_SENT: &str = "Email sent successfully!";
/// 必須フィールド欠落
pub const MISSING_FIELDS: &str = "Missing required fields: recipient, subject, or body.";
/// 許可されていないメソッド
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
/// 認証情報の設定漏れ
pub const MISSING_CREDENTIALS: &str = "Server configuration error: Missing email credentials.";
/// 送信失敗
///
/// 内部情報を漏らさないため、トランスポートの失敗理由に関係なく固定。
pub const SEND_FAILED: &str = "Failed to send email.";

/// メッセージレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// 汎用コンストラクタ
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 200 送信成功
    pub fn email_sent() -> Self {
        Self::new(EMAIL_SENT)
    }

    /// 400 必須フィールド欠落
    pub fn missing_fields() -> Self {
        Self::new(MISSING_FIELDS)
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed() -> Self {
        Self::new(METHOD_NOT_ALLOWED)
    }

    /// 500 認証情報の設定漏れ
    pub fn missing_credentials() -> Self {
        Self::new(MISSING_CREDENTIALS)
    }

    /// 500 送信失敗
    pub fn send_failed() -> Self {
        Self::new(SEND_FAILED)
    }
}
