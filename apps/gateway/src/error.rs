//! # Gateway エラー定義
//!
//! ゲートウェイ固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 利用者に返すメッセージは固定集合（[`MessageResponse`]）に限定する。
//! 設定不備とトランスポート失敗の詳細はサーバーログにのみ出力し、レスポンスには含めない。

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use ideecatcher_domain::mail::MailError;
use ideecatcher_shared::{MessageResponse, event_log::error};
use thiserror::Error;

/// Gateway で発生するエラー
#[derive(Debug, Error)]
pub enum GatewayError {
    /// POST 以外のメソッド
    #[error("許可されていないメソッド")]
    MethodNotAllowed,

    /// recipient / subject / body のいずれかが欠落
    #[error("必須フィールドが欠落しています")]
    MissingFields,

    /// メール認証情報が未設定
    #[error("メール認証情報が設定されていません（GMAIL_USER / GMAIL_APP_PASSWORD）")]
    MissingCredentials,

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    Transport(#[from] MailError),
}

impl GatewayError {
    /// HTTP ステータスコード
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::MissingFields => StatusCode::BAD_REQUEST,
            GatewayError::MissingCredentials | GatewayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            GatewayError::MethodNotAllowed => MessageResponse::method_not_allowed(),
            GatewayError::MissingFields => MessageResponse::missing_fields(),
            GatewayError::MissingCredentials => {
                tracing::error!(
                    error.category = error::category::CONFIGURATION,
                    error.kind = error::kind::MISSING_CREDENTIALS,
                    "GMAIL_USER または GMAIL_APP_PASSWORD が設定されていません"
                );
                MessageResponse::missing_credentials()
            }
            GatewayError::Transport(e) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::MAIL_TRANSPORT,
                    error = %e,
                    "メール送信に失敗しました"
                );
                MessageResponse::send_failed()
            }
        };

        let mut response = (status, Json(body)).into_response();
        if matches!(self, GatewayError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}
