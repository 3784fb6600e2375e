//! # メール送信ハンドラ
//!
//! コンポーザーから受け取ったアイデアをメールとして送信する。
//!
//! ## エンドポイント
//!
//! - `POST /api/send-email` - メール送信
//! - `OPTIONS /api/send-email` - プリフライト（CORS ミドルウェアで応答）
//! - その他のメソッド - 405
//!
//! ## 処理順
//!
//! 1. 認証情報の確認（未設定なら、リクエストの内容に関係なく 500）
//! 2. 必須フィールドの検証（欠落があれば 400）
//! 3. メール送信（失敗なら 500、理由はログのみ）

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use ideecatcher_domain::mail::{MailCredentials, OutgoingMail};
use ideecatcher_infra::MailTransport;
use ideecatcher_shared::{
    MessageResponse,
    event_log::event,
    log_business_event,
};
use serde::Deserialize;

use crate::error::GatewayError;

/// メール送信 API の共有状態
///
/// 起動時に 1 度だけ構築し、リクエスト間では読み取り専用で共有する。
pub struct DispatchState {
    /// メール認証情報（未設定なら `None`）
    pub credentials: Option<MailCredentials>,
    pub transport:   Arc<dyn MailTransport>,
}

// --- リクエスト型 ---

/// メール送信リクエスト
///
/// 欠落を 400 として扱うため、すべて `Option` で受け取る。
#[derive(Debug, Default, Deserialize)]
pub struct SendEmailRequest {
    pub recipient: Option<String>,
    pub subject:   Option<String>,
    pub body:      Option<String>,
}

/// 検証済みのメール送信リクエスト
struct ValidSendEmail {
    recipient: String,
    subject:   String,
    body:      String,
}

impl SendEmailRequest {
    /// 3 つのフィールドがすべて空でないことを検証する
    fn validate(self) -> Result<ValidSendEmail, GatewayError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        match (
            present(self.recipient),
            present(self.subject),
            present(self.body),
        ) {
            (Some(recipient), Some(subject), Some(body)) => Ok(ValidSendEmail {
                recipient,
                subject,
                body,
            }),
            _ => Err(GatewayError::MissingFields),
        }
    }
}

// --- ハンドラ ---

/// POST /api/send-email
///
/// ## レスポンス
///
/// - `200 OK`: 送信成功
/// - `400 Bad Request`: 必須フィールド欠落（JSON として解釈できないボディを含む）
/// - `500 Internal Server Error`: 認証情報未設定、または送信失敗
#[tracing::instrument(skip_all)]
pub async fn send_email(
    State(state): State<Arc<DispatchState>>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let credentials = state
        .credentials
        .as_ref()
        .ok_or(GatewayError::MissingCredentials)?;

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(rejection = %rejection, "リクエストボディを解釈できません");
            SendEmailRequest::default()
        }
    };
    let valid = request.validate()?;

    let mail = OutgoingMail::from_account(credentials, valid.recipient, valid.subject, valid.body);

    match state.transport.send(credentials, &mail).await {
        Ok(()) => {
            log_business_event!(
                event.category = event::category::DISPATCH,
                event.action = event::action::MAIL_SENT,
                event.result = event::result::SUCCESS,
                mail.recipient = %mail.to,
                "メール送信成功"
            );
            Ok((StatusCode::OK, Json(MessageResponse::email_sent())))
        }
        Err(e) => {
            log_business_event!(
                event.category = event::category::DISPATCH,
                event.action = event::action::MAIL_FAILED,
                event.result = event::result::FAILURE,
                mail.recipient = %mail.to,
                "メール送信失敗"
            );
            Err(GatewayError::Transport(e))
        }
    }
}

/// POST / OPTIONS 以外のメソッド
///
/// OPTIONS は CORS ミドルウェアが先に応答するため、ここには到達しない。
pub async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}
