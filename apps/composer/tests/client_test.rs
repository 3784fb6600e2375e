//! # ゲートウェイクライアントの統合テスト
//!
//! 実際のゲートウェイのルーター（トランスポートはモック）をローカルポートで起動し、
//! reqwest 実装の往復を検証する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p ideecatcher-composer --test client_test
//! ```

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, routing::post};
use chrono::{TimeZone, Utc};
use ideecatcher_composer::client::{
    DispatchClient,
    DispatchClientError,
    DispatchClientImpl,
    dispatch_idea,
};
use ideecatcher_domain::{
    composition::NonBlankText,
    dispatch::DispatchRequest,
    mail::MailCredentials,
};
use ideecatcher_gateway::{app_builder::build_router, handler::DispatchState};
use ideecatcher_infra::mock::MockMailTransport;
use ideecatcher_shared::MessageResponse;
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn serve_gateway(
    credentials: Option<MailCredentials>,
    transport: MockMailTransport,
) -> SocketAddr {
    serve(build_router(Arc::new(DispatchState {
        credentials,
        transport: Arc::new(transport),
    })))
    .await
}

fn credentials() -> MailCredentials {
    MailCredentials::from_parts(
        Some("ideas@gmail.com".to_string()),
        Some("app-secret".to_string()),
    )
    .unwrap()
}

fn request() -> DispatchRequest {
    let text = NonBlankText::new("Buy a telescope").unwrap();
    let sent_at = Utc.with_ymd_and_hms(2026, 10, 17, 14, 3, 21).unwrap();
    DispatchRequest::compose("me@example.com", &text, &sent_at)
}

#[tokio::test]
async fn test_ゲートウェイ経由でメールが送信される() {
    let transport = MockMailTransport::new();
    let addr = serve_gateway(Some(credentials()), transport.clone()).await;
    let sut = DispatchClientImpl::new(&format!("http://{addr}/"));

    let response = sut.send_email(&request()).await;

    assert_eq!(response, Ok(MessageResponse::email_sent()));
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "me@example.com");
    assert_eq!(sent[0].subject, "Nieuw idee");
    assert_eq!(
        sent[0].text,
        "Buy a telescope\n\nVerzonden op: zaterdag 17 oktober 2026 om 14:03:21"
    );
}

#[tokio::test]
async fn test_認証情報未設定のゲートウェイはrejectedになる() {
    let addr = serve_gateway(None, MockMailTransport::new()).await;
    let sut = DispatchClientImpl::new(&format!("http://{addr}"));

    let response = sut.send_email(&request()).await;

    assert_eq!(
        response,
        Err(DispatchClientError::Rejected {
            status:  500,
            message: "Server configuration error: Missing email credentials.".to_string(),
        })
    );
}

#[tokio::test]
async fn test_送信失敗はrejectedになる() {
    let addr = serve_gateway(Some(credentials()), MockMailTransport::failing("quota")).await;
    let sut = DispatchClientImpl::new(&format!("http://{addr}"));

    let response = sut.send_email(&request()).await;

    assert_eq!(
        response,
        Err(DispatchClientError::Rejected {
            status:  500,
            message: "Failed to send email.".to_string(),
        })
    );
}

#[tokio::test]
async fn test_jsonでない成功レスポンスはmalformed_responseになる() {
    let app = Router::new().route("/api/send-email", post(|| async { "ok" }));
    let addr = serve(app).await;
    let sut = DispatchClientImpl::new(&format!("http://{addr}"));

    let response = sut.send_email(&request()).await;

    assert!(matches!(
        response,
        Err(DispatchClientError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_接続できなければnetworkになる() {
    let sut = DispatchClientImpl::new("http://127.0.0.1:1");

    let response = sut.send_email(&request()).await;

    assert!(matches!(response, Err(DispatchClientError::Network(_))));
}

#[tokio::test]
async fn test_応答しないゲートウェイはタイムアウトでnetworkになる() {
    // 接続は受け付けるが何も返さない
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    let sut = DispatchClientImpl::new(&format!("http://{addr}"))
        .with_timeout(Duration::from_millis(200));

    let result = tokio::time::timeout(Duration::from_secs(5), dispatch_idea(&sut, &request()))
        .await
        .expect("タイムアウト後に結果が返る");

    assert!(!result.is_success());

    let response = sut.send_email(&request()).await;
    assert!(matches!(response, Err(DispatchClientError::Network(_))));
}
