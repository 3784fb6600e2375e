//! # Gateway アプリケーション構築
//!
//! DI（トランスポート・State）の初期化とルーター構築を担当する。
//! `main.rs` はトレーシング初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use ideecatcher_domain::mail::MailCredentials;
use ideecatcher_infra::{MailTransport, NoopMailTransport, SmtpMailTransport};
use ideecatcher_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::{GatewayConfig, MailBackend, MailConfig},
    handler::{DispatchState, health_check, method_not_allowed, send_email},
    middleware::cors,
};

/// 設定からメールトランスポートを構築する
///
/// 認証情報があれば SMTP トランスポートはここで 1 度だけ組み立てる。
pub fn build_transport(
    config: &MailConfig,
    credentials: Option<&MailCredentials>,
) -> Arc<dyn MailTransport> {
    match config.backend {
        MailBackend::Smtp => {
            tracing::info!(
                "SMTP トランスポートを使用します: {}:{}",
                config.smtp_host,
                config.smtp_port
            );
            let smtp =
                SmtpMailTransport::new(&config.smtp_host, config.smtp_port, config.smtp_security);
            let Some(credentials) = credentials else {
                return Arc::new(smtp);
            };
            match smtp.connect_with(credentials) {
                Ok(connected) => Arc::new(connected),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "SMTP トランスポートを構築できません。送信時に再試行します"
                    );
                    Arc::new(SmtpMailTransport::new(
                        &config.smtp_host,
                        config.smtp_port,
                        config.smtp_security,
                    ))
                }
            }
        }
        MailBackend::Noop => {
            tracing::warn!("Noop トランスポートを使用します（メールは送信されません）");
            Arc::new(NoopMailTransport)
        }
    }
}

/// 設定から State を組み立ててルーターを構築する
pub fn build_app(config: &GatewayConfig) -> Router {
    let state = Arc::new(DispatchState {
        credentials: config.credentials.clone(),
        transport:   build_transport(&config.mail, config.credentials.as_ref()),
    });

    build_router(state)
}

/// ルーター定義
///
/// State を外から受け取るため、テストではモックのトランスポートを差し込める。
pub fn build_router(state: Arc<DispatchState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/send-email",
            post(send_email).fallback(method_not_allowed),
        )
        .with_state(state)
        // CORS: プリフライトの短絡と、全レスポンスへのヘッダー付与
        .layer(from_fn(cors))
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: スパンに request_id を含める
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
