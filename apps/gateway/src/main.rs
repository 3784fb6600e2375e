//! # Dispatch Gateway サーバー
//!
//! コンポーザーから受け取ったアイデアをメールとして転送する HTTP サーバー。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Composer   │────▶│   Gateway    │────▶│     SMTP     │
//! │              │     │  port: 3000  │     │   (Gmail)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `GMAIL_USER` | **Yes** | 送信元アカウント（未設定でも起動はするが、送信は 500 になる） |
//! | `GMAIL_APP_PASSWORD` | **Yes** | アプリケーション用パスワード |
//! | `GATEWAY_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `GATEWAY_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `MAIL_BACKEND` | No | `smtp`（デフォルト）または `noop` |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `smtp.gmail.com`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `587`） |
//! | `SMTP_STARTTLS` | No | STARTTLS を使うか（デフォルト: `true`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p ideecatcher-gateway
//!
//! # メールを送らずに動作確認
//! MAIL_BACKEND=noop cargo run -p ideecatcher-gateway
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use ideecatcher_gateway::{SERVICE_NAME, app_builder::build_app, config::GatewayConfig};
use ideecatcher_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// `.env` を読んでから設定を組み立て、停止されるまで待ち受ける
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 無くてもよい
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env(SERVICE_NAME);
    init_tracing(&tracing_config)
        .map_err(|e| anyhow::anyhow!("トレーシングの初期化に失敗しました: {e}"))?;
    let _tracing_guard = tracing::info_span!("app", service = SERVICE_NAME).entered();

    let config = GatewayConfig::from_env().context("設定の読み込みに失敗しました")?;

    if config.credentials.is_none() {
        tracing::warn!(
            "GMAIL_USER / GMAIL_APP_PASSWORD が未設定です。送信リクエストはすべて 500 になります"
        );
    }

    tracing::info!("Gateway サーバーを起動します: {}:{}", config.host, config.port);

    let app = build_app(&config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Gateway サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
