//! # ヘルスチェックハンドラ
//!
//! プロセスが応答できるかだけを返す。SMTP サーバーには接続しない。

use axum::Json;
use ideecatcher_shared::HealthResponse;

use crate::SERVICE_NAME;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}
