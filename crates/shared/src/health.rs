//! # ヘルスチェックのレスポンス

use serde::{Deserialize, Serialize};

/// 稼働状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// `GET /health` の本文
///
/// ```
/// use ideecatcher_shared::{HealthResponse, health::HealthStatus};
///
/// let response = HealthResponse::healthy("gateway", "0.1.0");
/// assert_eq!(response.status, HealthStatus::Healthy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status:  HealthStatus,
    pub service: String,
    /// ビルド時の `CARGO_PKG_VERSION`
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status:  HealthStatus::Healthy,
            service: service.into(),
            version: version.into(),
        }
    }
}
