//! # Idee Catcher 共有ユーティリティ
//!
//! このクレートは、Idee Catcher
//! のゲートウェイとコンポーザーの双方で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, apps）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える（トレーシング初期化は `observability` feature）

pub mod event_log;
pub mod health;
pub mod message_response;
pub mod observability;

pub use health::HealthResponse;
pub use message_response::MessageResponse;
