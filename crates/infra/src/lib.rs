//! # Idee Catcher インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはメール送信という外部 I/O を [`MailTransport`] トレイトの
//! 背後に閉じ込める。ゲートウェイはトレイトにのみ依存し、
//! SMTP ライブラリの詳細を知らない。
//!
//! ## 依存関係
//!
//! ```text
//! gateway → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`mail_transport`] - メール送信トレイトと SMTP / Noop 実装
//! - `mock` - テスト用の記録型トランスポート（`test-utils` feature）

pub mod mail_transport;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use mail_transport::{
    MailTransport,
    NoopMailTransport,
    SmtpMailTransport,
    SmtpSecurity,
};
