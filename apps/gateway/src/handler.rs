//! # HTTP ハンドラ
//!
//! Gateway の HTTP エンドポイントを実装する。

pub mod health;
pub mod send_email;

pub use health::health_check;
pub use send_email::{DispatchState, SendEmailRequest, method_not_allowed, send_email};
