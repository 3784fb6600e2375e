//! # ミドルウェア
//!
//! Gateway 用のミドルウェアを提供する。

mod cors;

pub use cors::{ALLOWED_HEADERS, ALLOWED_METHODS, cors};
