//! # Dispatch Gateway ライブラリ
//!
//! アイデア送信 API のコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーターとミドルウェアの組み立て
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（CORS）

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;

/// ログとヘルスチェックに出すサービス名
pub const SERVICE_NAME: &str = "gateway";
