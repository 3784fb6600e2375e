//! # Idee Catcher コンポーザー
//!
//! アイデアを入力し、ワンアクションでゲートウェイへ送信するためのコントローラー。
//! 描画は持たず、表示層は [`controller::ComposerView`] のスナップショットを描くだけでよい。
//!
//! ## 構成
//!
//! ```text
//! 表示層 ──Message──▶ runtime ──update──▶ controller（純粋な状態遷移）
//!   ▲                   │                      │
//!   └────ComposerView───┘◀──────Effect─────────┘
//!                       │
//!                       ├─ Dispatch        → client（reqwest でゲートウェイへ POST）
//!                       ├─ FocusSurface    → CompositionSurface
//!                       └─ ScheduleClear   → feedback（2 秒後に消去）
//! ```
//!
//! ## モジュール構成
//!
//! - [`client`] - ゲートウェイ HTTP クライアント
//! - [`config`] - 環境変数からの設定読み込み
//! - [`controller`] - 状態と `update` 関数
//! - [`feedback`] - フィードバック消去タイマー
//! - [`keyboard`] - キーボードショートカット
//! - [`message`] - コントローラーへのメッセージ
//! - [`runtime`] - メッセージループと副作用の実行

pub mod client;
pub mod config;
pub mod controller;
pub mod feedback;
pub mod keyboard;
pub mod message;
pub mod runtime;

pub use controller::{ComposerView, Controller};
pub use message::{KeyboardAction, Message};
pub use runtime::{ComposerHandle, CompositionSurface, mount};
