//! # Idee Catcher ドメイン層
//!
//! アイデアの作成から送信までの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 空白のみのテキストや未設定の認証情報を型で排除する
//!   （例: [`composition::NonBlankText`], [`mail::MailCredentials`]）
//! - **純粋なロジック**: 時刻は [`clock::Clock`] で注入し、I/O を一切行わない
//! - **ドメインエラー**: メール送信の失敗を [`mail::MailError`] で表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//!   ↘            ↗
//!      shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`composition`] - 入力中のテキスト
//! - [`dispatch`] - 送信リクエストと送信結果
//! - [`mail`] - 送信メール・認証情報・送信エラー
//! - [`recipient`] - 送信先プロファイル
//! - [`timestamp`] - nl-NL ロケールでの送信日時の書式化
//!
//! ## 使用例
//!
//! ```rust
//! use ideecatcher_domain::composition::{Composition, NonBlankText};
//!
//! let composition = Composition::new("  Buy a telescope  ");
//! assert!(composition.is_non_blank());
//!
//! let text: NonBlankText = composition.non_blank().unwrap();
//! assert_eq!(text.as_str(), "Buy a telescope");
//! ```

pub mod clock;
pub mod composition;
pub mod dispatch;
pub mod mail;
pub mod recipient;
pub mod timestamp;
