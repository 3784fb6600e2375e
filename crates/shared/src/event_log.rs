//! # 構造化ログのフィールド規約
//!
//! 送信の成否と障害の種類を、ログ基盤側で集計できる形で出すための定数とマクロ。
//!
//! - 利用者の操作結果（メールを送った・送れなかった）は [`log_business_event!`] で出す。
//!   `event.kind = "business_event"` が付くので、JSON ログから
//!   `jq 'select(.["event.kind"] == "business_event")'` で抜き出せる。
//! - 障害は通常の `tracing::error!` に [`error`] の定数で
//!   `error.category` と `error.kind` を添える。
//!
//! フィールド名はドット区切り（`event.action` など）。
//! JSON 出力では `"event.action"` のようなフラットなキーになる。

/// 操作結果のログを出す
///
/// `tracing::info!` に `event.kind = "business_event"` を足しただけのマクロ。
/// 呼び出し側のクレートが `tracing` に依存している必要がある。
///
/// `event.category`・`event.action`・`event.result` は毎回付けること（[`event`] の定数）。
///
/// ```ignore
/// log_business_event!(
///     event.category = event::category::DISPATCH,
///     event.action = event::action::MAIL_SENT,
///     event.result = event::result::SUCCESS,
///     "メール送信成功"
/// );
/// ```
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// `event.*` フィールドの値
pub mod event {
    /// どの部品の出来事か
    pub mod category {
        /// ゲートウェイでのメール送信
        pub const DISPATCH: &str = "dispatch";
        /// コンポーザーでのアイデア送信
        pub const COMPOSER: &str = "composer";
    }

    /// 何が起きたか
    pub mod action {
        pub const MAIL_SENT: &str = "mail.sent";
        pub const MAIL_FAILED: &str = "mail.failed";
        pub const IDEA_DISPATCHED: &str = "idea.dispatched";
        pub const IDEA_DISPATCH_FAILED: &str = "idea.dispatch_failed";
    }

    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// `error.*` フィールドの値
pub mod error {
    pub mod category {
        /// 環境変数の設定漏れ
        pub const CONFIGURATION: &str = "configuration";
        /// SMTP サーバー、またはゲートウェイとの通信
        pub const EXTERNAL_SERVICE: &str = "external_service";
    }

    pub mod kind {
        /// `GMAIL_USER` / `GMAIL_APP_PASSWORD` が無い
        pub const MISSING_CREDENTIALS: &str = "missing_credentials";
        /// SMTP での送信失敗
        pub const MAIL_TRANSPORT: &str = "mail_transport";
        /// コンポーザーからゲートウェイへの呼び出し失敗
        pub const SERVICE_COMMUNICATION: &str = "service_communication";
    }
}
