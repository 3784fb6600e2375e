//! # メッセージ
//!
//! コントローラーの状態を変化させるイベント。表示層の操作、キーボードショートカット、
//! 非同期処理の完了はすべてこの型に変換されてから [`Controller::update`] に渡る。
//!
//! [`Controller::update`]: crate::controller::Controller::update

use ideecatcher_domain::{dispatch::DispatchResult, recipient::RecipientProfile};

/// コントローラーへのメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// コントローラーが表示された
    Mounted,
    /// 入力欄のテキストが変わった（値は全文）
    TextChanged(String),
    /// 送信ボタンが押された
    SendClicked(RecipientProfile),
    /// キーボードショートカット
    KeyPressed(KeyboardAction),
    /// ゲートウェイ呼び出しが完了した
    DispatchFinished(DispatchResult),
    /// フィードバックの表示期限が来た（世代番号つき）
    FeedbackExpired(u64),
}

/// キーボードショートカットで起こせる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// 既定の送信先へ送信（Ctrl/Cmd + Enter）
    Send,
}
