//! # フィードバック
//!
//! 送信後に表示する短いメッセージと、その自動消去タイマー。
//!
//! フィードバックは常に高々 1 つ。新しいフィードバックは古いものを置き換え、
//! 保留中の消去タイマーを中断して 2 秒の表示期間をやり直す。
//! タイマーが中断より先に期限を迎えていた場合に備え、期限メッセージには世代番号を持たせ、
//! 古い世代の期限は [`Controller`](crate::controller::Controller) 側で無視する。

use std::time::Duration;

use tokio::{sync::mpsc, task::AbortHandle};

use crate::message::Message;

/// フィードバックの表示期間
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// 送信成功時のメッセージ
pub const FEEDBACK_SENT: &str = "Verzonden ✓";

/// 送信失敗時のメッセージ
pub const FEEDBACK_FAILED: &str = "Fout bij verzenden";

/// 表示中のフィードバック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message:    &'static str,
    pub is_error:   bool,
    /// 設定された順に増える世代番号
    pub generation: u64,
}

impl Feedback {
    pub fn sent(generation: u64) -> Self {
        Self {
            message: FEEDBACK_SENT,
            is_error: false,
            generation,
        }
    }

    pub fn failed(generation: u64) -> Self {
        Self {
            message: FEEDBACK_FAILED,
            is_error: true,
            generation,
        }
    }
}

/// フィードバック消去タイマー
///
/// 保留中のタイマーは 1 つだけ。`schedule` で置き換え、`Drop` で中断する。
#[derive(Debug, Default)]
pub struct FeedbackTimer {
    pending: Option<AbortHandle>,
}

impl FeedbackTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `FEEDBACK_DURATION` 後に `FeedbackExpired(generation)` を送る
    ///
    /// 保留中のタイマーがあれば中断する。
    pub fn schedule(&mut self, generation: u64, sender: mpsc::UnboundedSender<Message>) {
        self.cancel();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(FEEDBACK_DURATION).await;
            // 受信側が閉じていればコントローラーは既に破棄されている
            let _ = sender.send(Message::FeedbackExpired(generation));
        });
        self.pending = Some(handle.abort_handle());
    }

    /// 保留中のタイマーを中断する
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for FeedbackTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
