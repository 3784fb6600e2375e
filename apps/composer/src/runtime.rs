//! # ランタイム
//!
//! コントローラーを 1 つのタスクで所有し、チャネルから届いた [`Message`] を順に処理する。
//! `update` が返した [`Effect`] はここで実行する。
//!
//! - ゲートウェイ呼び出しは別タスクで実行し、結果をチャネルに戻す
//!   （`Sending` の間は新しい送信が起こらないため、同時に走る呼び出しは常に 1 つ）
//! - フィードバック消去は [`FeedbackTimer`] に任せる
//! - 処理のたびに [`ComposerView`] を `watch` チャネルで公開する
//!
//! [`mount`] が返す [`ComposerHandle`] を破棄するとタスクが止まり、
//! キーボードショートカットの登録も解除される。

use std::sync::Arc;

use ideecatcher_domain::recipient::RecipientProfile;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::{
    client::{DispatchClient, dispatch_idea},
    controller::{ComposerView, Controller, Effect},
    feedback::FeedbackTimer,
    keyboard::{ShortcutGuard, ShortcutRegistry, handle_key_press},
    message::Message,
};

/// 入力欄
///
/// 表示層が実装する。マウント時と送信成功時にフォーカスを受け取る。
pub trait CompositionSurface: Send + Sync {
    fn focus(&self);
}

/// マウント中のコントローラーへのハンドル
pub struct ComposerHandle {
    sender:    mpsc::UnboundedSender<Message>,
    view:      watch::Receiver<ComposerView>,
    task:      JoinHandle<()>,
    _shortcut: ShortcutGuard,
}

/// コントローラーをマウントする
///
/// 入力欄にフォーカスし、Ctrl/Cmd + Enter のショートカットを登録する。
/// tokio ランタイム上で呼び出すこと。
pub fn mount(
    controller: Controller,
    client: Arc<dyn DispatchClient>,
    surface: Arc<dyn CompositionSurface>,
    shortcuts: &ShortcutRegistry,
) -> ComposerHandle {
    let (sender, receiver) = mpsc::unbounded_channel();
    let (view_tx, view) = watch::channel(controller.view());

    let shortcut_sender = sender.clone();
    let shortcut = shortcuts.register(move |event| {
        if let Some(action) = handle_key_press(&event.key, event.modifiers) {
            event.prevent_default();
            let _ = shortcut_sender.send(Message::KeyPressed(action));
        }
    });

    let runtime = Runtime {
        controller,
        client,
        surface,
        timer: FeedbackTimer::new(),
        sender: sender.clone(),
        view: view_tx,
    };
    let task = tokio::spawn(runtime.run(receiver));

    // 他のメッセージより先に処理させる
    let _ = sender.send(Message::Mounted);

    ComposerHandle {
        sender,
        view,
        task,
        _shortcut: shortcut,
    }
}

impl ComposerHandle {
    /// 入力欄のテキストが変わった
    pub fn update_text(&self, value: impl Into<String>) {
        self.send(Message::TextChanged(value.into()));
    }

    /// 送信ボタンが押された
    pub fn trigger(&self, profile: RecipientProfile) {
        self.send(Message::SendClicked(profile));
    }

    /// 任意のメッセージを送る
    pub fn send(&self, message: Message) {
        if self.sender.send(message).is_err() {
            tracing::warn!("コントローラーが停止しているためメッセージを破棄しました");
        }
    }

    /// 現在のスナップショット
    pub fn view(&self) -> ComposerView {
        self.view.borrow().clone()
    }

    /// スナップショットが条件を満たすまで待つ
    ///
    /// コントローラーが停止した場合は `None`。
    pub async fn wait_for(
        &mut self,
        condition: impl FnMut(&ComposerView) -> bool,
    ) -> Option<ComposerView> {
        self.view
            .wait_for(condition)
            .await
            .ok()
            .map(|view| view.clone())
    }

    /// アンマウントする
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for ComposerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Runtime {
    controller: Controller,
    client:     Arc<dyn DispatchClient>,
    surface:    Arc<dyn CompositionSurface>,
    timer:      FeedbackTimer,
    sender:     mpsc::UnboundedSender<Message>,
    view:       watch::Sender<ComposerView>,
}

impl Runtime {
    async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<Message>) {
        while let Some(message) = receiver.recv().await {
            let effects = self.controller.update(message);
            for effect in effects {
                self.perform(effect);
            }
            self.view.send_replace(self.controller.view());
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Dispatch(request) => {
                let client = self.client.clone();
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    let result = dispatch_idea(client.as_ref(), &request).await;
                    // 受信側が閉じていればアンマウント済み
                    let _ = sender.send(Message::DispatchFinished(result));
                });
            }
            Effect::FocusSurface => self.surface.focus(),
            Effect::ScheduleFeedbackClear { generation } => {
                self.timer.schedule(generation, self.sender.clone());
            }
        }
    }
}
