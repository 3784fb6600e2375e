//! # コントローラー
//!
//! 入力中のテキスト、送信中かどうか、表示中のフィードバックを 1 つの状態にまとめ、
//! [`Message`] を受けて次の状態と実行すべき [`Effect`] を返す。
//!
//! ## 状態遷移
//!
//! ```text
//!            TextChanged(空白以外)            SendClicked / Ctrl+Enter
//!   Idle ─────────────────────────▶ Composing ─────────────────────────▶ Sending
//!    ▲  ◀─────────────────────────     ▲                                   │
//!    │       TextChanged(空白のみ)     │   DispatchFinished(失敗)          │
//!    │                                 └───────────────────────────────────┤
//!    │                    DispatchFinished(成功)                           │
//!    └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Sending` は空白でないテキストしか持てないため、「空のテキストを送信中」は表現できない。
//! 送信中は入力を受け付けず、重ねての送信も起こらない。
//!
//! I/O は一切行わない。ゲートウェイ呼び出し・フォーカス・タイマーは
//! [`Effect`] として返し、[`runtime`](crate::runtime) が実行する。

use std::sync::Arc;

use ideecatcher_domain::{
    clock::Clock,
    composition::{Composition, NonBlankText},
    dispatch::{DispatchRequest, DispatchResult},
    recipient::{RecipientBook, RecipientProfile},
};
use ideecatcher_shared::{event_log::event, log_business_event};

use crate::{
    feedback::Feedback,
    message::{KeyboardAction, Message},
};

/// 送信中のボタンラベル
pub const SENDING_LABEL: &str = "Bezig...";

/// 入力と送信の段階
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// 空、または空白のみ
    Idle(Composition),
    /// 送信可能なテキストを入力中
    Composing(Composition),
    /// ゲートウェイの応答待ち
    Sending {
        /// 失敗時に戻す入力そのまま
        draft: Composition,
        /// 送信したテキスト
        text:  NonBlankText,
    },
}

impl Phase {
    /// テキストの内容に応じて `Idle` / `Composing` を選ぶ
    pub fn editing(composition: Composition) -> Self {
        if composition.is_non_blank() {
            Self::Composing(composition)
        } else {
            Self::Idle(composition)
        }
    }

    /// 入力欄に表示するテキスト
    pub fn composition(&self) -> &Composition {
        match self {
            Self::Idle(c) | Self::Composing(c) => c,
            Self::Sending { draft, .. } => draft,
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending { .. })
    }

    /// 応答待ちのテキスト（trim 済み）
    pub fn in_flight(&self) -> Option<&NonBlankText> {
        match self {
            Self::Sending { text, .. } => Some(text),
            Self::Idle(_) | Self::Composing(_) => None,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle(Composition::empty())
    }
}

/// コントローラーの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub phase:    Phase,
    pub feedback: Option<Feedback>,
}

/// `update` が返す副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// ゲートウェイへ送信し、結果を `DispatchFinished` で返す
    Dispatch(DispatchRequest),
    /// 入力欄にフォーカスを移す
    FocusSurface,
    /// 表示期間後に `FeedbackExpired(generation)` を返す（保留中のものは中断）
    ScheduleFeedbackClear { generation: u64 },
}

/// 表示層に渡す状態のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerView {
    /// 入力欄のテキスト
    pub text:            String,
    /// 送信ボタンを表示するか（空白以外のテキストがある）
    pub buttons_visible: bool,
    /// 入力欄とボタンを無効にするか（送信中）
    pub inputs_disabled: bool,
    pub private_label:   &'static str,
    pub business_label:  &'static str,
    pub feedback:        Option<Feedback>,
}

/// コントローラー
pub struct Controller {
    state:           ControllerState,
    recipients:      RecipientBook,
    clock:           Arc<dyn Clock>,
    next_generation: u64,
}

impl Controller {
    pub fn new(recipients: RecipientBook, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: ControllerState::default(),
            recipients,
            clock,
            next_generation: 1,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// メッセージを処理し、実行すべき副作用を返す
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Mounted => vec![Effect::FocusSurface],
            Message::TextChanged(value) => {
                self.update_text(value);
                Vec::new()
            }
            Message::SendClicked(profile) => self.trigger(profile),
            // ショートカットは常に既定の送信先
            Message::KeyPressed(KeyboardAction::Send) => self.trigger(RecipientProfile::default()),
            Message::DispatchFinished(result) => self.finish(result),
            Message::FeedbackExpired(generation) => {
                self.expire_feedback(generation);
                Vec::new()
            }
        }
    }

    /// 表示層向けのスナップショット
    pub fn view(&self) -> ComposerView {
        let phase = &self.state.phase;
        let sending = phase.is_sending();
        let label = |profile: RecipientProfile| {
            if sending {
                SENDING_LABEL
            } else {
                profile.label()
            }
        };

        ComposerView {
            text:            phase.composition().as_str().to_string(),
            buttons_visible: phase.composition().is_non_blank(),
            inputs_disabled: sending,
            private_label:   label(RecipientProfile::Private),
            business_label:  label(RecipientProfile::Business),
            feedback:        self.state.feedback.clone(),
        }
    }

    fn update_text(&mut self, value: String) {
        if self.state.phase.is_sending() {
            tracing::debug!("送信中のため入力を無視します");
            return;
        }
        self.state.phase = Phase::editing(Composition::new(value));
    }

    fn trigger(&mut self, profile: RecipientProfile) -> Vec<Effect> {
        let Phase::Composing(draft) = &self.state.phase else {
            // 空白のみ、または送信中
            return Vec::new();
        };
        let Some(text) = draft.non_blank() else {
            return Vec::new();
        };

        let request = DispatchRequest::compose(
            self.recipients.address(profile),
            &text,
            &self.clock.now_local(),
        );
        tracing::debug!(
            recipient.profile = %profile,
            text.chars = text.as_str().chars().count(),
            "送信を開始します"
        );

        self.state.phase = Phase::Sending {
            draft: draft.clone(),
            text,
        };
        vec![Effect::Dispatch(request)]
    }

    fn finish(&mut self, result: DispatchResult) -> Vec<Effect> {
        let Phase::Sending { draft, text } = &self.state.phase else {
            tracing::warn!("送信中でないときに送信結果を受け取りました");
            return Vec::new();
        };
        let chars = text.as_str().chars().count();

        let generation = self.next_generation;
        self.next_generation += 1;

        if result.is_success() {
            log_business_event!(
                event.category = event::category::COMPOSER,
                event.action = event::action::IDEA_DISPATCHED,
                event.result = event::result::SUCCESS,
                text.chars = chars,
                "アイデアを送信しました"
            );
            self.state.phase = Phase::default();
            self.state.feedback = Some(Feedback::sent(generation));
            vec![
                Effect::FocusSurface,
                Effect::ScheduleFeedbackClear { generation },
            ]
        } else {
            log_business_event!(
                event.category = event::category::COMPOSER,
                event.action = event::action::IDEA_DISPATCH_FAILED,
                event.result = event::result::FAILURE,
                text.chars = chars,
                reason = %result.message,
                "アイデアの送信に失敗しました"
            );
            self.state.phase = Phase::editing(draft.clone());
            self.state.feedback = Some(Feedback::failed(generation));
            vec![Effect::ScheduleFeedbackClear { generation }]
        }
    }

    fn expire_feedback(&mut self, generation: u64) {
        // 新しいフィードバックに置き換わっていれば古い期限は無視する
        if self
            .state
            .feedback
            .as_ref()
            .is_some_and(|f| f.generation == generation)
        {
            self.state.feedback = None;
        }
    }
}
