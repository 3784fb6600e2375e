//! # コンポーザーランタイムの統合テスト
//!
//! `mount` したコントローラーにハンドル経由でメッセージを送り、
//! スタブのゲートウェイクライアントと入力欄で副作用を検証する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p ideecatcher-composer --test runtime_test
//! ```

use std::{
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ideecatcher_composer::{
    ComposerHandle,
    CompositionSurface,
    Controller,
    client::{DispatchClient, DispatchClientError},
    feedback::{FEEDBACK_DURATION, FEEDBACK_FAILED, FEEDBACK_SENT},
    keyboard::{Key, KeyEvent, Modifiers, ShortcutRegistry},
    mount,
};
use ideecatcher_domain::{
    clock::{Clock, FixedClock},
    dispatch::DispatchRequest,
    recipient::{RecipientBook, RecipientProfile},
    timestamp::format_timestamp,
};
use ideecatcher_shared::MessageResponse;
use pretty_assertions::assert_eq;
use tokio::{sync::Semaphore, time::Instant};

// --- テスト用スタブ ---

/// 受け取ったリクエストを記録するゲートウェイクライアント
///
/// `gated()` で作ると、`release()` されるまで応答を保留する。
struct StubClient {
    requests: Mutex<Vec<DispatchRequest>>,
    fail:     bool,
    gate:     Option<Semaphore>,
}

impl StubClient {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            fail:     false,
            gate:     None,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            fail:     true,
            gate:     None,
        })
    }

    fn gated() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            fail:     false,
            gate:     Some(Semaphore::new(0)),
        })
    }

    fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    fn requests(&self) -> Vec<DispatchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DispatchClient for StubClient {
    async fn send_email(
        &self,
        request: &DispatchRequest,
    ) -> Result<MessageResponse, DispatchClientError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        if self.fail {
            Err(DispatchClientError::Network("connection refused".to_string()))
        } else {
            Ok(MessageResponse::email_sent())
        }
    }
}

/// フォーカス回数を数える入力欄
#[derive(Default)]
struct StubSurface {
    focused: AtomicUsize,
}

impl StubSurface {
    fn focus_count(&self) -> usize {
        self.focused.load(Ordering::SeqCst)
    }
}

impl CompositionSurface for StubSurface {
    fn focus(&self) {
        self.focused.fetch_add(1, Ordering::SeqCst);
    }
}

// --- テストヘルパー ---

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 17, 14, 3, 21).unwrap(),
    ))
}

struct Fixture {
    handle:    ComposerHandle,
    client:    Arc<StubClient>,
    surface:   Arc<StubSurface>,
    shortcuts: ShortcutRegistry,
}

fn mount_with(client: Arc<StubClient>) -> Fixture {
    let surface = Arc::new(StubSurface::default());
    let shortcuts = ShortcutRegistry::new();
    let controller = Controller::new(
        RecipientBook::new("me@example.com", "me@work.example.com"),
        clock(),
    );

    let handle = mount(controller, client.clone(), surface.clone(), &shortcuts);

    Fixture {
        handle,
        client,
        surface,
        shortcuts,
    }
}

// --- マウント ---

#[tokio::test]
async fn test_マウントで入力欄にフォーカスしショートカットを登録する() {
    let mut fixture = mount_with(StubClient::succeeding());

    // Mounted は最初に処理される
    fixture.handle.update_text("x");
    fixture.handle.wait_for(|v| v.text == "x").await.unwrap();

    assert_eq!(fixture.surface.focus_count(), 1);
    assert_eq!(fixture.shortcuts.len(), 1);
}

#[tokio::test]
async fn test_アンマウントでショートカットの登録が解除される() {
    let fixture = mount_with(StubClient::succeeding());

    fixture.handle.unmount();

    assert!(fixture.shortcuts.is_empty());
    let mut event = KeyEvent::new(Key::Enter, Modifiers::CTRL);
    fixture.shortcuts.dispatch(&mut event);
    assert!(!event.is_default_prevented());
}

// --- 送信 ---

#[tokio::test]
async fn test_buy_a_telescopeを既定の送信先に送る() {
    let mut fixture = mount_with(StubClient::succeeding());

    fixture.handle.update_text("Buy a telescope");
    fixture.handle.trigger(RecipientProfile::default());
    let view = fixture
        .handle
        .wait_for(|v| v.feedback.is_some())
        .await
        .unwrap();

    assert_eq!(view.text, "");
    assert!(!view.buttons_visible);
    let feedback = view.feedback.unwrap();
    assert_eq!(feedback.message, FEEDBACK_SENT);
    assert!(!feedback.is_error);

    let requests = fixture.client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].recipient(), "me@example.com");
    assert_eq!(requests[0].subject(), "Nieuw idee");
    assert_eq!(
        requests[0].body(),
        format!(
            "Buy a telescope\n\nVerzonden op: {}",
            format_timestamp(&clock().now_local())
        )
    );

    // マウント時と送信成功時
    assert_eq!(fixture.surface.focus_count(), 2);
}

#[tokio::test]
async fn test_送信中の再送信はリクエストを増やさない() {
    let mut fixture = mount_with(StubClient::gated());

    fixture.handle.update_text("idea");
    fixture.handle.trigger(RecipientProfile::Private);
    let sending = fixture
        .handle
        .wait_for(|v| v.inputs_disabled)
        .await
        .unwrap();
    assert_eq!(sending.private_label, "Bezig...");

    fixture.handle.trigger(RecipientProfile::Business);
    let mut event = KeyEvent::new(Key::Enter, Modifiers::META);
    fixture.shortcuts.dispatch(&mut event);
    fixture.handle.update_text("changed while sending");

    fixture.client.release();
    let view = fixture
        .handle
        .wait_for(|v| v.feedback.is_some())
        .await
        .unwrap();

    assert_eq!(fixture.client.requests().len(), 1);
    assert_eq!(view.text, "");
}

#[tokio::test]
async fn test_失敗してもテキストを残す() {
    let mut fixture = mount_with(StubClient::failing());

    fixture.handle.update_text("  half-baked idea ");
    fixture.handle.trigger(RecipientProfile::Business);
    let view = fixture
        .handle
        .wait_for(|v| v.feedback.is_some())
        .await
        .unwrap();

    assert_eq!(view.text, "  half-baked idea ");
    assert!(view.buttons_visible);
    assert!(!view.inputs_disabled);
    let feedback = view.feedback.unwrap();
    assert_eq!(feedback.message, FEEDBACK_FAILED);
    assert!(feedback.is_error);
    assert_eq!(fixture.client.requests()[0].recipient(), "me@work.example.com");
    // 失敗時はフォーカスしない
    assert_eq!(fixture.surface.focus_count(), 1);
}

#[tokio::test]
async fn test_空白のみでは送信しない() {
    let mut fixture = mount_with(StubClient::succeeding());

    fixture.handle.update_text(" \n ");
    fixture.handle.trigger(RecipientProfile::Private);
    fixture.handle.update_text("sentinel");
    fixture
        .handle
        .wait_for(|v| v.text == "sentinel")
        .await
        .unwrap();

    assert!(fixture.client.requests().is_empty());
}

#[tokio::test]
async fn test_ctrl_enterで送信し既定動作を抑止する() {
    let mut fixture = mount_with(StubClient::succeeding());
    fixture.handle.update_text("shortcut idea");
    fixture.handle.wait_for(|v| v.buttons_visible).await.unwrap();

    let mut event = KeyEvent::new(Key::Enter, Modifiers::CTRL);
    fixture.shortcuts.dispatch(&mut event);
    fixture
        .handle
        .wait_for(|v| v.feedback.is_some())
        .await
        .unwrap();

    assert!(event.is_default_prevented());
    let requests = fixture.client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].recipient(), "me@example.com");
}

// --- フィードバックの消去 ---

#[tokio::test(start_paused = true)]
async fn test_フィードバックは2秒後に消える() {
    let mut fixture = mount_with(StubClient::succeeding());

    fixture.handle.update_text("idea");
    fixture.handle.trigger(RecipientProfile::Private);
    fixture
        .handle
        .wait_for(|v| v.feedback.is_some())
        .await
        .unwrap();
    let shown_at = Instant::now();

    fixture
        .handle
        .wait_for(|v| v.feedback.is_none())
        .await
        .unwrap();

    let elapsed = shown_at.elapsed();
    assert!(elapsed >= FEEDBACK_DURATION);
    assert!(elapsed < FEEDBACK_DURATION + Duration::from_millis(50));
}

#[tokio::test(start_paused = true)]
async fn test_新しいフィードバックで消去がやり直しになる() {
    let mut fixture = mount_with(StubClient::succeeding());

    fixture.handle.update_text("first");
    fixture.handle.trigger(RecipientProfile::Private);
    fixture
        .handle
        .wait_for(|v| v.feedback.is_some())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;

    fixture.handle.update_text("second");
    fixture.handle.trigger(RecipientProfile::Private);
    let second = fixture
        .handle
        .wait_for(|v| v.feedback.as_ref().is_some_and(|f| f.generation == 2))
        .await
        .unwrap();
    let second_shown_at = Instant::now();
    assert!(second.feedback.is_some());

    // 1 件目の期限（表示から 2 秒）を過ぎても 2 件目は残る
    tokio::time::sleep(Duration::from_millis(600)).await;
    let view = fixture.handle.view();
    assert_eq!(view.feedback.map(|f| f.generation), Some(2));

    fixture
        .handle
        .wait_for(|v| v.feedback.is_none())
        .await
        .unwrap();
    let elapsed = second_shown_at.elapsed();
    assert!(elapsed >= FEEDBACK_DURATION);
    assert!(elapsed < FEEDBACK_DURATION + Duration::from_millis(50));
}
