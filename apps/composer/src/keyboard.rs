//! # キーボードショートカット
//!
//! ウィンドウ全体のキー入力を [`KeyboardAction`] に変換し、マウント中のコントローラーへ届ける。
//!
//! 表示層はキー入力を [`ShortcutRegistry::dispatch`] に渡すだけでよい。
//! コントローラーは登録時に [`ShortcutGuard`] を受け取り、ガードの破棄で登録が解除される。

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use crate::message::KeyboardAction;

/// 押されたキー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Character(String),
}

/// 修飾キーの状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl:  bool,
    /// macOS の Cmd
    pub meta:  bool,
    pub shift: bool,
    pub alt:   bool,
}

impl Modifiers {
    pub const CTRL: Self = Self {
        ctrl:  true,
        meta:  false,
        shift: false,
        alt:   false,
    };
    pub const META: Self = Self {
        ctrl:  false,
        meta:  true,
        shift: false,
        alt:   false,
    };

    /// プラットフォームのコマンドキー（Ctrl または Cmd）が押されているか
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// キー入力イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key:           Key,
    pub modifiers:     Modifiers,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            default_prevented: false,
        }
    }

    /// 既定の動作（改行の挿入など）を抑止する
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// キー入力をショートカットに変換する
pub fn handle_key_press(key: &Key, modifiers: Modifiers) -> Option<KeyboardAction> {
    match key {
        // Ctrl+Enter / Cmd+Enter: 既定の送信先へ送信
        Key::Enter if modifiers.command() => Some(KeyboardAction::Send),
        _ => None,
    }
}

type Listener = Arc<dyn Fn(&mut KeyEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
}

/// ウィンドウ全体のキー入力の購読先
///
/// `clone()` した値は同じ登録を共有する。
#[derive(Clone, Default)]
pub struct ShortcutRegistry {
    inner: Arc<Mutex<Listeners>>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// リスナーを登録する
    ///
    /// 返されたガードが破棄されるまで有効。
    pub fn register(
        &self,
        listener: impl Fn(&mut KeyEvent) + Send + Sync + 'static,
    ) -> ShortcutGuard {
        let mut listeners = lock(&self.inner);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.insert(id, Arc::new(listener));

        ShortcutGuard {
            registry: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// キー入力を登録中の全リスナーに渡す
    pub fn dispatch(&self, event: &mut KeyEvent) {
        // リスナー内から登録・解除できるよう、ロックを外してから呼び出す
        let listeners: Vec<Listener> = lock(&self.inner).entries.values().cloned().collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// 登録中のリスナー数
    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 登録の寿命を表すガード
///
/// 破棄時に登録を解除する。レジストリが先に破棄されていれば何もしない。
#[must_use = "ガードを破棄すると登録が即座に解除される"]
pub struct ShortcutGuard {
    registry: Weak<Mutex<Listeners>>,
    id:       u64,
}

impl Drop for ShortcutGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).entries.remove(&self.id);
        }
    }
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}
