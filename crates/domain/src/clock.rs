//! # 時刻の取得
//!
//! 送信本文の「Verzonden op」に使う現在時刻の出どころ。
//! コンポーザーは [`Clock`] 越しにしか時刻を読まないため、
//! テストでは [`FixedClock`] を渡せば本文を完全に再現できる。

use chrono::{DateTime, Local, Utc};

/// 現在時刻の提供元
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// 利用者のローカルタイムゾーンに変換した現在時刻
    fn now_local(&self) -> DateTime<Local> {
        self.now().with_timezone(&Local)
    }
}

/// OS の時計
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 常に同じ時刻を返す時計
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
