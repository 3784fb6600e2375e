//! # 送信日時の書式化
//!
//! 本文末尾に付与する送信日時を、nl-NL ロケールの
//! 「完全な日付 + 中程度の時刻」形式で書式化する。
//!
//! 例: `zaterdag 17 oktober 2026 om 14:03:21`

use std::fmt::Display;

use chrono::{DateTime, Locale, TimeZone};

/// 送信日時のロケール
pub const TIMESTAMP_LOCALE: Locale = Locale::nl_NL;

/// 曜日 日 月 年 om 時:分:秒
const TIMESTAMP_FORMAT: &str = "%A %-d %B %Y om %H:%M:%S";

/// 日時を nl-NL ロケールで書式化する
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format_localized(TIMESTAMP_FORMAT, TIMESTAMP_LOCALE)
        .to_string()
}
