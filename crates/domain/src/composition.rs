//! # 入力中のテキスト（Composition）
//!
//! 利用者が入力欄で編集しているテキストと、送信可能なテキストを表す。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Composition`] | 入力中のテキスト | キー入力ごとに丸ごと置き換わる生テキスト |
//! | [`NonBlankText`] | 送信可能なテキスト | 前後の空白を除去した、空でないテキスト |
//!
//! 送信リクエストは [`NonBlankText`] からしか組み立てられないため、
//! 空白のみのテキストが送信されることは型レベルで起こりえない。

use std::fmt;

/// 入力中のテキスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    raw: String,
}

impl Composition {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// 空の入力
    pub fn empty() -> Self {
        Self::default()
    }

    /// 入力されたままのテキスト
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 前後の空白を除去して空でないか
    pub fn is_non_blank(&self) -> bool {
        !self.raw.trim().is_empty()
    }

    /// 送信可能なテキストに変換する
    ///
    /// 空白のみの場合は `None`。
    pub fn non_blank(&self) -> Option<NonBlankText> {
        NonBlankText::new(&self.raw)
    }
}

impl From<NonBlankText> for Composition {
    fn from(text: NonBlankText) -> Self {
        Self { raw: text.0 }
    }
}

/// 送信可能なテキスト（trim 済み・空でない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonBlankText(String);

impl NonBlankText {
    /// 前後の空白を除去し、空でなければ作成する
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonBlankText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
