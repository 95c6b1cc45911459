//! 名前の同一性判定
//!
//! 部屋名・項目名は前後の空白を除去して小文字化した形で比較する。
//! アクセント記号の正規化は行わない（"sofá" と "sofa" は別項目）。

use crate::error::{Error, NameKind, Result};
use std::fmt;

/// 正規化済みの名前キー
///
/// 空白のみの名前からは作れない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameKey(String);

impl NameKey {
    /// 正規化キーを生成（空白のみならNone）
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    /// 正規化キーを生成（空白のみならInvalidName）
    pub fn parse(raw: &str, kind: NameKind) -> Result<Self> {
        Self::new(raw).ok_or(Error::InvalidName(kind))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 2つの名前が同じ項目を指すか
pub fn same_name(a: &str, b: &str) -> bool {
    match (NameKey::new(a), NameKey::new(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// 表示名（前後の空白を除去）
pub fn display_name(raw: &str) -> &str {
    raw.trim()
}
