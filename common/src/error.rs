//! エラー型定義

use std::fmt;
use thiserror::Error;

/// 名前の種別（検証エラーの表示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Room,
    Item,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Room => write!(f, "部屋名"),
            NameKind::Item => write!(f, "項目名"),
        }
    }
}

/// AIサービス呼び出しの失敗理由
///
/// 原因はそのまま保持し、ファイル単位で呼び出し元に報告する。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("サーバーに接続できません: {0}")]
    Network(String),

    #[error("サーバーエラー ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("レスポンス形式が不正です: {0}")]
    MalformedResponse(String),

    #[error("未対応の機能です: {0}")]
    Unsupported(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}が空です")]
    InvalidName(NameKind),

    #[error("AIサービスエラー: {0}")]
    DetectionService(#[from] ServiceError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
