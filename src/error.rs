use thiserror::Error;

#[derive(Error, Debug)]
pub enum VistoriaError {
    #[error(transparent)]
    Common(#[from] vistoria_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("写真・音声が見つかりません: {0}")]
    NoMediaFound(String),

    #[error("点検セッションがありません: {0}（`vistoria init` で開始してください）")]
    SessionNotFound(String),

    #[error("セッションファイルのバージョンが違います (想定 {expected}, 実際 {found})")]
    SessionVersion { expected: u32, found: u32 },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),
}

pub type Result<T> = std::result::Result<T, VistoriaError>;
