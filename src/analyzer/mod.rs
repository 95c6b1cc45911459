//! AIサービス境界
//!
//! 写真からの項目検出・写真解析・音声の文字起こしの3機能。
//! 実装は差し替え可能（CLI連携、テスト用の固定応答など）。
//! 失敗は `ServiceError` で原因ごとに返す。

mod cli_service;

pub use cli_service::CliAiService;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use vistoria_common::{ServiceError, Transcription, VisionAnalysis};

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait AiService: Send + Sync {
    /// 部屋の写真群から項目名を検出（生の名前、重複あり得る）
    async fn detect_items_from_images(&self, images: &[PathBuf]) -> ServiceResult<Vec<String>>;

    /// 1枚の写真を解析して説明と写り込んだ項目を返す
    async fn analyze_image(
        &self,
        image: &Path,
        context_prompt: &str,
    ) -> ServiceResult<VisionAnalysis>;

    /// 文字起こしに対応しているか（未対応なら一括取り込みの前に断れる）
    fn supports_transcription(&self) -> bool {
        false
    }

    /// 音声を文字起こし
    async fn transcribe_audio(&self, audio: &Path) -> ServiceResult<Transcription> {
        Err(ServiceError::Unsupported(format!(
            "文字起こしに対応していません: {}",
            audio.display()
        )))
    }
}
