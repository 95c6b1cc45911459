//! 写真・音声の一括取り込み
//!
//! ## 処理フロー
//! 1. 部屋名・項目名を先に検証（不正なら何も呼ばない）
//! 2. 全ファイルのAI呼び出しを取り込み順に発行し、並行に待つ
//! 3. 先頭から順に結果が揃ったものを記録（取り込み順 = 記録順）
//! 4. 失敗したファイルは記録せず、結果一覧に原因を残す。他のファイルは記録を続ける
//!
//! 写真の解析結果に含まれる他の項目は、最後にまとめて追加候補として返す（台帳は変更しない）。

use crate::analyzer::AiService;
use crate::error::Result;
use futures::stream::{FuturesOrdered, StreamExt};
use std::path::{Path, PathBuf};
use vistoria_common::prompts::{build_vision_prompt, item_context};
use vistoria_common::{InspectionState, MediaHandle, NameKey, NameKind, ServiceError};

/// ファイル単位の結果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// 記録済み（写真は説明、音声は文字起こし）
    Attached { file: PathBuf, text: String },
    /// AI呼び出し失敗（記録なし）
    Failed { file: PathBuf, error: ServiceError },
}

impl FileOutcome {
    pub fn file(&self) -> &Path {
        match self {
            FileOutcome::Attached { file, .. } | FileOutcome::Failed { file, .. } => file,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, FileOutcome::Attached { .. })
    }
}

/// 一括取り込みの結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReport {
    /// 取り込み順の結果
    pub outcomes: Vec<FileOutcome>,
    /// 写真に写っていた、台帳にまだない項目（写真取り込み時のみ）
    pub candidates: Vec<String>,
}

impl UploadReport {
    pub fn attached_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_attached()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.attached_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &ServiceError)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failed { file, error } => Some((file.as_path(), error)),
            FileOutcome::Attached { .. } => None,
        })
    }
}

fn validate_target(room: &str, item: &str) -> Result<()> {
    NameKey::parse(room, NameKind::Room)?;
    NameKey::parse(item, NameKind::Item)?;
    Ok(())
}

/// 写真を一括で項目に取り込む
pub async fn attach_photos(
    state: &mut InspectionState,
    service: &dyn AiService,
    room: &str,
    item: &str,
    files: &[PathBuf],
) -> Result<UploadReport> {
    validate_target(room, item)?;

    let prompt = build_vision_prompt(item, &item_context(room, item));
    let prompt = prompt.as_str();

    let mut pending = FuturesOrdered::new();
    for file in files {
        pending.push_back(async move { (file, service.analyze_image(file, prompt).await) });
    }

    let mut report = UploadReport::default();
    let mut detected = Vec::new();
    while let Some((file, result)) = pending.next().await {
        match result {
            Ok(analysis) => {
                let count = state.add_photo(
                    room,
                    item,
                    MediaHandle::from(file.as_path()),
                    analysis.description.as_str(),
                )?;
                tracing::debug!(
                    file = %file.display(),
                    room,
                    item,
                    photos = count,
                    "photo attached"
                );
                detected.extend(analysis.detected_items);
                report.outcomes.push(FileOutcome::Attached {
                    file: file.clone(),
                    text: analysis.description,
                });
            }
            Err(error) => {
                tracing::warn!(file = %file.display(), %error, "photo analysis failed");
                report.outcomes.push(FileOutcome::Failed {
                    file: file.clone(),
                    error,
                });
            }
        }
    }

    report.candidates = state.candidates_for(room, &detected, Some(item))?;
    Ok(report)
}

/// 音声を一括で項目に取り込む
pub async fn attach_audios(
    state: &mut InspectionState,
    service: &dyn AiService,
    room: &str,
    item: &str,
    files: &[PathBuf],
) -> Result<UploadReport> {
    validate_target(room, item)?;

    let mut pending = FuturesOrdered::new();
    for file in files {
        pending.push_back(async move { (file, service.transcribe_audio(file).await) });
    }

    let mut report = UploadReport::default();
    while let Some((file, result)) = pending.next().await {
        match result {
            Ok(transcription) => {
                let count = state.add_audio(
                    room,
                    item,
                    MediaHandle::from(file.as_path()),
                    transcription.text.as_str(),
                )?;
                tracing::debug!(
                    file = %file.display(),
                    room,
                    item,
                    audios = count,
                    "audio attached"
                );
                report.outcomes.push(FileOutcome::Attached {
                    file: file.clone(),
                    text: transcription.text,
                });
            }
            Err(error) => {
                tracing::warn!(file = %file.display(), %error, "audio transcription failed");
                report.outcomes.push(FileOutcome::Failed {
                    file: file.clone(),
                    error,
                });
            }
        }
    }

    Ok(report)
}

/// 部屋の写真から項目を検出し、台帳にない項目を候補として返す（台帳は変更しない）
///
/// 検出サービスの失敗は `DetectionService` エラー。検出0件は空の候補。
pub async fn auto_detect(
    state: &InspectionState,
    service: &dyn AiService,
    room: &str,
    files: &[PathBuf],
) -> Result<Vec<String>> {
    NameKey::parse(room, NameKind::Room)?;

    let detected = service
        .detect_items_from_images(files)
        .await
        .map_err(vistoria_common::Error::from)?;
    tracing::debug!(room, detected = detected.len(), "items detected");

    Ok(state.candidates_for(room, &detected, None)?)
}

/// 1枚の写真で項目全体のAI所見を更新
///
/// 写真は記録しない（`attach_photos` と分けて明示的に実行する）。
pub async fn analyze_item(
    state: &mut InspectionState,
    service: &dyn AiService,
    room: &str,
    item: &str,
    image: &Path,
) -> Result<String> {
    validate_target(room, item)?;

    let prompt = build_vision_prompt(item, &item_context(room, item));
    let analysis = service
        .analyze_image(image, &prompt)
        .await
        .map_err(vistoria_common::Error::from)?;

    state.set_ai_analysis(room, item, analysis.description.as_str())?;
    Ok(analysis.description)
}
