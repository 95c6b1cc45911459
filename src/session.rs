//! 点検セッションファイル
//!
//! 1セッション = 1件の点検。物件情報と点検状態をJSONで保存する。
//! バージョンが合わないファイルは読み込まずエラーにする（記録を黙って捨てない）。

use crate::error::{Result, VistoriaError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use vistoria_common::{InspectionInfo, InspectionState};

/// セッションファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 物件・立会者情報
    pub info: InspectionInfo,
    /// 点検状態
    pub state: InspectionState,
}

impl Session {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(info: InspectionInfo, state: InspectionState) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            info,
            state,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// セッションファイルを読み込み
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VistoriaError::SessionNotFound(path.display().to_string()));
        }

        let reader = BufReader::new(File::open(path)?);
        let value: serde_json::Value = serde_json::from_reader(reader)?;

        // 状態の形が変わっていても先にバージョンで判定する
        // u32 に収まらない値は切り詰めず不一致として扱う
        let raw = value.get("version").and_then(serde_json::Value::as_u64).unwrap_or(0);
        let found = u32::try_from(raw).unwrap_or(u32::MAX);
        if raw != u64::from(Self::CURRENT_VERSION) {
            return Err(VistoriaError::SessionVersion {
                expected: Self::CURRENT_VERSION,
                found,
            });
        }

        let session: Session = serde_json::from_value(value)?;
        tracing::debug!(
            path = %path.display(),
            rooms = session.state.room_count(),
            items = session.state.item_count(),
            "session loaded"
        );
        Ok(session)
    }

    /// セッションファイルを保存
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }

    /// セッションファイルを削除
    ///
    /// 戻り値: 削除した場合true、ファイルがなかった場合false
    pub fn remove(path: &Path) -> Result<bool> {
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(InspectionInfo::default(), InspectionState::new())
    }
}
