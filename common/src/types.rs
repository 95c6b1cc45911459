//! 点検データの型定義
//!
//! - Status: 項目の状態（ok / damaged / dirty / missing）
//! - PhotoEvidence / AudioEvidence: 写真・音声の証跡
//! - ItemRecord: 部屋内の1項目の点検記録
//! - VisionAnalysis / Transcription: AIサービスの応答
//! - InspectionInfo: 物件・立会者などの点検メタデータ

use crate::name::NameKey;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 項目の状態
///
/// 順序はなく、どの値からどの値へも（未設定へも）自由に遷移できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    #[serde(alias = "danificado")]
    Damaged,
    #[serde(alias = "sujo")]
    Dirty,
    #[serde(alias = "ausente")]
    Missing,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Damaged => "damaged",
            Status::Dirty => "dirty",
            Status::Missing => "missing",
        }
    }

    /// 報告書用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Damaged => "Danificado",
            Status::Dirty => "Sujo",
            Status::Missing => "Ausente",
        }
    }

    /// 修理費見積りの対象か
    pub fn needs_repair(&self) -> bool {
        matches!(self, Status::Damaged | Status::Missing)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ok" => Ok(Status::Ok),
            "damaged" | "danificado" => Ok(Status::Damaged),
            "dirty" | "sujo" => Ok(Status::Dirty),
            "missing" | "ausente" => Ok(Status::Missing),
            _ => Err(format!(
                "Unknown status: {}. Use ok, damaged, dirty, or missing",
                s
            )),
        }
    }
}

/// メディアへの不透明な参照（パス・URLなど）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaHandle(String);

impl MediaHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaHandle {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MediaHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&std::path::Path> for MediaHandle {
    fn from(path: &std::path::Path) -> Self {
        Self(path.display().to_string())
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 写真の証跡
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEvidence {
    pub handle: MediaHandle,
    #[serde(default)]
    pub description: String,
}

/// 音声の証跡
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEvidence {
    pub handle: MediaHandle,
    #[serde(default)]
    pub transcript: String,
}

/// 1項目の点検記録
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// 表示名（前後の空白除去済み）
    pub name: String,

    #[serde(default)]
    pub status: Option<Status>,

    #[serde(default)]
    pub photos: Vec<PhotoEvidence>,

    #[serde(default)]
    pub audios: Vec<AudioEvidence>,

    #[serde(default)]
    pub notes: String,

    /// 項目全体に対するAI所見（写真ごとの説明とは別）
    #[serde(default)]
    pub ai_analysis: Option<String>,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn key(&self) -> Option<NameKey> {
        NameKey::new(&self.name)
    }

    /// 状態・証跡・メモ・所見のいずれも未入力か
    pub fn is_blank(&self) -> bool {
        self.status.is_none()
            && self.photos.is_empty()
            && self.audios.is_empty()
            && self.notes.is_empty()
            && self.ai_analysis.is_none()
    }
}

/// 写真解析の応答
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionAnalysis {
    pub description: String,
    #[serde(alias = "detectedItems")]
    pub detected_items: Vec<String>,
}

/// 音声文字起こしの応答
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transcription {
    pub text: String,
}

/// 点検の種別（入居時 / 退去時）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionKind {
    #[default]
    Entrada,
    Saida,
}

impl fmt::Display for InspectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectionKind::Entrada => write!(f, "entrada"),
            InspectionKind::Saida => write!(f, "saida"),
        }
    }
}

impl FromStr for InspectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entrada" | "entry" | "in" => Ok(InspectionKind::Entrada),
            "saida" | "saída" | "exit" | "out" => Ok(InspectionKind::Saida),
            _ => Err(format!("Unknown inspection kind: {}. Use entrada or saida", s)),
        }
    }
}

/// 点検メタデータ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionInfo {
    pub property_address: String,
    pub landlord_name: String,
    pub tenant_name: String,
    pub inspection_kind: InspectionKind,
    pub inspection_date: Option<NaiveDateTime>,
    pub template: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str_accepts_portuguese() {
        assert_eq!("danificado".parse::<Status>().unwrap(), Status::Damaged);
        assert_eq!(" SUJO ".parse::<Status>().unwrap(), Status::Dirty);
        assert_eq!("ausente".parse::<Status>().unwrap(), Status::Missing);
        assert_eq!("ok".parse::<Status>().unwrap(), Status::Ok);
        assert!("quebrado".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&Status::Damaged).unwrap(), "\"damaged\"");
        let status: Status = serde_json::from_str("\"sujo\"").unwrap();
        assert_eq!(status, Status::Dirty);
    }

    #[test]
    fn test_item_record_default_is_blank() {
        let record = ItemRecord::new("pia");
        assert!(record.is_blank());
        assert_eq!(record.key().unwrap().as_str(), "pia");
    }

    #[test]
    fn test_vision_analysis_accepts_camel_case() {
        let json = r#"{"description": "Pia em bom estado", "detectedItems": ["torneira"]}"#;
        let analysis: VisionAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.detected_items, vec!["torneira"]);
    }

    #[test]
    fn test_inspection_kind_from_str() {
        assert_eq!("saída".parse::<InspectionKind>().unwrap(), InspectionKind::Saida);
        assert_eq!("entrada".parse::<InspectionKind>().unwrap(), InspectionKind::Entrada);
    }
}
