//! AIレスポンスパーサー
//!
//! AI CLIなどの応答テキストからJSONを抽出し、
//! 写真解析・項目検出の結果をパースする

use crate::error::{Error, Result};
use crate::types::{Transcription, VisionAnalysis};
use serde::Deserialize;

/// 応答テキストからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最初に現れる `{...}` または `[...]`
/// 3. エラー
///
/// # Examples
/// ```
/// use vistoria_common::extract_json;
///
/// let response = "Resultado: {\"description\": \"ok\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"description\": \"ok\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find(|c: char| c == '{' || c == '[') {
        let close = if response[start..].starts_with('{') { '}' } else { ']' };
        if let Some(end) = response.rfind(close) {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 応答全体がJSONとして書かれているか（先頭が `{` / `[`、または ```json ブロック）
fn looks_like_json(text: &str) -> bool {
    text.starts_with('{') || text.starts_with('[') || text.contains("```json")
}

/// 写真解析レスポンスをパース
///
/// JSONとして書かれた応答は厳密にパースする。
/// それ以外は文中のJSONを試し、読めなければ応答全体を説明文として扱う（検出項目なし）。
/// 応答が空の場合はエラー。
pub fn parse_vision_response(response: &str) -> Result<VisionAnalysis> {
    let text = response.trim();
    if text.is_empty() {
        return Err(Error::Parse("写真解析の応答が空です".into()));
    }

    if looks_like_json(text) {
        let json_str = extract_json(text)?;
        return serde_json::from_str(json_str.trim())
            .map_err(|e| Error::Parse(format!("写真解析 JSONパースエラー: {}", e)));
    }

    // 説明文中の括弧はJSONとは限らない
    let embedded = extract_json(text)
        .ok()
        .and_then(|json_str| serde_json::from_str::<VisionAnalysis>(json_str.trim()).ok())
        .filter(|analysis| !analysis.description.trim().is_empty());
    Ok(embedded.unwrap_or_else(|| VisionAnalysis {
        description: text.to_string(),
        detected_items: Vec::new(),
    }))
}

#[derive(Deserialize)]
struct TranscriptionPayload {
    #[serde(alias = "transcript", alias = "transcription")]
    text: String,
}

/// 文字起こしレスポンスをパース
///
/// `{"text": "..."}` 形式。JSONとして書かれていない応答は全体を文字起こしとして扱う。
pub fn parse_transcription_response(response: &str) -> Result<Transcription> {
    let text = response.trim();
    if text.is_empty() {
        return Err(Error::Parse("文字起こしの応答が空です".into()));
    }

    if !looks_like_json(text) {
        return Ok(Transcription { text: text.to_string() });
    }

    let json_str = extract_json(text)?;
    let payload: TranscriptionPayload = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("文字起こし JSONパースエラー: {}", e)))?;
    Ok(Transcription { text: payload.text.trim().to_string() })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionPayload {
    List(Vec<String>),
    Wrapped {
        #[serde(alias = "detectedItems", alias = "items")]
        detected_items: Vec<String>,
    },
}

/// 項目検出レスポンスをパース
///
/// `["pia", "fogão"]` と `{"detected_items": [...]}` の両形式に対応する。
pub fn parse_detection_response(response: &str) -> Result<Vec<String>> {
    let json_str = extract_json(response)?;
    let payload: DetectionPayload = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("項目検出 JSONパースエラー: {}", e)))?;
    Ok(match payload {
        DetectionPayload::List(items) => items,
        DetectionPayload::Wrapped { detected_items } => detected_items,
    })
}
