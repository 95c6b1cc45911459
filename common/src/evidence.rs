//! 証跡の記録
//!
//! AIサービスが返した説明・文字起こしを受け取り、項目に写真・音声を追記する。
//! AIの呼び出し自体はここでは行わない。結果が揃ってから1回で記録するので、
//! 途中で失敗しても半端な記録は残らない。

use crate::error::Result;
use crate::state::InspectionState;
use crate::types::{AudioEvidence, MediaHandle, PhotoEvidence};

impl InspectionState {
    /// 写真を追記（重複排除・件数上限なし、呼び出し順に保存）
    ///
    /// 戻り値は追記後の写真枚数。
    pub fn add_photo(
        &mut self,
        room: &str,
        item: &str,
        handle: impl Into<MediaHandle>,
        description: impl Into<String>,
    ) -> Result<usize> {
        let (record, _) = self.upsert_item(room, item)?;
        record.photos.push(PhotoEvidence {
            handle: handle.into(),
            description: description.into(),
        });
        Ok(record.photos.len())
    }

    /// 音声を追記
    pub fn add_audio(
        &mut self,
        room: &str,
        item: &str,
        handle: impl Into<MediaHandle>,
        transcript: impl Into<String>,
    ) -> Result<usize> {
        let (record, _) = self.upsert_item(room, item)?;
        record.audios.push(AudioEvidence {
            handle: handle.into(),
            transcript: transcript.into(),
        });
        Ok(record.audios.len())
    }

    /// 項目全体のAI所見を上書き
    pub fn set_ai_analysis(
        &mut self,
        room: &str,
        item: &str,
        text: impl Into<String>,
    ) -> Result<()> {
        let (record, _) = self.upsert_item(room, item)?;
        record.ai_analysis = Some(text.into());
        Ok(())
    }
}
