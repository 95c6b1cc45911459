//! 点検状態（部屋名 → 台帳）
//!
//! 1セッションにつき1つの点検状態を保持する。グローバルには置かず、
//! 呼び出し側が所有して参照で渡す。
//!
//! ## 更新操作の upsert 契約
//! `set_status` / `update_notes` / `add_photo` などの更新操作は、対象の部屋・項目が
//! なければ既定値（状態未設定・証跡なし・メモ空）で作成してから更新する。
//! 作成だけを行いたい場合は `ensure_item` を使う。
//! 部屋名・項目名が空白のみの場合は `Error::InvalidName` を返し、何も作成しない。

use crate::error::{NameKind, Result};
use crate::ledger::RoomLedger;
use crate::name::{display_name, NameKey};
use crate::types::{ItemRecord, Status};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// 点検状態
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StateRepr", into = "StateRepr")]
pub struct InspectionState {
    rooms: Vec<RoomLedger>,
    index: HashMap<NameKey, usize>,
}

#[derive(Serialize, Deserialize)]
struct StateRepr {
    #[serde(default)]
    rooms: Vec<RoomLedger>,
}

impl InspectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 部屋の台帳を取得（未作成なら空の台帳）
    ///
    /// 失敗しない。空白のみの部屋名にも空の台帳を返す。
    pub fn room(&self, room: &str) -> Cow<'_, RoomLedger> {
        match NameKey::new(room).and_then(|key| self.index.get(&key)) {
            Some(&idx) => Cow::Borrowed(&self.rooms[idx]),
            None => Cow::Owned(RoomLedger::new(display_name(room))),
        }
    }

    /// 項目を取得（作成はしない）
    pub fn item(&self, room: &str, item: &str) -> Option<&ItemRecord> {
        let key = NameKey::new(room)?;
        let idx = *self.index.get(&key)?;
        self.rooms[idx].get(item)
    }

    pub fn has_room(&self, room: &str) -> bool {
        NameKey::new(room).is_some_and(|key| self.index.contains_key(&key))
    }

    /// 挿入順の部屋一覧
    pub fn rooms(&self) -> std::slice::Iter<'_, RoomLedger> {
        self.rooms.iter()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn item_count(&self) -> usize {
        self.rooms.iter().map(RoomLedger::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// 部屋を作成（既存なら何もしない）。作成したらtrue
    pub fn ensure_room(&mut self, room: &str) -> Result<bool> {
        let key = NameKey::parse(room, NameKind::Room)?;
        let created = !self.index.contains_key(&key);
        self.upsert_room(key, display_name(room));
        Ok(created)
    }

    /// 項目を作成（既存なら何もしない）。作成したらtrue
    pub fn ensure_item(&mut self, room: &str, item: &str) -> Result<bool> {
        let (_, created) = self.upsert_item(room, item)?;
        Ok(created)
    }

    /// 状態を設定（同じ値の再設定は実質的に何も変えない）
    pub fn set_status(&mut self, room: &str, item: &str, status: Status) -> Result<()> {
        let (record, _) = self.upsert_item(room, item)?;
        record.status = Some(status);
        Ok(())
    }

    /// 状態を未設定に戻す
    pub fn clear_status(&mut self, room: &str, item: &str) -> Result<()> {
        let (record, _) = self.upsert_item(room, item)?;
        record.status = None;
        Ok(())
    }

    /// メモをそのまま置き換える（内容の検証はしない）
    pub fn update_notes(&mut self, room: &str, item: &str, text: impl Into<String>) -> Result<()> {
        let (record, _) = self.upsert_item(room, item)?;
        record.notes = text.into();
        Ok(())
    }

    /// 全状態を破棄
    pub fn reset_all(&mut self) {
        self.rooms.clear();
        self.index.clear();
    }

    /// 名前を検証してから部屋・項目を upsert する
    ///
    /// 検証は作成より先に行うので、項目名が不正なら部屋も作られない。
    pub(crate) fn upsert_item(
        &mut self,
        room: &str,
        item: &str,
    ) -> Result<(&mut ItemRecord, bool)> {
        let room_key = NameKey::parse(room, NameKind::Room)?;
        let item_key = NameKey::parse(item, NameKind::Item)?;
        let ledger = self.upsert_room(room_key, display_name(room));
        Ok(ledger.entry(item_key, display_name(item)))
    }

    pub(crate) fn upsert_room(&mut self, key: NameKey, display: &str) -> &mut RoomLedger {
        if let Some(&idx) = self.index.get(&key) {
            return &mut self.rooms[idx];
        }
        let idx = self.rooms.len();
        self.rooms.push(RoomLedger::new(display));
        self.index.insert(key, idx);
        &mut self.rooms[idx]
    }
}

impl From<StateRepr> for InspectionState {
    fn from(repr: StateRepr) -> Self {
        let mut state = InspectionState::new();
        for ledger in repr.rooms {
            let Some(key) = NameKey::new(ledger.name()) else { continue };
            if state.index.contains_key(&key) {
                continue;
            }
            state.index.insert(key, state.rooms.len());
            state.rooms.push(ledger);
        }
        state
    }
}

impl From<InspectionState> for StateRepr {
    fn from(state: InspectionState) -> Self {
        Self { rooms: state.rooms }
    }
}
