//! 自動検出結果の照合
//!
//! AIが写真から検出した項目名のうち、台帳にまだない項目だけを候補として返す。
//!
//! ## 処理フロー
//! 1. 台帳にある項目の正規化キー集合を作る
//! 2. 撮影対象の項目（current item）があれば、そのキーも除外する
//! 3. 検出順に走査し、除外キーにも既出キーにもないものを残す（先勝ち）
//! 4. 候補の算出は読み取りのみ。追加は `confirm_add` で行う
//!
//! `confirm_add` は追加時点の台帳で再確認するため、同じ候補を2回確定しても重複しない。

use crate::error::{NameKind, Result};
use crate::ledger::RoomLedger;
use crate::name::{display_name, NameKey};
use crate::state::InspectionState;
use std::collections::HashSet;

/// 追加候補を算出（台帳は変更しない）
///
/// 空白のみの検出名は読み飛ばす。返す名前は前後の空白を除去した表示名。
/// 検出結果が空なら空の候補を返す（エラーではない）。
pub fn detect_candidates<S: AsRef<str>>(
    ledger: &RoomLedger,
    detected: &[S],
    current_item: Option<&str>,
) -> Vec<String> {
    let mut seen: HashSet<NameKey> = ledger.keys().cloned().collect();
    if let Some(key) = current_item.and_then(NameKey::new) {
        seen.insert(key);
    }

    detected
        .iter()
        .filter_map(|raw| {
            let raw = raw.as_ref();
            let key = NameKey::new(raw)?;
            seen.insert(key).then(|| display_name(raw).to_string())
        })
        .collect()
}

impl InspectionState {
    /// 部屋の追加候補を算出
    ///
    /// 部屋名（と指定時は撮影対象の項目名）が空白のみなら `InvalidName`。
    pub fn candidates_for<S: AsRef<str>>(
        &self,
        room: &str,
        detected: &[S],
        current_item: Option<&str>,
    ) -> Result<Vec<String>> {
        NameKey::parse(room, NameKind::Room)?;
        if let Some(item) = current_item {
            NameKey::parse(item, NameKind::Item)?;
        }
        Ok(detect_candidates(&self.room(room), detected, current_item))
    }

    /// 確定した候補を台帳に追加
    ///
    /// 名前はすべて先に検証し、1つでも不正なら何も追加しない。
    /// 既に存在する項目は追加しない。戻り値は実際に追加した項目名。
    pub fn confirm_add<S: AsRef<str>>(
        &mut self,
        room: &str,
        candidates: &[S],
    ) -> Result<Vec<String>> {
        let room_key = NameKey::parse(room, NameKind::Room)?;
        let keyed = candidates
            .iter()
            .map(|name| {
                let name = name.as_ref();
                NameKey::parse(name, NameKind::Item).map(|key| (key, display_name(name)))
            })
            .collect::<Result<Vec<_>>>()?;

        let ledger = self.upsert_room(room_key, display_name(room));
        let mut added = Vec::new();
        for (key, display) in keyed {
            let (_, created) = ledger.entry(key, display);
            if created {
                added.push(display.to_string());
            }
        }
        Ok(added)
    }
}
