//! 部屋ごとの項目台帳
//!
//! 正規化キー → 点検記録 の対応を挿入順で保持する。
//! 可変参照はクレート内の更新操作（state / evidence / reconcile）からのみ取得できる。

use crate::name::NameKey;
use crate::types::ItemRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 部屋の項目台帳
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LedgerRepr", into = "LedgerRepr")]
pub struct RoomLedger {
    name: String,
    items: Vec<ItemRecord>,
    index: HashMap<NameKey, usize>,
}

/// 保存形式（インデックスは読み込み時に再構築）
#[derive(Serialize, Deserialize)]
struct LedgerRepr {
    name: String,
    #[serde(default)]
    items: Vec<ItemRecord>,
}

impl RoomLedger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 部屋の表示名
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 挿入順の項目一覧
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemRecord> {
        self.items.iter()
    }

    /// 名前（同一性判定）で項目を取得
    pub fn get(&self, item: &str) -> Option<&ItemRecord> {
        let key = NameKey::new(item)?;
        self.get_by_key(&key)
    }

    pub fn get_by_key(&self, key: &NameKey) -> Option<&ItemRecord> {
        self.index.get(key).map(|&idx| &self.items[idx])
    }

    pub fn contains(&self, item: &str) -> bool {
        NameKey::new(item).is_some_and(|key| self.contains_key(&key))
    }

    pub fn contains_key(&self, key: &NameKey) -> bool {
        self.index.contains_key(key)
    }

    /// 台帳内の全キー
    pub fn keys(&self) -> impl Iterator<Item = &NameKey> {
        self.index.keys()
    }

    /// 項目を取得、なければ既定値で作成
    ///
    /// 戻り値の bool は新規作成されたかどうか。
    pub(crate) fn entry(&mut self, key: NameKey, display: &str) -> (&mut ItemRecord, bool) {
        if let Some(&idx) = self.index.get(&key) {
            return (&mut self.items[idx], false);
        }
        let idx = self.items.len();
        self.items.push(ItemRecord::new(display));
        self.index.insert(key, idx);
        (&mut self.items[idx], true)
    }
}

impl<'a> IntoIterator for &'a RoomLedger {
    type Item = &'a ItemRecord;
    type IntoIter = std::slice::Iter<'a, ItemRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<LedgerRepr> for RoomLedger {
    fn from(repr: LedgerRepr) -> Self {
        let mut ledger = RoomLedger::new(repr.name);
        for record in repr.items {
            // 空名・重複キーは先勝ちで読み飛ばす
            let Some(key) = record.key() else { continue };
            if ledger.index.contains_key(&key) {
                continue;
            }
            ledger.index.insert(key, ledger.items.len());
            ledger.items.push(record);
        }
        ledger
    }
}

impl From<RoomLedger> for LedgerRepr {
    fn from(ledger: RoomLedger) -> Self {
        Self {
            name: ledger.name,
            items: ledger.items,
        }
    }
}
