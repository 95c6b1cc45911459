//! 修理費の見積り
//!
//! 状態が damaged / missing の項目について、地域別の単価表から費用を引いて合計する。
//! 単価表にない項目は見積りに含めない。

use crate::error::Result;
use crate::name::same_name;
use crate::state::InspectionState;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "RJ";
pub const CURRENCY: &str = "BRL";

/// 単価表の1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairCost {
    pub region: String,
    pub item_type: String,
    pub repair_type: String,
    pub unit: String,
    pub cost_per_unit: f64,
    #[serde(default)]
    pub description: String,
}

/// 単価表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    entries: Vec<RepairCost>,
}

/// 見積り明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub room: String,
    pub item: String,
    pub repair_type: String,
    pub cost: f64,
    pub unit: String,
    pub description: String,
}

/// 見積り結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub total_cost: f64,
    pub detailed_costs: Vec<CostLine>,
    pub currency: String,
    pub region: String,
}

impl CostTable {
    pub fn new(entries: Vec<RepairCost>) -> Self {
        Self { entries }
    }

    /// JSON配列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        Ok(table)
    }

    pub fn entries(&self) -> &[RepairCost] {
        &self.entries
    }

    /// 地域・項目名で単価を検索
    pub fn lookup(&self, region: &str, item: &str) -> Option<&RepairCost> {
        self.entries
            .iter()
            .find(|e| e.region.eq_ignore_ascii_case(region) && same_name(&e.item_type, item))
    }

    /// 既定の単価表（RJ）
    pub fn default_table() -> Self {
        let rows: &[(&str, &str, &str, f64, &str)] = &[
            ("torneira", "troca", "unidade", 150.0, "Troca de torneira comum"),
            ("piso", "reparo", "m2", 45.0, "Reparo de piso cerâmico"),
            ("parede", "pintura", "m2", 25.0, "Pintura de parede"),
            ("vaso sanitário", "troca", "unidade", 300.0, "Troca de vaso sanitário"),
            ("pia", "troca", "unidade", 200.0, "Troca de pia"),
            ("azulejo", "reparo", "m2", 35.0, "Reparo de azulejos"),
            ("porta", "reparo", "unidade", 120.0, "Reparo de porta"),
            ("janela", "reparo", "unidade", 180.0, "Reparo de janela"),
        ];
        let entries = rows
            .iter()
            .map(|&(item_type, repair_type, unit, cost_per_unit, description)| RepairCost {
                region: DEFAULT_REGION.to_string(),
                item_type: item_type.to_string(),
                repair_type: repair_type.to_string(),
                unit: unit.to_string(),
                cost_per_unit,
                description: description.to_string(),
            })
            .collect();
        Self { entries }
    }
}

/// 修理費を見積もる
pub fn estimate_repair_costs(
    state: &InspectionState,
    table: &CostTable,
    region: &str,
) -> CostEstimate {
    let mut detailed_costs = Vec::new();

    for room in state.rooms() {
        for record in room {
            if !record.status.is_some_and(|s| s.needs_repair()) {
                continue;
            }
            if let Some(cost) = table.lookup(region, &record.name) {
                detailed_costs.push(CostLine {
                    room: room.name().to_string(),
                    item: record.name.clone(),
                    repair_type: cost.repair_type.clone(),
                    cost: cost.cost_per_unit,
                    unit: cost.unit.clone(),
                    description: cost.description.clone(),
                });
            }
        }
    }

    CostEstimate {
        total_cost: detailed_costs.iter().map(|l| l.cost).sum(),
        detailed_costs,
        currency: CURRENCY.to_string(),
        region: region.to_string(),
    }
}
