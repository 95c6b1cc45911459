//! 入居時・退去時の点検比較
//!
//! 入居時の各項目について、退去時に同じ項目（同一性判定）があり状態が異なるものを
//! 変化として集計する。

use crate::state::InspectionState;
use crate::types::Status;
use serde::{Deserialize, Serialize};

/// 劣化1件あたりの概算費用（BRL）
pub const DETERIORATION_UNIT_COST: f64 = 100.0;

/// 状態の変化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub room: String,
    pub item: String,
    pub from_status: Option<Status>,
    pub to_status: Option<Status>,
}

/// 比較結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub total_changes: usize,
    pub changes: Vec<StatusChange>,
    /// ok → damaged / dirty
    pub deteriorated: Vec<StatusChange>,
    /// damaged / dirty → ok
    pub improved: Vec<StatusChange>,
    /// 上記以外で damaged になったもの
    pub new_damages: Vec<StatusChange>,
    pub estimated_deterioration_cost: f64,
}

fn is_wear(status: Option<Status>) -> bool {
    matches!(status, Some(Status::Damaged) | Some(Status::Dirty))
}

/// 入居時と退去時の点検を比較
pub fn compare_inspections(entry: &InspectionState, exit: &InspectionState) -> ComparisonReport {
    let mut report = ComparisonReport::default();

    for room in entry.rooms() {
        for before in room {
            let Some(after) = exit.item(room.name(), &before.name) else {
                continue;
            };
            if before.status == after.status {
                continue;
            }

            let change = StatusChange {
                room: room.name().to_string(),
                item: before.name.clone(),
                from_status: before.status,
                to_status: after.status,
            };

            if before.status == Some(Status::Ok) && is_wear(after.status) {
                report.deteriorated.push(change.clone());
            } else if is_wear(before.status) && after.status == Some(Status::Ok) {
                report.improved.push(change.clone());
            } else if after.status == Some(Status::Damaged) {
                report.new_damages.push(change.clone());
            }
            report.changes.push(change);
        }
    }

    report.total_changes = report.changes.len();
    report.estimated_deterioration_cost =
        report.deteriorated.len() as f64 * DETERIORATION_UNIT_COST;
    report
}
