//! AI所見からの修理優先度判定
//!
//! 所見テキストのキーワードで判定する（上位の優先度から順に照合）。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 修理優先度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepairPriority {
    Low,
    Medium,
    High,
    Critical,
}

const CRITICAL_KEYWORDS: &[&str] = &[
    "vazamento",
    "infiltração",
    "rachadura estrutural",
    "perigo",
    "risco",
    "quebrado",
    "não funciona",
];

const HIGH_KEYWORDS: &[&str] = &[
    "danificado",
    "substituição",
    "troca necessária",
    "reparo urgente",
    "deteriorado",
];

const MEDIUM_KEYWORDS: &[&str] = &[
    "desgaste",
    "manchas",
    "riscos",
    "ajuste necessário",
    "limpeza profunda",
];

impl fmt::Display for RepairPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairPriority::Low => write!(f, "low"),
            RepairPriority::Medium => write!(f, "medium"),
            RepairPriority::High => write!(f, "high"),
            RepairPriority::Critical => write!(f, "critical"),
        }
    }
}

/// 所見テキストから優先度を判定
pub fn determine_repair_priority(analysis: &str) -> RepairPriority {
    let text = analysis.to_lowercase();
    let hit = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if hit(CRITICAL_KEYWORDS) {
        RepairPriority::Critical
    } else if hit(HIGH_KEYWORDS) {
        RepairPriority::High
    } else if hit(MEDIUM_KEYWORDS) {
        RepairPriority::Medium
    } else {
        RepairPriority::Low
    }
}
