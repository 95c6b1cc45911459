//! Vistoria Common Library
//!
//! 点検状態モデルと自動検出結果の照合ロジック（CLIから共有）

pub mod error;
pub mod name;
pub mod types;
pub mod ledger;
pub mod state;
pub mod evidence;
pub mod reconcile;
pub mod template;
pub mod compare;
pub mod cost;
pub mod priority;
pub mod parser;
pub mod prompts;
pub mod export;

pub use error::{Error, NameKind, Result, ServiceError};
pub use name::{same_name, NameKey};
pub use types::{
    AudioEvidence, InspectionInfo, InspectionKind, ItemRecord, MediaHandle, PhotoEvidence, Status,
    Transcription, VisionAnalysis,
};
pub use ledger::RoomLedger;
pub use state::InspectionState;
pub use reconcile::detect_candidates;
pub use template::{ChecklistTemplate, TemplateRoom};
pub use compare::{compare_inspections, ComparisonReport, StatusChange};
pub use cost::{estimate_repair_costs, CostEstimate, CostLine, CostTable, RepairCost};
pub use priority::{determine_repair_priority, RepairPriority};
pub use parser::{
    extract_json, parse_detection_response, parse_transcription_response, parse_vision_response,
};
