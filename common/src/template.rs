//! チェックリストのテンプレート
//!
//! 物件種別ごとの部屋と既定項目。組み込みプリセットのほか、JSONで独自定義できる。

use crate::error::Result;
use crate::state::InspectionState;
use serde::{Deserialize, Serialize};

/// 部屋ごとの既定項目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRoom {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// チェックリストテンプレート
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub rooms: Vec<TemplateRoom>,
}

/// 組み込みプリセット名
pub const PRESET_NAMES: &[&str] = &["apartamento", "casa"];

const SALA: &[&str] = &["piso", "parede", "teto", "janela", "porta", "tomadas", "interruptores"];
const COZINHA: &[&str] = &[
    "pia",
    "torneira",
    "fogão",
    "geladeira",
    "armários",
    "bancada",
    "azulejo",
    "piso",
];
const QUARTO: &[&str] = &["piso", "parede", "teto", "janela", "porta", "armário", "tomadas"];
const SERVICO: &[&str] = &["tanque", "torneira", "varal", "piso", "parede"];

impl ChecklistTemplate {
    /// 組み込みプリセットを取得
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "apartamento" | "apartment" => Some(Self::apartment_preset()),
            "casa" | "house" => Some(Self::house_preset()),
            _ => None,
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let template: Self = serde_json::from_str(json)?;
        Ok(template)
    }

    /// 全部屋の項目数
    pub fn item_count(&self) -> usize {
        self.rooms.iter().map(|r| r.items.len()).sum()
    }

    fn room(name: &str, items: &[&str]) -> TemplateRoom {
        TemplateRoom {
            name: name.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 集合住宅用プリセット
    fn apartment_preset() -> Self {
        Self {
            name: "Apartamento Padrão".into(),
            kind: "apartamento".into(),
            rooms: vec![
                Self::room("sala", SALA),
                Self::room("cozinha", COZINHA),
                Self::room(
                    "banheiro",
                    &[
                        "vaso sanitário",
                        "pia",
                        "chuveiro",
                        "box",
                        "espelho",
                        "azulejo",
                        "piso",
                        "ventilação",
                    ],
                ),
                Self::room("quarto1", QUARTO),
                Self::room("quarto2", QUARTO),
                Self::room("área de serviço", SERVICO),
            ],
        }
    }

    /// 戸建て用プリセット
    fn house_preset() -> Self {
        Self {
            name: "Casa Padrão".into(),
            kind: "casa".into(),
            rooms: vec![
                Self::room("sala", SALA),
                Self::room("cozinha", COZINHA),
                Self::room(
                    "banheiro",
                    &["vaso sanitário", "pia", "chuveiro", "box", "espelho", "azulejo", "piso"],
                ),
                Self::room("quarto1", QUARTO),
                Self::room("quarto2", QUARTO),
                Self::room("área de serviço", SERVICO),
                Self::room(
                    "quintal",
                    &["portão", "jardim", "churrasqueira", "piso externo", "muros"],
                ),
                Self::room("garagem", &["portão", "piso", "tomada", "iluminação"]),
            ],
        }
    }
}

impl InspectionState {
    /// テンプレートから点検状態を作成
    pub fn from_template(template: &ChecklistTemplate) -> Result<Self> {
        let mut state = Self::new();
        state.apply_template(template)?;
        Ok(state)
    }

    /// テンプレートの部屋・項目を追加（既存の項目はそのまま）
    ///
    /// 戻り値は追加した項目数。
    pub fn apply_template(&mut self, template: &ChecklistTemplate) -> Result<usize> {
        let mut added = 0;
        for room in &template.rooms {
            self.ensure_room(&room.name)?;
            added += self.confirm_add(&room.name, &room.items)?.len();
        }
        Ok(added)
    }
}
