//! プロンプト生成モジュール
//!
//! AIサービスに渡すプロンプト:
//! - build_vision_prompt: 項目ごとの写真解析（説明 + 写り込んだ他の項目）
//! - build_detection_prompt: 部屋写真からの項目一括検出

use crate::name::same_name;

/// 項目別の専門プロンプト
const SPECIALIZED_PROMPTS: &[(&str, &str)] = &[
    (
        "torneira",
        "Analise esta torneira detalhadamente e identifique:
1. Estado geral (novo, usado, danificado)
2. Presença de vazamentos ou goteiras
3. Sinais de ferrugem ou corrosão
4. Acúmulo de calcário ou sujeira
5. Funcionamento aparente
6. Necessidade de reparo ou substituição",
    ),
    (
        "piso",
        "Analise este piso detalhadamente:
1. Tipo de material (cerâmica, porcelanato, laminado, etc.)
2. Estado de conservação geral
3. Presença de rachaduras, trincas ou quebras
4. Manchas, riscos ou desgaste
5. Rejunte (estado de conservação)
6. Necessidade de reparo, limpeza ou troca",
    ),
    (
        "parede",
        "Analise esta parede cuidadosamente:
1. Estado da pintura (nova, desbotada, descascando)
2. Presença de manchas de umidade ou infiltração
3. Rachaduras, furos ou danos estruturais
4. Sinais de mofo ou fungos
5. Necessidade de reparo ou repintura",
    ),
    (
        "vaso sanitário",
        "Analise este vaso sanitário:
1. Estado geral de conservação e limpeza
2. Presença de vazamentos ou rachaduras
3. Estado da louça (manchas, riscos)
4. Fixação adequada ao piso
5. Acessórios (assento, tampa) e seu estado",
    ),
    (
        "pia",
        "Analise esta pia detalhadamente:
1. Material (inox, granito, mármore, cerâmica)
2. Presença de riscos, manchas ou danos
3. Estado da vedação com a bancada
4. Limpeza e higiene
5. Necessidade de reparo ou substituição",
    ),
    (
        "janela",
        "Analise esta janela:
1. Tipo de janela (alumínio, madeira, PVC)
2. Estado dos vidros (inteiros, trincados, limpos)
3. Estado da esquadria e vedação
4. Estado das travas e fechaduras
5. Necessidade de reparo ou substituição",
    ),
    (
        "porta",
        "Analise esta porta:
1. Material (madeira, metal, PVC)
2. Funcionamento das dobradiças
3. Estado da fechadura
4. Presença de riscos, furos ou danos
5. Necessidade de reparo, ajuste ou substituição",
    ),
];

/// 物体検出ラベル（英語）→ チェックリスト項目名
const OBJECT_LABELS: &[(&str, &str)] = &[
    ("sink", "pia"),
    ("refrigerator", "geladeira"),
    ("oven", "forno"),
    ("microwave", "microondas"),
    ("toilet", "vaso sanitário"),
    ("chair", "cadeira"),
    ("dining table", "mesa"),
    ("couch", "sofá"),
    ("tv", "televisão"),
    ("bed", "cama"),
];

/// 項目別の専門プロンプトを取得
pub fn specialized_prompt(item: &str) -> Option<&'static str> {
    SPECIALIZED_PROMPTS
        .iter()
        .find(|(name, _)| same_name(name, item))
        .map(|(_, prompt)| *prompt)
}

/// 検出ラベルをチェックリスト項目名に変換（未登録ならそのまま）
pub fn localize_label(label: &str) -> String {
    OBJECT_LABELS
        .iter()
        .find(|(en, _)| same_name(en, label))
        .map(|(_, pt)| pt.to_string())
        .unwrap_or_else(|| label.trim().to_string())
}

/// 項目の写真解析用コンテキスト（UI側が付ける既定の指示）
pub fn item_context(room: &str, item: &str) -> String {
    format!("Analise detalhadamente este {} na {}", item.trim(), room.trim())
}

/// 写真解析プロンプト生成
///
/// # Arguments
/// * `item` - 撮影対象の項目名
/// * `context` - 追加の指示（`item_context` など）
pub fn build_vision_prompt(item: &str, context: &str) -> String {
    let focus = specialized_prompt(item).unwrap_or("Descreva o estado do item na imagem.");

    format!(
        r#"Você é um especialista em vistoria imobiliária. {context}. Seja detalhado sobre o estado de conservação.

{focus}

## Formato de saída (somente este JSON)
{{
  "description": "descrição objetiva do estado do item",
  "detected_items": ["outros itens de checklist visíveis na foto"]
}}

## Observações
- Descreva apenas o que é visível, sem suposições
- Nomes de itens em português, no singular e em minúsculas (ex.: "mesa", "vaso sanitário")
- Saída somente em JSON, sem texto adicional"#
    )
}

/// 項目一括検出プロンプト生成
pub fn build_detection_prompt(file_names: &[&str]) -> String {
    let photo_list = file_names
        .iter()
        .map(|name| format!("- {}", name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Você é um especialista em vistoria imobiliária. Liste os itens de checklist (móveis, eletrodomésticos, louças, esquadrias, revestimentos) visíveis nas fotos do cômodo.

## Formato de saída (somente este JSON)
["item 1", "item 2"]

## Observações
- Cada item apenas uma vez, mesmo que apareça em várias fotos
- Nomes em português, no singular e em minúsculas
- Saída somente em JSON

Fotos:
{photo_list}"#
    )
}

/// 音声文字起こしプロンプト生成
pub fn build_transcription_prompt() -> String {
    r#"Transcreva o áudio de vistoria imobiliária exatamente como falado, em português.

## Formato de saída (somente este JSON)
{"text": "transcrição literal"}

## Observações
- Não resuma nem corrija a fala
- Mantenha comandos como "marcar pia como suja" ou "próximo cômodo" sem alteração
- Saída somente em JSON"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialized_prompt_by_identity() {
        assert!(specialized_prompt(" Torneira ").unwrap().contains("vazamentos"));
        assert!(specialized_prompt("Vaso Sanitário").is_some());
        assert!(specialized_prompt("sofá").is_none());
    }

    #[test]
    fn test_build_vision_prompt() {
        let prompt = build_vision_prompt("pia", &item_context("cozinha", "pia"));
        assert!(prompt.contains("Analise detalhadamente este pia na cozinha"));
        assert!(prompt.contains("inox"));
        assert!(prompt.contains("detected_items"));
    }

    #[test]
    fn test_build_vision_prompt_generic_item() {
        let prompt = build_vision_prompt("sofá", "Descreva o sofá");
        assert!(prompt.contains("Descreva o estado do item na imagem."));
    }

    #[test]
    fn test_build_detection_prompt_lists_files() {
        let prompt = build_detection_prompt(&["sala1.jpg", "sala2.jpg"]);
        assert!(prompt.contains("- sala1.jpg\n- sala2.jpg"));
    }

    #[test]
    fn test_build_transcription_prompt() {
        let prompt = build_transcription_prompt();
        assert!(prompt.contains(r#"{"text": "#));
        assert!(prompt.contains("próximo cômodo"));
    }

    #[test]
    fn test_localize_label() {
        assert_eq!(localize_label("Couch"), "sofá");
        assert_eq!(localize_label("dining table"), "mesa");
        assert_eq!(localize_label(" lustre "), "lustre");
    }
}
