//! Excel生成（共通ライブラリ）
//!
//! 点検報告書をxlsxバッファに生成する。
//! 1枚目: 物件情報と項目一覧、2枚目: 修理費見積り

use crate::cost::CostEstimate;
use crate::priority::determine_repair_priority;
use crate::state::InspectionState;
use crate::types::InspectionInfo;
use rust_xlsxwriter::*;

/// 項目一覧の列見出し
pub const ITEM_COLUMNS: &[(&str, f64)] = &[
    ("Cômodo", 18.0),
    ("Item", 22.0),
    ("Status", 12.0),
    ("Observações", 40.0),
    ("Análise IA", 50.0),
    ("Prioridade", 12.0),
    ("Fotos", 8.0),
    ("Áudios", 8.0),
];

/// 報告書をバッファに生成
///
/// # Arguments
/// * `info` - 物件・立会者情報
/// * `state` - 点検状態
/// * `costs` - 修理費見積り（Noneなら見積りシートを作らない）
pub fn generate_report_buffer(
    info: &InspectionInfo,
    state: &InspectionState,
    costs: Option<&CostEstimate>,
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14.0);
    let label_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair);
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x667EEA))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let value_format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Vistoria")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (_, width)) in ITEM_COLUMNS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    worksheet
        .write_string_with_format(0, 0, "RELATÓRIO DE VISTORIA", &title_format)
        .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;

    // 物件情報
    let date = info
        .inspection_date
        .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default();
    let kind = info.inspection_kind.to_string();
    let meta: [(&str, &str); 5] = [
        ("Endereço", info.property_address.as_str()),
        ("Locador", info.landlord_name.as_str()),
        ("Locatário", info.tenant_name.as_str()),
        ("Data", date.as_str()),
        ("Tipo", kind.as_str()),
    ];
    for (i, (label, value)) in meta.iter().enumerate() {
        let row = 2 + i as u32;
        worksheet
            .write_string_with_format(row, 0, *label, &label_format)
            .map_err(|e| format!("ラベル書き込みエラー: {}", e))?;
        worksheet
            .write_string_with_format(row, 1, *value, &value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    // 項目一覧
    let header_row = 2 + meta.len() as u32 + 1;
    for (col, (label, _)) in ITEM_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(header_row, col as u16, *label, &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }

    let mut row = header_row + 1;
    for room in state.rooms() {
        for record in room {
            let status = record.status.map(|s| s.label()).unwrap_or("-");
            let analysis = record.ai_analysis.as_deref().unwrap_or("");
            let priority = record
                .ai_analysis
                .as_deref()
                .map(|a| determine_repair_priority(a).to_string())
                .unwrap_or_default();

            let cells: [&str; 6] = [
                room.name(),
                record.name.as_str(),
                status,
                record.notes.as_str(),
                analysis,
                priority.as_str(),
            ];
            for (col, value) in cells.iter().enumerate() {
                worksheet
                    .write_string_with_format(row, col as u16, *value, &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
            worksheet
                .write_number_with_format(row, 6, record.photos.len() as f64, &value_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet
                .write_number_with_format(row, 7, record.audios.len() as f64, &value_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            row += 1;
        }
    }

    if let Some(costs) = costs {
        write_cost_sheet(&mut workbook, costs, &header_format, &value_format)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_cost_sheet(
    workbook: &mut Workbook,
    costs: &CostEstimate,
    header_format: &Format,
    value_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Orçamento")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    let headers = ["Cômodo", "Item", "Reparo", "Unidade", "Custo", "Descrição"];
    for (col, label) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *label, header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }

    let mut row: u32 = 1;
    for line in &costs.detailed_costs {
        let cells = [
            line.room.as_str(),
            line.item.as_str(),
            line.repair_type.as_str(),
            line.unit.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, *value, value_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
        worksheet
            .write_number_with_format(row, 4, line.cost, value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet
            .write_string_with_format(row, 5, line.description.as_str(), value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        row += 1;
    }

    let total_label = format!("Total ({} / {})", costs.currency, costs.region);
    worksheet
        .write_string_with_format(row, 3, total_label.as_str(), header_format)
        .map_err(|e| format!("合計書き込みエラー: {}", e))?;
    worksheet
        .write_number_with_format(row, 4, costs.total_cost, value_format)
        .map_err(|e| format!("合計書き込みエラー: {}", e))?;

    Ok(())
}
