use crate::error::{Result, VistoriaError};
use crate::session::Session;
use std::path::{Path, PathBuf};
use vistoria_common::export::excel_core::generate_report_buffer;
use vistoria_common::CostEstimate;

/// 既定の報告書ファイル名（拡張子なし）
pub const DEFAULT_REPORT_NAME: &str = "vistoria";

/// 出力先がフォルダなら `<title>.xlsx` を付ける
pub fn output_path_for(output: &Path, title: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.xlsx", title))
    } else {
        output.to_path_buf()
    }
}

/// 点検報告書（xlsx）を書き出す
pub fn write_report(
    session: &Session,
    costs: Option<&CostEstimate>,
    output_path: &Path,
) -> Result<()> {
    let buffer = generate_report_buffer(&session.info, &session.state, costs)
        .map_err(VistoriaError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, buffer)?;

    tracing::debug!(path = %output_path.display(), "report written");
    Ok(())
}
