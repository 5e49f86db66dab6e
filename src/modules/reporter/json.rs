use super::models::ScanReport;
use crate::modules::common::error::CleanerError;
use std::path::Path;

/// 生成 JSON 报告
pub fn generate_json_report(report: &ScanReport) -> Result<String, CleanerError> {
    serde_json::to_string_pretty(report).map_err(|e| CleanerError::Serde(e.to_string()))
}

/// 写入 JSON 报告文件
pub fn write_json_report(report: &ScanReport, path: &Path) -> Result<(), CleanerError> {
    let json = generate_json_report(report)?;
    std::fs::write(path, json)?;
    tracing::debug!("报告已写入: {}", path.display());
    Ok(())
}
