use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::modules::shortcut::drives::DriveSet;
use crate::modules::walker::models::{BrokenShortcut, ScanResult};
use crate::modules::walker::ScanOptions;

/// 扫描报告
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub start_dir: PathBuf,
    pub delete_mode: bool,
    pub clean_drives: DriveSet,
    pub broken: Vec<BrokenShortcut>,
    pub indeterminate: Vec<PathBuf>,
    pub unrecognized: Vec<PathBuf>,
    pub skipped_dirs: Vec<PathBuf>,
    pub total_count: usize,
    pub total_bytes: u64,
    pub elapsed_secs: f64,
    pub interrupted: bool,
}

impl ScanReport {
    pub fn new(options: &ScanOptions, result: &ScanResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            start_dir: options.start_dir.clone(),
            delete_mode: options.delete,
            clean_drives: options.clean_drives.clone(),
            broken: result.broken.clone(),
            indeterminate: result.indeterminate.clone(),
            unrecognized: result.unrecognized.clone(),
            skipped_dirs: result.skipped_dirs.clone(),
            total_count: result.total_count,
            total_bytes: result.total_bytes,
            elapsed_secs: result.elapsed_secs(),
            interrupted: result.interrupted,
        }
    }
}
