use crate::modules::shortcut::drives::{Drive, TargetDrive};
use crate::modules::shortcut::models::ShortcutKind;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// 扫描过程中报告的事件，每个事件对应一行输出
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// 报告模式下发现的失效快捷方式
    Broken { path: PathBuf, size: u64 },
    /// 删除模式下已删除的失效快捷方式
    Deleted { path: PathBuf, size: u64 },
    DeleteFailed { path: PathBuf, error: String },
    /// 目标所在卷不可见
    MissingDrive { path: PathBuf, drive: TargetDrive },
    /// 卷在清理列表中，按失效处理
    ForcedByDrive { path: PathBuf, drive: Drive },
    /// 目标为空，无法判断
    Indeterminate { path: PathBuf },
    /// 扩展名不是 .lnk/.url
    Unrecognized { path: PathBuf },
    AccessDenied { dir: PathBuf, error: String },
}

impl std::fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanEvent::Broken { path, .. } => {
                write!(f, "发现失效快捷方式: {}", path.display())
            }
            ScanEvent::Deleted { path, .. } => {
                write!(f, "已删除失效快捷方式: {}", path.display())
            }
            ScanEvent::DeleteFailed { path, error } => {
                write!(f, "删除失败 {}: {}", path.display(), error)
            }
            ScanEvent::MissingDrive { path, drive } => {
                write!(f, "快捷方式指向缺失的驱动器 {}: {}", drive, path.display())
            }
            ScanEvent::ForcedByDrive { path, drive } => {
                write!(f, "{} 在清理盘符列表中，按失效处理: {}", drive, path.display())
            }
            ScanEvent::Indeterminate { path } => {
                write!(f, "快捷方式目标为空，无法判断: {}", path.display())
            }
            ScanEvent::Unrecognized { path } => {
                write!(f, "无法识别的快捷方式类型: {}", path.display())
            }
            ScanEvent::AccessDenied { dir, error } => {
                write!(f, "无法访问目录 {}: {}", dir.display(), error)
            }
        }
    }
}

/// 失效快捷方式记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenShortcut {
    pub path: PathBuf,
    pub size: u64,
    pub kind: ShortcutKind,
    pub deleted: bool,
    /// 因清理盘符列表而判定失效时记录该盘符
    pub forced_drive: Option<Drive>,
}

/// 扫描结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    pub total_count: usize,
    pub total_bytes: u64,
    pub elapsed: Duration,
    pub broken: Vec<BrokenShortcut>,
    pub indeterminate: Vec<PathBuf>,
    pub unrecognized: Vec<PathBuf>,
    pub skipped_dirs: Vec<PathBuf>,
    pub interrupted: bool,
}

impl ScanResult {
    pub fn record_broken(&mut self, shortcut: BrokenShortcut) {
        self.total_count += 1;
        self.total_bytes += shortcut.size;
        self.broken.push(shortcut);
    }

    pub fn broken_paths(&self) -> Vec<&PathBuf> {
        self.broken.iter().map(|b| &b.path).collect()
    }

    pub fn deleted_count(&self) -> usize {
        self.broken.iter().filter(|b| b.deleted).count()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}
