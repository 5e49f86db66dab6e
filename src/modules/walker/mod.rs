pub mod models;

use crate::modules::common::error::CleanerError;
use crate::modules::shortcut::{self, drives::DriveSet, models::ShortcutKind};
use models::{BrokenShortcut, ScanEvent, ScanResult};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// 扫描配置
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub start_dir: PathBuf,
    /// true 时删除失效快捷方式，否则只报告
    pub delete: bool,
    /// 目标卷缺失时仍按失效处理的盘符
    pub clean_drives: DriveSet,
}

impl ScanOptions {
    pub fn new(start_dir: impl AsRef<Path>) -> Result<Self, CleanerError> {
        let start_dir = start_dir.as_ref();
        let start_dir = std::path::absolute(start_dir).map_err(|e| {
            CleanerError::InvalidArgument(format!("无效的起始目录 {}: {}", start_dir.display(), e))
        })?;

        if !start_dir.is_dir() {
            return Err(CleanerError::InvalidArgument(format!(
                "起始目录不存在或不是目录: {}",
                start_dir.display()
            )));
        }

        Ok(Self {
            start_dir,
            delete: false,
            clean_drives: DriveSet::new(),
        })
    }

    pub fn with_delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    pub fn with_clean_drives(mut self, clean_drives: DriveSet) -> Self {
        self.clean_drives = clean_drives;
        self
    }
}

/// 广度优先遍历目录树并检查其中的快捷方式
pub struct Walker {
    options: ScanOptions,
    cancel: Option<Arc<AtomicBool>>,
}

impl Walker {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            cancel: None,
        }
    }

    /// 设置后在访问文件和目录之间检查，置位即停止
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// 执行扫描，每个事件回调一次
    pub fn run<F>(&self, mut on_event: F) -> Result<ScanResult, CleanerError>
    where
        F: FnMut(&ScanEvent),
    {
        let started = Instant::now();
        let mut result = ScanResult::default();
        let mut queue = VecDeque::from([self.options.start_dir.clone()]);

        tracing::debug!(
            "开始扫描: {} (删除模式: {}, 清理盘符: {})",
            self.options.start_dir.display(),
            self.options.delete,
            self.options.clean_drives
        );

        'walk: while let Some(dir) = queue.pop_front() {
            if self.is_cancelled() {
                result.interrupted = true;
                break;
            }

            tracing::debug!("扫描目录: {}", dir.display());

            let entries = match list_dir(&dir) {
                Ok(entries) => entries,
                Err(CleanerError::AccessDenied { path, source }) => {
                    emit(
                        ScanEvent::AccessDenied {
                            dir: path.clone(),
                            error: source.to_string(),
                        },
                        &mut on_event,
                    );
                    result.skipped_dirs.push(path);
                    continue;
                }
                Err(e) => return Err(e),
            };

            for (path, is_dir) in entries {
                if self.is_cancelled() {
                    result.interrupted = true;
                    break 'walk;
                }

                if is_dir {
                    queue.push_back(path);
                } else if path.is_file() {
                    self.visit_file(&path, &mut result, &mut on_event)?;
                }
            }
        }

        result.elapsed = started.elapsed();

        tracing::debug!(
            "扫描结束: 失效 {} 个, {} 字节, 用时 {:.3} 秒{}",
            result.total_count,
            result.total_bytes,
            result.elapsed_secs(),
            if result.interrupted { " (已中断)" } else { "" }
        );

        Ok(result)
    }

    fn visit_file<F>(
        &self,
        path: &Path,
        result: &mut ScanResult,
        on_event: &mut F,
    ) -> Result<(), CleanerError>
    where
        F: FnMut(&ScanEvent),
    {
        let Some(shortcut) = shortcut::resolve(path) else {
            return Ok(());
        };

        match shortcut.kind() {
            ShortcutKind::Unrecognized => {
                result.unrecognized.push(path.to_path_buf());
                emit(ScanEvent::Unrecognized { path: path.to_path_buf() }, on_event);
                return Ok(());
            }
            ShortcutKind::FileLink if shortcut.is_indeterminate() => {
                result.indeterminate.push(path.to_path_buf());
                emit(ScanEvent::Indeterminate { path: path.to_path_buf() }, on_event);
                return Ok(());
            }
            _ => {}
        }

        let mut forced_drive = None;
        let broken = match shortcut::missing_target_drive(&shortcut) {
            Some(drive) => {
                let listed = drive
                    .as_letter()
                    .filter(|letter| self.options.clean_drives.contains(letter));
                emit(
                    ScanEvent::MissingDrive {
                        path: path.to_path_buf(),
                        drive,
                    },
                    on_event,
                );

                // 驱动器可能只是暂时断开，只有在清理列表中才处理
                match listed {
                    Some(letter) => {
                        emit(
                            ScanEvent::ForcedByDrive {
                                path: path.to_path_buf(),
                                drive: letter,
                            },
                            on_event,
                        );
                        forced_drive = Some(letter);
                        true
                    }
                    None => false,
                }
            }
            None => shortcut::is_target_missing(&shortcut),
        };

        if !broken {
            return Ok(());
        }

        let size = std::fs::metadata(path)?.len();
        let mut record = BrokenShortcut {
            path: path.to_path_buf(),
            size,
            kind: shortcut.kind(),
            deleted: false,
            forced_drive,
        };

        if self.options.delete {
            match std::fs::remove_file(path) {
                Ok(()) => {
                    record.deleted = true;
                    emit(
                        ScanEvent::Deleted {
                            path: path.to_path_buf(),
                            size,
                        },
                        on_event,
                    );
                }
                Err(source) => {
                    emit(
                        ScanEvent::DeleteFailed {
                            path: path.to_path_buf(),
                            error: source.to_string(),
                        },
                        on_event,
                    );
                }
            }
        } else {
            emit(
                ScanEvent::Broken {
                    path: path.to_path_buf(),
                    size,
                },
                on_event,
            );
        }

        result.record_broken(record);
        Ok(())
    }
}

/// 事件由调用方输出，日志只在 DEBUG 级别记录
fn emit<F: FnMut(&ScanEvent)>(event: ScanEvent, on_event: &mut F) {
    tracing::debug!("{}", event);
    on_event(&event);
}

/// 列出目录项（按文件名排序），返回 (路径, 是否为目录)
///
/// 符号链接目录不展开。
fn list_dir(dir: &Path) -> Result<Vec<(PathBuf, bool)>, CleanerError> {
    let access = |source: std::io::Error| -> CleanerError {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            CleanerError::AccessDenied {
                path: dir.to_path_buf(),
                source,
            }
        } else {
            CleanerError::FileSystem(source)
        }
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(access)? {
        let entry = entry.map_err(access)?;
        let is_dir = entry.file_type().map_err(access)?.is_dir();
        entries.push((entry.file_name(), entry.path(), is_dir));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries
        .into_iter()
        .map(|(_, path, is_dir)| (path, is_dir))
        .collect())
}
