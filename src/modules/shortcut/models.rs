use serde::Serialize;
use std::path::{Path, PathBuf};

/// 文件快捷方式扩展名
pub const FILE_SHORTCUT_EXT: &str = "lnk";
/// 网络快捷方式扩展名
pub const NET_SHORTCUT_EXT: &str = "url";

/// 快捷方式类型（仅由扩展名决定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShortcutKind {
    /// .lnk，目标为本地路径
    FileLink,
    /// .url，目标为 URI
    NetLink,
    /// 可解析但扩展名未知
    Unrecognized,
}

/// 已解析的快捷方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShortcut {
    path: PathBuf,
    kind: ShortcutKind,
    target: String,
}

impl ResolvedShortcut {
    pub fn new(path: PathBuf, kind: ShortcutKind, target: String) -> Self {
        Self { path, kind, target }
    }

    /// 快捷方式文件本身的路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ShortcutKind {
        self.kind
    }

    /// 记录的目标：FileLink 为路径，NetLink 为 URL
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 目标为空的文件快捷方式（控制面板等非文件系统目标），无法判断是否失效
    pub fn is_indeterminate(&self) -> bool {
        self.kind == ShortcutKind::FileLink && self.target.trim().is_empty()
    }
}
