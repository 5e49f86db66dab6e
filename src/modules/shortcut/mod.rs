pub mod drives;
pub mod internet;
pub mod lnk;
pub mod models;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::modules::common::utils;
use drives::TargetDrive;
use models::{ResolvedShortcut, ShortcutKind, FILE_SHORTCUT_EXT, NET_SHORTCUT_EXT};
use std::path::Path;

/// 按扩展名判断快捷方式类型（不区分大小写）
pub fn classify_kind(path: &Path) -> ShortcutKind {
    if utils::has_extension(path, FILE_SHORTCUT_EXT) {
        ShortcutKind::FileLink
    } else if utils::has_extension(path, NET_SHORTCUT_EXT) {
        ShortcutKind::NetLink
    } else {
        ShortcutKind::Unrecognized
    }
}

/// 读取快捷方式；不是快捷方式时返回 None
///
/// 任何文件都会检查 Shell Link 签名，只有 `.url` 文件才按 INI 解析。
pub fn resolve(path: &Path) -> Option<ResolvedShortcut> {
    let kind = classify_kind(path);

    if let Some(link) = lnk::read_shell_link(path) {
        let target = link.target(path);
        return Some(ResolvedShortcut::new(path.to_path_buf(), kind, target));
    }

    if kind == ShortcutKind::NetLink {
        if let Some(url) = internet::read_internet_shortcut(path) {
            return Some(ResolvedShortcut::new(path.to_path_buf(), kind, url));
        }
    }

    None
}

/// 目标是否不存在
///
/// 目标为空的文件快捷方式无法判断，返回 false。
pub fn is_target_missing(shortcut: &ResolvedShortcut) -> bool {
    match shortcut.kind() {
        ShortcutKind::FileLink => {
            if shortcut.is_indeterminate() {
                return false;
            }
            !Path::new(shortcut.target()).exists()
        }
        ShortcutKind::NetLink => !internet::is_valid_url(shortcut.target()),
        ShortcutKind::Unrecognized => false,
    }
}

/// 目标所在卷当前不可见时返回该卷
///
/// 本地 file URL 按文件路径处理，其余 URL 没有卷。
pub fn missing_target_drive(shortcut: &ResolvedShortcut) -> Option<TargetDrive> {
    let drive = match shortcut.kind() {
        ShortcutKind::FileLink => drives::split_drive(shortcut.target()),
        ShortcutKind::NetLink => {
            internet::file_url_path(shortcut.target()).and_then(|p| drives::split_drive(&p))
        }
        ShortcutKind::Unrecognized => None,
    };
    drive.filter(|drive| !drive.is_present())
}

/// 目标所在卷是否缺失
pub fn is_target_drive_missing(shortcut: &ResolvedShortcut) -> bool {
    missing_target_drive(shortcut).is_some()
}
