//! Internet 快捷方式 (.url) 解析与 URL 目标检查

use std::path::Path;

const SECTION: &str = "InternetShortcut";

/// .url 文件通常只有几百字节
const MAX_URL_FILE_SIZE: u64 = 64 * 1024;

/// 读取 .url 文件的 URL；没有 [InternetShortcut] 节时返回 None
pub fn read_internet_shortcut(path: &Path) -> Option<String> {
    let len = match std::fs::metadata(path) {
        Ok(m) => m.len(),
        Err(e) => {
            tracing::debug!("无法读取文件信息 {}: {}", path.display(), e);
            return None;
        }
    };
    if len > MAX_URL_FILE_SIZE {
        return None;
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("无法读取文件 {}: {}", path.display(), e);
            return None;
        }
    };

    parse_internet_shortcut(&String::from_utf8_lossy(&bytes))
}

/// 解析 INI 内容，返回 [InternetShortcut] 节中的 URL（缺失时为空字符串）
pub fn parse_internet_shortcut(content: &str) -> Option<String> {
    let mut in_section = false;
    let mut found_section = false;
    let mut url = None;

    for line in content.lines() {
        let line = line.trim().trim_start_matches('\u{feff}');
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim().eq_ignore_ascii_case(SECTION);
            found_section |= in_section;
            continue;
        }

        if !in_section || url.is_some() {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if key.trim().eq_ignore_ascii_case("URL") {
                url = Some(value.trim().to_string());
            }
        }
    }

    if found_section {
        Some(url.unwrap_or_default())
    } else {
        None
    }
}

fn has_host(parsed: &url::Url) -> bool {
    parsed.host_str().map(|h| !h.is_empty()).unwrap_or(false)
}

/// `scheme:` 之后紧跟 `//`，即原文中确实写了主机部分
fn has_authority(target: &str, scheme: &str) -> bool {
    target
        .get(scheme.len()..)
        .map(|rest| rest.starts_with("://"))
        .unwrap_or(false)
}

/// 本地 file URL 对应的路径；带主机或不是 file URL 时返回 None
///
/// 非 Windows 平台上 `file:///C:/x` 解析为 `/C:/x`，这里去掉开头的 `/`。
pub fn file_url_path(target: &str) -> Option<String> {
    let parsed = url::Url::parse(target.trim()).ok()?;
    if parsed.scheme() != "file" || has_host(&parsed) {
        return None;
    }

    let path = parsed.to_file_path().ok()?;
    let path = path.to_string_lossy();
    match path.strip_prefix('/') {
        Some(rest) if rest.chars().nth(1) == Some(':') => Some(rest.to_string()),
        _ => Some(path.into_owned()),
    }
}

/// URL 是否有效：file URL 按本地路径检查，其余要求同时具有协议和主机
pub fn is_valid_url(target: &str) -> bool {
    let target = target.trim();
    let parsed = match url::Url::parse(target) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!("无法解析 URL {:?}: {}", target, e);
            return false;
        }
    };

    if parsed.scheme() == "file" && !has_host(&parsed) {
        if parsed.path().trim_matches('/').is_empty() {
            return false;
        }
        return match parsed.to_file_path() {
            Ok(path) => path.exists(),
            Err(_) => false,
        };
    }

    // 解析器会为 http:example.com 之类补出主机
    has_host(&parsed) && has_authority(target, parsed.scheme())
}
