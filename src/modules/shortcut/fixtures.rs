//! 测试用快捷方式生成器

use super::lnk::*;
use std::path::Path;

#[derive(Debug, Default)]
pub struct ShellLinkBuilder {
    local_path: Option<String>,
    network: Option<(String, String)>,
    relative_path: Option<String>,
    env_target: Option<String>,
    ansi_only: bool,
}

impl ShellLinkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local_path(mut self, path: &str) -> Self {
        self.local_path = Some(path.to_string());
        self
    }

    pub fn network_path(mut self, share: &str, suffix: &str) -> Self {
        self.network = Some((share.to_string(), suffix.to_string()));
        self
    }

    pub fn relative_path(mut self, path: &str) -> Self {
        self.relative_path = Some(path.to_string());
        self
    }

    pub fn env_target(mut self, target: &str) -> Self {
        self.env_target = Some(target.to_string());
        self
    }

    pub fn ansi_only(mut self) -> Self {
        self.ansi_only = true;
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut flags = HAS_LINK_TARGET_ID_LIST | IS_UNICODE;
        let link_info = self.link_info();
        if link_info.is_some() {
            flags |= HAS_LINK_INFO;
        }
        if self.relative_path.is_some() {
            flags |= HAS_RELATIVE_PATH;
        }

        let mut out = vec![0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        out[4..20].copy_from_slice(&LINK_CLSID);
        out[20..24].copy_from_slice(&flags.to_le_bytes());

        // 只有终止符的 IDList
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());

        if let Some(info) = link_info {
            out.extend_from_slice(&info);
        }

        if let Some(relative) = &self.relative_path {
            let units: Vec<u16> = relative.encode_utf16().collect();
            out.extend_from_slice(&(units.len() as u16).to_le_bytes());
            for unit in units {
                out.extend_from_slice(&unit.to_le_bytes());
            }
        }

        if let Some(target) = &self.env_target {
            let mut block = vec![0u8; ENVIRONMENT_VARIABLE_BLOCK_SIZE];
            block[0..4].copy_from_slice(&(ENVIRONMENT_VARIABLE_BLOCK_SIZE as u32).to_le_bytes());
            block[4..8].copy_from_slice(&ENVIRONMENT_VARIABLE_BLOCK_SIGNATURE.to_le_bytes());
            for (i, b) in ansi_bytes(target).into_iter().take(259).enumerate() {
                block[8 + i] = b;
            }
            for (i, unit) in target.encode_utf16().take(259).enumerate() {
                block[268 + i * 2..270 + i * 2].copy_from_slice(&unit.to_le_bytes());
            }
            out.extend_from_slice(&block);
        }

        // TerminalBlock
        out.extend_from_slice(&0u32.to_le_bytes());
        out
    }

    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_bytes())
    }

    fn link_info(&self) -> Option<Vec<u8>> {
        if let Some(local) = &self.local_path {
            return Some(self.local_link_info(local));
        }
        self.network
            .as_ref()
            .map(|(share, suffix)| network_link_info(share, suffix))
    }

    fn local_link_info(&self, local: &str) -> Vec<u8> {
        let header_size: usize = if self.ansi_only { 0x1C } else { 0x24 };

        // VolumeID: 固定磁盘，空卷标
        let mut volume = Vec::new();
        volume.extend_from_slice(&0x11u32.to_le_bytes());
        volume.extend_from_slice(&3u32.to_le_bytes());
        volume.extend_from_slice(&0x1234_5678u32.to_le_bytes());
        volume.extend_from_slice(&0x10u32.to_le_bytes());
        volume.push(0);

        let volume_offset = header_size;
        let local_offset = volume_offset + volume.len();
        let mut local_ansi = ansi_bytes(local);
        local_ansi.push(0);
        let suffix_offset = local_offset + local_ansi.len();
        let local_unicode_offset = suffix_offset + 1;
        let mut local_unicode = utf16_bytes(local);
        local_unicode.extend_from_slice(&[0, 0]);
        let suffix_unicode_offset = local_unicode_offset + local_unicode.len();

        let mut body = Vec::new();
        body.extend_from_slice(&volume);
        body.extend_from_slice(&local_ansi);
        body.push(0);
        if !self.ansi_only {
            body.extend_from_slice(&local_unicode);
            body.extend_from_slice(&[0, 0]);
        }

        let size = header_size + body.len();
        let mut info = Vec::new();
        info.extend_from_slice(&(size as u32).to_le_bytes());
        info.extend_from_slice(&(header_size as u32).to_le_bytes());
        info.extend_from_slice(&VOLUME_ID_AND_LOCAL_BASE_PATH.to_le_bytes());
        info.extend_from_slice(&(volume_offset as u32).to_le_bytes());
        info.extend_from_slice(&(local_offset as u32).to_le_bytes());
        info.extend_from_slice(&0u32.to_le_bytes());
        info.extend_from_slice(&(suffix_offset as u32).to_le_bytes());
        if !self.ansi_only {
            info.extend_from_slice(&(local_unicode_offset as u32).to_le_bytes());
            info.extend_from_slice(&(suffix_unicode_offset as u32).to_le_bytes());
        }
        info.extend_from_slice(&body);
        info
    }
}

fn network_link_info(share: &str, suffix: &str) -> Vec<u8> {
    let header_size: usize = 0x1C;

    let mut net_name = ansi_bytes(share);
    net_name.push(0);
    let mut network_link = Vec::new();
    network_link.extend_from_slice(&((0x14 + net_name.len()) as u32).to_le_bytes());
    network_link.extend_from_slice(&0u32.to_le_bytes());
    network_link.extend_from_slice(&0x14u32.to_le_bytes());
    network_link.extend_from_slice(&0u32.to_le_bytes());
    network_link.extend_from_slice(&0u32.to_le_bytes());
    network_link.extend_from_slice(&net_name);

    let network_offset = header_size;
    let suffix_offset = network_offset + network_link.len();
    let mut suffix_bytes = ansi_bytes(suffix);
    suffix_bytes.push(0);

    let size = suffix_offset + suffix_bytes.len();
    let mut info = Vec::new();
    info.extend_from_slice(&(size as u32).to_le_bytes());
    info.extend_from_slice(&(header_size as u32).to_le_bytes());
    info.extend_from_slice(&COMMON_NETWORK_RELATIVE_LINK_AND_PATH_SUFFIX.to_le_bytes());
    info.extend_from_slice(&0u32.to_le_bytes());
    info.extend_from_slice(&0u32.to_le_bytes());
    info.extend_from_slice(&(network_offset as u32).to_le_bytes());
    info.extend_from_slice(&(suffix_offset as u32).to_le_bytes());
    info.extend_from_slice(&network_link);
    info.extend_from_slice(&suffix_bytes);
    info
}

fn ansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
        .collect()
}

fn utf16_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// 写入文件快捷方式，目标记录在 LinkInfo 中
pub fn write_file_link(path: &Path, target: &Path) -> std::io::Result<()> {
    ShellLinkBuilder::new()
        .local_path(&target.to_string_lossy())
        .write(path)
}

/// 写入没有文件系统目标的快捷方式（如控制面板项）
pub fn write_empty_link(path: &Path) -> std::io::Result<()> {
    ShellLinkBuilder::new().write(path)
}

/// 写入 Internet 快捷方式，`url` 为 None 时不写 URL 键
pub fn write_url_shortcut(path: &Path, url: Option<&str>) -> std::io::Result<()> {
    let mut content = String::from("[{000214A0-0000-0000-C000-000000000046}]\r\nProp3=19,11\r\n[InternetShortcut]\r\nIDList=\r\n");
    if let Some(url) = url {
        content.push_str(&format!("URL={}\r\n", url));
    }
    std::fs::write(path, content)
}

/// 测试用临时目录
pub fn temp_root(test_name: &str) -> std::path::PathBuf {
    let root = std::env::temp_dir().join(format!(
        "shortcut-cleaner-test-{}-{}",
        test_name,
        uuid::Uuid::new_v4()
    ));
    let _ = std::fs::create_dir_all(&root);
    root
}
