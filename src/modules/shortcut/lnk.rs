//! Shell Link (.lnk) 二进制格式解析
//!
//! 只读取判断目标所需的字段：LinkInfo 中的本地/网络路径、
//! StringData 中的相对路径，以及 ExtraData 中的环境变量目标。

use crate::modules::common::utils;
use std::io::Read;
use std::path::Path;

/// ShellLinkHeader 大小，同时也是文件开头的 HeaderSize 字段值
pub const HEADER_SIZE: usize = 0x4C;

/// 超过该大小的文件不视为快捷方式
pub const MAX_LINK_SIZE: u64 = 1024 * 1024;

/// {00021401-0000-0000-C000-000000000046}
pub const LINK_CLSID: [u8; 16] = [
    0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
];

pub const HAS_LINK_TARGET_ID_LIST: u32 = 0x0000_0001;
pub const HAS_LINK_INFO: u32 = 0x0000_0002;
pub const HAS_NAME: u32 = 0x0000_0004;
pub const HAS_RELATIVE_PATH: u32 = 0x0000_0008;
pub const HAS_WORKING_DIR: u32 = 0x0000_0010;
pub const HAS_ARGUMENTS: u32 = 0x0000_0020;
pub const HAS_ICON_LOCATION: u32 = 0x0000_0040;
pub const IS_UNICODE: u32 = 0x0000_0080;
pub const FORCE_NO_LINK_INFO: u32 = 0x0000_0100;

pub const VOLUME_ID_AND_LOCAL_BASE_PATH: u32 = 0x1;
pub const COMMON_NETWORK_RELATIVE_LINK_AND_PATH_SUFFIX: u32 = 0x2;

pub const ENVIRONMENT_VARIABLE_BLOCK_SIGNATURE: u32 = 0xA000_0001;
pub const ENVIRONMENT_VARIABLE_BLOCK_SIZE: usize = 0x314;

const LINK_INFO_MIN_HEADER: usize = 0x1C;
const LINK_INFO_UNICODE_HEADER: usize = 0x24;

/// StringData 的固定顺序
const STRING_DATA_FLAGS: [u32; 5] = [
    HAS_NAME,
    HAS_RELATIVE_PATH,
    HAS_WORKING_DIR,
    HAS_ARGUMENTS,
    HAS_ICON_LOCATION,
];

/// 从 .lnk 中读出的目标信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellLink {
    pub link_info_target: Option<String>,
    pub env_target: Option<String>,
    pub relative_path: Option<String>,
}

impl ShellLink {
    /// 解析出的目标路径，无法确定时为空字符串
    pub fn target(&self, link_path: &Path) -> String {
        if let Some(target) = non_empty(&self.link_info_target) {
            return target.to_string();
        }

        if let Some(target) = non_empty(&self.env_target) {
            return utils::expand_env_vars(target);
        }

        if let Some(relative) = non_empty(&self.relative_path) {
            let base = link_path.parent().unwrap_or_else(|| Path::new(""));
            return base.join(relative).to_string_lossy().to_string();
        }

        String::new()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// 检查文件头是否为 Shell Link
pub fn has_link_signature(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE
        && read_u32(data, 0) == Some(HEADER_SIZE as u32)
        && data[4..20] == LINK_CLSID
}

/// 读取并解析 .lnk 文件；不是 Shell Link 或无法读取时返回 None
pub fn read_shell_link(path: &Path) -> Option<ShellLink> {
    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!("无法打开文件 {}: {}", path.display(), e);
            return None;
        }
    };

    let mut header = [0u8; HEADER_SIZE];
    if file.read_exact(&mut header).is_err() || !has_link_signature(&header) {
        return None;
    }

    let len = file.metadata().map(|m| m.len()).unwrap_or(0);
    if len > MAX_LINK_SIZE {
        tracing::debug!("快捷方式文件过大，忽略: {} ({} 字节)", path.display(), len);
        return None;
    }

    let mut data = header.to_vec();
    if let Err(e) = file.read_to_end(&mut data) {
        tracing::debug!("读取快捷方式失败 {}: {}", path.display(), e);
        return None;
    }

    parse_shell_link(&data)
}

/// 解析 Shell Link 字节
pub fn parse_shell_link(data: &[u8]) -> Option<ShellLink> {
    if !has_link_signature(data) {
        return None;
    }

    let flags = read_u32(data, 0x14)?;
    let mut offset = HEADER_SIZE;
    let mut link = ShellLink::default();

    // LinkTargetIDList: 只跳过，不解析
    if flags & HAS_LINK_TARGET_ID_LIST != 0 {
        let id_list_size = read_u16(data, offset)? as usize;
        offset += 2 + id_list_size;
    }

    if flags & HAS_LINK_INFO != 0 {
        let size = read_u32(data, offset)? as usize;
        if size < LINK_INFO_MIN_HEADER {
            return None;
        }
        let info = data.get(offset..offset + size)?;
        if flags & FORCE_NO_LINK_INFO == 0 {
            link.link_info_target = parse_link_info(info);
        }
        offset += size;
    }

    let unicode = flags & IS_UNICODE != 0;
    for flag in STRING_DATA_FLAGS {
        if flags & flag == 0 {
            continue;
        }
        let count = read_u16(data, offset)? as usize;
        offset += 2;
        let byte_len = if unicode { count * 2 } else { count };
        let raw = data.get(offset..offset + byte_len)?;
        offset += byte_len;

        if flag == HAS_RELATIVE_PATH {
            link.relative_path = Some(if unicode {
                decode_utf16(raw)
            } else {
                decode_ansi(raw)
            });
        }
    }

    // ExtraData 截断时保留已解析的内容
    loop {
        let Some(block_size) = read_u32(data, offset).map(|s| s as usize) else {
            break;
        };
        if block_size < 4 {
            break;
        }
        let Some(block) = data.get(offset..offset + block_size) else {
            break;
        };

        if read_u32(block, 4) == Some(ENVIRONMENT_VARIABLE_BLOCK_SIGNATURE)
            && block_size >= ENVIRONMENT_VARIABLE_BLOCK_SIZE
        {
            let unicode_target = c_utf16_string(&block[268..788]);
            let ansi_target = c_ansi_string(&block[8..268]);
            link.env_target = if unicode_target.is_empty() {
                Some(ansi_target)
            } else {
                Some(unicode_target)
            };
        }

        offset += block_size;
    }

    Some(link)
}

/// 解析 LinkInfo，偏移量均相对于 LinkInfo 起始位置
fn parse_link_info(info: &[u8]) -> Option<String> {
    let header_size = read_u32(info, 4)? as usize;
    let info_flags = read_u32(info, 8)?;
    let local_base_path_offset = read_u32(info, 16)? as usize;
    let network_link_offset = read_u32(info, 20)? as usize;
    let suffix_offset = read_u32(info, 24)? as usize;

    let (local_unicode_offset, suffix_unicode_offset) = if header_size >= LINK_INFO_UNICODE_HEADER {
        (
            read_u32(info, 28).map(|o| o as usize),
            read_u32(info, 32).map(|o| o as usize),
        )
    } else {
        (None, None)
    };

    let suffix = match suffix_unicode_offset.filter(|o| *o > 0) {
        Some(o) => utf16_string_at(info, o),
        None if suffix_offset > 0 => ansi_string_at(info, suffix_offset),
        None => None,
    }
    .unwrap_or_default();

    if info_flags & VOLUME_ID_AND_LOCAL_BASE_PATH != 0 {
        let base = match local_unicode_offset.filter(|o| *o > 0) {
            Some(o) => utf16_string_at(info, o),
            None => ansi_string_at(info, local_base_path_offset),
        }?;
        return Some(format!("{}{}", base, suffix));
    }

    if info_flags & COMMON_NETWORK_RELATIVE_LINK_AND_PATH_SUFFIX != 0 {
        let network_link = info.get(network_link_offset..)?;
        let net_name_offset = read_u32(network_link, 8)? as usize;
        let net_name = if net_name_offset > 0x14 {
            let unicode_offset = read_u32(network_link, 0x14)? as usize;
            utf16_string_at(network_link, unicode_offset)
        } else {
            ansi_string_at(network_link, net_name_offset)
        }?;

        if suffix.is_empty() {
            return Some(net_name);
        }
        return Some(format!("{}\\{}", net_name.trim_end_matches('\\'), suffix));
    }

    None
}

fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn ansi_string_at(data: &[u8], offset: usize) -> Option<String> {
    Some(c_ansi_string(data.get(offset..)?))
}

fn utf16_string_at(data: &[u8], offset: usize) -> Option<String> {
    Some(c_utf16_string(data.get(offset..)?))
}

/// 以 NUL 结尾的 ANSI 字符串（按 Latin-1 解码）
fn c_ansi_string(data: &[u8]) -> String {
    let end = data.iter().position(|b| *b == 0).unwrap_or(data.len());
    decode_ansi(&data[..end])
}

/// 以 NUL 结尾的 UTF-16LE 字符串
fn c_utf16_string(data: &[u8]) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .take_while(|u| *u != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

fn decode_ansi(data: &[u8]) -> String {
    data.iter().map(|b| *b as char).collect()
}

fn decode_utf16(data: &[u8]) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
