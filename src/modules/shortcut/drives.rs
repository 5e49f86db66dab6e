//! 盘符解析与检测

use crate::modules::common::error::CleanerError;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

/// 单个盘符，显示为 `C:`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Drive(char);

impl Drive {
    /// 由字母创建，非 ASCII 字母返回 None
    pub fn new(letter: char) -> Option<Self> {
        letter
            .is_ascii_alphabetic()
            .then(|| Drive(letter.to_ascii_uppercase()))
    }

    pub fn letter(&self) -> char {
        self.0
    }

    /// 根目录，如 `C:\`
    pub fn root(&self) -> String {
        format!("{}:\\", self.0)
    }
}

impl std::fmt::Display for Drive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.0)
    }
}

impl Serialize for Drive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Drive {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_drive_str(s)
            .ok_or_else(|| CleanerError::InvalidArgument(format!("无效的盘符: {:?}", s)))
    }
}

/// 从用户输入中解析盘符：只保留字母，必须恰好一个
pub fn parse_drive_str(input: &str) -> Option<Drive> {
    let mut letters = input.chars().filter(|c| c.is_ascii_alphabetic());
    let first = letters.next()?;
    if letters.next().is_some() {
        return None;
    }
    Drive::new(first)
}

/// 调用方指定的盘符集合（有序、去重）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriveSet(BTreeSet<Drive>);

impl DriveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, drive: Drive) -> bool {
        self.0.insert(drive)
    }

    pub fn contains(&self, drive: &Drive) -> bool {
        self.0.contains(drive)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Drive> for DriveSet {
    fn from_iter<I: IntoIterator<Item = Drive>>(iter: I) -> Self {
        DriveSet(iter.into_iter().collect())
    }
}

impl std::fmt::Display for DriveSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let drives: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", drives.join(", "))
    }
}

/// 解析用户输入的盘符列表，无效项记录警告后丢弃
pub fn parse_clean_drives<S: AsRef<str>>(inputs: &[S]) -> DriveSet {
    let mut drives = DriveSet::new();

    for input in inputs {
        let input = input.as_ref();
        if input.trim().is_empty() {
            tracing::warn!("忽略空的盘符输入");
            continue;
        }

        match parse_drive_str(input) {
            Some(drive) => {
                drives.insert(drive);
            }
            None => {
                tracing::warn!("输入 {:?} 不是单个盘符，整项忽略", input);
            }
        }
    }

    drives
}

/// 目标路径的卷部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetDrive {
    /// `C:`
    Letter(Drive),
    /// `\\server\share`
    Unc(String),
}

impl std::fmt::Display for TargetDrive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetDrive::Letter(d) => write!(f, "{}", d),
            TargetDrive::Unc(share) => write!(f, "{}", share),
        }
    }
}

impl TargetDrive {
    pub fn as_letter(&self) -> Option<Drive> {
        match self {
            TargetDrive::Letter(d) => Some(*d),
            TargetDrive::Unc(_) => None,
        }
    }

    /// 该卷当前是否可见
    pub fn is_present(&self) -> bool {
        match self {
            TargetDrive::Letter(d) => is_drive_present(*d),
            TargetDrive::Unc(share) => Path::new(&format!("{}\\", share)).exists(),
        }
    }
}

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// 按 Windows 规则拆出路径的卷部分（与宿主平台无关）
pub fn split_drive(target: &str) -> Option<TargetDrive> {
    let chars: Vec<char> = target.chars().collect();

    if chars.len() >= 2 && chars[1] == ':' {
        return Drive::new(chars[0]).map(TargetDrive::Letter);
    }

    // \\server\share
    if chars.len() > 2 && is_separator(chars[0]) && is_separator(chars[1]) && !is_separator(chars[2]) {
        let rest: String = chars[2..].iter().collect();
        let mut parts = rest.splitn(3, is_separator);
        let server = parts.next().unwrap_or_default();
        let share = parts.next().unwrap_or_default();
        if server.is_empty() || share.is_empty() {
            return None;
        }
        return Some(TargetDrive::Unc(format!("\\\\{}\\{}", server, share)));
    }

    None
}

/// 盘符是否已挂载
#[cfg(windows)]
pub fn is_drive_present(drive: Drive) -> bool {
    use windows::Win32::Storage::FileSystem::GetLogicalDrives;

    let index = (drive.letter() as u8 - b'A') as u32;
    // SAFETY: GetLogicalDrives 没有参数，只返回位掩码
    let mask = unsafe { GetLogicalDrives() };
    mask & (1 << index) != 0
}

/// 盘符是否已挂载
#[cfg(not(windows))]
pub fn is_drive_present(drive: Drive) -> bool {
    Path::new(&drive.root()).exists()
}

#[cfg(test)]
pub(crate) fn absent_drive() -> Option<Drive> {
    ('A'..='Z').filter_map(Drive::new).find(|d| !is_drive_present(*d))
}
