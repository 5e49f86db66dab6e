use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("文件系统错误: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("拒绝访问: {}: {source}", .path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无效参数: {0}")]
    InvalidArgument(String),

    #[error("序列化错误: {0}")]
    Serde(String),
}

impl serde::Serialize for CleanerError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
