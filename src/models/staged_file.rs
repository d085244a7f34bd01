use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, FileError};

/// 文件类型（由扩展名推导，小写）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Zip,
    Pdf,
    Jpg,
    Jpeg,
    Png,
}

impl FileKind {
    /// 从扩展名解析（不区分大小写）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "zip" => Some(FileKind::Zip),
            "pdf" => Some(FileKind::Pdf),
            "jpg" => Some(FileKind::Jpg),
            "jpeg" => Some(FileKind::Jpeg),
            "png" => Some(FileKind::Png),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Zip => "zip",
            FileKind::Pdf => "pdf",
            FileKind::Jpg => "jpg",
            FileKind::Jpeg => "jpeg",
            FileKind::Png => "png",
        }
    }

    /// jpg / jpeg / png
    pub fn is_image(self) -> bool {
        matches!(self, FileKind::Jpg | FileKind::Jpeg | FileKind::Png)
    }

    /// zip / pdf
    pub fn is_archive(self) -> bool {
        matches!(self, FileKind::Zip | FileKind::Pdf)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 暂存文件
///
/// 只保存元数据（名称、大小、路径），文件内容在提交时才读取
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StagedFile {
    /// 创建只有元数据的暂存文件
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            path: None,
        }
    }

    /// 从磁盘路径读取元数据
    ///
    /// # 参数
    /// - `path`: 文件路径
    ///
    /// # 返回
    /// 返回包含名称、大小和路径的暂存文件
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::File(FileError::NotFound {
                    path: display.clone(),
                })
            } else {
                AppError::file_read_failed(display.clone(), e)
            }
        })?;

        if !metadata.is_file() {
            return Err(AppError::File(FileError::NotFound { path: display }));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            size: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }

    /// 扩展名：最后一个 `.` 之后的部分，小写
    ///
    /// 名称中没有 `.` 时返回 None
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// 推导文件类型，不支持的扩展名返回 None
    pub fn kind(&self) -> Option<FileKind> {
        self.extension().and_then(|ext| FileKind::from_extension(&ext))
    }

    pub fn is_image(&self) -> bool {
        self.kind().is_some_and(FileKind::is_image)
    }

    pub fn is_archive(&self) -> bool {
        self.kind().is_some_and(FileKind::is_archive)
    }
}

impl fmt::Display for StagedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} 字节)", self.name, self.size)
    }
}
