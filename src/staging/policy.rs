//! 暂存准入策略
//!
//! 固定常量，运行时不可配置

use crate::models::FileKind;

/// 单个文件大小上限：10 MiB
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// 参考文件中图片数量上限
pub const MAX_IMAGES: usize = 5;

/// 参考文件中 ZIP/PDF 数量上限
pub const MAX_ARCHIVES: usize = 1;

/// 参考文件允许的类型
pub const REFERENCE_KINDS: &[FileKind] = &[
    FileKind::Zip,
    FileKind::Pdf,
    FileKind::Jpg,
    FileKind::Jpeg,
    FileKind::Png,
];

/// 提交文件允许的类型
pub const SUBMISSION_KINDS: &[FileKind] = &[FileKind::Zip];

/// 图片数量的计数方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageCounting {
    /// 每个候选都用"已有图片 + 整批图片总数"比较。
    /// 一批中图片总数超限时，整批（包括非图片候选）都会被拒绝
    #[default]
    BatchWide,
    /// 逐个累加：已有图片（含本批已接受的）+ 当前候选
    Incremental,
}

/// 暂存策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagingPolicy {
    pub max_file_size: u64,
    pub max_images: usize,
    pub max_archives: usize,
    pub image_counting: ImageCounting,
}

impl Default for StagingPolicy {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_images: MAX_IMAGES,
            max_archives: MAX_ARCHIVES,
            image_counting: ImageCounting::BatchWide,
        }
    }
}

impl StagingPolicy {
    pub fn with_image_counting(mut self, image_counting: ImageCounting) -> Self {
        self.image_counting = image_counting;
        self
    }

    pub fn allows_reference(&self, kind: Option<FileKind>) -> bool {
        kind.is_some_and(|k| REFERENCE_KINDS.contains(&k))
    }

    pub fn allows_submission(&self, kind: Option<FileKind>) -> bool {
        kind.is_some_and(|k| SUBMISSION_KINDS.contains(&k))
    }
}
