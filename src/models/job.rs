use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 评估任务清单（TOML）
///
/// ```toml
/// use_database = false
/// submission = "abgabe.zip"
/// references = ["musterloesung.pdf", "screenshot_1.png"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationJob {
    /// 是否使用服务端的参考数据库
    #[serde(default)]
    pub use_database: bool,
    /// 提交文件路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<PathBuf>,
    /// 参考文件路径
    #[serde(default)]
    pub references: Vec<PathBuf>,
    /// 清单文件所在路径，相对路径以此为基准解析
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<PathBuf>,
}

impl EvaluationJob {
    /// 合并命令行参数：命令行提供的值优先
    pub fn merge_cli(
        mut self,
        submission: Option<PathBuf>,
        references: Vec<PathBuf>,
        use_database: bool,
    ) -> Self {
        if submission.is_some() {
            self.submission = submission;
        }
        if !references.is_empty() {
            self.references = references;
        }
        self.use_database |= use_database;
        self
    }

    /// 将相对路径解析为相对于清单文件所在目录
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match self.file_path.as_ref().and_then(|p| p.parent()) {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
