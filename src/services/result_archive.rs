//! 结果存档服务 - 业务能力层
//!
//! 只负责"把原始评估结果写到磁盘"，不关心流程

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// 结果存档服务
pub struct ResultArchive {
    results_dir: PathBuf,
}

impl ResultArchive {
    /// 使用指定目录创建
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: dir.into(),
        }
    }

    /// 保存原始评估结果
    ///
    /// # 参数
    /// - `result`: 服务返回的 JSON
    ///
    /// # 返回
    /// 返回写入的文件路径 `evaluation_result_<YYYYmmdd_HHMMSS>.json`
    pub async fn save(&self, result: &Value) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.results_dir)
            .await
            .with_context(|| format!("无法创建目录: {}", self.results_dir.display()))?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .results_dir
            .join(format!("evaluation_result_{}.json", timestamp));

        let content = serde_json::to_string_pretty(result)?;
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("无法写入结果文件: {}", path.display()))?;

        debug!("评估结果已保存: {}", path.display());
        Ok(path)
    }
}
