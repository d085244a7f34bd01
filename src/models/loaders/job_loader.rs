use crate::models::job::EvaluationJob;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载评估任务清单
pub async fn load_job(job_file_path: &Path) -> Result<EvaluationJob> {
    if !job_file_path.exists() {
        anyhow::bail!("任务清单不存在: {}", job_file_path.display());
    }

    let content = fs::read_to_string(job_file_path)
        .await
        .with_context(|| format!("无法读取任务清单: {}", job_file_path.display()))?;

    let mut job: EvaluationJob = toml::from_str(&content)
        .with_context(|| format!("无法解析任务清单: {}", job_file_path.display()))?;

    job.file_path = Some(job_file_path.to_path_buf());

    tracing::info!(
        "已加载任务清单: {} (参考文件 {} 个, 数据库模式: {})",
        job_file_path.display(),
        job.references.len(),
        job.use_database
    );

    Ok(job)
}
