//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、输出启动信息、创建 EvaluationClient
//! 2. **暂存**：读取任务清单中的文件元数据，交给暂存会话校验
//! 3. **评估**：委托 EvaluationFlow 完成打包、发送和渲染
//! 4. **输出**：打印报告并写入报告日志文件
//!
//! 只做调度和输出，不做具体的校验或提取

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::EvaluationClient;
use crate::models::{EvaluationJob, StagedFile};
use crate::render::text::{format_file_list, format_report};
use crate::services::ResultArchive;
use crate::staging::{SessionMode, StagingSession};
use crate::utils::logging::{
    append_log_file, init_log_file, log_batch_outcome, log_rejection, log_startup,
    print_final_stats,
};
use crate::workflow::{EvaluationFlow, EvaluationOutcome};

/// 应用主结构
pub struct App {
    config: Config,
    client: EvaluationClient,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        log_startup(&config.api_base_url);

        let client = EvaluationClient::new(&config).context("无法创建 HTTP 客户端")?;

        Ok(Self { config, client })
    }

    /// 按任务清单构建暂存会话
    ///
    /// 无法读取的文件只记录警告并跳过
    pub async fn stage_job(&self, job: &EvaluationJob) -> Result<StagingSession> {
        let mut session = StagingSession::new();
        session.set_mode(SessionMode::from_use_database(job.use_database));

        if job.use_database {
            if !job.references.is_empty() {
                warn!(
                    "⚠️ 数据库模式下忽略 {} 个参考文件",
                    job.references.len()
                );
            }
        } else {
            let mut candidates = Vec::with_capacity(job.references.len());
            for path in &job.references {
                if let Some(file) = load_file(&job.resolve(path)).await {
                    candidates.push(file);
                }
            }
            let outcome = session.add_reference_files(candidates);
            log_batch_outcome(&outcome);
        }

        if let Some(path) = &job.submission {
            if let Some(file) = load_file(&job.resolve(path)).await {
                match session.set_submission(file.clone()) {
                    Ok(_) => info!("✓ 已设置提交文件: {}", file),
                    Err(e) => log_rejection(&file, &e),
                }
            }
        }

        if !session.references().is_empty() {
            info!(
                "📋 参考文件 ({} 个):\n{}",
                session.references().len(),
                format_file_list(session.references())
            );
        }

        Ok(session)
    }

    /// 运行一次完整评估
    pub async fn evaluate(&self, job: EvaluationJob) -> Result<EvaluationOutcome> {
        let mut session = self.stage_job(&job).await?;

        if !session.is_evaluate_enabled() {
            if session.submission().is_none() {
                anyhow::bail!("缺少有效的提交文件 (ZIP)");
            }
            anyhow::bail!("缺少有效的参考文件，或使用 --use-database");
        }

        init_log_file(&self.config.output_log_file)?;

        let mut flow = EvaluationFlow::new(&self.client);
        if self.config.save_raw_results {
            flow = flow.with_archive(ResultArchive::with_dir(&self.config.results_dir));
        }

        let outcome = match flow.run(&mut session).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("❌ 评估错误: {}", e);
                return Err(e.into());
            }
        };

        let text = format_report(&outcome.rendered);
        println!("{}", text);
        append_log_file(&self.config.output_log_file, &text)?;

        print_final_stats(
            outcome.rendered.overall.score,
            outcome.rendered.overall.label,
            &self.config.output_log_file,
        );

        Ok(outcome)
    }

    /// 查询服务健康状态
    pub async fn health(&self) -> Result<bool> {
        let health = self.client.health().await?;

        info!("🩺 服务状态: {}", health.status);
        if let Some(tunnel) = &health.ssh_tunnel {
            info!("  SSH 隧道: {}", tunnel);
        }
        if let Some(server) = &health.qwen_server {
            info!("  模型服务: {}", server);
        }
        if let Some(engine) = &health.evaluation_engine {
            info!("  评估引擎: {}", engine);
        }
        for step in &health.instructions {
            warn!("  {}", step);
        }

        Ok(health.healthy)
    }

    /// 重新生成服务端元数据库
    pub async fn generate_metadata(&self) -> Result<String> {
        info!("🗂️ 正在重新生成元数据库...");
        let status = self.client.generate_metadata().await?;
        info!("✓ {}", status);
        Ok(status)
    }
}

/// 读取文件元数据，失败时记录警告
async fn load_file(path: &Path) -> Option<StagedFile> {
    match StagedFile::from_path(path).await {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("⚠️ 跳过文件 {}: {}", path.display(), e);
            None
        }
    }
}
