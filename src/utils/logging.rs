use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::StagingError;
use crate::models::StagedFile;
use crate::staging::BatchOutcome;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则按是否详细输出选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化报告日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n评估报告日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加内容到报告日志文件
pub fn append_log_file(log_file_path: &str, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `api_base_url`: 评估服务地址
pub fn log_startup(api_base_url: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档评估客户端");
    info!("🌐 评估服务: {}", api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录一批参考文件的处理结果
pub fn log_batch_outcome(outcome: &BatchOutcome) {
    for file in &outcome.accepted {
        info!("✓ 已添加参考文件: {}", file);
    }
    for (file, err) in &outcome.rejected {
        log_rejection(file, err);
    }
}

/// 记录被拒绝的文件
pub fn log_rejection(file: &StagedFile, err: &StagingError) {
    warn!("⚠️ 已拒绝 {}: {}", truncate_text(&file.name, 60), err);
}

/// 打印最终统计信息
///
/// # 参数
/// - `score`: 总分
/// - `label`: 通过状态
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(score: i64, label: &str, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评估完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("总分: {}/100 [{}]", score, label);
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
