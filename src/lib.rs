//! # Doc Checker
//!
//! 文档评估客户端：暂存参考文件和提交文件，校验后提交给远端评估服务，
//! 并把返回的嵌套评分结构渲染为报告
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP 客户端，只暴露调用评估服务的能力
//!
//! ### ② 核心层
//! - `staging/` - 暂存会话状态机和准入策略
//! - `render/` - 结果提取链和报告渲染，从不报错
//!
//! ### ③ 业务能力层（Services）
//! - `SubmissionPackager` - 把会话打包为 multipart 表单
//! - `ResultArchive` - 保存原始评估结果
//!
//! ### ④ 流程层（Workflow）
//! - `EvaluationFlow` - 忙碌标记 → 打包 → 发送 → 渲染
//!
//! ### ⑤ 编排层（Orchestration）
//! - `App` - 加载任务清单、构建会话、输出报告

pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod staging;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, StagingError};
pub use infrastructure::EvaluationClient;
pub use models::{CategoryEvaluation, EvaluationJob, EvaluationReport, StagedFile};
pub use orchestrator::App;
pub use render::{render_report, RenderedEntry, RenderedReport};
pub use staging::{SessionMode, StagingSession};
pub use workflow::{EvaluationFlow, EvaluationOutcome};
