//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (任务清单 → 暂存会话 → 输出)
//!     ↓
//! workflow::EvaluationFlow (一次评估：打包 → 发送 → 渲染)
//!     ↓
//! services (能力层：打包 / 存档)        render (提取 / 分级 / 格式化)
//!     ↓
//! infrastructure (基础设施：EvaluationClient)
//! ```
//!
//! 暂存会话由 App 创建并持有，以可变引用传给流程层

pub mod app;

pub use app::App;
