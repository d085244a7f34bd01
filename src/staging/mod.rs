//! 暂存层
//!
//! - `policy` - 准入策略常量和图片计数方式
//! - `session` - 暂存会话状态机

pub mod policy;
pub mod session;

pub use policy::{ImageCounting, StagingPolicy};
pub use session::{BatchOutcome, SessionMode, StagingSession};
