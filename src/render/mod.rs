//! 结果渲染层
//!
//! 保证"总能渲染、从不报错"：服务返回的结构不完整时，
//! 仍然输出完整（可能是通用兜底文本）的报告
//!
//! - `extract` - 类别详情提取链
//! - `report` - 总分归一化、分级、条目渲染
//! - `labels` - 名称和图标查找表
//! - `text` - 纯文本格式化

pub mod extract;
pub mod labels;
pub mod report;
pub mod text;

pub use extract::{extract_category_details, CategoryDetails};
pub use report::{
    classify_score, normalize_overall, render_report, OverallScore, RenderedEntry,
    RenderedReport, ScoreClass,
};
