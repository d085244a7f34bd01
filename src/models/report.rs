//! 评估报告数据结构
//!
//! 报告由远端服务生成，结构不受本程序控制。
//! 所有构造函数都不会失败，缺失字段使用默认值

use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::json::{as_number, is_truthy, to_display_text, truthy_field};

/// 类别名缺失时的占位名称
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// 评估报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// 总分（缺失时为 0）
    pub overall_score: f64,
    /// 是否通过（缺失时为 false）
    pub passed: bool,
    /// 各类别评估，保持服务返回的顺序
    pub evaluations: Vec<CategoryEvaluation>,
}

impl EvaluationReport {
    /// 从服务返回的 JSON 构造报告
    pub fn from_value(value: &Value) -> Self {
        let overall_score = value
            .get("overall_score")
            .and_then(as_number)
            .unwrap_or(0.0);

        let passed = value.get("passed").is_some_and(is_truthy);

        let evaluations = value
            .get("evaluations")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(CategoryEvaluation::from_value).collect())
            .unwrap_or_default();

        Self {
            overall_score,
            passed,
            evaluations,
        }
    }
}

/// 单个类别的评估
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEvaluation {
    pub category: String,
    pub score: f64,
    /// 不透明的嵌套结构，由渲染层解析
    pub evaluation: Value,
}

impl CategoryEvaluation {
    pub fn from_value(value: &Value) -> Self {
        let category = truthy_field(value, "category")
            .map(to_display_text)
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        let score = value.get("score").and_then(as_number).unwrap_or(0.0);

        let evaluation = truthy_field(value, "evaluation")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        Self {
            category,
            score,
            evaluation,
        }
    }
}
