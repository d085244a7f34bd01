//! 报告渲染
//!
//! 把评估报告转换为有序的展示条目。只产出数据，不负责输出格式

use serde::Serialize;
use std::fmt;

use crate::models::{CategoryEvaluation, EvaluationReport};
use crate::render::extract::{extract_category_details, extract_criteria};

pub const PASSED_LABEL: &str = "PASSED";
pub const FAILED_LABEL: &str = "FAILED";

/// 分数等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreClass {
    Good,
    Medium,
    Bad,
}

impl ScoreClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreClass::Good => "good",
            ScoreClass::Medium => "medium",
            ScoreClass::Bad => "bad",
        }
    }
}

impl fmt::Display for ScoreClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分数分级：>= 70 good，>= 50 medium，其余 bad
pub fn classify_score(score: f64) -> ScoreClass {
    if score >= 70.0 {
        ScoreClass::Good
    } else if score >= 50.0 {
        ScoreClass::Medium
    } else {
        ScoreClass::Bad
    }
}

/// 总分和通过状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallScore {
    pub score: i64,
    pub passed: bool,
    pub label: &'static str,
}

/// 四舍五入（.5 向上取整）
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn normalize_overall(report: &EvaluationReport) -> OverallScore {
    OverallScore {
        score: round_half_up(report.overall_score),
        passed: report.passed,
        label: if report.passed {
            PASSED_LABEL
        } else {
            FAILED_LABEL
        },
    }
}

/// 单个类别的展示条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEntry {
    pub category: String,
    pub score: f64,
    pub score_class: ScoreClass,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    /// 详情中的布尔检查项
    pub criteria: Vec<(String, bool)>,
}

impl RenderedEntry {
    pub fn from_category(category: &CategoryEvaluation) -> Self {
        let details = extract_category_details(category);
        Self {
            category: category.category.clone(),
            score: category.score,
            score_class: classify_score(category.score),
            feedback: details.feedback,
            strengths: details.strengths,
            improvements: details.improvements,
            criteria: extract_criteria(category),
        }
    }
}

/// 按原始顺序渲染所有类别，不排序、不去重
pub fn render_report(report: &EvaluationReport) -> Vec<RenderedEntry> {
    report
        .evaluations
        .iter()
        .map(RenderedEntry::from_category)
        .collect()
}

/// 完整的渲染结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedReport {
    pub overall: OverallScore,
    pub entries: Vec<RenderedEntry>,
}

impl RenderedReport {
    pub fn from_report(report: &EvaluationReport) -> Self {
        Self {
            overall: normalize_overall(report),
            entries: render_report(report),
        }
    }
}
