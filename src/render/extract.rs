//! 类别详情提取
//!
//! 评估结构有多种嵌套形式，按顺序尝试，第一个命中的生效：
//! 1. `detailed_comparisons[0].evaluation.gesamt_bewertung`
//!    或 `detailed_comparisons[0].evaluation`
//! 2. `gesamt_bewertung` 或评估对象本身
//!
//! 每一步都是返回 Option 的纯函数，任何缺失都不会报错

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::CategoryEvaluation;
use crate::utils::json::{to_display_text, to_text_list, truthy_field};

pub const FALLBACK_FEEDBACK: &str = "No specific feedback available";
pub const FALLBACK_STRENGTH: &str = "No specific strengths given";
pub const FALLBACK_IMPROVEMENT: &str = "No specific improvements given";

/// 提取出的类别详情
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDetails {
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// 从 detailed_comparisons 的第一项解析
fn from_detailed_comparisons(evaluation: &Value) -> Option<Value> {
    let first = evaluation
        .get("detailed_comparisons")
        .and_then(Value::as_array)
        .and_then(|items| items.first())?;

    let inner = truthy_field(first, "evaluation");
    let details = inner
        .and_then(|e| truthy_field(e, "gesamt_bewertung"))
        .or(inner)
        .cloned()
        .unwrap_or_else(empty_object);

    Some(details)
}

/// 从 gesamt_bewertung 解析，缺失时使用评估对象本身
fn from_overall_assessment(evaluation: &Value) -> Option<Value> {
    truthy_field(evaluation, "gesamt_bewertung")
        .cloned()
        .or_else(|| Some(evaluation.clone()).filter(|v| !v.is_null()))
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// 按解析顺序确定详情对象
pub fn resolve_details(evaluation: &Value) -> Value {
    from_detailed_comparisons(evaluation)
        .or_else(|| from_overall_assessment(evaluation))
        .unwrap_or_else(empty_object)
}

/// 提取类别的反馈、优点和改进建议
///
/// 字段缺失时使用固定的兜底文本；空数组视为存在，不做替换
pub fn extract_category_details(category: &CategoryEvaluation) -> CategoryDetails {
    details_from_object(&resolve_details(&category.evaluation))
}

fn details_from_object(details: &Value) -> CategoryDetails {
    let feedback = truthy_field(details, "feedback")
        .map(to_display_text)
        .unwrap_or_else(|| FALLBACK_FEEDBACK.to_string());

    let strengths = truthy_field(details, "staerken")
        .and_then(to_text_list)
        .unwrap_or_else(|| vec![FALLBACK_STRENGTH.to_string()]);

    let improvements = truthy_field(details, "verbesserungen")
        .and_then(to_text_list)
        .unwrap_or_else(|| vec![FALLBACK_IMPROVEMENT.to_string()]);

    CategoryDetails {
        feedback,
        strengths,
        improvements,
    }
}

/// 提取详情对象中的布尔检查项（例如 `header_vorhanden: true`）
///
/// 按键名排序，保证输出稳定
pub fn extract_criteria(category: &CategoryEvaluation) -> Vec<(String, bool)> {
    let details = resolve_details(&category.evaluation);
    let mut criteria: Vec<(String, bool)> = details
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(key, value)| value.as_bool().map(|b| (key.clone(), b)))
                .collect()
        })
        .unwrap_or_default();
    criteria.sort_by(|a, b| a.0.cmp(&b.0));
    criteria
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category(evaluation: Value) -> CategoryEvaluation {
        CategoryEvaluation::from_value(&json!({
            "category": "test",
            "score": 50,
            "evaluation": evaluation
        }))
    }

    #[test]
    fn test_detailed_comparisons_with_gesamt_bewertung() {
        let details = extract_category_details(&category(json!({
            "detailed_comparisons": [{
                "evaluation": {
                    "gesamt_bewertung": {"feedback": "ok", "staerken": ["a"], "verbesserungen": []}
                }
            }]
        })));

        assert_eq!(details.feedback, "ok");
        assert_eq!(details.strengths, vec!["a".to_string()]);
        assert!(details.improvements.is_empty());
    }

    #[test]
    fn test_detailed_comparisons_without_gesamt_bewertung() {
        let details = extract_category_details(&category(json!({
            "detailed_comparisons": [
                {"evaluation": {"feedback": "erste"}},
                {"evaluation": {"feedback": "zweite"}}
            ],
            "gesamt_bewertung": {"feedback": "ignoriert"}
        })));

        assert_eq!(details.feedback, "erste");
        assert_eq!(details.strengths, vec![FALLBACK_STRENGTH.to_string()]);
        assert_eq!(details.improvements, vec![FALLBACK_IMPROVEMENT.to_string()]);
    }

    #[test]
    fn test_detailed_comparisons_first_without_evaluation() {
        let details = extract_category_details(&category(json!({
            "detailed_comparisons": [null],
            "feedback": "nicht verwendet"
        })));
        assert_eq!(details.feedback, FALLBACK_FEEDBACK);
    }

    #[test]
    fn test_empty_detailed_comparisons_falls_through() {
        let details = extract_category_details(&category(json!({
            "detailed_comparisons": [],
            "gesamt_bewertung": {"feedback": "gesamt"}
        })));
        assert_eq!(details.feedback, "gesamt");
    }

    #[test]
    fn test_evaluation_object_itself() {
        let details = extract_category_details(&category(json!({
            "feedback": "direkt",
            "verbesserungen": ["mehr Tests"]
        })));
        assert_eq!(details.feedback, "direkt");
        assert_eq!(details.improvements, vec!["mehr Tests".to_string()]);
    }

    #[test]
    fn test_missing_everything_uses_fallbacks() {
        let details = extract_category_details(&category(json!(null)));
        assert_eq!(
            details,
            CategoryDetails {
                feedback: FALLBACK_FEEDBACK.to_string(),
                strengths: vec![FALLBACK_STRENGTH.to_string()],
                improvements: vec![FALLBACK_IMPROVEMENT.to_string()],
            }
        );
    }

    #[test]
    fn test_empty_feedback_string_uses_fallback() {
        let details = extract_category_details(&category(json!({"feedback": ""})));
        assert_eq!(details.feedback, FALLBACK_FEEDBACK);
    }

    #[test]
    fn test_extract_criteria() {
        let criteria = extract_criteria(&category(json!({
            "gesamt_bewertung": {
                "header_vorhanden": true,
                "formeln_korrekt": false,
                "feedback": "x"
            }
        })));
        assert_eq!(
            criteria,
            vec![
                ("formeln_korrekt".to_string(), false),
                ("header_vorhanden".to_string(), true)
            ]
        );
    }
}
