//! JSON 访问工具
//!
//! 评估服务返回的结构不固定，这里的访问函数都不会失败，
//! 缺失或类型不符时返回 None，由调用方决定默认值

use serde_json::Value;

/// 判断值是否为"有效值"
///
/// null、false、0、NaN 和空字符串视为无效；空数组和空对象视为有效
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 读取字段，只在字段存在且为有效值时返回
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}

/// 读取数值，支持数字和可解析的字符串
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

/// 转为展示文本：字符串原样返回，其他值使用 JSON 文本
pub fn to_display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 转为字符串列表
///
/// 数组逐项转为文本，单个字符串视为一项，其他类型返回 None
pub fn to_text_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().map(to_display_text).collect()),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}
