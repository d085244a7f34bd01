use serde::Serialize;
use serde_json::Value;

use crate::utils::json::{to_display_text, to_text_list};

/// 评估服务健康状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    /// HTTP 状态为 2xx 且 status 为 OK
    pub healthy: bool,
    pub status: String,
    pub ssh_tunnel: Option<String>,
    pub qwen_server: Option<String>,
    pub evaluation_engine: Option<String>,
    /// 服务不可用时给出的处理步骤
    pub instructions: Vec<String>,
}

impl HealthStatus {
    pub fn from_value(value: &Value, http_ok: bool) -> Self {
        let text = |key: &str| value.get(key).filter(|v| !v.is_null()).map(to_display_text);

        let status = text("status").unwrap_or_else(|| "UNKNOWN".to_string());
        Self {
            healthy: http_ok && status == "OK",
            ssh_tunnel: text("ssh_tunnel"),
            qwen_server: text("qwen_server"),
            evaluation_engine: text("evaluation_engine"),
            instructions: value
                .get("instructions")
                .and_then(to_text_list)
                .unwrap_or_default(),
            status,
        }
    }
}
