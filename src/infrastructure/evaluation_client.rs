//! 评估服务客户端 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"调用评估服务"的能力

use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::health::HealthStatus;

pub const EVALUATE_PATH: &str = "/api/evaluate";
pub const HEALTH_PATH: &str = "/api/health";
pub const GENERATE_METADATA_PATH: &str = "/api/metadata/generate";

/// 评估服务客户端
///
/// 职责：
/// - 持有 reqwest::Client
/// - 发送请求、检查状态码、解析 JSON
/// - 不认识暂存会话，不做渲染
pub struct EvaluationClient {
    client: Client,
    config: Config,
}

impl EvaluationClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// 提交评估请求
    ///
    /// # 参数
    /// - `form`: 已打包的 multipart 表单
    ///
    /// # 返回
    /// 返回服务响应的原始 JSON
    pub async fn evaluate(&self, form: Form) -> Result<Value, ApiError> {
        let url = self.config.endpoint(EVALUATE_PATH);
        debug!("POST {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::into_json(response).await
    }

    /// 查询服务健康状态
    ///
    /// 服务不可用时返回 503 和状态说明，这种情况仍解析响应体
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.config.endpoint(HEALTH_PATH);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let http_ok = response.status().is_success();
        let body = response.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(HealthStatus::from_value(&value, http_ok)),
            Err(e) => Err(ApiError::JsonParseFailed {
                source: Box::new(e),
            }),
        }
    }

    /// 重新生成服务端的参考元数据库
    ///
    /// # 返回
    /// 返回服务给出的状态信息
    pub async fn generate_metadata(&self) -> Result<String, ApiError> {
        let url = self.config.endpoint(GENERATE_METADATA_PATH);
        debug!("POST {}", url);

        let response = self.client.post(&url).send().await?;
        let value = Self::into_json(response).await?;

        Ok(value
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("Metadata generated")
            .to_string())
    }

    /// 检查状态码并解析 JSON
    async fn into_json(response: Response) -> Result<Value, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            warn!("服务返回错误状态 {}: {:?}", status, detail);
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                detail,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                ApiError::JsonParseFailed {
                    source: Box::new(e),
                }
            } else {
                ApiError::from(e)
            }
        })
    }
}

/// 从错误响应体中取出 `error` 字段
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
}
