use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 评估服务地址
    pub api_base_url: String,
    /// 请求超时（秒），评估可能耗时较长
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 评估报告日志文件
    pub output_log_file: String,
    /// 原始评估结果存放目录
    pub results_dir: String,
    /// 是否保存原始评估结果 JSON
    pub save_raw_results: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5001".to_string(),
            request_timeout_secs: 300,
            verbose_logging: false,
            output_log_file: "evaluation_report.txt".to_string(),
            results_dir: "results".to_string(),
            save_raw_results: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("EVALUATION_API_URL").unwrap_or(default.api_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            results_dir: std::env::var("RESULTS_DIR").unwrap_or(default.results_dir),
            save_raw_results: std::env::var("SAVE_RAW_RESULTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.save_raw_results),
        }
    }

    /// 使用命令行参数覆盖服务地址
    pub fn with_api_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api_base_url = url;
        }
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                name: "EVALUATION_API_URL".to_string(),
                value: self.api_base_url.clone(),
                reason: "必须以 http:// 或 https:// 开头".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                value: self.request_timeout_secs.to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }

    /// 拼接完整的 API 地址
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
