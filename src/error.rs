use std::fmt;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// API 调用错误
    Api(ApiError),
    /// 文件操作错误
    File(FileError),
    /// 暂存校验错误
    Staging(StagingError),
    /// 流程状态错误
    Workflow(WorkflowError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Staging(e) => write!(f, "暂存错误: {}", e),
            AppError::Workflow(e) => write!(f, "流程错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Staging(e) => Some(e),
            AppError::Workflow(e) => Some(e),
        }
    }
}

/// API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 服务返回非 2xx 状态
    RequestFailed {
        status: u16,
        reason: String,
        /// 响应体中的 `error` 字段（如果有）
        detail: Option<String>,
    },
    /// 网络层失败（连接、超时等）
    NetworkError { message: String },
    /// JSON 解析失败
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed {
                status,
                reason,
                detail,
            } => {
                write!(f, "HTTP {}: {}", status, reason)?;
                if let Some(detail) = detail {
                    write!(f, " ({})", detail)?;
                }
                Ok(())
            }
            ApiError::NetworkError { message } => write!(f, "网络错误: {}", message),
            ApiError::JsonParseFailed { source } => write!(f, "JSON解析失败: {}", source),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

/// 暂存校验错误
///
/// 每个候选文件独立报告，不会中断整批处理
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagingError {
    #[error("不支持的文件类型: {name}")]
    InvalidExtension { name: String },

    #[error("文件过大: {name} ({size} 字节, 上限 {limit} 字节)")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("最多允许 {limit} 张图片")]
    ImageLimitExceeded { limit: usize },

    #[error("只允许一个 ZIP 或 PDF 文件")]
    ArchiveLimitExceeded,

    #[error("索引 {index} 超出范围 (共 {len} 个文件)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// 流程状态错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// 暂存状态不满足评估条件
    NotReady,
    /// 已有评估请求在进行中
    Busy,
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::NotReady => write!(f, "缺少提交文件或参考文件，无法开始评估"),
            WorkflowError::Busy => write!(f, "评估正在进行中"),
        }
    }
}

impl std::error::Error for WorkflowError {}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置值不合法
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                name,
                value,
                reason,
            } => write!(f, "配置项 {} 的值 '{}' 不合法: {}", name, value, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::NetworkError {
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl From<StagingError> for AppError {
    fn from(err: StagingError) -> Self {
        AppError::Staging(err)
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        AppError::Workflow(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
