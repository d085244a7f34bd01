//! 提交打包服务 - 业务能力层
//!
//! 把暂存会话转换为评估请求的 multipart 表单

use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::debug;

use crate::error::{AppError, AppResult, FileError, WorkflowError};
use crate::models::StagedFile;
use crate::staging::StagingSession;

/// 表单字段计划
///
/// 只包含字段名和对应的暂存文件，不读取内容
#[derive(Debug, Clone, PartialEq)]
pub struct FormPlan<'a> {
    pub submission: &'a StagedFile,
    pub use_database: bool,
    /// (`reference_<i>`, 文件)，仅文件模式下存在
    pub references: Vec<(String, &'a StagedFile)>,
}

impl<'a> FormPlan<'a> {
    /// 根据会话生成字段计划
    ///
    /// 会话不满足评估条件时返回 `WorkflowError::NotReady`
    pub fn from_session(session: &'a StagingSession) -> Result<Self, WorkflowError> {
        if !session.can_evaluate() {
            return Err(WorkflowError::NotReady);
        }
        let submission = session.submission().ok_or(WorkflowError::NotReady)?;
        let use_database = session.mode().uses_database();

        let references = if use_database {
            Vec::new()
        } else {
            session
                .references()
                .iter()
                .enumerate()
                .map(|(index, file)| (format!("reference_{}", index), file))
                .collect()
        };

        Ok(Self {
            submission,
            use_database,
            references,
        })
    }
}

/// 提交打包服务
///
/// 职责：
/// - 读取暂存文件的内容
/// - 按字段计划构建 multipart 表单
#[derive(Debug, Default)]
pub struct SubmissionPackager;

impl SubmissionPackager {
    pub fn new() -> Self {
        Self
    }

    /// 打包会话中的文件
    pub async fn package(&self, session: &StagingSession) -> AppResult<Form> {
        let plan = FormPlan::from_session(session)?;

        let mut form = Form::new()
            .part("submission", Self::file_part(plan.submission).await?)
            .text("use_database", plan.use_database.to_string());

        for (field, file) in &plan.references {
            form = form.part(field.clone(), Self::file_part(file).await?);
        }

        debug!(
            "表单已打包: 提交文件 {}, 参考文件 {} 个, use_database={}",
            plan.submission.name,
            plan.references.len(),
            plan.use_database
        );

        Ok(form)
    }

    /// 读取单个文件为表单字段
    async fn file_part(file: &StagedFile) -> AppResult<Part> {
        let path = file.path.as_deref().ok_or_else(|| {
            AppError::File(FileError::NotFound {
                path: file.name.clone(),
            })
        })?;

        let bytes = read_bytes(path).await?;
        Ok(Part::bytes(bytes).file_name(file.name.clone()))
    }
}

async fn read_bytes(path: &Path) -> AppResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))
}
