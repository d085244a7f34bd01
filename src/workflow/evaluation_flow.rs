//! 评估流程 - 流程层
//!
//! 核心职责：定义"一次评估"的完整流程
//!
//! 流程顺序：
//! 1. 检查准入条件和忙碌标记
//! 2. 设置忙碌标记 → 打包 → 发送
//! 3. 无论成功、失败还是被取消都清除忙碌标记（`BusyGuard` 在 drop 时清除）
//! 4. 渲染报告（渲染本身不会失败）

use serde_json::Value;
use std::ops::Deref;
use tracing::{error, info, warn};

use crate::error::{AppResult, WorkflowError};
use crate::infrastructure::EvaluationClient;
use crate::models::EvaluationReport;
use crate::render::RenderedReport;
use crate::services::{ResultArchive, SubmissionPackager};
use crate::staging::StagingSession;

/// 一次评估的结果
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    /// 服务返回的原始 JSON
    pub raw: Value,
    pub report: EvaluationReport,
    pub rendered: RenderedReport,
}

/// 评估流程
///
/// - 编排打包、发送、渲染
/// - 持有忙碌标记的设置和清除
/// - 不重试，不取消
pub struct EvaluationFlow<'a> {
    client: &'a EvaluationClient,
    packager: SubmissionPackager,
    archive: Option<ResultArchive>,
}

impl<'a> EvaluationFlow<'a> {
    pub fn new(client: &'a EvaluationClient) -> Self {
        Self {
            client,
            packager: SubmissionPackager::new(),
            archive: None,
        }
    }

    /// 成功后把原始结果存档
    pub fn with_archive(mut self, archive: ResultArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    pub async fn run(&self, session: &mut StagingSession) -> AppResult<EvaluationOutcome> {
        if session.is_busy() {
            warn!("⚠️ 已有评估请求在进行中");
            return Err(WorkflowError::Busy.into());
        }
        if !session.can_evaluate() {
            return Err(WorkflowError::NotReady.into());
        }

        info!("🚀 开始评估...");
        let dispatched = {
            let guard = BusyGuard::acquire(session);
            self.dispatch(&guard).await
        };

        let raw = match dispatched {
            Ok(raw) => raw,
            Err(e) => {
                error!("❌ 评估失败: {}", e);
                return Err(e);
            }
        };

        if let Some(archive) = &self.archive {
            match archive.save(&raw).await {
                Ok(path) => info!("💾 原始结果已保存至: {}", path.display()),
                Err(e) => warn!("⚠️ 保存原始结果失败: {}", e),
            }
        }

        let report = EvaluationReport::from_value(&raw);
        let rendered = RenderedReport::from_report(&report);
        info!(
            "✓ 评估完成: 总分 {} [{}], {} 个类别",
            rendered.overall.score,
            rendered.overall.label,
            rendered.entries.len()
        );

        Ok(EvaluationOutcome {
            raw,
            report,
            rendered,
        })
    }

    /// 打包并发送，忙碌标记由调用方负责
    async fn dispatch(&self, session: &StagingSession) -> AppResult<Value> {
        let form = self.packager.package(session).await?;
        let raw = self.client.evaluate(form).await?;
        Ok(raw)
    }
}

/// 忙碌标记守卫
///
/// 创建时设置忙碌标记，drop 时清除；future 被丢弃时同样会清除
struct BusyGuard<'s> {
    session: &'s mut StagingSession,
}

impl<'s> BusyGuard<'s> {
    fn acquire(session: &'s mut StagingSession) -> Self {
        session.set_busy(true);
        Self { session }
    }
}

impl Deref for BusyGuard<'_> {
    type Target = StagingSession;

    fn deref(&self) -> &StagingSession {
        self.session
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.session.set_busy(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::AppError;
    use crate::models::StagedFile;
    use crate::staging::SessionMode;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> EvaluationClient {
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Config::default()
        };
        EvaluationClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_not_ready_without_submission() {
        let client = client();
        let mut session = StagingSession::new();
        session.set_mode(SessionMode::DatabaseMode);

        let result = EvaluationFlow::new(&client).run(&mut session).await;
        assert!(matches!(
            result,
            Err(AppError::Workflow(WorkflowError::NotReady))
        ));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_busy_session_is_rejected() {
        let client = client();
        let mut session = StagingSession::new();
        session.set_mode(SessionMode::DatabaseMode);
        session
            .set_submission(StagedFile::new("abgabe.zip", 1))
            .unwrap();
        session.set_busy(true);

        let result = EvaluationFlow::new(&client).run(&mut session).await;
        assert!(matches!(result, Err(AppError::Workflow(WorkflowError::Busy))));
    }

    #[tokio::test]
    async fn test_busy_flag_cleared_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abgabe.zip");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let client = client();
        let mut session = StagingSession::new();
        session.set_mode(SessionMode::DatabaseMode);
        session
            .set_submission(StagedFile::from_path(&path).await.unwrap())
            .unwrap();

        let result = EvaluationFlow::new(&client).run(&mut session).await;
        assert!(matches!(result, Err(AppError::Api(_))));
        assert!(!session.is_busy());
        assert!(session.is_evaluate_enabled());
    }

    async fn ready_session(dir: &std::path::Path) -> StagingSession {
        let path = dir.join("abgabe.zip");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let mut session = StagingSession::new();
        session.set_mode(SessionMode::DatabaseMode);
        session
            .set_submission(StagedFile::from_path(&path).await.unwrap())
            .unwrap();
        session
    }

    fn client_for(server: &MockServer) -> EvaluationClient {
        let config = Config {
            api_base_url: server.uri(),
            request_timeout_secs: 30,
            ..Config::default()
        };
        EvaluationClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_busy_flag_cleared_when_run_is_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/evaluate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"overall_score": 80, "passed": true}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut session = ready_session(dir.path()).await;
        let client = client_for(&server);
        let flow = EvaluationFlow::new(&client);

        let cancelled =
            tokio::time::timeout(Duration::from_millis(300), flow.run(&mut session)).await;
        assert!(cancelled.is_err());
        assert!(!session.is_busy());
        assert!(session.is_evaluate_enabled());
    }

    #[tokio::test]
    async fn test_busy_flag_cleared_after_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/evaluate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "overall_score": 71.5,
                "passed": true,
                "evaluations": [{"category": "struktur_vergleich", "score": 71.5}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut session = ready_session(dir.path()).await;
        let client = client_for(&server);

        let outcome = EvaluationFlow::new(&client).run(&mut session).await.unwrap();
        assert!(!session.is_busy());
        assert_eq!(outcome.rendered.overall.score, 72);
        assert_eq!(outcome.rendered.overall.label, "PASSED");
        assert_eq!(outcome.rendered.entries.len(), 1);
    }
}
