//! 暂存会话 - 状态机
//!
//! 持有参考文件列表、提交文件和会话模式，负责准入校验。
//! 由调用方持有并以引用传递，不存在全局单例

use tracing::{debug, info};

use crate::error::StagingError;
use crate::models::StagedFile;
use crate::staging::policy::{ImageCounting, StagingPolicy};

/// 会话模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// 上传参考文件
    #[default]
    FileMode,
    /// 参考资料由服务端数据库提供
    DatabaseMode,
}

impl SessionMode {
    pub fn from_use_database(use_database: bool) -> Self {
        if use_database {
            SessionMode::DatabaseMode
        } else {
            SessionMode::FileMode
        }
    }

    pub fn uses_database(self) -> bool {
        self == SessionMode::DatabaseMode
    }
}

/// 一批参考文件的处理结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// 被接受的文件（按输入顺序）
    pub accepted: Vec<StagedFile>,
    /// 被拒绝的文件及原因（按输入顺序）
    pub rejected: Vec<(StagedFile, StagingError)>,
}

/// 暂存会话
#[derive(Debug, Clone, Default)]
pub struct StagingSession {
    policy: StagingPolicy,
    mode: SessionMode,
    references: Vec<StagedFile>,
    submission: Option<StagedFile>,
    busy: bool,
}

impl StagingSession {
    /// 使用默认策略创建空会话
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: StagingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn references(&self) -> &[StagedFile] {
        &self.references
    }

    pub fn submission(&self) -> Option<&StagedFile> {
        self.submission.as_ref()
    }

    /// 切换会话模式
    ///
    /// 切换到数据库模式时清空参考文件，不可恢复
    pub fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
        if mode.uses_database() && !self.references.is_empty() {
            info!("🗄️ 切换到数据库模式，丢弃 {} 个参考文件", self.references.len());
            self.references.clear();
        }
        debug!("会话模式: {:?}, 可评估: {}", self.mode, self.can_evaluate());
    }

    /// 添加一批参考文件
    ///
    /// 每个候选独立校验，被拒绝的候选不影响后续候选；
    /// 被接受的候选立即加入列表，后续候选可以看到它
    ///
    /// # 参数
    /// - `candidates`: 候选文件
    ///
    /// # 返回
    /// 返回接受和拒绝的明细；数据库模式下不做任何处理，返回空结果
    pub fn add_reference_files(
        &mut self,
        candidates: impl IntoIterator<Item = StagedFile>,
    ) -> BatchOutcome {
        if self.mode.uses_database() {
            debug!("数据库模式下忽略参考文件");
            return BatchOutcome::default();
        }

        let candidates: Vec<StagedFile> = candidates.into_iter().collect();
        let batch_images = candidates.iter().filter(|f| f.is_image()).count();

        let outcome = candidates
            .into_iter()
            .fold(BatchOutcome::default(), |mut outcome, candidate| {
                match self.admit_reference(&candidate, batch_images) {
                    Ok(()) => {
                        self.references.push(candidate.clone());
                        outcome.accepted.push(candidate);
                    }
                    Err(e) => outcome.rejected.push((candidate, e)),
                }
                outcome
            });

        debug!(
            "参考文件批次: 接受 {}, 拒绝 {}, 当前共 {} 个",
            outcome.accepted.len(),
            outcome.rejected.len(),
            self.references.len()
        );

        outcome
    }

    /// 校验单个参考文件候选
    fn admit_reference(
        &self,
        candidate: &StagedFile,
        batch_images: usize,
    ) -> Result<(), StagingError> {
        let kind = candidate.kind();

        if !self.policy.allows_reference(kind) {
            return Err(StagingError::InvalidExtension {
                name: candidate.name.clone(),
            });
        }

        self.check_size(candidate)?;

        let current_images = self.image_count();
        let requested = match self.policy.image_counting {
            ImageCounting::BatchWide => batch_images,
            ImageCounting::Incremental => usize::from(candidate.is_image()),
        };
        if current_images + requested > self.policy.max_images {
            return Err(StagingError::ImageLimitExceeded {
                limit: self.policy.max_images,
            });
        }

        if candidate.is_archive() && self.archive_count() >= self.policy.max_archives {
            return Err(StagingError::ArchiveLimitExceeded);
        }

        Ok(())
    }

    fn check_size(&self, file: &StagedFile) -> Result<(), StagingError> {
        if file.size > self.policy.max_file_size {
            return Err(StagingError::FileTooLarge {
                name: file.name.clone(),
                size: file.size,
                limit: self.policy.max_file_size,
            });
        }
        Ok(())
    }

    fn image_count(&self) -> usize {
        self.references.iter().filter(|f| f.is_image()).count()
    }

    fn archive_count(&self) -> usize {
        self.references.iter().filter(|f| f.is_archive()).count()
    }

    /// 按索引移除参考文件
    pub fn remove_reference_file(&mut self, index: usize) -> Result<StagedFile, StagingError> {
        if index >= self.references.len() {
            return Err(StagingError::IndexOutOfRange {
                index,
                len: self.references.len(),
            });
        }
        Ok(self.references.remove(index))
    }

    /// 设置提交文件（只接受 ZIP）
    ///
    /// # 返回
    /// 成功时返回被替换掉的旧文件（如果有）
    pub fn set_submission(&mut self, file: StagedFile) -> Result<Option<StagedFile>, StagingError> {
        if !self.policy.allows_submission(file.kind()) {
            return Err(StagingError::InvalidExtension { name: file.name });
        }
        self.check_size(&file)?;

        Ok(self.submission.replace(file))
    }

    pub fn clear_submission(&mut self) -> Option<StagedFile> {
        self.submission.take()
    }

    /// 是否满足评估条件
    ///
    /// (数据库模式 或 参考文件非空) 且 已有提交文件
    pub fn can_evaluate(&self) -> bool {
        let has_reference = self.mode.uses_database() || !self.references.is_empty();
        has_reference && self.submission.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// 评估按钮是否可用：满足评估条件且没有进行中的请求
    pub fn is_evaluate_enabled(&self) -> bool {
        self.can_evaluate() && !self.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::policy::MAX_FILE_SIZE;

    fn file(name: &str) -> StagedFile {
        StagedFile::new(name, 1024)
    }

    fn images(n: usize) -> Vec<StagedFile> {
        (0..n).map(|i| file(&format!("bild_{}.png", i))).collect()
    }

    #[test]
    fn test_can_evaluate_requires_submission_and_reference() {
        let mut session = StagingSession::new();
        assert!(!session.can_evaluate());

        session.add_reference_files(vec![file("muster.pdf")]);
        assert!(!session.can_evaluate());

        session.set_submission(file("abgabe.zip")).unwrap();
        assert!(session.can_evaluate());

        session.remove_reference_file(0).unwrap();
        assert!(!session.can_evaluate());

        session.set_mode(SessionMode::DatabaseMode);
        assert!(session.can_evaluate());

        session.clear_submission();
        assert!(!session.can_evaluate());
    }

    #[test]
    fn test_pdf_after_zip_is_rejected_but_image_accepted() {
        let mut session = StagingSession::new();
        session.add_reference_files(vec![file("muster.zip")]);

        let outcome = session.add_reference_files(vec![file("muster.pdf")]);
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejected[0].1, StagingError::ArchiveLimitExceeded);

        let outcome = session.add_reference_files(vec![file("foto.jpg")]);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(session.references().len(), 2);
    }

    #[test]
    fn test_two_archives_in_one_batch() {
        let mut session = StagingSession::new();
        let outcome = session.add_reference_files(vec![file("a.zip"), file("b.pdf")]);
        assert_eq!(outcome.accepted, vec![file("a.zip")]);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].1, StagingError::ArchiveLimitExceeded);
    }

    #[test]
    fn test_six_images_in_one_batch_all_rejected() {
        let mut session = StagingSession::new();
        let outcome = session.add_reference_files(images(6));

        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejected.len(), 6);
        for (_, err) in &outcome.rejected {
            assert_eq!(*err, StagingError::ImageLimitExceeded { limit: 5 });
        }
        assert!(session.references().is_empty());
    }

    #[test]
    fn test_batch_wide_count_rejects_non_images_too() {
        let mut session = StagingSession::new();
        let mut batch = images(6);
        batch.push(file("muster.pdf"));

        let outcome = session.add_reference_files(batch);
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejected.len(), 7);
    }

    #[test]
    fn test_batch_wide_count_uses_accepted_images() {
        let mut session = StagingSession::new();
        session.add_reference_files(images(2));

        // 2 已有 + 3 本批 = 5，第一张通过；之后 3 + 3 > 5
        let outcome = session.add_reference_files(images(3));
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(session.references().len(), 3);
    }

    #[test]
    fn test_incremental_counting_accepts_up_to_limit() {
        let policy = StagingPolicy::default().with_image_counting(ImageCounting::Incremental);
        let mut session = StagingSession::with_policy(policy);

        let outcome = session.add_reference_files(images(6));
        assert_eq!(outcome.accepted.len(), 5);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(
            outcome.rejected[0].1,
            StagingError::ImageLimitExceeded { limit: 5 }
        );
    }

    #[test]
    fn test_invalid_extension_and_size_checked_first() {
        let mut session = StagingSession::new();
        let too_big = StagedFile::new("gross.pdf", MAX_FILE_SIZE + 1);
        let exact = StagedFile::new("genau.pdf", MAX_FILE_SIZE);

        let outcome =
            session.add_reference_files(vec![file("notes.txt"), file("noext"), too_big, exact]);

        assert_eq!(outcome.accepted.len(), 1);
        assert!(matches!(
            outcome.rejected[0].1,
            StagingError::InvalidExtension { .. }
        ));
        assert!(matches!(
            outcome.rejected[1].1,
            StagingError::InvalidExtension { .. }
        ));
        assert!(matches!(
            outcome.rejected[2].1,
            StagingError::FileTooLarge { .. }
        ));
    }

    #[test]
    fn test_duplicate_names_are_not_deduplicated() {
        let mut session = StagingSession::new();
        session.add_reference_files(vec![file("a.png")]);
        session.add_reference_files(vec![file("a.png")]);
        assert_eq!(session.references().len(), 2);
    }

    #[test]
    fn test_database_mode_clears_and_ignores_references() {
        let mut session = StagingSession::new();
        session.add_reference_files(vec![file("a.pdf"), file("b.png"), file("c.png")]);
        assert_eq!(session.references().len(), 3);

        session.set_mode(SessionMode::DatabaseMode);
        assert!(session.references().is_empty());

        let outcome = session.add_reference_files(vec![file("d.png")]);
        assert_eq!(outcome, BatchOutcome::default());
        assert!(session.references().is_empty());

        session.set_mode(SessionMode::FileMode);
        assert!(session.references().is_empty());
    }

    #[test]
    fn test_remove_reference_out_of_range() {
        let mut session = StagingSession::new();
        session.add_reference_files(vec![file("a.pdf")]);

        assert_eq!(
            session.remove_reference_file(1),
            Err(StagingError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(session.remove_reference_file(0), Ok(file("a.pdf")));
    }

    #[test]
    fn test_set_submission_validation_and_replace() {
        let mut session = StagingSession::new();

        assert!(matches!(
            session.set_submission(file("abgabe.pdf")),
            Err(StagingError::InvalidExtension { .. })
        ));
        assert!(matches!(
            session.set_submission(StagedFile::new("abgabe.zip", MAX_FILE_SIZE + 1)),
            Err(StagingError::FileTooLarge { .. })
        ));
        assert!(session.submission().is_none());

        assert_eq!(session.set_submission(file("v1.ZIP")), Ok(None));
        assert_eq!(session.set_submission(file("v2.zip")), Ok(Some(file("v1.ZIP"))));
        assert_eq!(session.submission(), Some(&file("v2.zip")));
    }

    #[test]
    fn test_busy_disables_evaluate() {
        let mut session = StagingSession::new();
        session.set_mode(SessionMode::DatabaseMode);
        session.set_submission(file("abgabe.zip")).unwrap();
        assert!(session.is_evaluate_enabled());

        session.set_busy(true);
        assert!(session.can_evaluate());
        assert!(!session.is_evaluate_enabled());
    }
}
