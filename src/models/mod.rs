pub mod health;
pub mod job;
pub mod loaders;
pub mod report;
pub mod staged_file;

pub use health::HealthStatus;
pub use job::EvaluationJob;
pub use loaders::load_job;
pub use report::{CategoryEvaluation, EvaluationReport};
pub use staged_file::{FileKind, StagedFile};
