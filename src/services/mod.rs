pub mod result_archive;
pub mod submission_packager;

pub use result_archive::ResultArchive;
pub use submission_packager::{FormPlan, SubmissionPackager};
