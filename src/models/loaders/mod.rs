pub mod job_loader;

pub use job_loader::load_job;
