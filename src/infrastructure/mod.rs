pub mod evaluation_client;

pub use evaluation_client::EvaluationClient;
