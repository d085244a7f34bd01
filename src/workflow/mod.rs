pub mod evaluation_flow;

pub use evaluation_flow::{EvaluationFlow, EvaluationOutcome};
