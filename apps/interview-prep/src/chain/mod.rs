// Two-stage prompt chain: plan (strict JSON) → answer (Markdown).
// All model calls go through llm_client::ModelInvoker.

pub mod builder;
pub mod orchestrator;
pub mod plan_parser;
pub mod prompts;

pub use orchestrator::run_chain;
pub use plan_parser::PlanParseError;
