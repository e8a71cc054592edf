use serde::{Deserialize, Serialize};

/// Structured output of the planning stage.
///
/// All three keys must be present in the model's JSON; a missing or `null`
/// key fails deserialization. Empty arrays are accepted and unknown keys are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<String>,
    pub assumptions: Vec<String>,
    pub success_criteria: Vec<String>,
}

/// Which stage-1 state produced the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    FirstAttempt,
    Repaired,
}

/// Markdown produced by the answering stage. Accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalDocument(String);

impl FinalDocument {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Terminal output of a successful chain run.
#[derive(Debug, Clone)]
pub struct ChainResult {
    pub plan: Plan,
    pub plan_source: PlanSource,
    pub document: FinalDocument,
}
