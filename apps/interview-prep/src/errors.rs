use std::fmt;

use thiserror::Error;

use crate::chain::plan_parser::PlanParseError;
use crate::llm_client::ModelInvocationError;

/// The model call a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Planning,
    Repair,
    Answering,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Planning => "planning",
            Stage::Repair => "plan repair",
            Stage::Answering => "answering",
        };
        f.write_str(name)
    }
}

/// Everything a chain run can fail with. Both kinds abort the run and no
/// partial result is returned.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Model error during {stage}: {source}")]
    ModelInvocation {
        stage: Stage,
        #[source]
        source: ModelInvocationError,
    },

    #[error(transparent)]
    PlanParse(#[from] PlanParseError),
}

impl ChainError {
    pub fn model(stage: Stage) -> impl FnOnce(ModelInvocationError) -> Self {
        move |source| ChainError::ModelInvocation { stage, source }
    }
}
