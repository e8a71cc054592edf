//! Chain Orchestrator — runs the planning stage, the bounded repair round, and
//! the answering stage, strictly in that order.
//!
//! Flow: build_planning_prompt → invoke → parse_plan
//!       → (on failure) build_repair_prompt → invoke → parse_plan
//!       → build_answering_prompt → invoke → ChainResult
//!
//! Stage-1 resolution is two explicit states rather than a retry loop:
//! `FirstAttempt` can move to `Repairing`, and `Repairing` can only end in
//! `Resolution`. There is no path back, so a second repair cannot be expressed.

use tracing::{info, warn};
use uuid::Uuid;

use crate::chain::builder::{build_answering_prompt, build_planning_prompt, build_repair_prompt};
use crate::chain::plan_parser::{parse_plan, PlanParseError};
use crate::errors::{ChainError, Stage};
use crate::llm_client::ModelInvoker;
use crate::models::{ChainResult, FinalDocument, InputBundle, Plan, PlanSource, SamplingConfig};

/// Outcome of parsing the first planning response.
enum FirstAttempt {
    Resolved(Plan),
    Repairing { malformed: String, error: PlanParseError },
}

/// Terminal stage-1 states.
enum Resolution {
    Resolved { plan: Plan, source: PlanSource },
    Failed(PlanParseError),
}

/// Runs both stages against `invoker` and returns the plan and final document.
///
/// Stage 2 only runs once stage 1 has resolved to a plan. The answering
/// output is accepted verbatim, empty or not.
#[tracing::instrument(skip_all, fields(run_id = %Uuid::new_v4()))]
pub async fn run_chain(
    invoker: &dyn ModelInvoker,
    input: &InputBundle,
    sampling: &SamplingConfig,
) -> Result<ChainResult, ChainError> {
    info!("Stage 1: requesting plan for '{}'", input.job_title());
    let (plan, plan_source) = match resolve_plan(invoker, input, sampling).await? {
        Resolution::Resolved { plan, source } => (plan, source),
        Resolution::Failed(error) => return Err(error.into()),
    };
    info!(
        "Stage 1 resolved ({:?}): {} steps, {} assumptions, {} success criteria",
        plan_source,
        plan.steps.len(),
        plan.assumptions.len(),
        plan.success_criteria.len()
    );

    info!("Stage 2: generating final document");
    let answering = build_answering_prompt(input, &plan);
    let text = invoker
        .invoke(&answering, sampling)
        .await
        .map_err(ChainError::model(Stage::Answering))?;

    if text.trim().is_empty() {
        warn!("Stage 2 returned an empty document; accepting it as-is");
    }

    Ok(ChainResult {
        plan,
        plan_source,
        document: FinalDocument::new(text),
    })
}

async fn resolve_plan(
    invoker: &dyn ModelInvoker,
    input: &InputBundle,
    sampling: &SamplingConfig,
) -> Result<Resolution, ChainError> {
    let planning = build_planning_prompt(input);
    let raw = invoker
        .invoke(&planning, sampling)
        .await
        .map_err(ChainError::model(Stage::Planning))?;

    let first = match parse_plan(&raw) {
        Ok(plan) => FirstAttempt::Resolved(plan),
        Err(error) => FirstAttempt::Repairing {
            malformed: raw,
            error,
        },
    };

    match first {
        FirstAttempt::Resolved(plan) => Ok(Resolution::Resolved {
            plan,
            source: PlanSource::FirstAttempt,
        }),
        FirstAttempt::Repairing { malformed, error } => {
            repair_plan(invoker, malformed, error, sampling).await
        }
    }
}

/// The single repair round. Issues exactly one model call.
async fn repair_plan(
    invoker: &dyn ModelInvoker,
    malformed: String,
    error: PlanParseError,
    sampling: &SamplingConfig,
) -> Result<Resolution, ChainError> {
    warn!("Plan JSON parse failed ({error}); attempting a one-time repair");

    let repair = build_repair_prompt(&malformed);
    let repaired = invoker
        .invoke(&repair, sampling)
        .await
        .map_err(ChainError::model(Stage::Repair))?;

    Ok(match parse_plan(&repaired) {
        Ok(plan) => Resolution::Resolved {
            plan,
            source: PlanSource::Repaired,
        },
        Err(reason) => {
            warn!("Plan repair failed; aborting before stage 2");
            Resolution::Failed(PlanParseError::RepairFailed {
                original: malformed,
                repaired,
                reason: reason.to_string(),
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{ModelInvocationError, Prompt};

    /// Replays canned responses in order and records every prompt it was sent.
    struct ScriptedInvoker {
        responses: Mutex<VecDeque<Result<String, ModelInvocationError>>>,
        prompts: Mutex<Vec<Prompt>>,
    }

    impl ScriptedInvoker {
        fn new(responses: Vec<Result<String, ModelInvocationError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Prompt> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelInvoker for ScriptedInvoker {
        async fn invoke(
            &self,
            prompt: &Prompt,
            _sampling: &SamplingConfig,
        ) -> Result<String, ModelInvocationError> {
            self.prompts.lock().unwrap().push(prompt.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("model invoked more times than scripted")
        }
    }

    const VALID_PLAN: &str = r#"{
        "steps": ["Extract SOC duties from the JD", "Map Tier 1/2 experience", "Draft 10 questions"],
        "assumptions": ["Hiring manager runs the SOC"],
        "success_criteria": ["Every question ties to SIEM triage or resume evidence"]
    }"#;

    const MALFORMED_PLAN: &str = r#"{"steps": ["Extract SOC duties from the JD", "Map Tier"#;

    fn soc_input() -> InputBundle {
        InputBundle::new(
            "Security Operations Analyst",
            "Hiring Manager",
            "Monitor SIEM alerts...",
            "2 years SOC Tier 1/2...",
        )
        .unwrap()
    }

    fn soc_document() -> String {
        let questions: String = (1..=10)
            .map(|n| format!("{n}. Question {n} about SIEM alert triage?\n"))
            .collect();
        format!(
            "# Interview Prep: Security Operations Analyst\n\n\
             ## Overview\n- Hiring manager for the SOC team.\n\n\
             ## Questions\n{questions}\n\
             ## Next Steps\n- Review recent incidents\n- Prepare a triage story\n- Ask about shift rotation\n"
        )
    }

    fn service_error() -> ModelInvocationError {
        ModelInvocationError::Api {
            status: 503,
            message: "Service Unavailable".to_string(),
        }
    }

    fn enumerated_lines(document: &str) -> usize {
        document
            .lines()
            .filter(|line| {
                let line = line.trim_start();
                let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
                digits > 0 && line[digits..].starts_with(". ")
            })
            .count()
    }

    #[tokio::test]
    async fn test_soc_scenario_valid_plan_first_attempt() {
        let invoker = ScriptedInvoker::new(vec![Ok(VALID_PLAN.to_string()), Ok(soc_document())]);

        let result = run_chain(&invoker, &soc_input(), &SamplingConfig::default())
            .await
            .unwrap();

        assert!(!result.plan.steps.is_empty());
        assert_eq!(result.plan_source, PlanSource::FirstAttempt);
        assert_eq!(enumerated_lines(result.document.as_str()), 10);
        assert_eq!(result.document.as_str().matches("## Next Steps").count(), 1);

        let calls = invoker.calls();
        assert_eq!(calls.len(), 2, "no repair call when the first plan parses");
        assert_eq!(calls[0], build_planning_prompt(&soc_input()));
        assert_eq!(calls[1], build_answering_prompt(&soc_input(), &result.plan));
    }

    #[tokio::test]
    async fn test_malformed_plan_is_repaired_once() {
        let invoker = ScriptedInvoker::new(vec![
            Ok(MALFORMED_PLAN.to_string()),
            Ok(VALID_PLAN.to_string()),
            Ok(soc_document()),
        ]);

        let result = run_chain(&invoker, &soc_input(), &SamplingConfig::default())
            .await
            .unwrap();

        assert_eq!(result.plan_source, PlanSource::Repaired);
        assert_eq!(result.plan.steps[0], "Extract SOC duties from the JD");

        let calls = invoker.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], build_repair_prompt(MALFORMED_PLAN));
        assert!(calls[1].user.contains(MALFORMED_PLAN));
        assert_eq!(calls[2], build_answering_prompt(&soc_input(), &result.plan));
    }

    #[tokio::test]
    async fn test_failed_repair_aborts_before_stage_two() {
        let invoker = ScriptedInvoker::new(vec![
            Ok(MALFORMED_PLAN.to_string()),
            Ok("still not json".to_string()),
        ]);

        let err = run_chain(&invoker, &soc_input(), &SamplingConfig::default())
            .await
            .unwrap_err();

        match err {
            ChainError::PlanParse(PlanParseError::RepairFailed {
                original, repaired, ..
            }) => {
                assert_eq!(original, MALFORMED_PLAN);
                assert_eq!(repaired, "still not json");
            }
            other => panic!("expected RepairFailed, got {other:?}"),
        }
        assert_eq!(invoker.calls().len(), 2, "no third call after a failed repair");
    }

    #[tokio::test]
    async fn test_service_error_on_first_call_fails_fast() {
        let invoker = ScriptedInvoker::new(vec![Err(service_error())]);

        let err = run_chain(&invoker, &soc_input(), &SamplingConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ChainError::ModelInvocation {
                stage: Stage::Planning,
                source: ModelInvocationError::Api { status: 503, .. },
            }
        ));
        assert_eq!(invoker.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_service_error_during_repair_is_not_retried() {
        let invoker =
            ScriptedInvoker::new(vec![Ok(MALFORMED_PLAN.to_string()), Err(service_error())]);

        let err = run_chain(&invoker, &soc_input(), &SamplingConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ChainError::ModelInvocation {
                stage: Stage::Repair,
                ..
            }
        ));
        assert_eq!(invoker.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_service_error_during_answering_returns_no_result() {
        let invoker = ScriptedInvoker::new(vec![Ok(VALID_PLAN.to_string()), Err(service_error())]);

        let err = run_chain(&invoker, &soc_input(), &SamplingConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ChainError::ModelInvocation {
                stage: Stage::Answering,
                ..
            }
        ));
        assert_eq!(invoker.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_answering_output_is_accepted_verbatim() {
        let invoker = ScriptedInvoker::new(vec![Ok(VALID_PLAN.to_string()), Ok(String::new())]);

        let result = run_chain(&invoker, &soc_input(), &SamplingConfig::default())
            .await
            .unwrap();

        assert_eq!(result.document.as_str(), "");
    }

    #[tokio::test]
    async fn test_fenced_plan_needs_no_repair() {
        let fenced = format!("```json\n{VALID_PLAN}\n```");
        let invoker = ScriptedInvoker::new(vec![Ok(fenced), Ok(soc_document())]);

        let result = run_chain(&invoker, &soc_input(), &SamplingConfig::default())
            .await
            .unwrap();

        assert_eq!(result.plan_source, PlanSource::FirstAttempt);
        assert_eq!(invoker.calls().len(), 2);
    }
}
