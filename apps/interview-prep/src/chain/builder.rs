//! Prompt Builder — pure renderers from inputs (and the resolved plan) to prompts.
//!
//! Inputs are embedded verbatim; nothing is truncated.

use serde_json::json;

use crate::chain::prompts::{
    ANSWERER_SYSTEM, ANSWER_USER_TEMPLATE, PLANNER_SYSTEM_TEMPLATE, PLANNER_USER_TEMPLATE,
    PLAN_SCHEMA, REPAIR_USER_TEMPLATE,
};
use crate::llm_client::prompts::{JSON_REPAIR_SYSTEM, STRICT_JSON_RULE};
use crate::llm_client::Prompt;
use crate::models::{InputBundle, Plan};

/// Stage 1: asks for the plan as strict JSON with the three plan keys.
pub fn build_planning_prompt(input: &InputBundle) -> Prompt {
    Prompt {
        system: fill_template(
            PLANNER_SYSTEM_TEMPLATE,
            &[
                ("plan_schema", PLAN_SCHEMA),
                ("strict_json_rule", STRICT_JSON_RULE),
            ],
        ),
        user: fill_template(PLANNER_USER_TEMPLATE, &input_fields(input)),
    }
}

/// Stage 2: original inputs plus the plan as compact JSON.
pub fn build_answering_prompt(input: &InputBundle, plan: &Plan) -> Prompt {
    let plan_json = json!({
        "steps": plan.steps,
        "assumptions": plan.assumptions,
        "success_criteria": plan.success_criteria,
    })
    .to_string();

    let mut fields = input_fields(input).to_vec();
    fields.push(("plan_json", plan_json.as_str()));

    Prompt {
        system: ANSWERER_SYSTEM.to_string(),
        user: fill_template(ANSWER_USER_TEMPLATE, &fields),
    }
}

/// The one-shot repair round: the malformed stage-1 text is embedded verbatim.
pub fn build_repair_prompt(broken_text: &str) -> Prompt {
    Prompt {
        system: JSON_REPAIR_SYSTEM.to_string(),
        user: fill_template(
            REPAIR_USER_TEMPLATE,
            &[
                ("plan_schema", PLAN_SCHEMA),
                ("strict_json_rule", STRICT_JSON_RULE),
                ("broken_text", broken_text),
            ],
        ),
    }
}

fn input_fields(input: &InputBundle) -> [(&'static str, &str); 4] {
    [
        ("job_title", input.job_title()),
        ("interviewer_title", input.interviewer_title()),
        ("job_description", input.job_description()),
        ("resume", input.resume()),
    ]
}

/// Single-pass `{name}` substitution.
///
/// Substituted values are never rescanned, so a resume that happens to contain
/// `{job_title}` is embedded as written. Unknown placeholders are left alone.
fn fill_template(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open + 1..];
        let matched = fields.iter().find(|(name, _)| {
            candidate.starts_with(name) && candidate[name.len()..].starts_with('}')
        });

        match matched {
            Some((name, value)) => {
                out.push_str(value);
                rest = &candidate[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = candidate;
            }
        }
    }

    out.push_str(rest);
    out
}
