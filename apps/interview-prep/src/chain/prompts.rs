// LLM prompt constants for the two-stage chain.
// Placeholders are `{name}` and are filled by `builder::fill_template`.

/// Shape of the plan JSON, shared by the planning and repair prompts.
pub const PLAN_SCHEMA: &str = r#"{
  "steps": ["...", "..."],
  "assumptions": ["...", "..."],
  "success_criteria": ["...", "..."]
}"#;

/// System prompt for stage 1. Replace `{plan_schema}` and `{strict_json_rule}`.
pub const PLANNER_SYSTEM_TEMPLATE: &str = "You are a precise planning assistant.
Given the user's inputs for an Interview Helper (job title, interviewer title, job description, resume),
produce a compact execution plan in STRICT JSON with EXACTLY these keys:
{plan_schema}
- steps: 3-6 short, clear steps
- assumptions: bullet list of assumptions
- success_criteria: what success looks like
Rules:
- {strict_json_rule}
- Keep steps actionable and specific to turning inputs into 10 tailored interview questions.
";

/// System prompt for stage 2.
pub const ANSWERER_SYSTEM: &str = "You are an interview-prep assistant.
Using the user's original inputs AND the provided planning JSON, produce a final response in MARKDOWN that:
- Includes a brief overview section (who the interviewer is, what the role needs).
- Presents EXACTLY **10** tailored interview questions as a numbered list (mix: role/technical, behavioral, resume-based follow-ups).
- Uses clear headings and bullet points.
- Ends with a short **Next Steps** section (3-5 bullets).
- Be concise, specific, and avoid duplication.
";

/// Stage 1 user text. Replace `{job_title}`, `{interviewer_title}`,
/// `{job_description}`, `{resume}`.
pub const PLANNER_USER_TEMPLATE: &str = "INPUTS:
JOB TITLE: {job_title}

INTERVIEWER TITLE: {interviewer_title}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume}
";

/// Stage 2 user text. Same placeholders as the planner plus `{plan_json}`.
pub const ANSWER_USER_TEMPLATE: &str = "ORIGINAL INPUTS:
JOB TITLE: {job_title}

INTERVIEWER TITLE: {interviewer_title}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume}

PLANNING JSON:
{plan_json}
";

/// Repair round user text. Replace `{plan_schema}`, `{strict_json_rule}`,
/// `{broken_text}`.
pub const REPAIR_USER_TEMPLATE: &str = "The following text was supposed to be STRICT JSON but isn't. \
Repair it to valid JSON that matches this schema:
{plan_schema}
All three keys are required. {strict_json_rule}

BROKEN TEXT:
{broken_text}";
