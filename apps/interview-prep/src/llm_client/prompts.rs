// Cross-cutting prompt fragments shared by any stage that asks for JSON.
// Stage-specific prompts live in chain/prompts.rs.

/// System prompt for a JSON repair round trip.
pub const JSON_REPAIR_SYSTEM: &str = "You repair JSON. Output strict JSON only.";

/// Closing rule for any prompt whose answer must be machine-parsed.
pub const STRICT_JSON_RULE: &str = "Return STRICT JSON only. No markdown, no commentary.";
