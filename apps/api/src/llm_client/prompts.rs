// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt fragment that asks for a single JSON object.
/// Callers still tolerate prose around the object; this only lowers the odds of it.
pub const JSON_OBJECT_SYSTEM: &str = "You are a precise, structured assistant. \
    Respond with exactly one JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies outside the object.";
