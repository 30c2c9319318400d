// Match Scoring Engine
// Scores a job against every available candidate through the reasoning service.
// All LLM calls go through llm_client via the MatchScorer seam.

pub mod engine;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod scoring;
pub mod store;
