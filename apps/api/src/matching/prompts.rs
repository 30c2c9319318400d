//! Prompt Builder: renders one job/candidate pair into the analysis request.
//!
//! Output is a pure function of the two records. Absent optional fields are
//! written as `Not specified` so identical inputs always produce identical text.

use crate::llm_client::prompts::JSON_OBJECT_SYSTEM;
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobSpec;

pub const NOT_SPECIFIED: &str = "Not specified";

/// System prompt for match analysis.
pub const MATCH_SYSTEM: &str = JSON_OBJECT_SYSTEM;

/// Match analysis template. Placeholders are substituted in a single pass by
/// `render_template`; braces that do not name a placeholder are kept as-is.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"You are an AI recruiter analyzing candidate-job matches.

Job Details:
- Title: {job_title}
- Company: {job_company}
- Requirements: {job_requirements}
- Location: {job_location}

Candidate Details:
- Name: {candidate_name}
- Title: {candidate_title}
- Experience: {candidate_experience} years
- Skills: {candidate_skills}
- Location: {candidate_location}

Analyze this match and provide:
1. An overall match score (0-100)
2. Individual scores for: skill match, experience match, location match
3. 3-5 specific reasons why this is a good match (or not)
4. Any potential gaps or concerns

Respond in JSON format:
{
  "overallScore": <number>,
  "skillMatch": <number>,
  "experienceMatch": <number>,
  "locationMatch": <number>,
  "rationale": ["reason1", "reason2", ...],
  "gaps": ["gap1", "gap2", ...]
}"#;

/// Builds the analysis prompt for one candidate against one job.
pub fn build_match_prompt(job: &JobSpec, candidate: &CandidateProfile) -> String {
    let experience = candidate.experience_years.to_string();
    let skills = if candidate.skills.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        candidate.skills.join(", ")
    };

    render_template(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("job_title", &job.title),
            ("job_company", &job.company),
            ("job_requirements", or_not_specified(job.requirements.as_deref())),
            ("job_location", or_not_specified(job.location.as_deref())),
            ("candidate_name", &candidate.full_name),
            ("candidate_title", or_not_specified(candidate.title.as_deref())),
            ("candidate_experience", &experience),
            ("candidate_skills", &skills),
            ("candidate_location", or_not_specified(candidate.location.as_deref())),
        ],
    )
}

fn or_not_specified(value: Option<&str>) -> &str {
    match value {
        None | Some("") => NOT_SPECIFIED,
        Some(v) => v,
    }
}

/// Replaces `{name}` placeholders in one left-to-right pass.
/// Substituted values are never rescanned, so user text containing `{...}` is emitted verbatim.
fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
