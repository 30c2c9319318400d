//! Response Parser: pulls the structured score object out of free-form model output.
//!
//! The model is asked for JSON only, but replies often carry prose or code fences
//! around the payload. We find the first balanced `{...}` span (ignoring braces
//! inside string literals) and decode it against the schema.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::MatchError;

/// Decoded analysis for one job/candidate pair.
///
/// Scores are passed through as the model sent them, rounded to integers.
/// Range is not enforced here; see `out_of_range_fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalysis {
    #[serde(alias = "overall_score", deserialize_with = "score")]
    pub overall_score: i32,
    #[serde(default, alias = "skill_match", deserialize_with = "optional_score")]
    pub skill_match: Option<i32>,
    #[serde(default, alias = "experience_match", deserialize_with = "optional_score")]
    pub experience_match: Option<i32>,
    #[serde(default, alias = "location_match", deserialize_with = "optional_score")]
    pub location_match: Option<i32>,
    #[serde(default)]
    pub rationale: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
}

impl MatchAnalysis {
    /// Names of score fields that fall outside 0–100.
    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("overallScore", Some(self.overall_score)),
            ("skillMatch", self.skill_match),
            ("experienceMatch", self.experience_match),
            ("locationMatch", self.location_match),
        ];
        fields
            .into_iter()
            .filter_map(|(name, value)| match value {
                Some(v) if !(0..=100).contains(&v) => Some(name),
                _ => None,
            })
            .collect()
    }
}

fn round_score(value: f64) -> i32 {
    // `as` saturates at the i32 bounds.
    value.round() as i32
}

fn score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    f64::deserialize(deserializer).map(round_score)
}

fn optional_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.map(round_score))
}

/// Parses raw model output into a `MatchAnalysis`.
///
/// Only the first balanced object is decoded. If it does not match the schema
/// the response is `MatchUnparseable`, even when a later object would.
pub fn parse_match_response(raw: &str) -> Result<MatchAnalysis, MatchError> {
    let object = first_balanced_object(raw).ok_or_else(|| {
        MatchError::MatchUnparseable("no JSON object found in response".to_string())
    })?;

    serde_json::from_str::<MatchAnalysis>(object)
        .map_err(|e| MatchError::MatchUnparseable(format!("invalid match payload: {e}")))
}

/// The earliest-opening balanced `{...}` span in `text`.
///
/// An unclosed `{` is treated as prose, so spans inside it still count.
/// Quotes only open a string literal inside a brace. Single pass over the bytes;
/// braces and quotes are ASCII, so byte offsets are valid UTF-8 boundaries.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let mut open: Vec<usize> = Vec::new();
    let mut first: Option<(usize, usize)> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in text.as_bytes().iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                let Some(start) = open.pop() else { continue };
                if first.map_or(true, |(s, _)| start < s) {
                    first = Some((start, i + 1));
                }
                // Nothing opened later can start before `first`.
                if open.is_empty() {
                    break;
                }
            }
            _ => {}
        }
    }

    first.map(|(start, end)| &text[start..end])
}
