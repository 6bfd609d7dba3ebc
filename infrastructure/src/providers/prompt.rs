//! Prompt construction for insight tasks.
//!
//! Both providers are asked for the same output shape (analysis, a
//! "Recommendations" list, a `Confidence: NN%` line) so that one
//! response parser handles either.

use insight_domain::ProviderId;
use serde_json::Value;

const OUTPUT_FORMAT: &str = "Structure your answer as:\n\
1. The analysis, in plain prose.\n\
2. A heading `## Recommendations` followed by a numbered list of concrete actions.\n\
3. A final line `Confidence: NN%` stating how confident you are in the analysis.";

/// System prompt for a provider.
pub fn system_prompt(provider: ProviderId) -> String {
    let persona = match provider {
        ProviderId::Quality => {
            "You are a senior business analyst. Reason carefully, weigh evidence, \
             and call out risks and assumptions."
        }
        ProviderId::Fast => {
            "You are a fast, creative business assistant. Be concise and practical, \
             and favour actionable ideas."
        }
    };
    format!("{}\n\n{}", persona, OUTPUT_FORMAT)
}

/// User prompt for a task and its JSON payload.
pub fn user_prompt(task_id: &str, payload: &Value) -> String {
    let task = task_id.replace(['-', '_'], " ");
    let data = match payload {
        Value::Null => "(no data provided)".to_string(),
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    format!("Task: {}\n\nInput data:\n{}", task, data)
}
