//! Heuristic extraction of recommendations and confidence from model text.
//!
//! Recognized shapes:
//!
//! ```text
//! ...analysis...
//!
//! ## Recommendations
//! 1. First item
//! - Second item
//!
//! Confidence: 85%
//! ```
//!
//! Anything that does not match is left in the analysis body.

use insight_application::ports::response_parser::{ParsedResponse, ResponseParser};
use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:#{1,6}\s*)?(?:\*\*)?\s*(?:key\s+)?recommendations?\b")
        .expect("HEADING_RE regex should compile")
});

static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s+(.+?)\s*$").expect("ITEM_RE regex should compile")
});

static CONFIDENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)confidence(?:\s+(?:level|score))?\s*[:=]\s*(\d{1,3}(?:\.\d+)?)\s*(%)?")
        .expect("CONFIDENCE_RE regex should compile")
});

/// Regex-based [`ResponseParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexResponseParser;

impl RegexResponseParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_confidence(line: &str) -> Option<f64> {
        let caps = CONFIDENCE_RE.captures(line)?;
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        let value = if caps.get(2).is_some() || value > 1.0 {
            value / 100.0
        } else {
            value
        };
        Some(value.clamp(0.0, 1.0))
    }
}

fn strip_emphasis(item: &str) -> String {
    item.replace("**", "").trim().to_string()
}

impl ResponseParser for RegexResponseParser {
    fn parse(&self, raw: &str) -> ParsedResponse {
        let mut analysis = Vec::new();
        let mut recommendations = Vec::new();
        let mut confidence = None;
        let mut in_list = false;

        for line in raw.lines() {
            if let Some(value) = Self::parse_confidence(line) {
                confidence = Some(value);
                in_list = false;
                continue;
            }

            if HEADING_RE.is_match(line) {
                in_list = true;
                continue;
            }

            if in_list {
                if let Some(caps) = ITEM_RE.captures(line) {
                    let item = strip_emphasis(&caps[1]);
                    if !item.is_empty() {
                        recommendations.push(item);
                    }
                    continue;
                }
                if line.trim().is_empty() {
                    continue;
                }
                // First non-item line closes the list
                in_list = false;
            }

            analysis.push(line);
        }

        ParsedResponse {
            analysis: analysis.join("\n").trim().to_string(),
            recommendations,
            confidence,
        }
    }
}
