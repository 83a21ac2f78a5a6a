//! Overall score extraction from free-text judge output.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

// First digit after the label; a bold label (`**Overall Score:**`) does not match
static SCORE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Overall Score:\s*([0-9])").expect("score pattern is a valid regex")
});

/// Overall verdict parsed from judge feedback.
///
/// `value` is 1–5 when the judge followed the format, or 0 when the label was
/// not found. A zero always falls below the acceptance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
#[display("{}", value)]
pub struct OverallScore {
    value: u8,
    parsed: bool,
}

impl OverallScore {
    /// A score for feedback that carried no recognizable label.
    pub const MISSING: Self = Self {
        value: 0,
        parsed: false,
    };

    /// Numeric score (0 when missing).
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Whether the label was found in the feedback.
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Whether this score passes `threshold`.
    pub fn meets(&self, threshold: u8) -> bool {
        self.value >= threshold
    }
}

/// Parse the overall score, recording whether the label was present.
///
/// # Examples
///
/// ```
/// use bedtime_story::parse_overall_score;
///
/// let score = parse_overall_score("Clarity: 4\nOverall Score: 4/5");
/// assert_eq!(score.value(), 4);
/// assert!(score.is_parsed());
///
/// let missing = parse_overall_score("Lovely story!");
/// assert_eq!(missing.value(), 0);
/// assert!(!missing.is_parsed());
/// ```
pub fn parse_overall_score(feedback: &str) -> OverallScore {
    let digit = SCORE_PATTERN
        .captures(feedback)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok());

    match digit {
        Some(value) => OverallScore {
            value,
            parsed: true,
        },
        None => {
            warn!(
                feedback_len = feedback.len(),
                "Judge feedback carried no overall score, treating as 0"
            );
            OverallScore::MISSING
        }
    }
}

/// Extract the single digit after `Overall Score:`, or 0 if absent.
///
/// Only one digit is read, so `10` yields 1 and `4/5` yields 4.
pub fn extract_score(feedback: &str) -> u8 {
    parse_overall_score(feedback).value()
}
