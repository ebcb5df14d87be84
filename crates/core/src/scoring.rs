//! Score aggregation over a session's classified responses.

use crate::response::ScreeningResponse;
use hrsn_catalog::{QuestionCatalog, HIGH_RISK_THRESHOLD};

/// Aggregated scores for one screening session.
///
/// Computed once from the full response set and carried on the session;
/// the stored values are the source of truth thereafter, so a later
/// recount over possibly revised responses cannot drift from what was
/// reported at processing time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreSummary {
    /// Sum of severity weights over the four safety questions.
    pub total_safety_score: u32,

    /// Responses classified as positive screens.
    pub positive_screens: usize,

    /// Catalog codes with no resolved response, in instrument order.
    /// Empty means the screening is complete.
    pub missing_questions: Vec<String>,
}

impl ScoreSummary {
    /// True when every catalog question has a resolved response.
    pub fn screening_complete(&self) -> bool {
        self.missing_questions.is_empty()
    }

    /// True when the aggregated safety score meets the clinical cutoff.
    pub fn is_high_risk(&self) -> bool {
        self.total_safety_score >= HIGH_RISK_THRESHOLD
    }
}

/// Computes session-level scores from classified responses.
pub struct ScoringAggregator {
    catalog: &'static QuestionCatalog,
}

impl ScoringAggregator {
    pub fn new() -> Self {
        Self {
            catalog: hrsn_catalog::catalog(),
        }
    }

    /// Aggregate the full response set for one session.
    ///
    /// The safety score sums, per safety question code, the severity
    /// weight of that code's answered response. Each code contributes at
    /// most once, so a question double-delivered through both wire shapes
    /// scores once. Unanswered safety questions and answer codes outside
    /// the frequency scale contribute zero.
    pub fn summarize(&self, responses: &[ScreeningResponse]) -> ScoreSummary {
        let total_safety_score = self
            .catalog
            .safety_questions()
            .map(|question| {
                responses
                    .iter()
                    .filter(|r| r.question_code == question.code)
                    .find_map(|r| r.answer_code.as_deref())
                    .map(|code| question.safety_weight(code))
                    .unwrap_or(0)
            })
            .sum();

        let positive_screens = responses.iter().filter(|r| r.is_positive()).count();

        let missing_questions: Vec<String> = self
            .catalog
            .questions()
            .iter()
            .filter(|question| {
                !responses
                    .iter()
                    .any(|r| r.question_code == question.code && r.is_resolved())
            })
            .map(|question| question.code.clone())
            .collect();

        ScoreSummary {
            total_safety_score,
            positive_screens,
            missing_questions,
        }
    }
}

impl Default for ScoringAggregator {
    fn default() -> Self {
        Self::new()
    }
}
