//! hrsn-catalog
//!
//! Screening instrument definitions for the NY State 12-question HRSN
//! screener. Pure data, no I/O. Defines the recognised question codes,
//! their SDOH categories, positive-answer sets, safety-question severity
//! scales, and the intake vocabularies for encounter and organization
//! type codes.

pub mod codes;
mod definitions;
pub mod question;
pub mod vocab;

pub use question::{QuestionDefinition, SdohCategory};

use std::sync::LazyLock;

/// Total safety score at or above this value is clinically high-risk.
///
/// Four safety questions with severities up to 5 each; the cutoff is
/// defined by the screening programme, not derived. The same constant
/// classifies pre-aggregated total score observations.
pub const HIGH_RISK_THRESHOLD: u32 = 11;

/// The set of recognised screening questions, keyed by question code.
///
/// Built once at process start; immutable thereafter. Question order
/// follows the instrument, with the pre-aggregated total score entry
/// last.
pub struct QuestionCatalog {
    questions: Vec<QuestionDefinition>,
}

impl QuestionCatalog {
    fn new() -> Self {
        Self {
            questions: definitions::screener_questions(),
        }
    }

    /// Looks up a question definition by its external code.
    pub fn get(&self, code: &str) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|q| q.code == code)
    }

    /// True when the code names a recognised screening question.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// All question definitions in instrument order.
    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    /// The four safety questions, in instrument order.
    pub fn safety_questions(&self) -> impl Iterator<Item = &QuestionDefinition> {
        self.questions.iter().filter(|q| q.is_safety())
    }

    /// Number of catalog entries, counting the total score entry.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when the catalog holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Returns the process-wide question catalog.
pub fn catalog() -> &'static QuestionCatalog {
    static CATALOG: LazyLock<QuestionCatalog> = LazyLock::new(QuestionCatalog::new);
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_the_twelve_questions_and_the_total_entry() {
        assert_eq!(catalog().len(), 13);
        assert_eq!(catalog().safety_questions().count(), 4);
        assert_eq!(
            catalog()
                .questions()
                .iter()
                .filter(|q| q.safety_total)
                .count(),
            1
        );
    }

    #[test]
    fn looks_up_questions_by_code() {
        let question = catalog().get(codes::LIVING_SITUATION).unwrap();
        assert_eq!(question.text, "What is your living situation today");
        assert_eq!(question.primary_category(), SdohCategory::HousingInstability);

        assert!(catalog().get("8867-4").is_none());
        assert!(!catalog().contains("8867-4"));
    }

    #[test]
    fn positive_answer_membership_is_exact() {
        let question = catalog().get(codes::LIVING_SITUATION).unwrap();
        assert_eq!(question.classify_answer("LA31994-9"), Some(true));
        assert_eq!(question.classify_answer("LA31993-1"), Some(false));
    }

    #[test]
    fn safety_questions_share_the_frequency_scale() {
        for question in catalog().safety_questions() {
            assert_eq!(question.safety_weight(codes::ANSWER_NEVER), 1);
            assert_eq!(question.safety_weight(codes::ANSWER_RARELY), 2);
            assert_eq!(question.safety_weight(codes::ANSWER_SOMETIMES), 3);
            assert_eq!(question.safety_weight(codes::ANSWER_FAIRLY_OFTEN), 4);
            assert_eq!(question.safety_weight(codes::ANSWER_FREQUENTLY), 5);
            assert!(question.classify_answer(codes::ANSWER_NEVER).is_none());
        }
    }

    #[test]
    fn total_score_entry_carries_no_scale_of_its_own() {
        let total = catalog().get(codes::TOTAL_SAFETY_SCORE).unwrap();
        assert!(total.safety_total);
        assert!(!total.is_safety());
        assert!(total.positive_answers.is_none());
    }

    #[test]
    fn high_risk_threshold_sits_inside_the_reachable_range() {
        // Four questions at severity 5 each bound the score at 20.
        assert!(HIGH_RISK_THRESHOLD <= 20);
        assert!(HIGH_RISK_THRESHOLD > 0);
    }
}
