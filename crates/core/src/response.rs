//! Classified screening responses.

use hrsn_catalog::{QuestionDefinition, SdohCategory};
use serde::{Deserialize, Serialize};

/// One answer to one screening question within one session.
///
/// A response holds exactly one of three dispositions: an answer, an
/// explicit data-absent reason, or neither (delivered but empty). An
/// answer and an absent reason never coexist; the constructors make the
/// conflicting state unrepresentable and assembly re-checks it as an
/// engine invariant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScreeningResponse {
    pub question_code: String,
    /// Canonical question text resolved from the catalog.
    pub question_text: String,
    pub category: SdohCategory,
    pub answer_code: Option<String>,
    pub answer_text: Option<String>,
    /// Unset when the question defines no positive-answer set.
    pub positive_screen: Option<bool>,
    pub data_absent_reason: Option<String>,
}

impl ScreeningResponse {
    fn base(question: &QuestionDefinition) -> Self {
        Self {
            question_code: question.code.clone(),
            question_text: question.text.clone(),
            category: question.primary_category(),
            answer_code: None,
            answer_text: None,
            positive_screen: None,
            data_absent_reason: None,
        }
    }

    /// A response carrying an answer.
    pub fn answered(
        question: &QuestionDefinition,
        answer_code: Option<String>,
        answer_text: Option<String>,
        positive_screen: Option<bool>,
    ) -> Self {
        Self {
            answer_code,
            answer_text,
            positive_screen,
            ..Self::base(question)
        }
    }

    /// A response recording that the question was intentionally skipped.
    pub fn absent(question: &QuestionDefinition, reason: &str) -> Self {
        Self {
            data_absent_reason: Some(reason.to_string()),
            ..Self::base(question)
        }
    }

    /// A response that arrived without an answer or an absent reason.
    pub fn empty(question: &QuestionDefinition) -> Self {
        Self::base(question)
    }

    /// True when this response accounts for its question in the
    /// completeness check: it carries an answer code or an explicit
    /// data-absent reason.
    pub fn is_resolved(&self) -> bool {
        self.answer_code.is_some() || self.data_absent_reason.is_some()
    }

    /// True when this response was classified as a positive screen.
    pub fn is_positive(&self) -> bool {
        self.positive_screen == Some(true)
    }

    /// True when the exclusivity invariant is broken: an answer and a
    /// data-absent reason on the same response.
    pub(crate) fn has_conflicting_disposition(&self) -> bool {
        (self.answer_code.is_some() || self.answer_text.is_some())
            && self.data_absent_reason.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuestionDefinition {
        hrsn_catalog::catalog()
            .get(hrsn_catalog::codes::FOOD_WORRY)
            .expect("catalog question")
            .clone()
    }

    #[test]
    fn test_answered_response_is_resolved() {
        let response = ScreeningResponse::answered(
            &question(),
            Some("LA28397-0".to_string()),
            Some("Often true".to_string()),
            Some(true),
        );
        assert!(response.is_resolved());
        assert!(response.is_positive());
        assert!(!response.has_conflicting_disposition());
        assert_eq!(response.category, SdohCategory::FoodInsecurity);
    }

    #[test]
    fn test_absent_response_is_resolved_but_not_positive() {
        let response = ScreeningResponse::absent(&question(), "asked-declined");
        assert!(response.is_resolved());
        assert!(!response.is_positive());
        assert_eq!(response.data_absent_reason.as_deref(), Some("asked-declined"));
    }

    #[test]
    fn test_empty_response_is_unresolved() {
        let response = ScreeningResponse::empty(&question());
        assert!(!response.is_resolved());
        assert!(response.answer_code.is_none());
        assert!(response.data_absent_reason.is_none());
    }

    #[test]
    fn test_text_only_answer_is_not_resolved() {
        // Integer and free-text answers carry no answer code, so they do
        // not account for the question in the completeness check.
        let response =
            ScreeningResponse::answered(&question(), None, Some("12".to_string()), None);
        assert!(!response.is_resolved());
    }
}
