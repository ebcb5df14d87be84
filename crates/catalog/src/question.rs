//! Question definitions and SDOH category tags.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Social Determinant of Health grouping tag attached to a screening question.
///
/// Serialises to the kebab-case category strings carried in screening
/// session output (for example `"housing-instability"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SdohCategory {
    HousingInstability,
    Homelessness,
    InadequateHousing,
    UtilityInsecurity,
    FoodInsecurity,
    TransportationInsecurity,
    EmploymentStatus,
    /// Catch-all for questions without a dedicated category code.
    #[serde(rename = "sdoh-category-unspecified")]
    Unspecified,
}

impl SdohCategory {
    /// The kebab-case category string used in session output.
    pub fn as_str(self) -> &'static str {
        match self {
            SdohCategory::HousingInstability => "housing-instability",
            SdohCategory::Homelessness => "homelessness",
            SdohCategory::InadequateHousing => "inadequate-housing",
            SdohCategory::UtilityInsecurity => "utility-insecurity",
            SdohCategory::FoodInsecurity => "food-insecurity",
            SdohCategory::TransportationInsecurity => "transportation-insecurity",
            SdohCategory::EmploymentStatus => "employment-status",
            SdohCategory::Unspecified => "sdoh-category-unspecified",
        }
    }
}

impl std::fmt::Display for SdohCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recognised screening question.
///
/// A definition carries either a set of positive-answer codes (needs
/// questions), a severity map (safety questions), or the `safety_total`
/// flag (the pre-aggregated total score entry). Definitions are immutable
/// and built once at process start.
#[derive(Clone, Debug)]
pub struct QuestionDefinition {
    /// Stable external question code (LOINC).
    pub code: String,

    /// Canonical display text for the question.
    pub text: String,

    /// SDOH category tags, most specific first.
    pub categories: Vec<SdohCategory>,

    /// Answer codes that flag an unmet need, when the question defines them.
    pub positive_answers: Option<Vec<String>>,

    /// Answer code to severity weight (1 to 5), present only for the four
    /// safety questions.
    pub severity: Option<HashMap<String, u32>>,

    /// Marks the distinguished pre-aggregated total safety score entry.
    pub safety_total: bool,
}

impl QuestionDefinition {
    /// True when this question contributes to the total safety score.
    pub fn is_safety(&self) -> bool {
        self.severity.is_some()
    }

    /// The category tag a response to this question is filed under.
    pub fn primary_category(&self) -> SdohCategory {
        self.categories
            .first()
            .copied()
            .unwrap_or(SdohCategory::Unspecified)
    }

    /// Classifies a coded answer against the positive-answer set.
    ///
    /// Returns `None` when the question defines no positive-answer set; a
    /// positive-screen flag is not computed for such questions.
    pub fn classify_answer(&self, answer_code: &str) -> Option<bool> {
        self.positive_answers
            .as_ref()
            .map(|set| set.iter().any(|code| code == answer_code))
    }

    /// Severity weight the given answer contributes to the safety score.
    ///
    /// Returns 0 for non-safety questions and for answer codes outside the
    /// frequency scale, so unanswered or oddly coded items never inflate
    /// the score.
    pub fn safety_weight(&self, answer_code: &str) -> u32 {
        self.severity
            .as_ref()
            .and_then(|map| map.get(answer_code).copied())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn safety_question() -> QuestionDefinition {
        QuestionDefinition {
            code: "95618-5".to_string(),
            text: "How often does anyone, including family and friends, physically hurt you"
                .to_string(),
            categories: vec![SdohCategory::Unspecified],
            positive_answers: None,
            severity: Some(HashMap::from([
                ("LA6270-8".to_string(), 1),
                ("LA6482-9".to_string(), 5),
            ])),
            safety_total: false,
        }
    }

    #[test]
    fn categories_serialise_as_kebab_case() {
        let json = serde_json::to_string(&SdohCategory::HousingInstability).unwrap();
        assert_eq!(json, "\"housing-instability\"");

        let json = serde_json::to_string(&SdohCategory::Unspecified).unwrap();
        assert_eq!(json, "\"sdoh-category-unspecified\"");
    }

    #[test]
    fn safety_weight_defaults_to_zero_for_unknown_answers() {
        let question = safety_question();
        assert_eq!(question.safety_weight("LA6270-8"), 1);
        assert_eq!(question.safety_weight("LA6482-9"), 5);
        assert_eq!(question.safety_weight("LA33-6"), 0);
    }

    #[test]
    fn classify_answer_is_none_without_a_positive_set() {
        let question = safety_question();
        assert!(question.classify_answer("LA6270-8").is_none());
    }
}
