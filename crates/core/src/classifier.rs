//! Response classification.
//!
//! Two wire shapes deliver the screening instrument: one Observation per
//! question, or one QuestionnaireResponse whose items carry the question
//! codes as `linkId` values. Both reduce to the same
//! [`ScreeningResponse`] here, against the question catalog.
//!
//! Resources whose codes fall outside the catalog are not errors; intake
//! feeds routinely attach unrelated observations (sexual orientation,
//! language and similar) to screening bundles. Those are skipped and
//! surface only as a count on the processing outcome.

use crate::response::ScreeningResponse;
use hrsn_catalog::{QuestionCatalog, QuestionDefinition, HIGH_RISK_THRESHOLD};
use hrsn_fhir::{ObservationResource, QuestionnaireItem, ResourceGroups};

/// Classification output for one bundle.
#[derive(Clone, Debug, Default)]
pub struct ClassifiedResponses {
    pub responses: Vec<ScreeningResponse>,
    /// Delivered observations and items whose code matched no catalog
    /// question.
    pub skipped: usize,
}

/// Maps answer-bearing resources to classified screening responses.
pub struct ResponseClassifier {
    catalog: &'static QuestionCatalog,
}

impl ResponseClassifier {
    pub fn new() -> Self {
        Self {
            catalog: hrsn_catalog::catalog(),
        }
    }

    /// Classify every answer-bearing resource in the bundle.
    ///
    /// Observations come first, then QuestionnaireResponse items, so when
    /// a platform double-delivers a question through both shapes the
    /// Observation form is the one score aggregation sees first.
    pub fn classify_all(&self, groups: &ResourceGroups) -> ClassifiedResponses {
        let mut classified = ClassifiedResponses::default();

        for observation in &groups.observations {
            match self.classify_observation(observation) {
                Some(response) => classified.responses.push(response),
                None => {
                    classified.skipped += 1;
                    tracing::debug!(
                        "observation {} is not a screening question; skipped",
                        observation.id.as_deref().unwrap_or("<no id>")
                    );
                }
            }
        }

        for questionnaire_response in &groups.questionnaire_responses {
            for item in &questionnaire_response.item {
                match self.classify_item(item) {
                    Some(response) => classified.responses.push(response),
                    None => {
                        classified.skipped += 1;
                        tracing::debug!(
                            "item {} is not a screening question; skipped",
                            item.link_id.as_deref().unwrap_or("<no linkId>")
                        );
                    }
                }
            }
        }

        tracing::info!(
            "classified {} screening response(s), {} skipped",
            classified.responses.len(),
            classified.skipped
        );
        classified
    }

    /// Classify one Observation, or `None` when its code matches no
    /// catalog question.
    ///
    /// Value forms are tried in fixed order: coded concept, bare integer
    /// (the pre-aggregated total score), data-absent reason. A concept
    /// whose coding list is empty does not count as a coded answer; the
    /// later forms still apply. An observation matching none of the forms
    /// still yields a response, one that never satisfies completeness.
    pub fn classify_observation(
        &self,
        observation: &ObservationResource,
    ) -> Option<ScreeningResponse> {
        let question = observation
            .question_codes()
            .find_map(|code| self.catalog.get(code))?;

        if let Some(coding) = observation
            .value_codeable_concept
            .as_ref()
            .and_then(|concept| concept.first_coding())
        {
            return Some(ScreeningResponse::answered(
                question,
                coding.code.clone(),
                coding.display.clone(),
                positive_for(question, coding.code.as_deref()),
            ));
        }

        if let Some(value) = observation.value_integer {
            return Some(Self::integer_answer(question, value));
        }

        if let Some(reason) = observation.absent_reason_code() {
            return Some(ScreeningResponse::absent(question, reason));
        }

        Some(ScreeningResponse::empty(question))
    }

    /// Classify one QuestionnaireResponse item, or `None` when its
    /// `linkId` matches no catalog question.
    ///
    /// An item yields at most one response. Items occasionally arrive
    /// with repeated answer blocks; the first is taken.
    pub fn classify_item(&self, item: &QuestionnaireItem) -> Option<ScreeningResponse> {
        let question = item
            .link_id
            .as_deref()
            .and_then(|code| self.catalog.get(code))?;

        let answer = match item.answer.first() {
            Some(answer) => answer,
            None => return Some(ScreeningResponse::empty(question)),
        };

        if let Some(coding) = &answer.value_coding {
            return Some(ScreeningResponse::answered(
                question,
                coding.code.clone(),
                answer.display_text(),
                positive_for(question, coding.code.as_deref()),
            ));
        }

        // A bare integer with no other value form carries the
        // pre-aggregated total; anything else is text only, and without a
        // coded answer the response cannot screen positive.
        if answer.value_string.is_none() && answer.value_boolean.is_none() {
            if let Some(value) = answer.value_integer {
                return Some(Self::integer_answer(question, value));
            }
        }

        Some(ScreeningResponse::answered(
            question,
            None,
            answer.display_text(),
            positive_for(question, None),
        ))
    }

    fn integer_answer(question: &QuestionDefinition, value: i64) -> ScreeningResponse {
        let positive = question
            .safety_total
            .then(|| value >= i64::from(HIGH_RISK_THRESHOLD));
        ScreeningResponse::answered(question, None, Some(value.to_string()), positive)
    }
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Positive-screen flag for a (question, answer code) pair.
///
/// Unset when the question defines no positive-answer set; otherwise true
/// iff the code is in the set. A missing code against a defined set reads
/// as not positive, never as unknown.
fn positive_for(question: &QuestionDefinition, answer_code: Option<&str>) -> Option<bool> {
    match answer_code {
        Some(code) => question.classify_answer(code),
        None => question.positive_answers.as_ref().map(|_| false),
    }
}
