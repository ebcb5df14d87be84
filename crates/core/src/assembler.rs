//! Final session assembly.
//!
//! Assembly is where every cross-component contract must hold at once:
//! responses carry exactly one disposition, the encounter belongs to the
//! subject being screened, and the score summary describes exactly the
//! response set being sealed into the session. A violation here is a
//! defect in the engine rather than bad input, so it fails the bundle
//! hard instead of being repaired in place.

use crate::encounter::Encounter;
use crate::error::{EngineError, EngineResult};
use crate::response::ScreeningResponse;
use crate::scoring::{ScoreSummary, ScoringAggregator};
use crate::session::ScreeningSession;
use crate::subject::Subject;
use chrono::{DateTime, Utc};

/// Combines the resolved pieces of one bundle into an immutable session.
pub struct SessionAssembler;

impl SessionAssembler {
    /// Build the session value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] when a response carries
    /// both an answer and a data-absent reason, when the encounter was
    /// resolved against a different subject, or when recounting the
    /// responses does not reproduce the given summary.
    pub fn assemble(
        subject: &Subject,
        encounter: Option<&Encounter>,
        consent_given: bool,
        bundle_id: Option<String>,
        screening_date: DateTime<Utc>,
        responses: Vec<ScreeningResponse>,
        summary: &ScoreSummary,
    ) -> EngineResult<ScreeningSession> {
        if let Some(conflicted) = responses.iter().find(|r| r.has_conflicting_disposition()) {
            return Err(EngineError::InvariantViolation(format!(
                "response for question '{}' carries both an answer and a data-absent reason",
                conflicted.question_code
            )));
        }

        if let Some(encounter) = encounter {
            if encounter.subject_id != subject.id {
                return Err(EngineError::InvariantViolation(format!(
                    "encounter subject '{}' does not match session subject '{}'",
                    encounter.subject_id, subject.id
                )));
            }
        }

        // The summary must describe exactly this response set; the session
        // stores both, and they must never be able to disagree.
        let recount = ScoringAggregator::new().summarize(&responses);
        if recount != *summary {
            return Err(EngineError::InvariantViolation(format!(
                "score summary does not match its responses: given {summary:?}, recounted {recount:?}"
            )));
        }

        Ok(ScreeningSession::assembled(
            subject.id,
            encounter.map(|e| e.id),
            bundle_id,
            screening_date,
            consent_given,
            responses,
            summary.total_safety_score,
            summary.screening_complete(),
            summary.positive_screens,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::EncounterId;
    use crate::subject::SubjectId;
    use hrsn_catalog::codes;
    use hrsn_types::ExternalId;

    fn test_subject() -> Subject {
        Subject::new(ExternalId::new("member-001").unwrap())
    }

    fn test_encounter(subject_id: SubjectId) -> Encounter {
        Encounter {
            id: EncounterId::new(),
            external_id: Some("enc-001".to_string()),
            subject_id,
            organization_id: None,
            status: Some("finished".to_string()),
            encounter_type: Some("self-administered".to_string()),
            occurred_at: None,
        }
    }

    fn answered(question_code: &str, answer_code: &str) -> ScreeningResponse {
        let question = hrsn_catalog::catalog()
            .get(question_code)
            .expect("catalog question");
        ScreeningResponse::answered(
            question,
            Some(answer_code.to_string()),
            None,
            question.classify_answer(answer_code),
        )
    }

    /// Safety severities 2, 3, 1, 4 plus one positive needs answer.
    fn sample_responses() -> Vec<ScreeningResponse> {
        vec![
            answered(codes::LIVING_SITUATION, "LA31994-9"),
            answered(codes::PHYSICALLY_HURT, codes::ANSWER_RARELY),
            answered(codes::INSULT_OR_TALK_DOWN, codes::ANSWER_SOMETIMES),
            answered(codes::THREATEN_WITH_HARM, codes::ANSWER_NEVER),
            answered(codes::SCREAM_OR_CURSE, codes::ANSWER_FAIRLY_OFTEN),
        ]
    }

    #[test]
    fn test_assembles_session_from_parts() {
        let subject = test_subject();
        let encounter = test_encounter(subject.id);
        let responses = sample_responses();
        let summary = ScoringAggregator::new().summarize(&responses);

        let session = SessionAssembler::assemble(
            &subject,
            Some(&encounter),
            true,
            Some("bundle-001".to_string()),
            Utc::now(),
            responses,
            &summary,
        )
        .unwrap();

        assert_eq!(session.subject_id(), subject.id);
        assert_eq!(session.encounter_id(), Some(encounter.id));
        assert_eq!(session.bundle_id(), Some("bundle-001"));
        assert!(session.consent_given());
        assert_eq!(session.total_safety_score(), 10);
        assert_eq!(session.positive_screen_count(), 1);
        assert!(!session.screening_complete());
        assert_eq!(session.responses().len(), 5);
    }

    #[test]
    fn test_rejects_response_with_conflicting_disposition() {
        let subject = test_subject();
        let mut responses = sample_responses();
        responses[0].data_absent_reason = Some("asked-declined".to_string());
        let summary = ScoringAggregator::new().summarize(&responses);

        let err = SessionAssembler::assemble(
            &subject,
            None,
            false,
            None,
            Utc::now(),
            responses,
            &summary,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn test_rejects_encounter_for_another_subject() {
        let subject = test_subject();
        let stranger = test_encounter(SubjectId::new());
        let summary = ScoringAggregator::new().summarize(&[]);

        let err = SessionAssembler::assemble(
            &subject,
            Some(&stranger),
            false,
            None,
            Utc::now(),
            Vec::new(),
            &summary,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn test_rejects_summary_that_disagrees_with_its_responses() {
        let subject = test_subject();
        let responses = sample_responses();
        let mut summary = ScoringAggregator::new().summarize(&responses);
        summary.total_safety_score += 1;

        let err = SessionAssembler::assemble(
            &subject,
            None,
            false,
            None,
            Utc::now(),
            responses,
            &summary,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn test_session_without_encounter_or_consent() {
        let subject = test_subject();
        let summary = ScoringAggregator::new().summarize(&[]);

        let session = SessionAssembler::assemble(
            &subject,
            None,
            false,
            None,
            Utc::now(),
            Vec::new(),
            &summary,
        )
        .unwrap();

        assert!(session.encounter_id().is_none());
        assert!(!session.consent_given());
        assert_eq!(session.total_safety_score(), 0);
        assert!(!session.screening_complete());
    }
}
