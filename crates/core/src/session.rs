//! Assembled screening sessions.

use crate::encounter::EncounterId;
use crate::response::ScreeningResponse;
use crate::subject::SubjectId;
use chrono::{DateTime, Utc};
use hrsn_catalog::HIGH_RISK_THRESHOLD;
use serde::Serialize;
use uuid::Uuid;

/// System-assigned identifier for a screening session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One administration of the screening instrument for one subject.
///
/// Sessions are created once per processed bundle and never mutated after
/// assembly; the score, completeness flag and positive-screen count are
/// computed exactly once, when the session is built. Fields are private so
/// the only way to obtain a session is through assembly.
#[derive(Clone, Debug, Serialize)]
pub struct ScreeningSession {
    id: SessionId,
    subject_id: SubjectId,
    encounter_id: Option<EncounterId>,
    /// Source bundle id, kept for provenance.
    bundle_id: Option<String>,
    screening_date: DateTime<Utc>,
    consent_given: bool,
    responses: Vec<ScreeningResponse>,
    total_safety_score: u32,
    screening_complete: bool,
    positive_screen_count: usize,
}

impl ScreeningSession {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assembled(
        subject_id: SubjectId,
        encounter_id: Option<EncounterId>,
        bundle_id: Option<String>,
        screening_date: DateTime<Utc>,
        consent_given: bool,
        responses: Vec<ScreeningResponse>,
        total_safety_score: u32,
        screening_complete: bool,
        positive_screen_count: usize,
    ) -> Self {
        Self {
            id: SessionId::new(),
            subject_id,
            encounter_id,
            bundle_id,
            screening_date,
            consent_given,
            responses,
            total_safety_score,
            screening_complete,
            positive_screen_count,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }

    pub fn encounter_id(&self) -> Option<EncounterId> {
        self.encounter_id
    }

    pub fn bundle_id(&self) -> Option<&str> {
        self.bundle_id.as_deref()
    }

    pub fn screening_date(&self) -> DateTime<Utc> {
        self.screening_date
    }

    pub fn consent_given(&self) -> bool {
        self.consent_given
    }

    /// The classified responses, in classification order.
    pub fn responses(&self) -> &[ScreeningResponse] {
        &self.responses
    }

    /// Sum of severity values over the four safety questions.
    pub fn total_safety_score(&self) -> u32 {
        self.total_safety_score
    }

    /// True when every catalog question was answered or explicitly skipped.
    pub fn screening_complete(&self) -> bool {
        self.screening_complete
    }

    /// Count of responses classified as positive screens.
    pub fn positive_screen_count(&self) -> usize {
        self.positive_screen_count
    }

    /// True when the total safety score meets the clinical high-risk
    /// threshold.
    pub fn is_high_risk(&self) -> bool {
        self.total_safety_score >= HIGH_RISK_THRESHOLD
    }
}
