//! Observation resource wire model.
//!
//! Screening platforms deliver one Observation per answered question. The
//! value arrives as a coded concept for multiple-choice answers, a bare
//! integer for the pre-aggregated total safety score, or a data-absent
//! reason when the respondent skipped the question.

use crate::datatypes::{CodeableConcept, Reference};
use serde::Deserialize;

/// Wire representation of an inbound Observation resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ObservationResource {
    pub id: Option<String>,

    pub status: Option<String>,

    pub code: Option<CodeableConcept>,

    pub subject: Option<Reference>,

    #[serde(rename = "valueCodeableConcept")]
    pub value_codeable_concept: Option<CodeableConcept>,

    #[serde(rename = "valueInteger")]
    pub value_integer: Option<i64>,

    #[serde(rename = "dataAbsentReason")]
    pub data_absent_reason: Option<CodeableConcept>,
}

impl ObservationResource {
    /// All codes attached to the observation's question concept, in order.
    pub fn question_codes(&self) -> impl Iterator<Item = &str> {
        self.code.iter().flat_map(|concept| concept.codes())
    }

    /// The data-absent reason code, defaulting to `unknown` when the block
    /// is present but carries no coding.
    pub fn absent_reason_code(&self) -> Option<&str> {
        self.data_absent_reason
            .as_ref()
            .map(|reason| reason.first_code().unwrap_or("unknown"))
    }
}
