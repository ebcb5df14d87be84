//! Bundle processing orchestration.
//!
//! One engine invocation handles one bundle, end to end: decode, resolve
//! identity, classify answers, aggregate scores, assemble the session.
//! Processing is all-or-nothing past identity resolution; an invariant
//! failure aborts the bundle without returning a partial session.
//!
//! The engine itself is pure computation between store calls, so separate
//! invocations may run concurrently against the same store.

use crate::assembler::SessionAssembler;
use crate::classifier::ResponseClassifier;
use crate::config::EngineConfig;
use crate::encounter::Encounter;
use crate::error::{EngineError, EngineResult};
use crate::outcome::ProcessingOutcome;
use crate::resolver::SubjectResolver;
use crate::scoring::ScoringAggregator;
use crate::store::ScreeningStore;
use chrono::Utc;
use hrsn_fhir::Bundle;
use std::sync::Arc;

/// Decomposes screening bundles into subjects, sessions and responses.
pub struct ScreeningEngine<S: ScreeningStore> {
    store: Arc<S>,
    config: EngineConfig,
    classifier: ResponseClassifier,
    aggregator: ScoringAggregator,
}

impl<S: ScreeningStore> ScreeningEngine<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            classifier: ResponseClassifier::new(),
            aggregator: ScoringAggregator::new(),
        }
    }

    /// Decode and process one bundle from JSON text.
    pub fn process_json(&self, text: &str) -> EngineResult<ProcessingOutcome> {
        let bundle = Bundle::from_json(text)?;
        self.process(bundle)
    }

    /// Process one decoded bundle.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingSubject`] / [`EngineError::MissingExternalId`]
    ///   when the bundle cannot be tied to a subject
    /// - [`EngineError::IncompleteScreening`] under strict intake when
    ///   catalog questions are left unresolved
    /// - [`EngineError::InvariantViolation`] when assembly contracts fail
    /// - [`EngineError::Store`] when the persistence collaborator fails
    pub fn process(&self, bundle: Bundle) -> EngineResult<ProcessingOutcome> {
        let bundle_id = bundle.id().map(str::to_string);
        let resources_processed = bundle.len();
        tracing::info!(
            "processing bundle {} with {} entries",
            bundle_id.as_deref().unwrap_or("<no id>"),
            resources_processed
        );
        let groups = bundle.into_groups();

        let resolver = SubjectResolver::new(self.store.as_ref());
        let (subject, subject_created) = resolver.resolve_subject(&groups)?;
        let (organization, organization_created) = match resolver.resolve_organization(&groups)? {
            Some((organization, created)) => (Some(organization), created),
            None => (None, false),
        };

        let encounter = groups.encounters.first().map(|resource| {
            Encounter::from_wire(
                resource,
                subject.id,
                organization.as_ref().map(|organization| organization.id),
            )
        });

        let consent_given = groups
            .consents
            .first()
            .map(|consent| consent.permits())
            .unwrap_or(false);

        let classified = self.classifier.classify_all(&groups);
        let summary = self.aggregator.summarize(&classified.responses);

        if !summary.screening_complete() {
            tracing::warn!(
                "screening incomplete; missing questions: {:?}",
                summary.missing_questions
            );
            if self.config.require_complete_screening {
                return Err(EngineError::IncompleteScreening {
                    missing: summary.missing_questions.len(),
                });
            }
        }

        // Sessions are stamped with the instrument's authoring time when
        // the bundle carries one; otherwise with the processing time.
        let screening_date = groups
            .questionnaire_responses
            .first()
            .and_then(|response| response.authored_time())
            .unwrap_or_else(Utc::now);

        let session = SessionAssembler::assemble(
            &subject,
            encounter.as_ref(),
            consent_given,
            bundle_id,
            screening_date,
            classified.responses,
            &summary,
        )?;

        tracing::info!(
            "processed bundle for subject {}: session {}, safety score {}, {} positive screen(s), complete: {}",
            subject.id,
            session.id(),
            summary.total_safety_score,
            summary.positive_screens,
            summary.screening_complete()
        );

        Ok(ProcessingOutcome {
            subject,
            subject_created,
            organization,
            organization_created,
            encounter,
            session,
            resources_processed,
            unclassified_items: classified.skipped,
            positive_screens: summary.positive_screens,
        })
    }

    /// The engine's persistence collaborator.
    pub fn store(&self) -> &S {
        self.store.as_ref()
    }
}
