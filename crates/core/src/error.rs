use crate::store::StoreError;

/// Errors that abort processing of a single bundle.
///
/// A failure here never leaves a partially assembled session behind: the
/// engine resolves identity and classifies responses before the session is
/// built, and assembly itself is all-or-nothing.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The bundle lacks the minimum structural markers. The input will
    /// never parse differently, so callers should reject without retry.
    #[error("malformed bundle: {0}")]
    MalformedBundle(#[from] hrsn_fhir::BundleError),

    /// The bundle carries no subject resource.
    #[error("bundle carries no subject resource")]
    MissingSubject,

    /// The subject resource carries no usable external id.
    #[error("subject resource carries no usable external id")]
    MissingExternalId,

    /// Strict intake mode only: the screening left catalog questions
    /// without an answer or a data-absent reason.
    #[error("screening incomplete: {missing} question(s) unaccounted for")]
    IncompleteScreening { missing: usize },

    /// The persistence collaborator failed. Transient; retry policy
    /// belongs to the caller.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An internal assembly contract was broken. This indicates a defect
    /// in the engine itself and must propagate as a hard failure.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
