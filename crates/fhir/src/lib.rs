//! FHIR wire/boundary support for the HRSN screening engine.
//!
//! This crate provides **wire models** and **decode helpers** for inbound
//! screening bundles:
//! - JSON resource bundles carrying Patient, Organization, Encounter,
//!   Consent, Observation and QuestionnaireResponse resources
//!
//! This crate focuses on:
//! - the minimum structural shape the engine consumes (not full FHIR R4
//!   conformance)
//! - deserialisation with a best-effort "path" to the failing field
//! - extraction helpers from wire structs to domain primitives
//!
//! Wire structs are deliberately permissive: screening platforms attach many
//! FHIR fields the engine never reads, so unknown keys are ignored rather
//! than rejected. Structural strictness is reserved for the bundle envelope
//! itself (resource type discriminator, entry list, per-entry resource tag).

pub mod bundle;
pub mod consent;
pub mod datatypes;
pub mod encounter;
pub mod observation;
pub mod organization;
pub mod patient;
pub mod questionnaire;

// Re-export facades
pub use bundle::{Bundle, Resource, ResourceGroups};

// Re-export public wire types
pub use consent::ConsentResource;
pub use datatypes::{Address, CodeableConcept, Coding, HumanName, Identifier, Period, Reference};
pub use encounter::EncounterResource;
pub use observation::ObservationResource;
pub use organization::OrganizationResource;
pub use patient::PatientResource;
pub use questionnaire::{ItemAnswer, QuestionnaireItem, QuestionnaireResponseResource};

/// Errors returned by the bundle boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// The envelope is structurally unusable: wrong or missing resource type
    /// discriminator, or no entry list.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The JSON did not match the wire schema.
    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`BundleError`].
pub type BundleResult<T> = Result<T, BundleError>;
