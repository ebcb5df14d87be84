//! # HRSN Core
//!
//! Core processing engine for Health-Related Social Needs screening
//! bundles.
//!
//! This crate contains the bundle decomposition pipeline:
//! - Subject and organization identity resolution against a pluggable store
//! - Screening response classification against the question catalog
//! - Safety score aggregation and completeness checking
//! - Immutable screening session assembly
//!
//! **No transport concerns**: JSON decoding lives in `hrsn-fhir`; file
//! handling and the command line belong to `hrsn-cli`.

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod encounter;
pub mod engine;
pub mod error;
pub mod organization;
pub mod outcome;
pub mod resolver;
pub mod response;
pub mod scoring;
pub mod session;
pub mod store;
pub mod subject;

pub use assembler::SessionAssembler;
pub use classifier::{ClassifiedResponses, ResponseClassifier};
pub use config::EngineConfig;
pub use encounter::{Encounter, EncounterId};
pub use engine::ScreeningEngine;
pub use error::{EngineError, EngineResult};
pub use organization::{Organization, OrganizationId};
pub use outcome::ProcessingOutcome;
pub use resolver::SubjectResolver;
pub use response::ScreeningResponse;
pub use scoring::{ScoreSummary, ScoringAggregator};
pub use session::{ScreeningSession, SessionId};
pub use store::{InMemoryStore, ScreeningStore, StoreError};
pub use subject::{PostalAddress, Subject, SubjectId};
