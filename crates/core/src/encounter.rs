//! Encounter records linking a subject to an organization.

use crate::organization::OrganizationId;
use crate::subject::SubjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// System-assigned identifier for an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncounterId(Uuid);

impl EncounterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EncounterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EncounterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One clinical contact during which a screening was administered.
///
/// Optional: bundles without an encounter resource produce sessions with
/// no encounter reference.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Encounter {
    pub id: EncounterId,
    /// The source system's id for the encounter resource.
    pub external_id: Option<String>,
    pub subject_id: SubjectId,
    pub organization_id: Option<OrganizationId>,
    pub status: Option<String>,
    /// Administration method, mapped through the intake vocabulary with
    /// unknown codes passed through raw.
    pub encounter_type: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

impl Encounter {
    /// Builds an encounter record from the wire resource, resolved against
    /// the bundle's subject and organization.
    pub fn from_wire(
        resource: &hrsn_fhir::EncounterResource,
        subject_id: SubjectId,
        organization_id: Option<OrganizationId>,
    ) -> Self {
        let encounter_type = resource.type_code().map(|code| {
            hrsn_catalog::vocab::encounter_type_label(code)
                .unwrap_or(code)
                .to_string()
        });

        let occurred_at = resource.start_time();
        if occurred_at.is_none() {
            if let Some(raw) = resource.start_raw() {
                tracing::warn!(
                    "encounter period start {:?} is not RFC 3339; treating as absent",
                    raw
                );
            }
        }

        Self {
            id: EncounterId::new(),
            external_id: resource.id.clone(),
            subject_id,
            organization_id,
            status: resource.status.clone(),
            encounter_type,
            occurred_at,
        }
    }
}
