//! Subject identity records.
//!
//! A subject (member/patient) is the identity anchor for screening
//! sessions. Subjects are created on first sighting and updated in place
//! on later bundles that resolve to the same person; the internal id never
//! changes once assigned.

use chrono::NaiveDate;
use hrsn_types::ExternalId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// System-assigned stable identifier for a subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(Uuid);

impl SubjectId {
    /// Assigns a fresh internal id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The address parts kept on identity records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

impl PostalAddress {
    /// Flattens a wire address to the kept parts (first line only).
    pub fn from_wire(address: &hrsn_fhir::Address) -> Self {
        Self {
            line1: address.line.first().cloned(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
        }
    }
}

/// A screened member/patient.
///
/// `external_id` is the most recent source-system id seen for this person;
/// earlier ids remain linked to the same subject through the store's alias
/// index. Mutable demographics follow the latest bundle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub external_id: ExternalId,
    pub mrn: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<PostalAddress>,
}

impl Subject {
    /// A new subject with a freshly assigned internal id and no
    /// demographics yet.
    pub fn new(external_id: ExternalId) -> Self {
        Self {
            id: SubjectId::new(),
            external_id,
            mrn: None,
            first_name: None,
            last_name: None,
            date_of_birth: None,
            gender: None,
            address: None,
        }
    }
}
