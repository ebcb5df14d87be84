//! Organization reference records.

use crate::subject::PostalAddress;
use hrsn_types::ExternalId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// System-assigned stable identifier for an organization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(Uuid);

impl OrganizationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A screening organization (lead entity or service provider).
///
/// Created once per distinct external id and treated as immutable
/// reference data thereafter: the first bundle to name an organization
/// wins, and later conflicting fields are ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub external_id: ExternalId,
    pub name: Option<String>,
    /// Raw role code from the bundle; see the intake vocabulary for the
    /// display labels.
    pub type_code: Option<String>,
    pub npi: Option<String>,
    pub address: Option<PostalAddress>,
}

impl Organization {
    /// Display label for the organization's role, falling back to the raw
    /// code outside the known vocabulary.
    pub fn type_label(&self) -> Option<&str> {
        self.type_code
            .as_deref()
            .map(|code| hrsn_catalog::vocab::organization_type_label(code).unwrap_or(code))
    }
}
