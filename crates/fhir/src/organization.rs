//! Organization resource wire model and extraction helpers.

use crate::datatypes::{Address, CodeableConcept, Identifier};
use hrsn_types::ExternalId;
use serde::Deserialize;

/// Identifier type code marking a National Provider Identifier.
const NPI_TYPE_CODE: &str = "NPI";

/// Wire representation of an inbound Organization resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OrganizationResource {
    pub id: Option<String>,

    pub name: Option<String>,

    #[serde(rename = "type", default)]
    pub org_type: Vec<CodeableConcept>,

    #[serde(default)]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub address: Vec<Address>,
}

impl OrganizationResource {
    /// The external source id, validated as non-empty.
    pub fn external_id(&self) -> Option<ExternalId> {
        self.id.as_deref().and_then(|id| ExternalId::new(id).ok())
    }

    /// The raw organization type code. The last coding across all type
    /// entries wins, matching intake overwrite order.
    pub fn type_code(&self) -> Option<&str> {
        self.org_type
            .iter()
            .flat_map(|concept| concept.codes())
            .last()
    }

    /// The National Provider Identifier, from the last identifier typed `NPI`.
    pub fn npi(&self) -> Option<&str> {
        self.identifier
            .iter()
            .filter(|identifier| identifier.has_type_code(NPI_TYPE_CODE))
            .filter_map(|identifier| identifier.value.as_deref())
            .last()
    }

    /// The primary (first) address entry.
    pub fn primary_address(&self) -> Option<&Address> {
        self.address.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_type_code_and_npi() {
        let organization: OrganizationResource = serde_json::from_str(
            r#"{
                "id": "org-001",
                "name": "Capital Region SCN",
                "type": [
                    {"coding": [{"code": "Other", "display": "Other"}]}
                ],
                "identifier": [
                    {"type": {"coding": [{"code": "NPI"}]}, "value": "1234567890"}
                ],
                "address": [{"city": "Albany", "state": "NY"}]
            }"#,
        )
        .unwrap();

        assert_eq!(organization.type_code(), Some("Other"));
        assert_eq!(organization.npi(), Some("1234567890"));
        assert_eq!(
            organization.primary_address().and_then(|a| a.city.as_deref()),
            Some("Albany")
        );
    }

    #[test]
    fn last_type_coding_wins() {
        let organization: OrganizationResource = serde_json::from_str(
            r#"{
                "id": "org-001",
                "type": [
                    {"coding": [{"code": "prov"}, {"code": "Other"}]},
                    {"coding": [{"code": "Cg"}]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(organization.type_code(), Some("Cg"));
    }

    #[test]
    fn missing_sections_read_as_absent() {
        let organization: OrganizationResource = serde_json::from_str(r#"{"id": "org-2"}"#).unwrap();
        assert!(organization.type_code().is_none());
        assert!(organization.npi().is_none());
        assert!(organization.name.is_none());
    }
}
