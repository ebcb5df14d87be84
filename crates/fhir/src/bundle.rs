//! Bundle envelope decoding and resource grouping.
//!
//! Responsibilities:
//! - Decode an inbound JSON bundle into typed resources, once, at the
//!   boundary
//! - Enforce the minimum structural markers: a `Bundle` resource type
//!   discriminator, an entry list, and a resource type tag on every entry
//! - Split entries into per-type groups without dropping or reordering
//!   resources within a type
//!
//! Everything past the envelope is permissive; a resource type the engine
//! does not consume is retained with its raw payload, never dropped.

use crate::consent::ConsentResource;
use crate::encounter::EncounterResource;
use crate::observation::ObservationResource;
use crate::organization::OrganizationResource;
use crate::patient::PatientResource;
use crate::questionnaire::QuestionnaireResponseResource;
use crate::{BundleError, BundleResult};
use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer};

/// One typed resource from a bundle entry.
///
/// The discriminator is the FHIR `resourceType` tag. Types outside the
/// screening domain decode to [`Resource::Unrecognized`] rather than
/// failing the bundle; an entry without the tag fails decoding.
#[derive(Clone, Debug)]
pub enum Resource {
    Patient(PatientResource),
    Organization(OrganizationResource),
    Encounter(EncounterResource),
    Consent(ConsentResource),
    Observation(ObservationResource),
    QuestionnaireResponse(QuestionnaireResponseResource),
    Unrecognized(UnrecognizedResource),
}

/// An entry the bundle carries but the engine never consumes, kept whole
/// for callers that audit or forward bundles.
#[derive(Clone, Debug)]
pub struct UnrecognizedResource {
    pub resource_type: String,
    /// The entry's raw JSON payload, `resourceType` included.
    pub payload: serde_json::Value,
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = serde_json::Value::deserialize(deserializer)?;
        let resource_type = payload
            .get("resourceType")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| DeError::missing_field("resourceType"))?
            .to_string();

        Ok(match resource_type.as_str() {
            "Patient" => Resource::Patient(typed(payload)?),
            "Organization" => Resource::Organization(typed(payload)?),
            "Encounter" => Resource::Encounter(typed(payload)?),
            "Consent" => Resource::Consent(typed(payload)?),
            "Observation" => Resource::Observation(typed(payload)?),
            "QuestionnaireResponse" => Resource::QuestionnaireResponse(typed(payload)?),
            _ => Resource::Unrecognized(UnrecognizedResource {
                resource_type,
                payload,
            }),
        })
    }
}

/// Deserialises an already-buffered entry payload into its resource struct.
fn typed<T: DeserializeOwned, E: DeError>(payload: serde_json::Value) -> Result<T, E> {
    serde_json::from_value(payload).map_err(E::custom)
}

/// A decoded screening bundle.
#[derive(Clone, Debug)]
pub struct Bundle {
    id: Option<String>,
    entries: Vec<Resource>,
}

/// Bundle entries split by resource type: identity first, then context,
/// then the answer-bearing resources.
#[derive(Clone, Debug, Default)]
pub struct ResourceGroups {
    pub patients: Vec<PatientResource>,
    pub organizations: Vec<OrganizationResource>,
    pub encounters: Vec<EncounterResource>,
    pub consents: Vec<ConsentResource>,
    pub observations: Vec<ObservationResource>,
    pub questionnaire_responses: Vec<QuestionnaireResponseResource>,
    /// Entries whose resource type the engine does not consume, retained
    /// untouched.
    pub unrecognized: Vec<UnrecognizedResource>,
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Exact envelope shape, decoded before structural validation so that a
/// missing discriminator or entry list reports as malformed input rather
/// than a schema mismatch.
#[derive(Debug, Deserialize)]
struct BundleWire {
    #[serde(rename = "resourceType")]
    resource_type: Option<String>,

    id: Option<String>,

    entry: Option<Vec<EntryWire>>,
}

#[derive(Debug, Deserialize)]
struct EntryWire {
    resource: Resource,
}

impl Bundle {
    /// Decode a bundle from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path"
    /// (e.g. `entry[3].resource.code`) to the failing field when the JSON
    /// does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::InvalidInput`] if:
    /// - the resource type discriminator is missing or not `Bundle`,
    /// - the entry list is missing.
    ///
    /// Returns [`BundleError::Translation`] if the JSON is syntactically
    /// invalid, any entry lacks a resource type tag, or a field has an
    /// unexpected type.
    pub fn from_json(text: &str) -> BundleResult<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(text);

        let wire = match serde_path_to_error::deserialize::<_, BundleWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(BundleError::Translation(format!(
                    "Bundle schema mismatch at {path}: {source}"
                )));
            }
        };

        // Validate the structural markers
        match wire.resource_type.as_deref() {
            None => {
                return Err(BundleError::InvalidInput(
                    "Bundle is missing the resourceType discriminator".to_string(),
                ))
            }
            Some("Bundle") => {}
            Some(other) => {
                return Err(BundleError::InvalidInput(format!(
                    "Expected resourceType 'Bundle', got '{other}'"
                )))
            }
        }

        let entries = wire
            .entry
            .ok_or_else(|| {
                BundleError::InvalidInput("Bundle is missing the entry list".to_string())
            })?
            .into_iter()
            .map(|entry| entry.resource)
            .collect();

        Ok(Self {
            id: wire.id,
            entries,
        })
    }

    /// The bundle's own id, used for provenance in processing outcomes.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Number of entries carried by the bundle.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the bundle carries no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The decoded entries in bundle order.
    pub fn entries(&self) -> &[Resource] {
        &self.entries
    }

    /// Split the entries into per-type groups.
    ///
    /// Pure reshaping: the relative order of resources within each type
    /// matches their order in the bundle, and nothing is dropped.
    /// Unconsumed resource types land in the unrecognized group with their
    /// payloads intact.
    pub fn into_groups(self) -> ResourceGroups {
        let mut groups = ResourceGroups::default();

        for resource in self.entries {
            match resource {
                Resource::Patient(patient) => groups.patients.push(patient),
                Resource::Organization(organization) => groups.organizations.push(organization),
                Resource::Encounter(encounter) => groups.encounters.push(encounter),
                Resource::Consent(consent) => groups.consents.push(consent),
                Resource::Observation(observation) => groups.observations.push(observation),
                Resource::QuestionnaireResponse(response) => {
                    groups.questionnaire_responses.push(response)
                }
                Resource::Unrecognized(unrecognized) => groups.unrecognized.push(unrecognized),
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_and_groups_a_mixed_bundle() {
        let input = r#"{
            "resourceType": "Bundle",
            "id": "bundle-001",
            "type": "transaction",
            "entry": [
                {"resource": {"resourceType": "Patient", "id": "member-001"}},
                {"resource": {"resourceType": "Organization", "id": "org-001", "name": "SCN"}},
                {"resource": {"resourceType": "Observation", "id": "obs-1",
                              "code": {"coding": [{"code": "71802-3"}]}}},
                {"resource": {"resourceType": "Observation", "id": "obs-2",
                              "code": {"coding": [{"code": "96778-6"}]}}},
                {"resource": {"resourceType": "Provenance", "id": "prov-1"}}
            ]
        }"#;

        let bundle = Bundle::from_json(input).expect("decode bundle");
        assert_eq!(bundle.id(), Some("bundle-001"));
        assert_eq!(bundle.len(), 5);

        let groups = bundle.into_groups();
        assert_eq!(groups.patients.len(), 1);
        assert_eq!(groups.organizations.len(), 1);
        assert_eq!(groups.observations.len(), 2);
        assert_eq!(groups.unrecognized.len(), 1);
        assert_eq!(groups.unrecognized[0].resource_type, "Provenance");

        // Order within a type group follows bundle order
        assert_eq!(groups.observations[0].id.as_deref(), Some("obs-1"));
        assert_eq!(groups.observations[1].id.as_deref(), Some("obs-2"));
    }

    #[test]
    fn rejects_missing_discriminator() {
        let err = Bundle::from_json(r#"{"id": "x", "entry": []}"#)
            .expect_err("should reject missing resourceType");
        match err {
            BundleError::InvalidInput(msg) => {
                assert!(msg.contains("resourceType"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_discriminator() {
        let err = Bundle::from_json(r#"{"resourceType": "Patient", "id": "x", "entry": []}"#)
            .expect_err("should reject non-bundle resource");
        match err {
            BundleError::InvalidInput(msg) => {
                assert!(msg.contains("Bundle"));
                assert!(msg.contains("Patient"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_entry_list() {
        let err = Bundle::from_json(r#"{"resourceType": "Bundle", "id": "x"}"#)
            .expect_err("should reject missing entry list");
        match err {
            BundleError::InvalidInput(msg) => {
                assert!(msg.contains("entry"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_entry_without_resource_tag() {
        let input = r#"{
            "resourceType": "Bundle",
            "entry": [{"resource": {"id": "untagged"}}]
        }"#;

        let err = Bundle::from_json(input).expect_err("should reject untagged resource");
        match err {
            BundleError::Translation(msg) => {
                assert!(msg.contains("entry[0]"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn schema_mismatch_reports_a_path() {
        let input = r#"{
            "resourceType": "Bundle",
            "entry": [
                {"resource": {"resourceType": "Patient", "id": "m-1", "name": "Jane Doe"}}
            ]
        }"#;

        let err = Bundle::from_json(input).expect_err("should reject wrong field type");
        match err {
            BundleError::Translation(msg) => {
                assert!(msg.contains("entry[0]"), "missing path in: {msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_reports_translation_error() {
        let err = Bundle::from_json("{not json").expect_err("should reject invalid JSON");
        assert!(matches!(err, BundleError::Translation(_)));
    }

    #[test]
    fn empty_entry_list_is_structurally_valid() {
        let bundle = Bundle::from_json(r#"{"resourceType": "Bundle", "entry": []}"#)
            .expect("empty entry list decodes");
        assert!(bundle.is_empty());
        assert_eq!(bundle.into_groups().patients.len(), 0);
    }
}
