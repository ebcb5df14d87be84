//! Patient resource wire model and extraction helpers.
//!
//! A screening bundle carries exactly one patient by contract; the engine
//! reads identity fields (external id, medical record number) and the
//! demographics it keeps on the subject record.

use crate::datatypes::{Address, HumanName, Identifier};
use chrono::NaiveDate;
use hrsn_types::ExternalId;
use serde::Deserialize;

/// Identifier type code marking a medical record number.
const MRN_TYPE_CODE: &str = "MR";

/// Wire representation of an inbound Patient resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatientResource {
    pub id: Option<String>,

    #[serde(default)]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub name: Vec<HumanName>,

    pub gender: Option<String>,

    #[serde(rename = "birthDate")]
    pub birth_date: Option<String>,

    #[serde(default)]
    pub address: Vec<Address>,
}

impl PatientResource {
    /// The external source id, validated as non-empty.
    pub fn external_id(&self) -> Option<ExternalId> {
        self.id.as_deref().and_then(|id| ExternalId::new(id).ok())
    }

    /// The medical record number, taken from the last identifier typed `MR`.
    ///
    /// Feeds occasionally repeat the identifier; the last occurrence wins,
    /// matching how repeated identifiers overwrite during intake.
    pub fn mrn(&self) -> Option<&str> {
        self.identifier
            .iter()
            .filter(|identifier| identifier.has_type_code(MRN_TYPE_CODE))
            .filter_map(|identifier| identifier.value.as_deref())
            .last()
    }

    /// Family name from the primary (first) name entry.
    pub fn family_name(&self) -> Option<&str> {
        self.name.first().and_then(|n| n.family.as_deref())
    }

    /// First given name from the primary name entry.
    pub fn given_name(&self) -> Option<&str> {
        self.name
            .first()
            .and_then(|n| n.given.first())
            .map(String::as_str)
    }

    /// Date of birth parsed from the `YYYY-MM-DD` wire form.
    ///
    /// An unparseable date is treated as absent rather than failing the
    /// bundle; the subject record simply carries no date of birth.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    /// The primary (first) address entry.
    pub fn primary_address(&self) -> Option<&Address> {
        self.address.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient() -> PatientResource {
        serde_json::from_str(
            r#"{
                "id": "member-001",
                "identifier": [
                    {
                        "type": {"coding": [{"code": "MB"}]},
                        "value": "plan-12345"
                    },
                    {
                        "type": {"coding": [{"code": "MR"}]},
                        "value": "MRN-777"
                    }
                ],
                "name": [
                    {"family": "Doe", "given": ["Jane", "Q"]},
                    {"family": "Smith", "given": ["Janie"]}
                ],
                "gender": "female",
                "birthDate": "1990-01-01",
                "address": [
                    {"line": ["1 Main St"], "city": "Albany", "state": "NY", "postalCode": "12207"}
                ]
            }"#,
        )
        .expect("parse patient")
    }

    #[test]
    fn extracts_identity_fields() {
        let patient = sample_patient();
        assert_eq!(
            patient.external_id().map(|id| id.as_str().to_string()),
            Some("member-001".to_string())
        );
        assert_eq!(patient.mrn(), Some("MRN-777"));
    }

    #[test]
    fn takes_the_first_name_entry() {
        let patient = sample_patient();
        assert_eq!(patient.family_name(), Some("Doe"));
        assert_eq!(patient.given_name(), Some("Jane"));
    }

    #[test]
    fn parses_birth_date() {
        let patient = sample_patient();
        assert_eq!(
            patient.birth_date(),
            NaiveDate::from_ymd_opt(1990, 1, 1)
        );
    }

    #[test]
    fn malformed_birth_date_reads_as_absent() {
        let patient = PatientResource {
            birth_date: Some("01/01/1990".to_string()),
            ..Default::default()
        };
        assert!(patient.birth_date().is_none());
    }

    #[test]
    fn last_mrn_identifier_wins() {
        let patient: PatientResource = serde_json::from_str(
            r#"{
                "id": "member-001",
                "identifier": [
                    {"type": {"coding": [{"code": "MR"}]}, "value": "MRN-OLD"},
                    {"type": {"coding": [{"code": "MR"}]}, "value": "MRN-NEW"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(patient.mrn(), Some("MRN-NEW"));
    }

    #[test]
    fn whitespace_id_reads_as_absent() {
        let patient = PatientResource {
            id: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(patient.external_id().is_none());
    }

    #[test]
    fn minimal_patient_has_no_identity() {
        let patient: PatientResource = serde_json::from_str(r#"{}"#).unwrap();
        assert!(patient.external_id().is_none());
        assert!(patient.mrn().is_none());
        assert!(patient.family_name().is_none());
    }
}
