//! Encounter resource wire model and extraction helpers.

use crate::datatypes::{CodeableConcept, Period, Reference};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Wire representation of an inbound Encounter resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EncounterResource {
    pub id: Option<String>,

    pub status: Option<String>,

    #[serde(rename = "type", default)]
    pub encounter_type: Vec<CodeableConcept>,

    pub period: Option<Period>,

    pub subject: Option<Reference>,
}

impl EncounterResource {
    /// The raw encounter type code. The last coding across all type entries
    /// wins, matching intake overwrite order.
    pub fn type_code(&self) -> Option<&str> {
        self.encounter_type
            .iter()
            .flat_map(|concept| concept.codes())
            .last()
    }

    /// Start of the encounter period, when it parses as an RFC 3339 instant.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.period
            .as_ref()
            .and_then(|p| p.start.as_deref())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Raw start string of the encounter period, for feeds that send a bare
    /// date rather than a full instant.
    pub fn start_raw(&self) -> Option<&str> {
        self.period.as_ref().and_then(|p| p.start.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_type_and_period_start() {
        let encounter: EncounterResource = serde_json::from_str(
            r#"{
                "id": "enc-001",
                "status": "finished",
                "type": [{"coding": [{"system": "http://snomed.info/sct", "code": "23918007"}]}],
                "period": {"start": "2024-03-01T10:30:00Z"},
                "subject": {"reference": "Patient/member-001"}
            }"#,
        )
        .unwrap();

        assert_eq!(encounter.type_code(), Some("23918007"));
        assert_eq!(
            encounter.start_time().map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:30:00+00:00".to_string())
        );
    }

    #[test]
    fn bare_date_start_survives_as_raw() {
        let encounter: EncounterResource = serde_json::from_str(
            r#"{"id": "enc-002", "period": {"start": "2024-03-01"}}"#,
        )
        .unwrap();
        assert!(encounter.start_time().is_none());
        assert_eq!(encounter.start_raw(), Some("2024-03-01"));
    }
}
