//! QuestionnaireResponse resource wire model.
//!
//! Some screening platforms deliver the instrument as one
//! QuestionnaireResponse whose items carry the question codes as `linkId`
//! values, instead of one Observation per question. Both shapes feed the
//! same classifier.

use crate::datatypes::{Coding, Reference};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Wire representation of an inbound QuestionnaireResponse resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuestionnaireResponseResource {
    pub id: Option<String>,

    pub status: Option<String>,

    pub subject: Option<Reference>,

    pub authored: Option<String>,

    #[serde(default)]
    pub item: Vec<QuestionnaireItem>,
}

impl QuestionnaireResponseResource {
    /// The authoring instant, when it parses as RFC 3339.
    pub fn authored_time(&self) -> Option<DateTime<Utc>> {
        self.authored
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// One answered (or skipped) item within a QuestionnaireResponse.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuestionnaireItem {
    #[serde(rename = "linkId")]
    pub link_id: Option<String>,

    pub text: Option<String>,

    #[serde(default)]
    pub answer: Vec<ItemAnswer>,
}

/// One answer value in one of the wire forms the intake feeds use.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ItemAnswer {
    #[serde(rename = "valueCoding")]
    pub value_coding: Option<Coding>,

    #[serde(rename = "valueString")]
    pub value_string: Option<String>,

    #[serde(rename = "valueBoolean")]
    pub value_boolean: Option<bool>,

    #[serde(rename = "valueInteger")]
    pub value_integer: Option<i64>,
}

impl ItemAnswer {
    /// The coded answer, when the answer arrived as a coding.
    pub fn code(&self) -> Option<&str> {
        self.value_coding.as_ref().and_then(|c| c.code.as_deref())
    }

    /// Human-readable answer text across the wire forms.
    ///
    /// Codings fall back to their code when no display is sent; booleans
    /// read as `Yes`/`No`; integers as their decimal form.
    pub fn display_text(&self) -> Option<String> {
        if let Some(coding) = &self.value_coding {
            return coding
                .display
                .clone()
                .or_else(|| coding.code.clone());
        }
        if let Some(text) = &self.value_string {
            return Some(text.clone());
        }
        if let Some(flag) = self.value_boolean {
            return Some(if flag { "Yes" } else { "No" }.to_string());
        }
        self.value_integer.map(|value| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> QuestionnaireResponseResource {
        serde_json::from_str(
            r#"{
                "id": "qr-001",
                "status": "completed",
                "subject": {"reference": "Patient/member-001"},
                "authored": "2024-03-01T10:30:00Z",
                "item": [
                    {
                        "linkId": "95618-5",
                        "text": "How often does anyone physically hurt you",
                        "answer": [{"valueCoding": {"code": "LA10082-8", "display": "Sometimes"}}]
                    },
                    {
                        "linkId": "96780-2",
                        "answer": [{"valueBoolean": true}]
                    },
                    {
                        "linkId": "95614-4",
                        "answer": [{"valueInteger": 12}]
                    }
                ]
            }"#,
        )
        .expect("parse questionnaire response")
    }

    #[test]
    fn parses_authored_instant() {
        let response = sample_response();
        assert_eq!(
            response.authored_time().map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:30:00+00:00".to_string())
        );
    }

    #[test]
    fn answers_expose_each_wire_form() {
        let response = sample_response();

        let coded = &response.item[0].answer[0];
        assert_eq!(coded.code(), Some("LA10082-8"));
        assert_eq!(coded.display_text().as_deref(), Some("Sometimes"));

        let boolean = &response.item[1].answer[0];
        assert!(boolean.code().is_none());
        assert_eq!(boolean.display_text().as_deref(), Some("Yes"));

        let integer = &response.item[2].answer[0];
        assert_eq!(integer.value_integer, Some(12));
        assert_eq!(integer.display_text().as_deref(), Some("12"));
    }

    #[test]
    fn coding_without_display_falls_back_to_code() {
        let answer: ItemAnswer =
            serde_json::from_str(r#"{"valueCoding": {"code": "LA33-6"}}"#).unwrap();
        assert_eq!(answer.display_text().as_deref(), Some("LA33-6"));
    }
}
