//! Shared FHIR datatypes used across resource wire models.
//!
//! Only the fields the engine reads are modelled; everything else an intake
//! feed attaches is ignored during deserialisation.

use serde::Deserialize;

/// A single code from a terminology system.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Coding {
    pub system: Option<String>,
    pub code: Option<String>,
    pub display: Option<String>,
}

/// A concept expressed as one or more codings plus optional free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CodeableConcept {
    #[serde(default)]
    pub coding: Vec<Coding>,
    pub text: Option<String>,
}

impl CodeableConcept {
    /// The first coding, which intake feeds treat as primary.
    pub fn first_coding(&self) -> Option<&Coding> {
        self.coding.first()
    }

    /// Code of the first coding, if any coding carries one.
    pub fn first_code(&self) -> Option<&str> {
        self.first_coding().and_then(|c| c.code.as_deref())
    }

    /// Display text of the first coding.
    pub fn first_display(&self) -> Option<&str> {
        self.first_coding().and_then(|c| c.display.as_deref())
    }

    /// All codes present across the codings, in order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.coding.iter().filter_map(|c| c.code.as_deref())
    }
}

/// A business identifier attached to a resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub id_type: Option<CodeableConcept>,
    pub system: Option<String>,
    pub value: Option<String>,
}

impl Identifier {
    /// True when any type coding carries the given code (for example `MR`
    /// for medical record numbers or `NPI` for provider identifiers).
    pub fn has_type_code(&self, code: &str) -> bool {
        self.id_type
            .as_ref()
            .map(|t| t.codes().any(|c| c == code))
            .unwrap_or(false)
    }
}

/// A human name split into family and given parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct HumanName {
    pub family: Option<String>,
    #[serde(default)]
    pub given: Vec<String>,
}

/// A postal address. Only the parts the domain model keeps are read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
}

/// A reference from one resource to another, e.g. `"Patient/abc-123"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Reference {
    pub reference: Option<String>,
}

impl Reference {
    /// The id part of a typed literal reference, when the prefix matches.
    pub fn id_for(&self, resource_type: &str) -> Option<&str> {
        let reference = self.reference.as_deref()?;
        let rest = reference.strip_prefix(resource_type)?;
        rest.strip_prefix('/')
    }
}

/// A time interval with optional open ends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Period {
    pub start: Option<String>,
    pub end: Option<String>,
}
