//! Consent resource wire model.
//!
//! The engine reduces a Consent resource to a single boolean: whether the
//! subject permitted data sharing. That requires `status` to be `active`
//! and the provision type to be `permit`; anything else, including an
//! absent Consent resource, reads as consent not given.

use serde::Deserialize;

/// Wire representation of an inbound Consent resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConsentResource {
    pub id: Option<String>,

    pub status: Option<String>,

    pub provision: Option<Provision>,
}

/// The provision block of a Consent resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Provision {
    #[serde(rename = "type")]
    pub provision_type: Option<String>,
}

impl ConsentResource {
    /// True when this consent is active and permits sharing.
    pub fn permits(&self) -> bool {
        self.status.as_deref() == Some("active")
            && self
                .provision
                .as_ref()
                .and_then(|p| p.provision_type.as_deref())
                == Some("permit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_permit_grants_consent() {
        let consent: ConsentResource = serde_json::from_str(
            r#"{"id": "consent-001", "status": "active", "provision": {"type": "permit"}}"#,
        )
        .unwrap();
        assert!(consent.permits());
    }

    #[test]
    fn inactive_or_deny_withholds_consent() {
        let inactive: ConsentResource = serde_json::from_str(
            r#"{"status": "inactive", "provision": {"type": "permit"}}"#,
        )
        .unwrap();
        assert!(!inactive.permits());

        let deny: ConsentResource =
            serde_json::from_str(r#"{"status": "active", "provision": {"type": "deny"}}"#).unwrap();
        assert!(!deny.permits());

        let missing_provision: ConsentResource =
            serde_json::from_str(r#"{"status": "active"}"#).unwrap();
        assert!(!missing_provision.permits());
    }
}
