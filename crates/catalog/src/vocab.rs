//! Intake vocabularies for encounter and organization type codes.

/// Label for the SNOMED code describing how a screening was administered.
///
/// Codes outside the mapping are passed through by callers as raw codes
/// rather than rejected, since intake feeds occasionally carry local codes.
pub fn encounter_type_label(code: &str) -> Option<&'static str> {
    match code {
        // History taking, self-administered, by computer terminal
        "23918007" => Some("self-administered"),
        // Direct questioning
        "405672008" => Some("direct-questioning"),
        _ => None,
    }
}

/// Label for the organization role code carried by intake bundles.
pub fn organization_type_label(code: &str) -> Option<&'static str> {
    match code {
        "Other" => Some("SCN Lead Entity"),
        "Cg" => Some("HRSN Service Provider"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_encounter_type_codes() {
        assert_eq!(encounter_type_label("23918007"), Some("self-administered"));
        assert_eq!(
            encounter_type_label("405672008"),
            Some("direct-questioning")
        );
        assert_eq!(encounter_type_label("99999999"), None);
    }

    #[test]
    fn maps_known_organization_type_codes() {
        assert_eq!(organization_type_label("Other"), Some("SCN Lead Entity"));
        assert_eq!(organization_type_label("Cg"), Some("HRSN Service Provider"));
        assert_eq!(organization_type_label("prov"), None);
    }
}
