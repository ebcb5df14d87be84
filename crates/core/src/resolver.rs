//! Subject and organization identity resolution.
//!
//! Every bundle resolves to exactly one canonical subject. The resolver
//! runs the match chain in fixed order (source id, then medical record
//! number, then name plus date of birth) and creates the subject only
//! when every step misses, so reprocessing a bundle can never mint a
//! duplicate identity.

use crate::error::{EngineError, EngineResult};
use crate::organization::{Organization, OrganizationId};
use crate::store::ScreeningStore;
use crate::subject::{PostalAddress, Subject};
use hrsn_fhir::{PatientResource, ResourceGroups};

/// Resolves bundle identity resources against the store.
pub struct SubjectResolver<'a, S: ScreeningStore> {
    store: &'a S,
}

impl<'a, S: ScreeningStore> SubjectResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolve the bundle's patient to a canonical subject.
    ///
    /// Returns the subject and whether this bundle created it. When the
    /// bundle carries more than one patient, the first is taken and the
    /// rest are ignored with a warning.
    ///
    /// Demographics follow the latest bundle: name, date of birth, gender
    /// and address are rewritten wholesale on every resolve, including to
    /// absent when the bundle omits them. The medical record number is
    /// only rewritten when the bundle supplies one. The external id is
    /// rewritten to the incoming id; the store keeps earlier ids as
    /// aliases to the same subject.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingSubject`] when the bundle has no patient
    /// - [`EngineError::MissingExternalId`] when the patient has no usable id
    pub fn resolve_subject(&self, groups: &ResourceGroups) -> EngineResult<(Subject, bool)> {
        let patient = groups.patients.first().ok_or(EngineError::MissingSubject)?;
        if groups.patients.len() > 1 {
            tracing::warn!(
                "bundle carries {} patient resources; using the first",
                groups.patients.len()
            );
        }

        let external_id = patient
            .external_id()
            .ok_or(EngineError::MissingExternalId)?;

        if patient.birth_date.is_some() && patient.birth_date().is_none() {
            tracing::warn!(
                "birth date {:?} is not YYYY-MM-DD; treating as absent",
                patient.birth_date.as_deref().unwrap_or_default()
            );
        }

        let existing = self.match_subject(patient)?;
        let created = existing.is_none();
        let mut subject = existing.unwrap_or_else(|| Subject::new(external_id.clone()));

        subject.external_id = external_id;
        subject.first_name = patient.given_name().map(str::to_string);
        subject.last_name = patient.family_name().map(str::to_string);
        subject.date_of_birth = patient.birth_date();
        subject.gender = patient.gender.clone();
        subject.address = patient.primary_address().map(PostalAddress::from_wire);
        if let Some(mrn) = patient.mrn() {
            subject.mrn = Some(mrn.to_string());
        }

        let subject = self.store.upsert_subject(subject)?;
        if created {
            tracing::info!(
                "created subject {} for external id {}",
                subject.id,
                subject.external_id
            );
        } else {
            tracing::info!(
                "matched subject {} for external id {}",
                subject.id,
                subject.external_id
            );
        }
        Ok((subject, created))
    }

    /// Match chain: source id, then medical record number, then
    /// case-insensitive name plus date of birth.
    fn match_subject(&self, patient: &PatientResource) -> EngineResult<Option<Subject>> {
        if let Some(external_id) = patient.external_id() {
            if let Some(subject) = self.store.find_subject_by_external_id(&external_id)? {
                return Ok(Some(subject));
            }
        }

        if let Some(mrn) = patient.mrn() {
            if let Some(subject) = self.store.find_subject_by_mrn(mrn)? {
                return Ok(Some(subject));
            }
        }

        if let (Some(first), Some(last), Some(dob)) = (
            patient.given_name(),
            patient.family_name(),
            patient.birth_date(),
        ) {
            if let Some(subject) = self.store.find_subject_by_name_and_dob(
                &first.to_lowercase(),
                &last.to_lowercase(),
                dob,
            )? {
                return Ok(Some(subject));
            }
        }

        Ok(None)
    }

    /// Resolve the bundle's organization, if it carries one.
    ///
    /// Organizations are reference data: the first bundle to name an
    /// external id creates the record and later bundles reuse it without
    /// updates. An organization entry without a usable id is skipped with
    /// a warning rather than failing the bundle.
    pub fn resolve_organization(
        &self,
        groups: &ResourceGroups,
    ) -> EngineResult<Option<(Organization, bool)>> {
        let resource = match groups.organizations.first() {
            Some(resource) => resource,
            None => return Ok(None),
        };

        let external_id = match resource.external_id() {
            Some(id) => id,
            None => {
                tracing::warn!("organization entry has no usable id; skipping");
                return Ok(None);
            }
        };

        if let Some(existing) = self.store.find_organization_by_external_id(&external_id)? {
            return Ok(Some((existing, false)));
        }

        let organization = self.store.upsert_organization(Organization {
            id: OrganizationId::new(),
            external_id,
            name: resource.name.clone(),
            type_code: resource.type_code().map(str::to_string),
            npi: resource.npi().map(str::to_string),
            address: resource.primary_address().map(PostalAddress::from_wire),
        })?;
        tracing::info!(
            "created organization {} for external id {}",
            organization.id,
            organization.external_id
        );
        Ok(Some((organization, true)))
    }
}
