//! Persistence collaborator interface and the in-memory reference store.
//!
//! The engine never talks to a database directly; it consumes the lookup
//! and upsert operations defined here. [`InMemoryStore`] is the reference
//! implementation used by the CLI and tests. It keeps the identity
//! indexes a master-patient-index would maintain:
//!
//! - external id to subject, accreting aliases as bundles re-identify the
//!   same person under new source ids
//! - medical record number to subject
//! - lowercased (given name, family name, date of birth) to subject
//!
//! Only the external id index accretes. A record number or name an update
//! superseded is unindexed, so it stops matching new arrivals.
//!
//! Find-or-create is made effectively atomic per external id by the store
//! lock, which is what keeps two concurrent bundles for the same new
//! subject from creating duplicates.

use crate::organization::{Organization, OrganizationId};
use crate::subject::{Subject, SubjectId};
use chrono::NaiveDate;
use hrsn_types::ExternalId;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Failures signalled by the persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store cannot serve requests right now. Transient; the engine
    /// does not retry.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An upsert would bind an external id that already belongs to a
    /// different record.
    #[error("external id '{0}' already belongs to another record")]
    Conflict(ExternalId),
}

/// Lookup and upsert operations the engine requires of its persistence
/// collaborator.
pub trait ScreeningStore {
    /// Subject previously seen under this external id, including aliases.
    fn find_subject_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Subject>, StoreError>;

    /// Subject with an exactly matching medical record number.
    fn find_subject_by_mrn(&self, mrn: &str) -> Result<Option<Subject>, StoreError>;

    /// Subject matching the given demographics. Callers pass the name
    /// parts already lowercased; the match is exact on the lowered form.
    fn find_subject_by_name_and_dob(
        &self,
        first_name_lower: &str,
        last_name_lower: &str,
        date_of_birth: NaiveDate,
    ) -> Result<Option<Subject>, StoreError>;

    /// Organization previously created under this external id.
    fn find_organization_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Organization>, StoreError>;

    /// Writes a subject, keeping its internal id stable across updates.
    fn upsert_subject(&self, subject: Subject) -> Result<Subject, StoreError>;

    /// Writes an organization.
    fn upsert_organization(&self, organization: Organization)
        -> Result<Organization, StoreError>;
}

#[derive(Default)]
struct StoreInner {
    subjects: HashMap<SubjectId, Subject>,
    subjects_by_external_id: HashMap<ExternalId, SubjectId>,
    subjects_by_mrn: HashMap<String, SubjectId>,
    subjects_by_name_dob: HashMap<(String, String, NaiveDate), SubjectId>,
    organizations: HashMap<OrganizationId, Organization>,
    organizations_by_external_id: HashMap<ExternalId, OrganizationId>,
}

/// In-memory [`ScreeningStore`] with master-patient-index style lookups.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subjects currently held. Counts stay readable after a
    /// panic poisoned the lock.
    pub fn subject_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subjects
            .len()
    }

    /// Number of organizations currently held.
    pub fn organization_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .organizations
            .len()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

impl StoreInner {
    fn index_subject(&mut self, subject: &Subject) {
        // Aliases accrete: earlier external ids keep pointing at the same
        // subject, which is how a person re-identified under a second
        // accession stays resolvable by both ids.
        self.subjects_by_external_id
            .insert(subject.external_id.clone(), subject.id);

        if let Some(mrn) = &subject.mrn {
            self.subjects_by_mrn.insert(mrn.clone(), subject.id);
        }

        if let Some(key) = Self::name_dob_key(subject) {
            self.subjects_by_name_dob.insert(key, subject.id);
        }
    }

    /// Drops index keys the update retired. External id aliases stay; a
    /// superseded medical record number or name+DOB key must stop
    /// resolving to the subject. A key another subject has since claimed
    /// is left in place.
    fn unindex_superseded(&mut self, previous: &Subject, next: &Subject) {
        if previous.mrn != next.mrn {
            if let Some(mrn) = &previous.mrn {
                if self.subjects_by_mrn.get(mrn) == Some(&previous.id) {
                    self.subjects_by_mrn.remove(mrn);
                }
            }
        }

        let retired = Self::name_dob_key(previous);
        if retired != Self::name_dob_key(next) {
            if let Some(key) = retired {
                if self.subjects_by_name_dob.get(&key) == Some(&previous.id) {
                    self.subjects_by_name_dob.remove(&key);
                }
            }
        }
    }

    fn name_dob_key(subject: &Subject) -> Option<(String, String, NaiveDate)> {
        match (
            &subject.first_name,
            &subject.last_name,
            subject.date_of_birth,
        ) {
            (Some(first), Some(last), Some(dob)) => {
                Some((first.to_lowercase(), last.to_lowercase(), dob))
            }
            _ => None,
        }
    }
}

impl ScreeningStore for InMemoryStore {
    fn find_subject_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Subject>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .subjects_by_external_id
            .get(external_id)
            .and_then(|id| inner.subjects.get(id))
            .cloned())
    }

    fn find_subject_by_mrn(&self, mrn: &str) -> Result<Option<Subject>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .subjects_by_mrn
            .get(mrn)
            .and_then(|id| inner.subjects.get(id))
            .cloned())
    }

    fn find_subject_by_name_and_dob(
        &self,
        first_name_lower: &str,
        last_name_lower: &str,
        date_of_birth: NaiveDate,
    ) -> Result<Option<Subject>, StoreError> {
        let inner = self.lock()?;
        let key = (
            first_name_lower.to_string(),
            last_name_lower.to_string(),
            date_of_birth,
        );
        Ok(inner
            .subjects_by_name_dob
            .get(&key)
            .and_then(|id| inner.subjects.get(id))
            .cloned())
    }

    fn find_organization_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<Organization>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .organizations_by_external_id
            .get(external_id)
            .and_then(|id| inner.organizations.get(id))
            .cloned())
    }

    fn upsert_subject(&self, subject: Subject) -> Result<Subject, StoreError> {
        let mut inner = self.lock()?;

        if let Some(owner) = inner.subjects_by_external_id.get(&subject.external_id) {
            if *owner != subject.id {
                return Err(StoreError::Conflict(subject.external_id.clone()));
            }
        }

        if let Some(previous) = inner.subjects.get(&subject.id).cloned() {
            inner.unindex_superseded(&previous, &subject);
        }
        inner.index_subject(&subject);
        inner.subjects.insert(subject.id, subject.clone());
        Ok(subject)
    }

    fn upsert_organization(
        &self,
        organization: Organization,
    ) -> Result<Organization, StoreError> {
        let mut inner = self.lock()?;

        if let Some(owner) = inner
            .organizations_by_external_id
            .get(&organization.external_id)
        {
            if *owner != organization.id {
                return Err(StoreError::Conflict(organization.external_id.clone()));
            }
        }

        inner
            .organizations_by_external_id
            .insert(organization.external_id.clone(), organization.id);
        inner
            .organizations
            .insert(organization.id, organization.clone());
        Ok(organization)
    }
}
