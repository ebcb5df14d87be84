//! Processing outcomes returned to the caller.

use crate::encounter::Encounter;
use crate::organization::Organization;
use crate::session::ScreeningSession;
use crate::subject::Subject;
use serde::Serialize;

/// Everything one bundle produced, owned by the caller for persistence
/// and reporting.
#[derive(Clone, Debug, Serialize)]
pub struct ProcessingOutcome {
    pub subject: Subject,
    /// True when this bundle created the subject rather than resolving an
    /// existing one.
    pub subject_created: bool,
    pub organization: Option<Organization>,
    pub organization_created: bool,
    pub encounter: Option<Encounter>,
    pub session: ScreeningSession,
    /// Total entries carried by the bundle, consumed or not.
    pub resources_processed: usize,
    /// Answer-bearing items skipped because they are not screening
    /// questions.
    pub unclassified_items: usize,
    /// Responses classified as positive screens, matching the session's
    /// own count.
    pub positive_screens: usize,
}
